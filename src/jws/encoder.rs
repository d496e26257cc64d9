// Copyright 2020-2024 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

use crate::error::Error;
use crate::error::Result;
use crate::jwa::JwaRegistry;
use crate::jwk::Jwk;
use crate::jws::JwsAlgorithm;
use crate::jws::JwsHeader;
use crate::jwu;

/// A producer of compact JWS serializations.
pub struct Encoder<'a> {
  registry: &'a JwaRegistry,
}

impl<'a> Encoder<'a> {
  /// Creates a new `Encoder` dispatching through the given registry.
  pub fn new(registry: &'a JwaRegistry) -> Self {
    Self { registry }
  }

  /// Signs `claims` under `header` and returns the compact serialization.
  ///
  /// The key parameter is authoritative: without a key the token is encoded
  /// with the `none` algorithm regardless of the header, and with a key a
  /// header requesting `none` is rejected. When both the key and the header
  /// carry an algorithm they must agree.
  pub fn encode(&self, claims: &[u8], header: &JwsHeader, key: Option<&Jwk>) -> Result<String> {
    let mut header: JwsHeader = header.clone();

    let algorithm: JwsAlgorithm = resolve_algorithm(&mut header, key)?;
    header.set_alg(algorithm);

    if let Some(kid) = key.and_then(Jwk::kid) {
      header.set_kid(kid);
    }

    let encoded_header: String = jwu::encode_b64_json(&header)?;
    let encoded_claims: String = jwu::encode_b64(claims);
    let message: Vec<u8> = jwu::create_message(&encoded_header, &encoded_claims);

    let signature: Vec<u8> = self.registry.signer(algorithm)?.sign(key, &message)?;

    Ok(format!(
      "{}.{}.{}",
      encoded_header,
      encoded_claims,
      jwu::encode_b64(signature)
    ))
  }
}

/// Reconciles the effective signing algorithm from the key and the header.
fn resolve_algorithm(header: &mut JwsHeader, key: Option<&Jwk>) -> Result<JwsAlgorithm> {
  let Some(key) = key else {
    // No key forces the unsecured algorithm; a stale header selection is
    // overridden and its key reference cleared.
    if header.alg().is_some_and(|alg| alg != "none") {
      header.remove("alg");
      header.remove("kid");
    }
    return Ok(JwsAlgorithm::NONE);
  };

  let key_alg: Option<JwsAlgorithm> = key.alg().map(str::parse).transpose()?;
  let header_alg: Option<JwsAlgorithm> = header.alg().map(str::parse).transpose()?;

  if header_alg == Some(JwsAlgorithm::NONE) {
    return Err(Error::AlgorithmMismatch);
  }

  match (key_alg, header_alg) {
    (Some(from_key), Some(from_header)) if from_key != from_header => Err(Error::AlgorithmMismatch),
    (Some(algorithm), _) | (None, Some(algorithm)) => Ok(algorithm),
    // Nothing selects an algorithm: the effective value would be `none`,
    // which is incompatible with a present key.
    (None, None) => Err(Error::AlgorithmMismatch),
  }
}
