// Copyright 2020-2024 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

use futures::Stream;
use futures::StreamExt;
use log::debug;

use crate::error::Error;
use crate::error::Result;
use crate::jwa::JwaRegistry;
use crate::jwk::Jwk;
use crate::jws::JwsAlgorithm;
use crate::jws::JwsHeader;
use crate::jwu;

/// A successfully verified JWS.
#[derive(Clone, Debug)]
pub struct Token {
  /// The protected header.
  pub header: JwsHeader,
  /// The raw claims bytes.
  pub claims: Vec<u8>,
}

/// A consumer of compact JWS serializations.
pub struct Decoder<'a> {
  registry: &'a JwaRegistry,
}

impl<'a> Decoder<'a> {
  /// Creates a new `Decoder` dispatching through the given registry.
  pub fn new(registry: &'a JwaRegistry) -> Self {
    Self { registry }
  }

  /// Verifies a compact JWS against a lazy sequence of candidate keys.
  ///
  /// Candidates are tried in the order yielded; the first key that verifies
  /// wins and the remainder of the sequence is never polled. When the header
  /// names a `kid`, only candidates with that exact identifier are tried.
  pub async fn decode<S>(&self, jws: &str, keys: S) -> Result<Token>
  where
    S: Stream<Item = Jwk> + Unpin,
  {
    let segments: Vec<&str> = jwu::split_segments(jws, 3)?;

    let header: JwsHeader =
      jwu::decode_b64_json(segments[0]).map_err(|_| Error::InvalidToken("invalid base64url in JWS"))?;

    let algorithm: JwsAlgorithm = header
      .alg()
      .ok_or(Error::InvalidToken("missing alg"))?
      .parse()?;

    let signature: Vec<u8> =
      jwu::decode_b64(segments[2]).map_err(|_| Error::InvalidToken("invalid signature encoding"))?;

    let claims: Vec<u8> =
      jwu::decode_b64(segments[1]).map_err(|_| Error::InvalidToken("invalid base64url in JWS"))?;

    // The signing input is the received bytes, exactly as they appear on the
    // wire.
    let message: &[u8] = jws[..segments[0].len() + 1 + segments[1].len()].as_bytes();

    let signer = self.registry.signer(algorithm)?;

    if algorithm == JwsAlgorithm::NONE {
      signer.verify(None, message, &signature)?;
      return Ok(Token { header, claims });
    }

    let mut keys: S = keys;
    let mut key_found: bool = false;

    while let Some(key) = keys.next().await {
      if let Some(expected) = header.kid() {
        if key.kid() != Some(expected) {
          continue;
        }
      }
      key_found = true;

      if signer.verify(Some(&key), message, &signature).is_ok() {
        debug!("jws signature verified (alg = {algorithm})");
        return Ok(Token { header, claims });
      }
    }

    if key_found {
      Err(Error::InvalidToken("invalid signature"))
    } else {
      Err(Error::InvalidToken("no signing keys found"))
    }
  }
}
