// Copyright 2020-2024 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

use crate::error::Error;
use crate::error::Result;
use crate::jwa::JwsSigner;
use crate::jwk::Jwk;
use crate::jws::JwsAlgorithm;
use crate::jwu;

/// The unsecured `none` algorithm: an empty signature.
///
/// Never selected implicitly; the encoder only reaches it when the caller
/// passes no signing key, and validation policies may reject it outright.
pub struct NoneSigner;

impl JwsSigner for NoneSigner {
  fn alg(&self) -> JwsAlgorithm {
    JwsAlgorithm::NONE
  }

  fn sign(&self, key: Option<&Jwk>, _message: &[u8]) -> Result<Vec<u8>> {
    if key.is_some() {
      return Err(Error::AlgorithmMismatch);
    }
    Ok(Vec::new())
  }

  fn verify(&self, _key: Option<&Jwk>, _message: &[u8], signature: &[u8]) -> Result<()> {
    if jwu::constant_time_eq(signature, &[]) {
      Ok(())
    } else {
      Err(Error::InvalidToken("invalid signature"))
    }
  }
}
