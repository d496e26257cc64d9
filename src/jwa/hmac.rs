// Copyright 2020-2024 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

use hmac::Hmac;
use hmac::Mac;
use sha2::Sha256;
use sha2::Sha384;
use sha2::Sha512;
use zeroize::Zeroizing;

use crate::error::Error;
use crate::error::Result;
use crate::jwa::JwsSigner;
use crate::jwk::Jwk;
use crate::jws::JwsAlgorithm;
use crate::jwu;

/// HMAC with SHA-2 (`HS256`, `HS384`, `HS512`).
pub struct HmacSigner {
  alg: JwsAlgorithm,
}

impl HmacSigner {
  /// Creates a new `HmacSigner` for the given algorithm.
  pub fn new(alg: JwsAlgorithm) -> Self {
    debug_assert!(matches!(
      alg,
      JwsAlgorithm::HS256 | JwsAlgorithm::HS384 | JwsAlgorithm::HS512
    ));
    Self { alg }
  }

  const fn hash_len(&self) -> usize {
    match self.alg {
      JwsAlgorithm::HS384 => 48,
      JwsAlgorithm::HS512 => 64,
      _ => 32,
    }
  }

  /// Extracts the shared secret, enforcing the RFC 7518 §3.2 minimum length.
  fn key_bytes(&self, key: Option<&Jwk>) -> Result<Zeroizing<Vec<u8>>> {
    let key: &Jwk = key.ok_or(Error::InvalidKey("missing key"))?;
    let k: &str = key
      .try_oct_params()?
      .k
      .as_deref()
      .ok_or(Error::InvalidKey("missing symmetric key material"))?;

    let bytes: Zeroizing<Vec<u8>> = Zeroizing::new(jwu::decode_b64(k)?);
    if bytes.len() < self.hash_len() {
      return Err(Error::WeakKey("hmac key shorter than hash output"));
    }
    Ok(bytes)
  }

  fn mac(&self, key: &[u8], message: &[u8]) -> Result<Vec<u8>> {
    macro_rules! compute {
      ($digest:ty) => {{
        let mut mac: Hmac<$digest> =
          Hmac::new_from_slice(key).map_err(|_| Error::Cryptography("hmac key rejected"))?;
        mac.update(message);
        Ok(mac.finalize().into_bytes().to_vec())
      }};
    }

    match self.alg {
      JwsAlgorithm::HS256 => compute!(Sha256),
      JwsAlgorithm::HS384 => compute!(Sha384),
      JwsAlgorithm::HS512 => compute!(Sha512),
      _ => Err(Error::UnsupportedAlgorithm(self.alg.name().to_owned())),
    }
  }
}

impl JwsSigner for HmacSigner {
  fn alg(&self) -> JwsAlgorithm {
    self.alg
  }

  fn sign(&self, key: Option<&Jwk>, message: &[u8]) -> Result<Vec<u8>> {
    let key: Zeroizing<Vec<u8>> = self.key_bytes(key)?;
    self.mac(&key, message)
  }

  fn verify(&self, key: Option<&Jwk>, message: &[u8], signature: &[u8]) -> Result<()> {
    let key: Zeroizing<Vec<u8>> = self.key_bytes(key)?;
    let expected: Zeroizing<Vec<u8>> = Zeroizing::new(self.mac(&key, message)?);

    if jwu::constant_time_eq(signature, &expected) {
      Ok(())
    } else {
      Err(Error::InvalidToken("invalid signature"))
    }
  }
}
