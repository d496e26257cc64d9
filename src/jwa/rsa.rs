// Copyright 2020-2024 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

use rand::rngs::OsRng;
use rsa::traits::PublicKeyParts;
use rsa::BigUint;
use rsa::Oaep;
use rsa::Pkcs1v15Encrypt;
use rsa::Pkcs1v15Sign;
use rsa::Pss;
use rsa::RsaPrivateKey;
use rsa::RsaPublicKey;
use sha1::Sha1;
use sha2::Digest;
use sha2::Sha256;
use sha2::Sha384;
use sha2::Sha512;
use zeroize::Zeroizing;

use crate::error::Error;
use crate::error::Result;
use crate::jwa::JweKeyWrap;
use crate::jwa::JwsSigner;
use crate::jwe::JweAlgorithm;
use crate::jwe::JweHeader;
use crate::jwk::Jwk;
use crate::jwk::JwkParamsRsa;
use crate::jws::JwsAlgorithm;
use crate::jwu;

// RFC 7518 §3.3: a key of size 2048 bits or larger MUST be used.
const MIN_MODULUS_LEN: usize = 256;

fn biguint(value: &str) -> Result<BigUint> {
  jwu::decode_b64(value).map(|bytes| BigUint::from_bytes_be(&bytes))
}

pub(crate) fn public_key(jwk: &Jwk) -> Result<RsaPublicKey> {
  let params: &JwkParamsRsa = jwk.try_rsa_params()?;

  let n: BigUint = biguint(&params.n)?;
  let e: BigUint = biguint(&params.e)?;

  let key: RsaPublicKey = RsaPublicKey::new(n, e).map_err(|_| Error::InvalidKey("invalid rsa public key"))?;
  if key.size() < MIN_MODULUS_LEN {
    return Err(Error::WeakKey("rsa modulus below 2048 bits"));
  }
  Ok(key)
}

pub(crate) fn private_key(jwk: &Jwk) -> Result<RsaPrivateKey> {
  let params: &JwkParamsRsa = jwk.try_rsa_params()?;

  let d: &str = params.d.as_deref().ok_or(Error::InvalidKey("missing private key material"))?;
  let (p, q): (&str, &str) = params
    .p
    .as_deref()
    .zip(params.q.as_deref())
    .ok_or(Error::InvalidKey("rsa private key missing prime factors"))?;

  let key: RsaPrivateKey = RsaPrivateKey::from_components(
    biguint(&params.n)?,
    biguint(&params.e)?,
    biguint(d)?,
    vec![biguint(p)?, biguint(q)?],
  )
  .map_err(|_| Error::InvalidKey("invalid rsa private key"))?;

  if key.size() < MIN_MODULUS_LEN {
    return Err(Error::WeakKey("rsa modulus below 2048 bits"));
  }
  Ok(key)
}

/// RSASSA-PKCS1-v1_5 (`RS256/384/512`) and RSASSA-PSS (`PS256/384/512`).
///
/// PSS uses MGF1 with the same hash and a salt of the hash output length.
pub struct RsaSigner {
  alg: JwsAlgorithm,
}

impl RsaSigner {
  /// Creates a new `RsaSigner` for the given algorithm.
  pub fn new(alg: JwsAlgorithm) -> Self {
    debug_assert!(matches!(
      alg,
      JwsAlgorithm::RS256
        | JwsAlgorithm::RS384
        | JwsAlgorithm::RS512
        | JwsAlgorithm::PS256
        | JwsAlgorithm::PS384
        | JwsAlgorithm::PS512
    ));
    Self { alg }
  }
}

impl JwsSigner for RsaSigner {
  fn alg(&self) -> JwsAlgorithm {
    self.alg
  }

  fn sign(&self, key: Option<&Jwk>, message: &[u8]) -> Result<Vec<u8>> {
    let key: &Jwk = key.ok_or(Error::InvalidKey("missing key"))?;
    let key: RsaPrivateKey = private_key(key)?;

    match self.alg {
      JwsAlgorithm::RS256 => key.sign(Pkcs1v15Sign::new::<Sha256>(), &Sha256::digest(message)),
      JwsAlgorithm::RS384 => key.sign(Pkcs1v15Sign::new::<Sha384>(), &Sha384::digest(message)),
      JwsAlgorithm::RS512 => key.sign(Pkcs1v15Sign::new::<Sha512>(), &Sha512::digest(message)),
      JwsAlgorithm::PS256 => key.sign_with_rng(&mut OsRng, Pss::new::<Sha256>(), &Sha256::digest(message)),
      JwsAlgorithm::PS384 => key.sign_with_rng(&mut OsRng, Pss::new::<Sha384>(), &Sha384::digest(message)),
      JwsAlgorithm::PS512 => key.sign_with_rng(&mut OsRng, Pss::new::<Sha512>(), &Sha512::digest(message)),
      _ => return Err(Error::UnsupportedAlgorithm(self.alg.name().to_owned())),
    }
    .map_err(|_| Error::Cryptography("rsa signing failed"))
  }

  fn verify(&self, key: Option<&Jwk>, message: &[u8], signature: &[u8]) -> Result<()> {
    let key: &Jwk = key.ok_or(Error::InvalidKey("missing key"))?;
    let key: RsaPublicKey = public_key(key)?;

    match self.alg {
      JwsAlgorithm::RS256 => key.verify(Pkcs1v15Sign::new::<Sha256>(), &Sha256::digest(message), signature),
      JwsAlgorithm::RS384 => key.verify(Pkcs1v15Sign::new::<Sha384>(), &Sha384::digest(message), signature),
      JwsAlgorithm::RS512 => key.verify(Pkcs1v15Sign::new::<Sha512>(), &Sha512::digest(message), signature),
      JwsAlgorithm::PS256 => key.verify(Pss::new::<Sha256>(), &Sha256::digest(message), signature),
      JwsAlgorithm::PS384 => key.verify(Pss::new::<Sha384>(), &Sha384::digest(message), signature),
      JwsAlgorithm::PS512 => key.verify(Pss::new::<Sha512>(), &Sha512::digest(message), signature),
      _ => return Err(Error::UnsupportedAlgorithm(self.alg.name().to_owned())),
    }
    .map_err(|_| Error::InvalidToken("invalid signature"))
  }
}

/// RSAES key management (`RSA-OAEP`, `RSA-OAEP-256`, and the legacy
/// `RSA1_5`).
pub struct RsaKeyWrap {
  alg: JweAlgorithm,
}

impl RsaKeyWrap {
  /// Creates a new `RsaKeyWrap` for the given algorithm.
  pub fn new(alg: JweAlgorithm) -> Self {
    debug_assert!(matches!(
      alg,
      JweAlgorithm::RSA1_5 | JweAlgorithm::RSA_OAEP | JweAlgorithm::RSA_OAEP_256
    ));
    Self { alg }
  }
}

impl JweKeyWrap for RsaKeyWrap {
  fn alg(&self) -> JweAlgorithm {
    self.alg
  }

  fn wrap(&self, _header: &mut JweHeader, key: &Jwk, cek: &[u8]) -> Result<Vec<u8>> {
    let key: RsaPublicKey = public_key(key)?;

    match self.alg {
      JweAlgorithm::RSA_OAEP => key.encrypt(&mut OsRng, Oaep::new::<Sha1>(), cek),
      JweAlgorithm::RSA_OAEP_256 => key.encrypt(&mut OsRng, Oaep::new::<Sha256>(), cek),
      JweAlgorithm::RSA1_5 => key.encrypt(&mut OsRng, Pkcs1v15Encrypt, cek),
      _ => return Err(Error::UnsupportedAlgorithm(self.alg.name().to_owned())),
    }
    .map_err(|_| Error::Cryptography("rsa key wrap failed"))
  }

  fn try_unwrap(
    &self,
    _header: &JweHeader,
    key: &Jwk,
    encrypted_key: &[u8],
    cek_len: usize,
  ) -> Option<Zeroizing<Vec<u8>>> {
    let key: RsaPrivateKey = private_key(key).ok()?;

    let cek: Vec<u8> = match self.alg {
      JweAlgorithm::RSA_OAEP => key.decrypt(Oaep::new::<Sha1>(), encrypted_key).ok()?,
      JweAlgorithm::RSA_OAEP_256 => key.decrypt(Oaep::new::<Sha256>(), encrypted_key).ok()?,
      JweAlgorithm::RSA1_5 => {
        // A padding failure must be indistinguishable from any other
        // failure: substitute a random key of the expected length and let
        // the content authentication tag reject it.
        match key.decrypt(Pkcs1v15Encrypt, encrypted_key) {
          Ok(cek) if cek.len() == cek_len => cek,
          _ => jwu::random_bytes(cek_len).ok()?,
        }
      }
      _ => return None,
    };

    if cek.len() == cek_len {
      Some(Zeroizing::new(cek))
    } else {
      None
    }
  }
}
