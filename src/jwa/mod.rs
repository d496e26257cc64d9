// Copyright 2020-2024 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

//! JSON Web Algorithms ([RFC 7518](https://tools.ietf.org/html/rfc7518)).
//!
//! This module is the single place where cryptographic primitives are named:
//! everything above it dispatches through the [`JwaRegistry`].

mod aes_cbc;
mod aes_gcm;
mod dir;
mod ecdsa;
mod hmac;
mod none;
mod registry;
mod rsa;

pub use self::aes_cbc::AesCbcHmacEncryption;
pub use self::aes_gcm::AesGcmEncryption;
pub use self::aes_gcm::AesGcmKeyWrap;
pub use self::dir::DirectKeyWrap;
pub use self::ecdsa::EcdsaSigner;
pub use self::hmac::HmacSigner;
pub use self::none::NoneSigner;
pub use self::registry::JwaRegistry;
pub use self::registry::JwaRegistryBuilder;
pub use self::rsa::RsaKeyWrap;
pub use self::rsa::RsaSigner;

use zeroize::Zeroizing;

use crate::error::Result;
use crate::jwe::JweAlgorithm;
use crate::jwe::JweEncryption;
use crate::jwe::JweHeader;
use crate::jwk::Jwk;
use crate::jws::JwsAlgorithm;

/// A JWS signature algorithm implementation.
pub trait JwsSigner: Send + Sync {
  /// The algorithm this implementation answers for.
  fn alg(&self) -> JwsAlgorithm;

  /// Signs `message` with `key`, returning the raw signature bytes.
  fn sign(&self, key: Option<&Jwk>, message: &[u8]) -> Result<Vec<u8>>;

  /// Verifies `signature` over `message` with `key`.
  fn verify(&self, key: Option<&Jwk>, message: &[u8], signature: &[u8]) -> Result<()>;
}

/// A JWE key management algorithm implementation.
pub trait JweKeyWrap: Send + Sync {
  /// The algorithm this implementation answers for.
  fn alg(&self) -> JweAlgorithm;

  /// Wraps the content encryption key for the recipient `key`.
  ///
  /// Wrapping may write additional members into the header; callers must
  /// encode the header only afterwards.
  fn wrap(&self, header: &mut JweHeader, key: &Jwk, cek: &[u8]) -> Result<Vec<u8>>;

  /// Attempts to recover a content encryption key of `cek_len` bytes.
  ///
  /// Failure is deliberately silent: the caller moves on to the next
  /// candidate key without learning why this one was rejected.
  fn try_unwrap(
    &self,
    header: &JweHeader,
    key: &Jwk,
    encrypted_key: &[u8],
    cek_len: usize,
  ) -> Option<Zeroizing<Vec<u8>>>;
}

/// A JWE content encryption algorithm implementation.
pub trait JweContentEncryption: Send + Sync {
  /// The encryption algorithm this implementation answers for.
  fn enc(&self) -> JweEncryption;

  /// The required content encryption key size in bytes.
  fn key_len(&self) -> usize;

  /// Encrypts `plaintext`, returning `(iv, ciphertext, tag)`.
  fn encrypt(&self, cek: &[u8], plaintext: &[u8], aad: &[u8]) -> Result<(Vec<u8>, Vec<u8>, Vec<u8>)>;

  /// Attempts authenticated decryption; failure is silent.
  fn try_decrypt(&self, cek: &[u8], iv: &[u8], ciphertext: &[u8], tag: &[u8], aad: &[u8]) -> Option<Vec<u8>>;
}
