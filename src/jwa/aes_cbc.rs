// Copyright 2020-2024 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

use aes::cipher::block_padding::Pkcs7;
use aes::cipher::BlockDecryptMut;
use aes::cipher::BlockEncryptMut;
use aes::cipher::KeyIvInit;
use hmac::Hmac;
use hmac::Mac;
use sha2::Sha256;
use sha2::Sha384;
use sha2::Sha512;

use crate::error::Error;
use crate::error::Result;
use crate::jwa::JweContentEncryption;
use crate::jwe::JweEncryption;
use crate::jwu;

/// AES_CBC_HMAC_SHA2 authenticated encryption
/// ([RFC 7518 §5.2](https://tools.ietf.org/html/rfc7518#section-5.2)).
///
/// The content encryption key is split into MAC_KEY ‖ ENC_KEY halves. The
/// authentication tag is the left half of
/// `HMAC(MAC_KEY, AAD || IV || ciphertext || AL)` where AL is the 64-bit
/// big-endian bit-length of the AAD.
pub struct AesCbcHmacEncryption {
  enc: JweEncryption,
}

impl AesCbcHmacEncryption {
  /// Creates a new `AesCbcHmacEncryption` for the given algorithm.
  pub fn new(enc: JweEncryption) -> Self {
    debug_assert!(matches!(
      enc,
      JweEncryption::A128CBC_HS256 | JweEncryption::A192CBC_HS384 | JweEncryption::A256CBC_HS512
    ));
    Self { enc }
  }

  const fn tag_len(&self) -> usize {
    self.enc.key_len() / 2
  }

  fn compute_tag(&self, mac_key: &[u8], aad: &[u8], iv: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>> {
    let al: [u8; 8] = ((aad.len() as u64) * 8).to_be_bytes();

    macro_rules! compute {
      ($digest:ty) => {{
        let mut mac: Hmac<$digest> =
          Hmac::new_from_slice(mac_key).map_err(|_| Error::Cryptography("hmac key rejected"))?;
        mac.update(aad);
        mac.update(iv);
        mac.update(ciphertext);
        mac.update(&al);
        Ok(mac.finalize().into_bytes()[..self.tag_len()].to_vec())
      }};
    }

    match self.enc {
      JweEncryption::A128CBC_HS256 => compute!(Sha256),
      JweEncryption::A192CBC_HS384 => compute!(Sha384),
      JweEncryption::A256CBC_HS512 => compute!(Sha512),
      _ => Err(Error::UnsupportedAlgorithm(self.enc.name().to_owned())),
    }
  }
}

impl JweContentEncryption for AesCbcHmacEncryption {
  fn enc(&self) -> JweEncryption {
    self.enc
  }

  fn key_len(&self) -> usize {
    self.enc.key_len()
  }

  fn encrypt(&self, cek: &[u8], plaintext: &[u8], aad: &[u8]) -> Result<(Vec<u8>, Vec<u8>, Vec<u8>)> {
    if cek.len() != self.key_len() {
      return Err(Error::InvalidKey("invalid content encryption key length"));
    }
    let (mac_key, enc_key): (&[u8], &[u8]) = cek.split_at(cek.len() / 2);

    let iv: Vec<u8> = jwu::random_bytes(16)?;

    macro_rules! encrypt {
      ($cipher:ty) => {
        cbc::Encryptor::<$cipher>::new_from_slices(enc_key, &iv)
          .map_err(|_| Error::Cryptography("aes-cbc encryption failed"))?
          .encrypt_padded_vec_mut::<Pkcs7>(plaintext)
      };
    }

    let ciphertext: Vec<u8> = match self.enc {
      JweEncryption::A128CBC_HS256 => encrypt!(aes::Aes128),
      JweEncryption::A192CBC_HS384 => encrypt!(aes::Aes192),
      JweEncryption::A256CBC_HS512 => encrypt!(aes::Aes256),
      _ => return Err(Error::UnsupportedAlgorithm(self.enc.name().to_owned())),
    };

    let tag: Vec<u8> = self.compute_tag(mac_key, aad, &iv, &ciphertext)?;

    Ok((iv, ciphertext, tag))
  }

  fn try_decrypt(&self, cek: &[u8], iv: &[u8], ciphertext: &[u8], tag: &[u8], aad: &[u8]) -> Option<Vec<u8>> {
    if cek.len() != self.key_len() || iv.len() != 16 {
      return None;
    }
    let (mac_key, enc_key): (&[u8], &[u8]) = cek.split_at(cek.len() / 2);

    // Authenticate before any unpadding is attempted.
    let expected: Vec<u8> = self.compute_tag(mac_key, aad, iv, ciphertext).ok()?;
    if !jwu::constant_time_eq(tag, &expected) {
      return None;
    }

    macro_rules! decrypt {
      ($cipher:ty) => {
        cbc::Decryptor::<$cipher>::new_from_slices(enc_key, iv)
          .ok()?
          .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
          .ok()
      };
    }

    match self.enc {
      JweEncryption::A128CBC_HS256 => decrypt!(aes::Aes128),
      JweEncryption::A192CBC_HS384 => decrypt!(aes::Aes192),
      JweEncryption::A256CBC_HS512 => decrypt!(aes::Aes256),
      _ => None,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_roundtrip_and_tamper() {
    for enc in [
      JweEncryption::A128CBC_HS256,
      JweEncryption::A192CBC_HS384,
      JweEncryption::A256CBC_HS512,
    ] {
      let encryption: AesCbcHmacEncryption = AesCbcHmacEncryption::new(enc);
      let cek: Vec<u8> = jwu::random_bytes(enc.key_len()).unwrap();

      let (iv, ciphertext, tag) = encryption.encrypt(&cek, b"plaintext", b"aad").unwrap();
      assert_eq!(iv.len(), 16);
      assert_eq!(ciphertext.len() % 16, 0);
      assert_eq!(tag.len(), enc.key_len() / 2);
      assert_eq!(
        encryption.try_decrypt(&cek, &iv, &ciphertext, &tag, b"aad").unwrap(),
        b"plaintext"
      );

      // A different AAD must fail authentication.
      assert!(encryption.try_decrypt(&cek, &iv, &ciphertext, &tag, b"AAD").is_none());

      let mut tampered: Vec<u8> = ciphertext.clone();
      tampered[0] ^= 1;
      assert!(encryption.try_decrypt(&cek, &iv, &tampered, &tag, b"aad").is_none());

      let mut truncated: Vec<u8> = tag.clone();
      truncated.pop();
      assert!(encryption.try_decrypt(&cek, &iv, &ciphertext, &truncated, b"aad").is_none());
    }
  }

  #[test]
  fn test_wrong_key_length_is_rejected() {
    let encryption: AesCbcHmacEncryption = AesCbcHmacEncryption::new(JweEncryption::A128CBC_HS256);
    assert!(encryption.encrypt(&[0; 16], b"plaintext", b"aad").is_err());
  }
}
