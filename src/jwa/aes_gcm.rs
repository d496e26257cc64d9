// Copyright 2020-2024 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

use aes::cipher::consts::U12;
use aes_gcm::aead::Aead;
use aes_gcm::aead::KeyInit;
use aes_gcm::aead::Payload;
use aes_gcm::Aes128Gcm;
use aes_gcm::Aes256Gcm;
use aes_gcm::AesGcm;
use aes_gcm::Nonce;
use zeroize::Zeroizing;

use crate::error::Error;
use crate::error::Result;
use crate::jwa::JweContentEncryption;
use crate::jwa::JweKeyWrap;
use crate::jwe::JweAlgorithm;
use crate::jwe::JweEncryption;
use crate::jwe::JweHeader;
use crate::jwk::Jwk;
use crate::jwu;

type Aes192Gcm = AesGcm<aes::Aes192, U12>;

const IV_LEN: usize = 12;
const TAG_LEN: usize = 16;

fn seal(key: &[u8], iv: &[u8], plaintext: &[u8], aad: &[u8]) -> Result<Vec<u8>> {
  let payload: Payload<'_, '_> = Payload { msg: plaintext, aad };

  match key.len() {
    16 => Aes128Gcm::new_from_slice(key)
      .map_err(|_| Error::Cryptography("aes-gcm key rejected"))?
      .encrypt(Nonce::from_slice(iv), payload),
    24 => Aes192Gcm::new_from_slice(key)
      .map_err(|_| Error::Cryptography("aes-gcm key rejected"))?
      .encrypt(Nonce::from_slice(iv), payload),
    32 => Aes256Gcm::new_from_slice(key)
      .map_err(|_| Error::Cryptography("aes-gcm key rejected"))?
      .encrypt(Nonce::from_slice(iv), payload),
    _ => return Err(Error::InvalidKey("invalid aes-gcm key length")),
  }
  .map_err(|_| Error::Cryptography("aes-gcm encryption failed"))
}

fn open(key: &[u8], iv: &[u8], ciphertext: &[u8], tag: &[u8], aad: &[u8]) -> Option<Vec<u8>> {
  if iv.len() != IV_LEN || tag.len() != TAG_LEN {
    return None;
  }

  let mut sealed: Vec<u8> = Vec::with_capacity(ciphertext.len() + tag.len());
  sealed.extend_from_slice(ciphertext);
  sealed.extend_from_slice(tag);

  let payload: Payload<'_, '_> = Payload { msg: &sealed, aad };

  match key.len() {
    16 => Aes128Gcm::new_from_slice(key).ok()?.decrypt(Nonce::from_slice(iv), payload),
    24 => Aes192Gcm::new_from_slice(key).ok()?.decrypt(Nonce::from_slice(iv), payload),
    32 => Aes256Gcm::new_from_slice(key).ok()?.decrypt(Nonce::from_slice(iv), payload),
    _ => return None,
  }
  .ok()
}

/// AES GCM content encryption (`A128GCM`, `A192GCM`, `A256GCM`): 96-bit IV,
/// 128-bit tag.
pub struct AesGcmEncryption {
  enc: JweEncryption,
}

impl AesGcmEncryption {
  /// Creates a new `AesGcmEncryption` for the given algorithm.
  pub fn new(enc: JweEncryption) -> Self {
    debug_assert!(matches!(
      enc,
      JweEncryption::A128GCM | JweEncryption::A192GCM | JweEncryption::A256GCM
    ));
    Self { enc }
  }
}

impl JweContentEncryption for AesGcmEncryption {
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

    let iv: Vec<u8> = jwu::random_bytes(IV_LEN)?;
    let mut ciphertext: Vec<u8> = seal(cek, &iv, plaintext, aad)?;
    let tag: Vec<u8> = ciphertext.split_off(ciphertext.len() - TAG_LEN);

    Ok((iv, ciphertext, tag))
  }

  fn try_decrypt(&self, cek: &[u8], iv: &[u8], ciphertext: &[u8], tag: &[u8], aad: &[u8]) -> Option<Vec<u8>> {
    if cek.len() != self.key_len() {
      return None;
    }
    open(cek, iv, ciphertext, tag, aad)
  }
}

/// AES GCM key wrapping (`A128GCMKW`, `A192GCMKW`, `A256GCMKW`).
///
/// The wrapping IV and tag travel in the protected header as the `iv` and
/// `tag` members ([RFC 7518 §4.7](https://tools.ietf.org/html/rfc7518#section-4.7)).
pub struct AesGcmKeyWrap {
  alg: JweAlgorithm,
}

impl AesGcmKeyWrap {
  /// Creates a new `AesGcmKeyWrap` for the given algorithm.
  pub fn new(alg: JweAlgorithm) -> Self {
    debug_assert!(matches!(
      alg,
      JweAlgorithm::A128GCMKW | JweAlgorithm::A192GCMKW | JweAlgorithm::A256GCMKW
    ));
    Self { alg }
  }

  const fn key_len(&self) -> usize {
    match self.alg {
      JweAlgorithm::A192GCMKW => 24,
      JweAlgorithm::A256GCMKW => 32,
      _ => 16,
    }
  }

  fn key_bytes(&self, key: &Jwk) -> Result<Zeroizing<Vec<u8>>> {
    let k: &str = key
      .try_oct_params()?
      .k
      .as_deref()
      .ok_or(Error::InvalidKey("missing symmetric key material"))?;

    let bytes: Zeroizing<Vec<u8>> = Zeroizing::new(jwu::decode_b64(k)?);
    if bytes.len() != self.key_len() {
      return Err(Error::InvalidKey("invalid key length for key wrapping"));
    }
    Ok(bytes)
  }
}

impl JweKeyWrap for AesGcmKeyWrap {
  fn alg(&self) -> JweAlgorithm {
    self.alg
  }

  fn wrap(&self, header: &mut JweHeader, key: &Jwk, cek: &[u8]) -> Result<Vec<u8>> {
    let kek: Zeroizing<Vec<u8>> = self.key_bytes(key)?;

    let iv: Vec<u8> = jwu::random_bytes(IV_LEN)?;
    let mut ciphertext: Vec<u8> = seal(&kek, &iv, cek, &[])?;
    let tag: Vec<u8> = ciphertext.split_off(ciphertext.len() - TAG_LEN);

    header.set_iv(jwu::encode_b64(&iv));
    header.set_tag(jwu::encode_b64(&tag));

    Ok(ciphertext)
  }

  fn try_unwrap(
    &self,
    header: &JweHeader,
    key: &Jwk,
    encrypted_key: &[u8],
    cek_len: usize,
  ) -> Option<Zeroizing<Vec<u8>>> {
    let kek: Zeroizing<Vec<u8>> = self.key_bytes(key).ok()?;

    let iv: Vec<u8> = jwu::decode_b64(header.iv()?).ok()?;
    let tag: Vec<u8> = jwu::decode_b64(header.tag()?).ok()?;

    let cek: Zeroizing<Vec<u8>> = Zeroizing::new(open(&kek, &iv, encrypted_key, &tag, &[])?);

    if cek.len() == cek_len {
      Some(cek)
    } else {
      None
    }
  }
}
