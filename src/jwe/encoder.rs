// Copyright 2020-2024 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

use zeroize::Zeroizing;

use crate::error::Error;
use crate::error::Result;
use crate::jwa::JwaRegistry;
use crate::jwe::JweAlgorithm;
use crate::jwe::JweEncryption;
use crate::jwe::JweHeader;
use crate::jwk::Jwk;
use crate::jwu;

/// A producer of compact JWE serializations.
pub struct Encoder<'a> {
  registry: &'a JwaRegistry,
}

impl<'a> Encoder<'a> {
  /// Creates a new `Encoder` dispatching through the given registry.
  pub fn new(registry: &'a JwaRegistry) -> Self {
    Self { registry }
  }

  /// Encrypts `plaintext` for the recipient `key` and returns the compact
  /// serialization.
  ///
  /// The header must carry `alg` and `enc`. The content encryption key is
  /// the symmetric key itself for direct encryption and fresh randomness
  /// otherwise; neither a CEK nor an IV is ever reused. The header is encoded
  /// after key wrapping since wrapping may write additional members, and the
  /// encoded form becomes the additional authenticated data.
  pub fn encode(&self, plaintext: &[u8], key: &Jwk, header: JweHeader) -> Result<String> {
    let mut header: JweHeader = header;

    let algorithm: JweAlgorithm = header
      .alg()
      .ok_or(Error::InvalidToken("missing alg"))?
      .parse()?;
    let encryption: JweEncryption = header
      .enc()
      .ok_or(Error::InvalidToken("missing enc"))?
      .parse()?;

    let wrapper = self.registry.key_wrap(algorithm)?;
    let encryptor = self.registry.content_encryption(encryption)?;

    let cek: Zeroizing<Vec<u8>> = if algorithm == JweAlgorithm::DIR {
      let k: &str = key
        .try_oct_params()
        .ok()
        .and_then(|params| params.k.as_deref())
        .ok_or(Error::InvalidKey("direct encryption requires an octet key"))?;
      let k: Zeroizing<Vec<u8>> = Zeroizing::new(jwu::decode_b64(k)?);
      if k.len() != encryptor.key_len() {
        return Err(Error::InvalidKey("invalid key length for direct encryption"));
      }
      k
    } else {
      Zeroizing::new(jwu::random_bytes(encryptor.key_len())?)
    };

    if let Some(kid) = key.kid() {
      header.set_kid(kid);
    }

    // Wrap first: AES GCM key wrapping writes `iv` and `tag` into the header.
    let encrypted_key: Vec<u8> = wrapper.wrap(&mut header, key, &cek)?;

    let encoded_header: String = jwu::encode_b64_json(&header)?;
    let aad: &[u8] = encoded_header.as_bytes();

    let (iv, ciphertext, tag): (Vec<u8>, Vec<u8>, Vec<u8>) = encryptor.encrypt(&cek, plaintext, aad)?;

    Ok(format!(
      "{}.{}.{}.{}.{}",
      encoded_header,
      jwu::encode_b64(encrypted_key),
      jwu::encode_b64(iv),
      jwu::encode_b64(ciphertext),
      jwu::encode_b64(tag)
    ))
  }
}
