// Copyright 2020-2024 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

use futures::Stream;
use futures::StreamExt;
use log::debug;
use zeroize::Zeroizing;

use crate::error::Error;
use crate::error::Result;
use crate::jwa::JwaRegistry;
use crate::jwe::JweAlgorithm;
use crate::jwe::JweEncryption;
use crate::jwe::JweHeader;
use crate::jwk::Jwk;
use crate::jwu;

/// A successfully decrypted JWE: the parsed header and the plaintext.
pub type Token = (JweHeader, Vec<u8>);

/// A consumer of compact JWE serializations.
pub struct Decoder<'a> {
  registry: &'a JwaRegistry,
}

impl<'a> Decoder<'a> {
  /// Creates a new `Decoder` dispatching through the given registry.
  pub fn new(registry: &'a JwaRegistry) -> Self {
    Self { registry }
  }

  /// Decrypts a compact JWE against a lazy sequence of candidate keys.
  ///
  /// Per-candidate unwrap and decrypt failures are silent; only the terminal
  /// outcome surfaces. The additional authenticated data is the received
  /// encoded header segment — re-encoding the parsed header is not an option
  /// because JSON member order would not survive.
  pub async fn decode<S>(&self, jwe: &str, keys: S) -> Result<Token>
  where
    S: Stream<Item = Jwk> + Unpin,
  {
    let segments: Vec<&str> = jwu::split_segments(jwe, 5)?;

    let header_bytes: Vec<u8> =
      jwu::decode_b64(segments[0]).map_err(|_| Error::InvalidToken("invalid base64url in JWE"))?;
    let encrypted_key: Vec<u8> =
      jwu::decode_b64(segments[1]).map_err(|_| Error::InvalidToken("invalid base64url in JWE"))?;
    let iv: Vec<u8> =
      jwu::decode_b64(segments[2]).map_err(|_| Error::InvalidToken("invalid base64url in JWE"))?;
    let ciphertext: Vec<u8> =
      jwu::decode_b64(segments[3]).map_err(|_| Error::InvalidToken("invalid base64url in JWE"))?;
    let tag: Vec<u8> =
      jwu::decode_b64(segments[4]).map_err(|_| Error::InvalidToken("invalid base64url in JWE"))?;

    let header: JweHeader = serde_json::from_slice(&header_bytes)?;

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

    let aad: &[u8] = segments[0].as_bytes();

    let mut keys: S = keys;

    while let Some(key) = keys.next().await {
      if let Some(expected) = header.kid() {
        if key.kid() != Some(expected) {
          continue;
        }
      }

      let cek: Option<Zeroizing<Vec<u8>>> = wrapper.try_unwrap(&header, &key, &encrypted_key, encryptor.key_len());
      let Some(cek) = cek else {
        continue;
      };

      if let Some(plaintext) = encryptor.try_decrypt(&cek, &iv, &ciphertext, &tag, aad) {
        debug!("jwe payload decrypted (alg = {algorithm}, enc = {encryption})");
        return Ok((header, plaintext));
      }
    }

    Err(Error::InvalidToken("failed to decrypt with any available key"))
  }
}
