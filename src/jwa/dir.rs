// Copyright 2020-2024 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

use zeroize::Zeroizing;

use crate::error::Result;
use crate::jwa::JweKeyWrap;
use crate::jwe::JweAlgorithm;
use crate::jwe::JweHeader;
use crate::jwk::Jwk;
use crate::jwu;

/// Direct use of a shared symmetric key (`dir`).
///
/// The content encryption key is the key itself; the encrypted key segment
/// of the compact serialization is empty.
pub struct DirectKeyWrap;

impl JweKeyWrap for DirectKeyWrap {
  fn alg(&self) -> JweAlgorithm {
    JweAlgorithm::DIR
  }

  fn wrap(&self, _header: &mut JweHeader, _key: &Jwk, _cek: &[u8]) -> Result<Vec<u8>> {
    Ok(Vec::new())
  }

  fn try_unwrap(
    &self,
    _header: &JweHeader,
    key: &Jwk,
    encrypted_key: &[u8],
    cek_len: usize,
  ) -> Option<Zeroizing<Vec<u8>>> {
    if !encrypted_key.is_empty() {
      return None;
    }

    let k: &str = key.try_oct_params().ok()?.k.as_deref()?;
    let cek: Zeroizing<Vec<u8>> = Zeroizing::new(jwu::decode_b64(k).ok()?);

    if cek.len() == cek_len {
      Some(cek)
    } else {
      None
    }
  }
}
