// Copyright 2020-2024 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

use core::fmt;
use core::fmt::Display;
use core::fmt::Formatter;
use core::str::FromStr;

use serde::Deserialize;
use serde::Serialize;

use crate::error::Error;

/// Supported algorithms for the JSON Web Encryption `enc` claim.
///
/// [More Info](https://www.iana.org/assignments/jose/jose.xhtml#web-signature-encryption-algorithms)
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[allow(non_camel_case_types)]
pub enum JweEncryption {
  /// AES_128_CBC_HMAC_SHA_256 authenticated encryption
  #[serde(rename = "A128CBC-HS256")]
  A128CBC_HS256,
  /// AES_192_CBC_HMAC_SHA_384 authenticated encryption
  #[serde(rename = "A192CBC-HS384")]
  A192CBC_HS384,
  /// AES_256_CBC_HMAC_SHA_512 authenticated encryption
  #[serde(rename = "A256CBC-HS512")]
  A256CBC_HS512,
  /// AES GCM using 128-bit key
  A128GCM,
  /// AES GCM using 192-bit key
  A192GCM,
  /// AES GCM using 256-bit key
  A256GCM,
}

impl JweEncryption {
  /// All supported algorithms.
  pub const ALL: &'static [Self] = &[
    Self::A128CBC_HS256,
    Self::A192CBC_HS384,
    Self::A256CBC_HS512,
    Self::A128GCM,
    Self::A192GCM,
    Self::A256GCM,
  ];

  /// Returns the JWE encryption algorithm as a `str` slice.
  pub const fn name(self) -> &'static str {
    match self {
      Self::A128CBC_HS256 => "A128CBC-HS256",
      Self::A192CBC_HS384 => "A192CBC-HS384",
      Self::A256CBC_HS512 => "A256CBC-HS512",
      Self::A128GCM => "A128GCM",
      Self::A192GCM => "A192GCM",
      Self::A256GCM => "A256GCM",
    }
  }

  /// Returns the required content encryption key size in bytes.
  pub const fn key_len(self) -> usize {
    match self {
      Self::A128CBC_HS256 => 32,
      Self::A192CBC_HS384 => 48,
      Self::A256CBC_HS512 => 64,
      Self::A128GCM => 16,
      Self::A192GCM => 24,
      Self::A256GCM => 32,
    }
  }
}

impl FromStr for JweEncryption {
  type Err = Error;

  fn from_str(string: &str) -> Result<Self, Self::Err> {
    match string {
      "A128CBC-HS256" => Ok(Self::A128CBC_HS256),
      "A192CBC-HS384" => Ok(Self::A192CBC_HS384),
      "A256CBC-HS512" => Ok(Self::A256CBC_HS512),
      "A128GCM" => Ok(Self::A128GCM),
      "A192GCM" => Ok(Self::A192GCM),
      "A256GCM" => Ok(Self::A256GCM),
      _ => Err(Error::UnsupportedAlgorithm(string.to_owned())),
    }
  }
}

impl Display for JweEncryption {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}
