// Copyright 2020-2024 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

use core::fmt;
use core::fmt::Display;
use core::fmt::Formatter;
use core::str::FromStr;

use serde::Deserialize;
use serde::Serialize;

use crate::error::Error;

/// Supported algorithms for the JSON Web Encryption `alg` claim.
///
/// The `PBES2_*` identifiers are recognised on the wire but have no key
/// management implementation; they never appear in a registry's supported
/// set unless one is registered.
///
/// [More Info](https://www.iana.org/assignments/jose/jose.xhtml#web-signature-encryption-algorithms)
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[allow(non_camel_case_types)]
pub enum JweAlgorithm {
  /// Direct use of a shared symmetric key
  #[serde(rename = "dir")]
  DIR,
  /// RSAES-PKCS1-v1_5
  RSA1_5,
  /// RSAES OAEP using default parameters
  #[serde(rename = "RSA-OAEP")]
  RSA_OAEP,
  /// RSAES OAEP using SHA-256 and MGF1 with SHA-256
  #[serde(rename = "RSA-OAEP-256")]
  RSA_OAEP_256,
  /// Key wrapping with AES GCM using 128-bit key
  A128GCMKW,
  /// Key wrapping with AES GCM using 192-bit key
  A192GCMKW,
  /// Key wrapping with AES GCM using 256-bit key
  A256GCMKW,
  /// PBES2 with HMAC SHA-256 and "A128KW" wrapping
  #[serde(rename = "PBES2-HS256+A128KW")]
  PBES2_HS256_A128KW,
  /// PBES2 with HMAC SHA-384 and "A192KW" wrapping
  #[serde(rename = "PBES2-HS384+A192KW")]
  PBES2_HS384_A192KW,
  /// PBES2 with HMAC SHA-512 and "A256KW" wrapping
  #[serde(rename = "PBES2-HS512+A256KW")]
  PBES2_HS512_A256KW,
}

impl JweAlgorithm {
  /// All recognised algorithms.
  pub const ALL: &'static [Self] = &[
    Self::DIR,
    Self::RSA1_5,
    Self::RSA_OAEP,
    Self::RSA_OAEP_256,
    Self::A128GCMKW,
    Self::A192GCMKW,
    Self::A256GCMKW,
    Self::PBES2_HS256_A128KW,
    Self::PBES2_HS384_A192KW,
    Self::PBES2_HS512_A256KW,
  ];

  /// Returns the JWE algorithm as a `str` slice.
  pub const fn name(self) -> &'static str {
    match self {
      Self::DIR => "dir",
      Self::RSA1_5 => "RSA1_5",
      Self::RSA_OAEP => "RSA-OAEP",
      Self::RSA_OAEP_256 => "RSA-OAEP-256",
      Self::A128GCMKW => "A128GCMKW",
      Self::A192GCMKW => "A192GCMKW",
      Self::A256GCMKW => "A256GCMKW",
      Self::PBES2_HS256_A128KW => "PBES2-HS256+A128KW",
      Self::PBES2_HS384_A192KW => "PBES2-HS384+A192KW",
      Self::PBES2_HS512_A256KW => "PBES2-HS512+A256KW",
    }
  }
}

impl FromStr for JweAlgorithm {
  type Err = Error;

  fn from_str(string: &str) -> Result<Self, Self::Err> {
    match string {
      "dir" => Ok(Self::DIR),
      "RSA1_5" => Ok(Self::RSA1_5),
      "RSA-OAEP" => Ok(Self::RSA_OAEP),
      "RSA-OAEP-256" => Ok(Self::RSA_OAEP_256),
      "A128GCMKW" => Ok(Self::A128GCMKW),
      "A192GCMKW" => Ok(Self::A192GCMKW),
      "A256GCMKW" => Ok(Self::A256GCMKW),
      "PBES2-HS256+A128KW" => Ok(Self::PBES2_HS256_A128KW),
      "PBES2-HS384+A192KW" => Ok(Self::PBES2_HS384_A192KW),
      "PBES2-HS512+A256KW" => Ok(Self::PBES2_HS512_A256KW),
      _ => Err(Error::UnsupportedAlgorithm(string.to_owned())),
    }
  }
}

impl Display for JweAlgorithm {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}
