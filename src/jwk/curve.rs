// Copyright 2020-2024 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

use core::fmt;
use core::fmt::Display;
use core::fmt::Formatter;
use core::str::FromStr;

use serde::Deserialize;
use serde::Serialize;

use crate::error::Error;

/// Supported elliptic curves for the JWK `crv` property.
///
/// [More Info](https://www.iana.org/assignments/jose/jose.xhtml#web-key-elliptic-curve)
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EcCurve {
  /// P-256 Curve.
  #[serde(rename = "P-256")]
  P256,
  /// P-384 Curve.
  #[serde(rename = "P-384")]
  P384,
  /// P-521 Curve.
  #[serde(rename = "P-521")]
  P521,
}

impl EcCurve {
  /// Returns the curve name as a `str` slice.
  pub const fn name(self) -> &'static str {
    match self {
      Self::P256 => "P-256",
      Self::P384 => "P-384",
      Self::P521 => "P-521",
    }
  }

  /// Returns the field element size in bytes.
  pub const fn field_len(self) -> usize {
    match self {
      Self::P256 => 32,
      Self::P384 => 48,
      Self::P521 => 66,
    }
  }
}

impl FromStr for EcCurve {
  type Err = Error;

  fn from_str(string: &str) -> Result<Self, Self::Err> {
    match string {
      "P-256" => Ok(Self::P256),
      "P-384" => Ok(Self::P384),
      "P-521" => Ok(Self::P521),
      _ => Err(Error::WeakKey("unsupported elliptic curve")),
    }
  }
}

impl Display for EcCurve {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}
