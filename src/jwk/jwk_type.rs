// Copyright 2020-2024 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

use core::fmt;
use core::fmt::Display;
use core::fmt::Formatter;

use serde::Deserialize;
use serde::Serialize;

/// Supported types for the JSON Web Key `kty` property.
///
/// [More Info](https://www.iana.org/assignments/jose/jose.xhtml#web-key-types)
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum JwkType {
  /// RSA.
  #[serde(rename = "RSA")]
  Rsa,
  /// Elliptic Curve.
  #[serde(rename = "EC")]
  Ec,
  /// Octet sequence (symmetric key material).
  #[serde(rename = "oct")]
  Oct,
}

impl JwkType {
  /// Returns the JWK `kty` as a `str` slice.
  pub const fn name(self) -> &'static str {
    match self {
      Self::Rsa => "RSA",
      Self::Ec => "EC",
      Self::Oct => "oct",
    }
  }
}

impl Display for JwkType {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}
