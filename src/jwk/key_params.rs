// Copyright 2020-2024 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

use serde::Deserialize;
use serde::Serialize;
use zeroize::Zeroize;

use crate::error::Result;
use crate::jwk::EcCurve;
use crate::jwk::JwkType;

/// The type-specific parameters of a JSON Web Key.
///
/// All values are unpadded base64url strings of the big-endian byte
/// representation defined by [RFC 7518 §6](https://tools.ietf.org/html/rfc7518#section-6).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum JwkParams {
  /// Elliptic Curve parameters.
  Ec(JwkParamsEc),
  /// RSA parameters.
  Rsa(JwkParamsRsa),
  /// Octet sequence parameters.
  Oct(JwkParamsOct),
}

impl JwkParams {
  /// Returns the key type implied by the parameter set.
  pub const fn kty(&self) -> JwkType {
    match self {
      Self::Ec(_) => JwkType::Ec,
      Self::Rsa(_) => JwkType::Rsa,
      Self::Oct(_) => JwkType::Oct,
    }
  }
}

impl Zeroize for JwkParams {
  fn zeroize(&mut self) {
    match self {
      Self::Ec(params) => params.zeroize(),
      Self::Rsa(params) => params.zeroize(),
      Self::Oct(params) => params.zeroize(),
    }
  }
}

impl From<JwkParamsEc> for JwkParams {
  fn from(params: JwkParamsEc) -> Self {
    Self::Ec(params)
  }
}

impl From<JwkParamsRsa> for JwkParams {
  fn from(params: JwkParamsRsa) -> Self {
    Self::Rsa(params)
  }
}

impl From<JwkParamsOct> for JwkParams {
  fn from(params: JwkParamsOct) -> Self {
    Self::Oct(params)
  }
}

/// Parameters for Elliptic Curve Keys.
///
/// [More Info](https://tools.ietf.org/html/rfc7518#section-6.2)
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Zeroize)]
pub struct JwkParamsEc {
  /// The name of the cryptographic curve.
  pub crv: String,
  /// The x-coordinate of the curve point.
  pub x: String,
  /// The y-coordinate of the curve point.
  pub y: String,
  /// The private scalar.
  #[serde(skip_serializing_if = "Option::is_none", default)]
  pub d: Option<String>,
}

impl JwkParamsEc {
  /// Parses the `crv` property, rejecting curves outside the supported set.
  pub fn try_ec_curve(&self) -> Result<EcCurve> {
    self.crv.parse()
  }
}

/// Parameters for RSA Keys.
///
/// [More Info](https://tools.ietf.org/html/rfc7518#section-6.3)
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Zeroize)]
pub struct JwkParamsRsa {
  /// The modulus.
  pub n: String,
  /// The public exponent.
  pub e: String,
  /// The private exponent.
  #[serde(skip_serializing_if = "Option::is_none", default)]
  pub d: Option<String>,
  /// The first prime factor.
  #[serde(skip_serializing_if = "Option::is_none", default)]
  pub p: Option<String>,
  /// The second prime factor.
  #[serde(skip_serializing_if = "Option::is_none", default)]
  pub q: Option<String>,
  /// The first factor CRT exponent.
  #[serde(skip_serializing_if = "Option::is_none", default)]
  pub dp: Option<String>,
  /// The second factor CRT exponent.
  #[serde(skip_serializing_if = "Option::is_none", default)]
  pub dq: Option<String>,
  /// The first CRT coefficient.
  #[serde(skip_serializing_if = "Option::is_none", default)]
  pub qi: Option<String>,
}

/// Parameters for Octet Sequence Keys.
///
/// [More Info](https://tools.ietf.org/html/rfc7518#section-6.4)
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Zeroize)]
pub struct JwkParamsOct {
  /// The symmetric key value.
  ///
  /// Absent on a key sanitized for publication.
  #[serde(skip_serializing_if = "Option::is_none", default)]
  pub k: Option<String>,
}
