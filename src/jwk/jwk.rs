// Copyright 2020-2024 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

use p256::elliptic_curve::sec1::ToEncodedPoint;
use rand::rngs::OsRng;
use serde::Deserialize;
use serde::Serialize;
use sha2::Digest;
use sha2::Sha256;
use url::Url;
use zeroize::Zeroize;
use zeroize::Zeroizing;

use crate::error::Error;
use crate::error::Result;
use crate::jwk::EcCurve;
use crate::jwk::JwkParams;
use crate::jwk::JwkParamsEc;
use crate::jwk::JwkParamsOct;
use crate::jwk::JwkParamsRsa;
use crate::jwk::JwkType;
use crate::jwu;

/// A JSON Web Key ([RFC 7517](https://tools.ietf.org/html/rfc7517)).
///
/// A `Jwk` is immutable once handed to a signer or encryptor; derived keys
/// (e.g. a copy safe to publish in a JWKS) are produced by [`Jwk::sanitize`],
/// which returns a new instance. Private parameters are zeroed on drop.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Jwk {
  /// Key type.
  kty: JwkType,
  /// Intended use of the public key: `sig`, `enc`, or both.
  #[serde(skip_serializing_if = "Option::is_none", default, rename = "use")]
  use_: Option<String>,
  /// Algorithm hint intended for use with the key.
  #[serde(skip_serializing_if = "Option::is_none", default)]
  alg: Option<String>,
  /// Key identifier.
  #[serde(skip_serializing_if = "Option::is_none", default)]
  kid: Option<String>,
  /// X.509 URL.
  #[serde(skip_serializing_if = "Option::is_none", default)]
  x5u: Option<Url>,
  /// X.509 certificate chain, DER bytes in memory.
  #[serde(
    skip_serializing_if = "Option::is_none",
    default,
    with = "crate::jwu::serde_b64::cert_chain_b64"
  )]
  x5c: Option<Vec<Vec<u8>>>,
  /// X.509 certificate SHA-1 thumbprint, raw bytes in memory.
  #[serde(
    skip_serializing_if = "Option::is_none",
    default,
    with = "crate::jwu::serde_b64::bytes_b64url"
  )]
  x5t: Option<Vec<u8>>,
  /// Type-specific parameters.
  #[serde(flatten)]
  params: JwkParams,
}

impl Jwk {
  /// Creates a new `Jwk` from the given parameters.
  pub fn from_params(params: impl Into<JwkParams>) -> Self {
    let params: JwkParams = params.into();

    Self {
      kty: params.kty(),
      use_: None,
      alg: None,
      kid: None,
      x5u: None,
      x5c: None,
      x5t: None,
      params,
    }
  }

  /// Creates a new symmetric key with `length` random bytes.
  pub fn random_oct(length: usize) -> Result<Self> {
    let k: Zeroizing<Vec<u8>> = Zeroizing::new(jwu::random_bytes(length)?);

    Ok(Self::from_params(JwkParamsOct {
      k: Some(jwu::encode_b64(k.as_slice())),
    }))
  }

  /// Creates a new Elliptic Curve key on the given curve.
  pub fn random_ec(curve: EcCurve) -> Result<Self> {
    let params: JwkParamsEc = match curve {
      EcCurve::P256 => {
        let secret: p256::SecretKey = p256::SecretKey::random(&mut OsRng);
        let point: p256::EncodedPoint = secret.public_key().to_encoded_point(false);
        Self::ec_params(
          curve,
          point.x().map(|x| x.as_slice()),
          point.y().map(|y| y.as_slice()),
          &secret.to_bytes(),
        )?
      }
      EcCurve::P384 => {
        let secret: p384::SecretKey = p384::SecretKey::random(&mut OsRng);
        let point: p384::EncodedPoint = secret.public_key().to_encoded_point(false);
        Self::ec_params(
          curve,
          point.x().map(|x| x.as_slice()),
          point.y().map(|y| y.as_slice()),
          &secret.to_bytes(),
        )?
      }
      EcCurve::P521 => {
        let secret: p521::SecretKey = p521::SecretKey::random(&mut OsRng);
        let point: p521::EncodedPoint = secret.public_key().to_encoded_point(false);
        Self::ec_params(
          curve,
          point.x().map(|x| x.as_slice()),
          point.y().map(|y| y.as_slice()),
          &secret.to_bytes(),
        )?
      }
    };

    Ok(Self::from_params(params))
  }

  fn ec_params(curve: EcCurve, x: Option<&[u8]>, y: Option<&[u8]>, d: &[u8]) -> Result<JwkParamsEc> {
    let x: &[u8] = x.ok_or(Error::Cryptography("ec key generation failed"))?;
    let y: &[u8] = y.ok_or(Error::Cryptography("ec key generation failed"))?;

    Ok(JwkParamsEc {
      crv: curve.name().to_owned(),
      x: jwu::encode_b64(x),
      y: jwu::encode_b64(y),
      d: Some(jwu::encode_b64(d)),
    })
  }

  /// Returns the key type.
  pub fn kty(&self) -> JwkType {
    self.kty
  }

  /// Returns the value of the `use` property.
  pub fn use_(&self) -> Option<&str> {
    self.use_.as_deref()
  }

  /// Sets the value of the `use` property.
  pub fn set_use(&mut self, value: impl Into<String>) {
    self.use_ = Some(value.into());
  }

  /// Returns the algorithm hint.
  ///
  /// The hint is written into the header at issue time; it is never used to
  /// restrict verification unless the caller opts in.
  pub fn alg(&self) -> Option<&str> {
    self.alg.as_deref()
  }

  /// Sets the algorithm hint.
  pub fn set_alg(&mut self, value: impl Into<String>) {
    self.alg = Some(value.into());
  }

  /// Returns the key identifier.
  pub fn kid(&self) -> Option<&str> {
    self.kid.as_deref()
  }

  /// Sets the key identifier.
  pub fn set_kid(&mut self, value: impl Into<String>) {
    self.kid = Some(value.into());
  }

  /// Returns the X.509 URL.
  pub fn x5u(&self) -> Option<&Url> {
    self.x5u.as_ref()
  }

  /// Sets the X.509 URL.
  pub fn set_x5u(&mut self, value: Url) {
    self.x5u = Some(value);
  }

  /// Returns the X.509 certificate chain as DER bytes.
  pub fn x5c(&self) -> Option<&[Vec<u8>]> {
    self.x5c.as_deref()
  }

  /// Sets the X.509 certificate chain.
  pub fn set_x5c(&mut self, value: Vec<Vec<u8>>) {
    self.x5c = Some(value);
  }

  /// Returns the X.509 certificate SHA-1 thumbprint.
  pub fn x5t(&self) -> Option<&[u8]> {
    self.x5t.as_deref()
  }

  /// Sets the X.509 certificate SHA-1 thumbprint.
  pub fn set_x5t(&mut self, value: Vec<u8>) {
    self.x5t = Some(value);
  }

  /// Returns the type-specific parameters.
  pub fn params(&self) -> &JwkParams {
    &self.params
  }

  /// Returns the Elliptic Curve parameters, or an error if the key type does
  /// not match.
  pub fn try_ec_params(&self) -> Result<&JwkParamsEc> {
    match (self.kty, &self.params) {
      (JwkType::Ec, JwkParams::Ec(params)) => Ok(params),
      _ => Err(Error::InvalidKey("expected an EC key")),
    }
  }

  /// Returns the RSA parameters, or an error if the key type does not match.
  pub fn try_rsa_params(&self) -> Result<&JwkParamsRsa> {
    match (self.kty, &self.params) {
      (JwkType::Rsa, JwkParams::Rsa(params)) => Ok(params),
      _ => Err(Error::InvalidKey("expected an RSA key")),
    }
  }

  /// Returns the octet sequence parameters, or an error if the key type does
  /// not match.
  pub fn try_oct_params(&self) -> Result<&JwkParamsOct> {
    match (self.kty, &self.params) {
      (JwkType::Oct, JwkParams::Oct(params)) => Ok(params),
      _ => Err(Error::InvalidKey("expected an oct key")),
    }
  }

  /// Returns true if the public components of the key are present.
  pub fn has_public(&self) -> bool {
    match &self.params {
      JwkParams::Ec(params) => !params.x.is_empty() && !params.y.is_empty(),
      JwkParams::Rsa(params) => !params.n.is_empty() && !params.e.is_empty(),
      JwkParams::Oct(params) => params.k.is_some(),
    }
  }

  /// Returns true if the private components of the key are present.
  pub fn has_private(&self) -> bool {
    match &self.params {
      JwkParams::Ec(params) => params.d.is_some(),
      JwkParams::Rsa(params) => params.d.is_some(),
      JwkParams::Oct(params) => params.k.is_some(),
    }
  }

  /// Returns true if the key can produce signatures.
  pub fn can_sign(&self) -> bool {
    self.has_private()
  }

  /// Returns true if the key can verify signatures.
  pub fn can_verify(&self) -> bool {
    self.has_public()
  }

  /// Returns true if the key can wrap or directly provide encryption keys.
  pub fn can_encrypt(&self) -> bool {
    self.has_public()
  }

  /// Returns true if the key can unwrap encryption keys.
  pub fn can_decrypt(&self) -> bool {
    self.has_private()
  }

  /// Returns a copy of the key suitable for its audience.
  ///
  /// With `include_private` unset, every private component and the symmetric
  /// key value are stripped; the result is safe to publish in a JWKS. With
  /// `include_private` set, the key is returned whole, failing when no
  /// private material exists.
  pub fn sanitize(&self, include_private: bool) -> Result<Jwk> {
    if include_private {
      if !self.has_private() {
        return Err(Error::InvalidKey("missing private key material"));
      }
      return Ok(self.clone());
    }

    let params: JwkParams = match &self.params {
      JwkParams::Ec(params) => JwkParams::Ec(JwkParamsEc {
        crv: params.crv.clone(),
        x: params.x.clone(),
        y: params.y.clone(),
        d: None,
      }),
      JwkParams::Rsa(params) => JwkParams::Rsa(JwkParamsRsa {
        n: params.n.clone(),
        e: params.e.clone(),
        d: None,
        p: None,
        q: None,
        dp: None,
        dq: None,
        qi: None,
      }),
      JwkParams::Oct(_) => JwkParams::Oct(JwkParamsOct { k: None }),
    };

    let mut sanitized: Jwk = self.clone();
    sanitized.params = params;

    Ok(sanitized)
  }

  /// Computes the JWK thumbprint ([RFC 7638](https://tools.ietf.org/html/rfc7638))
  /// as unpadded base64url of the SHA-256 digest.
  pub fn thumbprint_sha256_b64(&self) -> Result<String> {
    // Required members only, lexicographic order, no whitespace.
    let json: String = match &self.params {
      JwkParams::Ec(params) => format!(
        r#"{{"crv":"{}","kty":"EC","x":"{}","y":"{}"}}"#,
        params.crv, params.x, params.y
      ),
      JwkParams::Rsa(params) => format!(r#"{{"e":"{}","kty":"RSA","n":"{}"}}"#, params.e, params.n),
      JwkParams::Oct(params) => {
        let k: &str = params
          .k
          .as_deref()
          .ok_or(Error::InvalidKey("missing symmetric key material"))?;
        format!(r#"{{"k":"{}","kty":"oct"}}"#, k)
      }
    };

    Ok(jwu::encode_b64(Sha256::digest(json.as_bytes())))
  }
}

impl Drop for Jwk {
  fn drop(&mut self) {
    self.params.zeroize();
  }
}
