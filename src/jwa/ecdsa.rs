// Copyright 2020-2024 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

use zeroize::Zeroizing;

use crate::error::Error;
use crate::error::Result;
use crate::jwa::JwsSigner;
use crate::jwk::EcCurve;
use crate::jwk::Jwk;
use crate::jwk::JwkParamsEc;
use crate::jws::JwsAlgorithm;
use crate::jwu;

/// ECDSA over the NIST curves (`ES256`, `ES384`, `ES512`).
///
/// Signatures are the fixed-width concatenation R‖S with both integers
/// padded to the curve's field length, never ASN.1 DER.
pub struct EcdsaSigner {
  alg: JwsAlgorithm,
}

impl EcdsaSigner {
  /// Creates a new `EcdsaSigner` for the given algorithm.
  pub fn new(alg: JwsAlgorithm) -> Self {
    debug_assert!(matches!(
      alg,
      JwsAlgorithm::ES256 | JwsAlgorithm::ES384 | JwsAlgorithm::ES512
    ));
    Self { alg }
  }

  const fn curve(&self) -> EcCurve {
    match self.alg {
      JwsAlgorithm::ES384 => EcCurve::P384,
      JwsAlgorithm::ES512 => EcCurve::P521,
      _ => EcCurve::P256,
    }
  }

  /// Returns the key parameters after checking they live on the expected
  /// curve.
  fn params<'a>(&self, key: Option<&'a Jwk>) -> Result<&'a JwkParamsEc> {
    let params: &JwkParamsEc = key.ok_or(Error::InvalidKey("missing key"))?.try_ec_params()?;
    if params.try_ec_curve()? != self.curve() {
      return Err(Error::InvalidKey("curve incompatible with algorithm"));
    }
    Ok(params)
  }
}

macro_rules! ecdsa_curve {
  ($sign:ident, $verify:ident, $crate_:ident, $field_len:expr, $digest:ty) => {
    fn $sign(params: &JwkParamsEc, message: &[u8]) -> Result<Vec<u8>> {
      let d: &str = params.d.as_deref().ok_or(Error::InvalidKey("missing private key material"))?;
      let d: Zeroizing<Vec<u8>> = Zeroizing::new(jwu::decode_b64(d)?);

      let secret: $crate_::ecdsa::SigningKey =
        $crate_::ecdsa::SigningKey::from_slice(&d).map_err(|_| Error::InvalidKey("invalid ec private key"))?;

      let prehash = <$digest as sha2::Digest>::digest(message);
      let signature: $crate_::ecdsa::Signature = signature::hazmat::PrehashSigner::sign_prehash(&secret, &prehash)
        .map_err(|_| Error::InvalidKey("invalid ec private key"))?;
      Ok(signature.to_bytes().to_vec())
    }

    fn $verify(params: &JwkParamsEc, message: &[u8], sig: &[u8]) -> Result<()> {
      let x: Vec<u8> = jwu::decode_b64(&params.x)?;
      let y: Vec<u8> = jwu::decode_b64(&params.y)?;
      if x.len() != $field_len || y.len() != $field_len {
        return Err(Error::InvalidKey("invalid ec coordinate length"));
      }

      let point: $crate_::EncodedPoint = $crate_::EncodedPoint::from_affine_coordinates(
        $crate_::FieldBytes::from_slice(&x),
        $crate_::FieldBytes::from_slice(&y),
        false,
      );

      let public: $crate_::ecdsa::VerifyingKey = $crate_::ecdsa::VerifyingKey::from_encoded_point(&point)
        .map_err(|_| Error::InvalidKey("invalid ec public key"))?;

      let signature: $crate_::ecdsa::Signature =
        $crate_::ecdsa::Signature::from_slice(sig).map_err(|_| Error::InvalidToken("invalid signature"))?;

      let prehash = <$digest as sha2::Digest>::digest(message);
      signature::hazmat::PrehashVerifier::verify_prehash(&public, &prehash, &signature)
        .map_err(|_| Error::InvalidToken("invalid signature"))
    }
  };
}

ecdsa_curve!(sign_p256, verify_p256, p256, 32, sha2::Sha256);
ecdsa_curve!(sign_p384, verify_p384, p384, 48, sha2::Sha384);
ecdsa_curve!(sign_p521, verify_p521, p521, 66, sha2::Sha512);

impl JwsSigner for EcdsaSigner {
  fn alg(&self) -> JwsAlgorithm {
    self.alg
  }

  fn sign(&self, key: Option<&Jwk>, message: &[u8]) -> Result<Vec<u8>> {
    let params: &JwkParamsEc = self.params(key)?;

    match self.curve() {
      EcCurve::P256 => sign_p256(params, message),
      EcCurve::P384 => sign_p384(params, message),
      EcCurve::P521 => sign_p521(params, message),
    }
  }

  fn verify(&self, key: Option<&Jwk>, message: &[u8], signature: &[u8]) -> Result<()> {
    let params: &JwkParamsEc = self.params(key)?;

    match self.curve() {
      EcCurve::P256 => verify_p256(params, message, signature),
      EcCurve::P384 => verify_p384(params, message, signature),
      EcCurve::P521 => verify_p521(params, message, signature),
    }
  }
}
