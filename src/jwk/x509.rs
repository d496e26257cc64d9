// Copyright 2020-2024 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

use sha1::Digest;
use sha1::Sha1;
use x509_parser::prelude::FromDer;
use x509_parser::public_key::PublicKey;
use x509_parser::prelude::X509Certificate;

use crate::error::Error;
use crate::error::Result;
use crate::jwk::EcCurve;
use crate::jwk::Jwk;
use crate::jwk::JwkParams;
use crate::jwk::JwkParamsEc;
use crate::jwk::JwkParamsRsa;
use crate::jwu;

impl Jwk {
  /// Creates a public `Jwk` from a DER-encoded X.509 certificate.
  ///
  /// The subject public key is probed as an Elliptic Curve key first, then as
  /// RSA. The `use` property is derived from the Key Usage extension, the key
  /// identifier is the base64url SHA-1 thumbprint of the certificate, and
  /// `x5c`/`x5t` are populated from the certificate itself.
  pub fn from_der_certificate(der: &[u8]) -> Result<Jwk> {
    let (_, certificate): (_, X509Certificate<'_>) =
      X509Certificate::from_der(der).map_err(|_| Error::InvalidKey("malformed X.509 certificate"))?;

    let spki = certificate.public_key();

    let params: JwkParams = match spki.parsed() {
      Ok(PublicKey::EC(point)) => {
        let curve: EcCurve = spki
          .algorithm
          .parameters
          .as_ref()
          .and_then(|any| any.as_oid().ok())
          .ok_or(Error::InvalidKey("missing EC curve parameters"))
          .and_then(|oid| match oid.to_id_string().as_str() {
            "1.2.840.10045.3.1.7" => Ok(EcCurve::P256),
            "1.3.132.0.34" => Ok(EcCurve::P384),
            "1.3.132.0.35" => Ok(EcCurve::P521),
            _ => Err(Error::WeakKey("unsupported elliptic curve")),
          })?;

        // Uncompressed SEC1 point: 0x04 || X || Y
        let data: &[u8] = point.data();
        if data.len() != 1 + 2 * curve.field_len() || data[0] != 0x04 {
          return Err(Error::InvalidKey("unsupported EC point encoding"));
        }

        let (x, y): (&[u8], &[u8]) = data[1..].split_at(curve.field_len());

        JwkParams::Ec(JwkParamsEc {
          crv: curve.name().to_owned(),
          x: jwu::encode_b64(x),
          y: jwu::encode_b64(y),
          d: None,
        })
      }
      Ok(PublicKey::RSA(rsa)) => JwkParams::Rsa(JwkParamsRsa {
        n: jwu::encode_b64(strip_leading_zeroes(rsa.modulus)),
        e: jwu::encode_b64(strip_leading_zeroes(rsa.exponent)),
        d: None,
        p: None,
        q: None,
        dp: None,
        dq: None,
        qi: None,
      }),
      _ => return Err(Error::InvalidKey("unsupported certificate key type")),
    };

    let use_: &str = match certificate.key_usage() {
      Ok(Some(extension)) => {
        let usage = extension.value;
        let signature: bool = usage.digital_signature();
        let encryption: bool = usage.key_encipherment() || usage.data_encipherment();
        match (signature, encryption) {
          (true, true) => "sig enc",
          (false, true) => "enc",
          _ => "sig",
        }
      }
      _ => "sig",
    };

    let thumbprint: Vec<u8> = Sha1::digest(der).to_vec();

    let mut jwk: Jwk = Jwk::from_params(params);
    jwk.set_use(use_);
    jwk.set_kid(jwu::encode_b64(&thumbprint));
    jwk.set_x5c(vec![der.to_vec()]);
    jwk.set_x5t(thumbprint);

    Ok(jwk)
  }
}

/// Trims the leading zero octets an ASN.1 INTEGER carries when the high bit
/// of the magnitude is set; JWK encodings require the minimal form.
fn strip_leading_zeroes(bytes: &[u8]) -> &[u8] {
  let start: usize = bytes.iter().take_while(|byte| **byte == 0).count();
  if start == bytes.len() {
    &bytes[bytes.len() - 1..]
  } else {
    &bytes[start..]
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_strip_leading_zeroes() {
    assert_eq!(strip_leading_zeroes(&[0, 1, 2]), &[1, 2]);
    assert_eq!(strip_leading_zeroes(&[1, 2]), &[1, 2]);
    assert_eq!(strip_leading_zeroes(&[0, 0]), &[0]);
  }
}
