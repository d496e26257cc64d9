// Copyright 2020-2024 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

//! The token validation pipeline: parse, decrypt, verify, check claims.

mod params;

pub use self::params::AudienceValidator;
pub use self::params::Clock;
pub use self::params::IssuerValidator;
pub use self::params::KeyResolver;
pub use self::params::KeyStream;
pub use self::params::ValidationParameters;

use futures::stream;
use futures::StreamExt;
use log::debug;

use crate::error::Error;
use crate::error::Result;
use crate::jwa::JwaRegistry;
use crate::jwe;
use crate::jws;
use crate::jws::JwsHeader;
use crate::jwt::JwtClaims;
use crate::jwu;

/// A validated token: the verified header and claim set.
#[derive(Clone, Debug)]
pub struct DecodedToken {
  /// The protected JWS header.
  pub header: JwsHeader,
  /// The validated claim set.
  pub claims: JwtClaims,
}

/// A consumer of compact JWT serializations.
///
/// Every failure materializes as an [`Error`]; nothing panics across this
/// API and no token is returned on partial success.
pub struct JwtValidator<'a> {
  registry: &'a JwaRegistry,
}

impl<'a> JwtValidator<'a> {
  /// Creates a new `JwtValidator` dispatching through the given registry.
  pub fn new(registry: &'a JwaRegistry) -> Self {
    Self { registry }
  }

  /// Validates a compact token against `params`.
  ///
  /// A five-segment token is decrypted first and its plaintext, the nested
  /// JWS, replaces the working token. Key resolution is lazy: candidates are
  /// fetched only until one succeeds, and the two resolver streams are the
  /// only suspension points of the pipeline.
  pub async fn validate(&self, compact: &str, params: &ValidationParameters) -> Result<DecodedToken> {
    let decrypted: String;
    let jws: &str = match compact.split('.').count() {
      3 => compact,
      5 => {
        debug!("validating an encrypted token");
        let resolver = params
          .decryption_keys
          .as_ref()
          .ok_or(Error::InvalidToken("no decryption keys configured"))?;
        let (_, plaintext) = jwe::Decoder::new(self.registry).decode(compact, resolver(None)).await?;
        decrypted = String::from_utf8(plaintext).map_err(|_| Error::InvalidToken("invalid utf-8 in decrypted payload"))?;
        &decrypted
      }
      _ => return Err(Error::InvalidToken("malformed compact serialization")),
    };

    let segments: Vec<&str> = jwu::split_segments(jws, 3)?;
    let header: JwsHeader =
      jwu::decode_b64_json(segments[0]).map_err(|_| Error::InvalidToken("invalid base64url in JWS"))?;
    let claims: JwtClaims =
      jwu::decode_b64_json(segments[1]).map_err(|_| Error::InvalidToken("invalid base64url in JWS"))?;

    let unsigned: bool = header.alg() == Some("none");
    if unsigned && params.require_signed_tokens {
      return Err(Error::InvalidToken("unsigned tokens are not accepted"));
    }

    // Signature verification is never skipped for a signed token. The
    // issuer read here is unverified; it only narrows key resolution and
    // the claim itself is re-checked after the signature.
    let keys: KeyStream = match (&params.signing_keys, unsigned) {
      (Some(resolver), false) => {
        let issuer: Option<&str> = if params.validate_signing_key {
          claims.iss()
        } else {
          None
        };
        resolver(issuer)
      }
      _ => stream::empty().boxed(),
    };
    jws::Decoder::new(self.registry).decode(jws, keys).await?;

    if params.validate_lifetime {
      let now: i64 = (params.clock)();
      let skew: i64 = params.clock_skew.as_secs() as i64;

      if let Some(exp) = claims.exp() {
        if now >= exp + skew {
          return Err(Error::TokenExpired);
        }
      }
      if let Some(nbf) = claims.nbf() {
        if now < nbf - skew {
          return Err(Error::TokenNotYetValid);
        }
      }
    }

    if params.validate_issuer {
      let accepted: bool = match (claims.iss(), &params.issuer_validator) {
        (Some(iss), Some(validator)) => validator(iss),
        _ => false,
      };
      if !accepted {
        return Err(Error::IssuerRejected);
      }
    }

    if params.validate_audience {
      let aud: Vec<String> = claims.aud();
      let accepted: bool = match &params.audience_validator {
        Some(validator) => validator(&aud),
        None => false,
      };
      if !accepted {
        return Err(Error::AudienceRejected);
      }
    }

    Ok(DecodedToken { header, claims })
  }
}
