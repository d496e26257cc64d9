// Copyright 2020-2024 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

//! Token issuance: sign, then optionally encrypt.

use crate::error::Result;
use crate::jwa::JwaRegistry;
use crate::jwe;
use crate::jwe::JweAlgorithm;
use crate::jwe::JweEncryption;
use crate::jwe::JweHeader;
use crate::jwk::Jwk;
use crate::jws;
use crate::jwt::Jwt;

/// Options for [`JwtIssuer::issue`].
pub struct IssueOptions<'a> {
  /// The signing key; without one the token is issued unsecured (`alg=none`).
  pub signing_key: Option<&'a Jwk>,
  /// The recipient key; with one the signed token is nested in a JWE.
  pub encryption_key: Option<&'a Jwk>,
  /// The key management algorithm for the JWE layer.
  pub key_management: JweAlgorithm,
  /// The content encryption algorithm for the JWE layer.
  pub content_encryption: JweEncryption,
  /// A `typ` value written into the outermost header.
  pub typ: Option<String>,
}

impl Default for IssueOptions<'_> {
  fn default() -> Self {
    Self {
      signing_key: None,
      encryption_key: None,
      key_management: JweAlgorithm::RSA_OAEP_256,
      content_encryption: JweEncryption::A256CBC_HS512,
      typ: None,
    }
  }
}

impl<'a> IssueOptions<'a> {
  /// Creates options for an unsecured token.
  pub fn new() -> Self {
    Self::default()
  }

  /// Sets the signing key.
  pub fn signing_key(mut self, key: &'a Jwk) -> Self {
    self.signing_key = Some(key);
    self
  }

  /// Sets the recipient encryption key.
  pub fn encryption_key(mut self, key: &'a Jwk) -> Self {
    self.encryption_key = Some(key);
    self
  }

  /// Sets the JWE key management algorithm.
  pub fn key_management(mut self, algorithm: JweAlgorithm) -> Self {
    self.key_management = algorithm;
    self
  }

  /// Sets the JWE content encryption algorithm.
  pub fn content_encryption(mut self, encryption: JweEncryption) -> Self {
    self.content_encryption = encryption;
    self
  }

  /// Sets the `typ` header value.
  pub fn typ(mut self, value: impl Into<String>) -> Self {
    self.typ = Some(value.into());
    self
  }
}

/// A producer of compact JWT serializations.
pub struct JwtIssuer<'a> {
  registry: &'a JwaRegistry,
}

impl<'a> JwtIssuer<'a> {
  /// Creates a new `JwtIssuer` dispatching through the given registry.
  pub fn new(registry: &'a JwaRegistry) -> Self {
    Self { registry }
  }

  /// Issues `token` as a compact string.
  ///
  /// The claim set is signed into a JWS first; when an encryption key is
  /// present the JWS becomes the plaintext of a JWE whose header carries
  /// `cty: "JWT"` ([RFC 7519 §5.2](https://tools.ietf.org/html/rfc7519#section-5.2)).
  pub fn issue(&self, token: &Jwt, options: &IssueOptions<'_>) -> Result<String> {
    let mut header = token.header.clone();
    if options.encryption_key.is_none() {
      if let Some(typ) = options.typ.as_deref() {
        header.set_typ(typ);
      }
    }

    let claims: Vec<u8> = serde_json::to_vec(&token.claims)?;
    let signed: String = jws::Encoder::new(self.registry).encode(&claims, &header, options.signing_key)?;

    let Some(encryption_key) = options.encryption_key else {
      return Ok(signed);
    };

    let mut jwe_header: JweHeader = JweHeader::new(options.key_management, options.content_encryption);
    if let Some(typ) = options.typ.as_deref() {
      jwe_header.set_typ(typ);
    }
    jwe_header.set_cty("JWT");

    jwe::Encoder::new(self.registry).encode(signed.as_bytes(), encryption_key, jwe_header)
  }
}
