// Copyright 2020-2024 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

use core::time::Duration;

use futures::stream::BoxStream;

use crate::jwk::Jwk;
use crate::jwu;

/// A lazy, asynchronously iterable sequence of candidate keys.
///
/// Resolvers may await remote work (a JWKS fetch, a paged key store) between
/// candidates; the pipeline polls the stream only until a key succeeds.
pub type KeyStream = BoxStream<'static, Jwk>;

/// Resolves candidate keys, optionally narrowed by the token issuer.
pub type KeyResolver = Box<dyn Fn(Option<&str>) -> KeyStream + Send + Sync>;

/// Decides whether a token issuer is acceptable.
pub type IssuerValidator = Box<dyn Fn(&str) -> bool + Send + Sync>;

/// Decides whether a token audience list is acceptable.
pub type AudienceValidator = Box<dyn Fn(&[String]) -> bool + Send + Sync>;

/// Supplies the current time as integer seconds since the Unix epoch.
pub type Clock = Box<dyn Fn() -> i64 + Send + Sync>;

/// The policy a token is validated against.
///
/// The individual checks are toggled by flags; the issuer and audience
/// checks additionally need their callback, and installing a callback turns
/// the corresponding flag on. The clock is injected so callers control time.
pub struct ValidationParameters {
  /// Check `exp` and `nbf` against the clock. Defaults to on.
  pub validate_lifetime: bool,
  /// Call the issuer validator with the `iss` claim. Off until a validator
  /// is installed.
  pub validate_issuer: bool,
  /// Call the audience validator with the `aud` claim values. Off until a
  /// validator is installed.
  pub validate_audience: bool,
  /// Pass the token issuer to the signing key resolver, scoping resolution
  /// by `iss`. When off the resolver is invoked without an issuer. The
  /// signature check itself always runs for a signed token. Defaults to on.
  pub validate_signing_key: bool,
  /// Reject unsigned (`alg=none`) tokens outright. Defaults to on.
  pub require_signed_tokens: bool,
  /// Leeway applied to the temporal checks. Defaults to zero.
  pub clock_skew: Duration,
  pub(crate) clock: Clock,
  pub(crate) issuer_validator: Option<IssuerValidator>,
  pub(crate) audience_validator: Option<AudienceValidator>,
  pub(crate) signing_keys: Option<KeyResolver>,
  pub(crate) decryption_keys: Option<KeyResolver>,
}

impl ValidationParameters {
  /// Creates parameters with the default policy: signatures required and
  /// verified, lifetime checked with zero skew, the system clock.
  pub fn new() -> Self {
    Self {
      validate_lifetime: true,
      validate_issuer: false,
      validate_audience: false,
      validate_signing_key: true,
      require_signed_tokens: true,
      clock_skew: Duration::ZERO,
      clock: Box::new(jwu::unix_now),
      issuer_validator: None,
      audience_validator: None,
      signing_keys: None,
      decryption_keys: None,
    }
  }

  /// Sets the leeway applied to the temporal checks.
  pub fn clock_skew(mut self, skew: Duration) -> Self {
    self.clock_skew = skew;
    self
  }

  /// Replaces the clock.
  pub fn clock(mut self, clock: impl Fn() -> i64 + Send + Sync + 'static) -> Self {
    self.clock = Box::new(clock);
    self
  }

  /// Toggles the lifetime check.
  pub fn validate_lifetime(mut self, enabled: bool) -> Self {
    self.validate_lifetime = enabled;
    self
  }

  /// Toggles issuer-scoped signing key resolution.
  pub fn validate_signing_key(mut self, enabled: bool) -> Self {
    self.validate_signing_key = enabled;
    self
  }

  /// Toggles the rejection of unsigned tokens.
  pub fn require_signed_tokens(mut self, enabled: bool) -> Self {
    self.require_signed_tokens = enabled;
    self
  }

  /// Installs the issuer validator and enables the issuer check.
  pub fn issuer_validator(mut self, validator: impl Fn(&str) -> bool + Send + Sync + 'static) -> Self {
    self.issuer_validator = Some(Box::new(validator));
    self.validate_issuer = true;
    self
  }

  /// Installs the audience validator and enables the audience check.
  pub fn audience_validator(mut self, validator: impl Fn(&[String]) -> bool + Send + Sync + 'static) -> Self {
    self.audience_validator = Some(Box::new(validator));
    self.validate_audience = true;
    self
  }

  /// Installs the signing key resolver.
  pub fn signing_keys(mut self, resolver: impl Fn(Option<&str>) -> KeyStream + Send + Sync + 'static) -> Self {
    self.signing_keys = Some(Box::new(resolver));
    self
  }

  /// Installs the decryption key resolver, required for encrypted tokens.
  pub fn decryption_keys(mut self, resolver: impl Fn(Option<&str>) -> KeyStream + Send + Sync + 'static) -> Self {
    self.decryption_keys = Some(Box::new(resolver));
    self
  }
}

impl Default for ValidationParameters {
  fn default() -> Self {
    Self::new()
  }
}
