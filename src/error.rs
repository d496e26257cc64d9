// Copyright 2020-2024 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

//! Errors that may occur when issuing or validating JSON Web Tokens.

/// Alias for a `Result` with the error type [`Error`].
pub type Result<T, E = Error> = ::core::result::Result<T, E>;

/// This type represents all possible errors that can occur in the library.
///
/// Every failure of the public API materializes as a value of this type;
/// recoverable conditions inside the key-candidate loops (a key that does not
/// verify or decrypt) are never surfaced, only the terminal outcome is.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
  /// Caused by a structural, base64, JSON, or signature failure, a missing
  /// required header member, or an empty key set for a signed token.
  #[error("invalid token: {0}")]
  InvalidToken(&'static str),
  /// Caused by a token whose expiration time has passed.
  #[error("token expired")]
  TokenExpired,
  /// Caused by a token whose not-before time lies in the future.
  #[error("token not yet valid")]
  TokenNotYetValid,
  /// Caused by the caller-supplied issuer validator returning false.
  #[error("issuer rejected")]
  IssuerRejected,
  /// Caused by the caller-supplied audience validator returning false.
  #[error("audience rejected")]
  AudienceRejected,
  /// Caused by an algorithm identifier that is not in the registry.
  #[error("unsupported algorithm: {0}")]
  UnsupportedAlgorithm(String),
  /// Caused by a header `alg` conflicting with the key `alg` at issue time.
  #[error("algorithm mismatch between header and key")]
  AlgorithmMismatch,
  /// Caused by key material too weak for the requested algorithm.
  #[error("weak key: {0}")]
  WeakKey(&'static str),
  /// Caused by a key that is malformed or lacks the required components.
  #[error("invalid key: {0}")]
  InvalidKey(&'static str),
  /// Caused by an underlying cryptographic primitive reporting failure.
  #[error("cryptographic failure: {0}")]
  Cryptography(&'static str),
}

impl From<serde_json::Error> for Error {
  fn from(_: serde_json::Error) -> Self {
    Self::InvalidToken("invalid json")
  }
}
