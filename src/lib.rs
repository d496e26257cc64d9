// Copyright 2020-2024 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

//! A library for issuing and validating JSON Web Tokens.
//!
//! The crate implements the compact serializations of JWS
//! ([RFC 7515](https://tools.ietf.org/html/rfc7515)), JWE
//! ([RFC 7516](https://tools.ietf.org/html/rfc7516)), the JWK key model
//! ([RFC 7517](https://tools.ietf.org/html/rfc7517)) and the algorithm
//! suite of JWA ([RFC 7518](https://tools.ietf.org/html/rfc7518)), as used
//! by OAuth 2.0 and OpenID Connect deployments:
//!
//! * [`issuer::JwtIssuer`] signs a claim set and optionally nests the result
//!   in an encrypted envelope.
//! * [`validator::JwtValidator`] takes a received compact string and a
//!   [`validator::ValidationParameters`] policy, resolves keys lazily,
//!   verifies, decrypts, and checks claims, returning a structured error on
//!   any failure.
//! * [`jwa::JwaRegistry`] is the single dispatch point from algorithm
//!   identifiers to cryptographic implementations.

#![forbid(unsafe_code)]
#![warn(
  rust_2018_idioms,
  unreachable_pub,
  missing_docs,
  rustdoc::broken_intra_doc_links,
  clippy::missing_safety_doc
)]

pub mod error;
pub mod issuer;
pub mod jwa;
pub mod jwe;
pub mod jwk;
pub mod jws;
pub mod jwt;
pub mod jwu;
pub mod validator;

pub use self::error::Error;
pub use self::error::Result;
