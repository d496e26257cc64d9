// Copyright 2020-2024 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

//! JSON Web Tokens ([RFC 7519](https://tools.ietf.org/html/rfc7519)).

mod claims;

pub use self::claims::JwtClaims;

use crate::jws::JwsHeader;

/// An unissued token: a header and a claim set.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Jwt {
  /// The JOSE header of the token.
  pub header: JwsHeader,
  /// The claim set of the token.
  pub claims: JwtClaims,
}

impl Jwt {
  /// Creates a new empty `Jwt`.
  pub fn new() -> Self {
    Self {
      header: JwsHeader::new(),
      claims: JwtClaims::new(),
    }
  }
}

impl From<JwtClaims> for Jwt {
  fn from(claims: JwtClaims) -> Self {
    Self {
      header: JwsHeader::new(),
      claims,
    }
  }
}
