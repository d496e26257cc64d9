// Copyright 2020-2024 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

//! JSON Web Keys ([RFC 7517](https://tools.ietf.org/html/rfc7517)).

mod curve;
mod jwk;
mod jwk_set;
mod jwk_type;
mod key_params;
mod x509;

pub use self::curve::EcCurve;
pub use self::jwk::Jwk;
pub use self::jwk_set::JwkSet;
pub use self::jwk_type::JwkType;
pub use self::key_params::JwkParams;
pub use self::key_params::JwkParamsEc;
pub use self::key_params::JwkParamsOct;
pub use self::key_params::JwkParamsRsa;
