// Copyright 2020-2024 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

//! JSON Web Signatures ([RFC 7515](https://tools.ietf.org/html/rfc7515)).

mod algorithm;
mod decoder;
mod encoder;
mod header;

pub use self::algorithm::JwsAlgorithm;
pub use self::decoder::Decoder;
pub use self::decoder::Token;
pub use self::encoder::Encoder;
pub use self::header::JwsHeader;
