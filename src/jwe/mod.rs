// Copyright 2020-2024 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

//! JSON Web Encryption ([RFC 7516](https://tools.ietf.org/html/rfc7516)).

mod algorithm;
mod decoder;
mod encoder;
mod encryption;
mod header;

pub use self::algorithm::JweAlgorithm;
pub use self::decoder::Decoder;
pub use self::decoder::Token;
pub use self::encoder::Encoder;
pub use self::encryption::JweEncryption;
pub use self::header::JweHeader;
