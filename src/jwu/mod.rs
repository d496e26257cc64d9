// Copyright 2020-2024 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

//! Shared utilities: base64url, compact serialization I/O, randomness and
//! constant-time helpers.

mod base64;
mod crypto;
mod segments;
pub(crate) mod serde_b64;

pub use self::base64::decode_b64;
pub use self::base64::decode_b64_json;
pub use self::base64::encode_b64;
pub use self::base64::encode_b64_json;
pub use self::crypto::constant_time_eq;
pub use self::crypto::random_bytes;
pub use self::crypto::unix_now;
pub use self::segments::create_message;
pub use self::segments::split_segments;

/// An ordered JSON object.
///
/// Insertion order is preserved so that the serialized form of a header or
/// claim set is deterministic, which matters because the signing input and
/// the JWE additional authenticated data are byte-exact encodings.
pub type JsonObject = serde_json::Map<String, serde_json::Value>;
