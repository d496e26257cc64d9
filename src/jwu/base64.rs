// Copyright 2020-2024 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::Error;
use crate::error::Result;

/// Encodes `data` as unpadded base64url.
pub fn encode_b64(data: impl AsRef<[u8]>) -> String {
  base64::encode_config(data.as_ref(), base64::URL_SAFE_NO_PAD)
}

/// Decodes unpadded base64url `data`.
///
/// Padded input and bytes outside the URL-safe alphabet are rejected.
pub fn decode_b64(data: impl AsRef<[u8]>) -> Result<Vec<u8>> {
  base64::decode_config(data.as_ref(), base64::URL_SAFE_NO_PAD).map_err(|_| Error::InvalidToken("invalid base64url"))
}

/// Serializes `data` as compact JSON and encodes it as unpadded base64url.
pub fn encode_b64_json<T: Serialize>(data: &T) -> Result<String> {
  serde_json::to_vec(data).map(encode_b64).map_err(Into::into)
}

/// Decodes unpadded base64url `data` and deserializes it as JSON.
pub fn decode_b64_json<T: DeserializeOwned>(data: impl AsRef<[u8]>) -> Result<T> {
  decode_b64(data).and_then(|json| serde_json::from_slice(&json).map_err(Into::into))
}
