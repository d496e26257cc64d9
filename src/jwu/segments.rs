// Copyright 2020-2024 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

use crate::error::Error;
use crate::error::Result;

/// Splits a compact serialization into exactly `count` dot-separated segments.
pub fn split_segments(input: &str, count: usize) -> Result<Vec<&str>> {
  let segments: Vec<&str> = input.split('.').collect();
  if segments.len() != count {
    return Err(Error::InvalidToken("malformed compact serialization"));
  }
  Ok(segments)
}

/// Builds the JWS signing input from the encoded header and claims segments.
pub fn create_message(encoded_header: &str, encoded_claims: &str) -> Vec<u8> {
  let mut message: Vec<u8> = Vec::with_capacity(encoded_header.len() + encoded_claims.len() + 1);
  message.extend_from_slice(encoded_header.as_bytes());
  message.push(b'.');
  message.extend_from_slice(encoded_claims.as_bytes());
  message
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_split_segments() {
    assert_eq!(split_segments("a.b.c", 3).unwrap(), vec!["a", "b", "c"]);
    assert_eq!(split_segments("a..c", 3).unwrap(), vec!["a", "", "c"]);
    assert!(split_segments("a.b", 3).is_err());
    assert!(split_segments("a.b.c.d", 3).is_err());
  }

  #[test]
  fn test_create_message() {
    assert_eq!(create_message("head", "body"), b"head.body");
  }
}
