// Copyright 2020-2024 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use rand::rngs::OsRng;
use rand::RngCore;
use subtle::ConstantTimeEq;

use crate::error::Error;
use crate::error::Result;

/// Fills a new buffer of `length` bytes from the operating system CSPRNG.
///
/// All content encryption keys, initialization vectors, and salts are drawn
/// through this single function.
pub fn random_bytes(length: usize) -> Result<Vec<u8>> {
  let mut buffer: Vec<u8> = vec![0; length];
  OsRng
    .try_fill_bytes(&mut buffer)
    .map_err(|_| Error::Cryptography("rng failure"))?;
  Ok(buffer)
}

/// Compares two byte slices in constant time.
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
  a.ct_eq(b).into()
}

/// Returns the current time as integer seconds since the Unix epoch.
pub fn unix_now() -> i64 {
  SystemTime::now()
    .duration_since(UNIX_EPOCH)
    .map(|elapsed| elapsed.as_secs() as i64)
    .unwrap_or_default()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_constant_time_eq() {
    assert!(constant_time_eq(b"", b""));
    assert!(constant_time_eq(b"abc", b"abc"));
    assert!(!constant_time_eq(b"abc", b"abd"));
    assert!(!constant_time_eq(b"abc", b"abcd"));
  }

  #[test]
  fn test_random_bytes_length() {
    assert_eq!(random_bytes(32).unwrap().len(), 32);
    assert_ne!(random_bytes(32).unwrap(), random_bytes(32).unwrap());
  }
}
