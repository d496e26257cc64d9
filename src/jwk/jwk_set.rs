// Copyright 2020-2024 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

use core::slice::Iter;

use serde::Deserialize;
use serde::Serialize;

use crate::jwk::Jwk;

/// A JSON Web Key Set ([RFC 7517 §5](https://tools.ietf.org/html/rfc7517#section-5)).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwkSet {
  keys: Vec<Jwk>,
}

impl JwkSet {
  /// Creates a new empty `JwkSet`.
  pub const fn new() -> Self {
    Self { keys: Vec::new() }
  }

  /// Returns the total number of keys in the set.
  pub fn len(&self) -> usize {
    self.keys.len()
  }

  /// Returns true if the set contains no keys.
  pub fn is_empty(&self) -> bool {
    self.keys.is_empty()
  }

  /// Returns an iterator over the keys in the set.
  pub fn iter(&self) -> Iter<'_, Jwk> {
    self.keys.iter()
  }

  /// Returns all keys matching the given key identifier.
  pub fn get(&self, kid: &str) -> Vec<&Jwk> {
    self.keys.iter().filter(|key| key.kid() == Some(kid)).collect()
  }

  /// Adds a key to the set.
  pub fn add(&mut self, key: impl Into<Jwk>) {
    self.keys.push(key.into());
  }

  /// Removes and returns the key at `index`.
  pub fn remove(&mut self, index: usize) -> Option<Jwk> {
    if index < self.keys.len() {
      Some(self.keys.remove(index))
    } else {
      None
    }
  }
}

impl FromIterator<Jwk> for JwkSet {
  fn from_iter<I: IntoIterator<Item = Jwk>>(iter: I) -> Self {
    Self {
      keys: iter.into_iter().collect(),
    }
  }
}

impl IntoIterator for JwkSet {
  type Item = Jwk;
  type IntoIter = std::vec::IntoIter<Jwk>;

  fn into_iter(self) -> Self::IntoIter {
    self.keys.into_iter()
  }
}
