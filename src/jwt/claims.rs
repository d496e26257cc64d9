// Copyright 2020-2024 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use crate::jwu::JsonObject;

/// A JWT claim set ([RFC 7519 §4](https://tools.ietf.org/html/rfc7519#section-4)).
///
/// A typed façade over an ordered JSON object. The registered claims have
/// typed accessors; anything else is reachable through [`get`][Self::get]
/// and [`set`][Self::set]. Two claims have a wire shape distinct from their
/// in-memory shape:
///
/// * `aud` is written as a single string when it holds exactly one value and
///   as an array otherwise; both shapes are read.
/// * `scope` is a space-separated string on the wire and a list in memory.
///
/// Temporal claims are integer seconds since the Unix epoch.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JwtClaims {
  inner: JsonObject,
}

impl JwtClaims {
  /// Creates a new empty claim set.
  pub fn new() -> Self {
    Self {
      inner: JsonObject::new(),
    }
  }

  /// Returns the value of the `iss` claim.
  pub fn iss(&self) -> Option<&str> {
    self.str_claim("iss")
  }

  /// Sets the value of the `iss` claim.
  pub fn set_iss(&mut self, value: impl Into<String>) {
    self.set("iss", value.into());
  }

  /// Returns the value of the `sub` claim.
  pub fn sub(&self) -> Option<&str> {
    self.str_claim("sub")
  }

  /// Sets the value of the `sub` claim.
  pub fn set_sub(&mut self, value: impl Into<String>) {
    self.set("sub", value.into());
  }

  /// Returns the values of the `aud` claim, reading both the single-string
  /// and the array shape.
  pub fn aud(&self) -> Vec<String> {
    match self.inner.get("aud") {
      Some(Value::String(value)) => vec![value.clone()],
      Some(Value::Array(values)) => values
        .iter()
        .filter_map(Value::as_str)
        .map(str::to_owned)
        .collect(),
      _ => Vec::new(),
    }
  }

  /// Sets the value of the `aud` claim: a single string when exactly one
  /// value is given, an array otherwise.
  pub fn set_aud(&mut self, values: impl IntoIterator<Item = impl Into<String>>) {
    let mut values: Vec<String> = values.into_iter().map(Into::into).collect();
    match values.len() {
      0 => {
        self.remove("aud");
      }
      1 => {
        self.set("aud", values.remove(0));
      }
      _ => {
        self.set("aud", values);
      }
    }
  }

  /// Returns the value of the `exp` claim.
  pub fn exp(&self) -> Option<i64> {
    self.int_claim("exp")
  }

  /// Sets the value of the `exp` claim.
  pub fn set_exp(&mut self, value: i64) {
    self.set("exp", value);
  }

  /// Returns the value of the `nbf` claim.
  pub fn nbf(&self) -> Option<i64> {
    self.int_claim("nbf")
  }

  /// Sets the value of the `nbf` claim.
  pub fn set_nbf(&mut self, value: i64) {
    self.set("nbf", value);
  }

  /// Returns the value of the `iat` claim.
  pub fn iat(&self) -> Option<i64> {
    self.int_claim("iat")
  }

  /// Sets the value of the `iat` claim.
  pub fn set_iat(&mut self, value: i64) {
    self.set("iat", value);
  }

  /// Returns the value of the `jti` claim.
  pub fn jti(&self) -> Option<&str> {
    self.str_claim("jti")
  }

  /// Sets the value of the `jti` claim.
  pub fn set_jti(&mut self, value: impl Into<String>) {
    self.set("jti", value.into());
  }

  /// Returns the values of the `scope` claim, splitting the space-separated
  /// wire form.
  pub fn scope(&self) -> Vec<String> {
    self
      .str_claim("scope")
      .map(|value| value.split_whitespace().map(str::to_owned).collect())
      .unwrap_or_default()
  }

  /// Sets the value of the `scope` claim as a space-joined string.
  pub fn set_scope(&mut self, values: impl IntoIterator<Item = impl Into<String>>) {
    let values: Vec<String> = values.into_iter().map(Into::into).collect();
    if values.is_empty() {
      self.remove("scope");
    } else {
      self.set("scope", values.join(" "));
    }
  }

  /// Returns the value of an arbitrary claim.
  pub fn get(&self, name: &str) -> Option<&Value> {
    self.inner.get(name)
  }

  /// Sets the value of an arbitrary claim.
  ///
  /// Writing a null value removes the claim.
  pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
    let name: String = name.into();
    let value: Value = value.into();
    if value.is_null() {
      self.inner.shift_remove(&name);
    } else {
      self.inner.insert(name, value);
    }
  }

  /// Removes and returns an arbitrary claim.
  pub fn remove(&mut self, name: &str) -> Option<Value> {
    self.inner.shift_remove(name)
  }

  /// Returns a reference to the underlying JSON object.
  pub fn as_object(&self) -> &JsonObject {
    &self.inner
  }

  fn str_claim(&self, name: &str) -> Option<&str> {
    self.inner.get(name).and_then(Value::as_str)
  }

  fn int_claim(&self, name: &str) -> Option<i64> {
    self.inner.get(name).and_then(Value::as_i64)
  }
}
