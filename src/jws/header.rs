// Copyright 2020-2024 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use crate::jws::JwsAlgorithm;
use crate::jwu::JsonObject;

/// A JSON Web Signature JOSE Header
/// ([RFC 7515 §4](https://tools.ietf.org/html/rfc7515#section-4)).
///
/// The header is a typed façade over an ordered JSON object: members the
/// library does not recognise pass through unchanged, and insertion order is
/// preserved so the encoded form is deterministic.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JwsHeader {
  inner: JsonObject,
}

impl JwsHeader {
  /// Creates a new empty `JwsHeader`.
  pub fn new() -> Self {
    Self {
      inner: JsonObject::new(),
    }
  }

  /// Returns the value of the `alg` property.
  pub fn alg(&self) -> Option<&str> {
    self.str_member("alg")
  }

  /// Sets the value of the `alg` property.
  pub fn set_alg(&mut self, value: JwsAlgorithm) {
    self.set("alg", value.name());
  }

  /// Returns the value of the `typ` property.
  pub fn typ(&self) -> Option<&str> {
    self.str_member("typ")
  }

  /// Sets the value of the `typ` property.
  pub fn set_typ(&mut self, value: impl Into<String>) {
    self.set("typ", value.into());
  }

  /// Returns the value of the `kid` property.
  pub fn kid(&self) -> Option<&str> {
    self.str_member("kid")
  }

  /// Sets the value of the `kid` property.
  pub fn set_kid(&mut self, value: impl Into<String>) {
    self.set("kid", value.into());
  }

  /// Returns the value of the `cty` property.
  pub fn cty(&self) -> Option<&str> {
    self.str_member("cty")
  }

  /// Sets the value of the `cty` property.
  pub fn set_cty(&mut self, value: impl Into<String>) {
    self.set("cty", value.into());
  }

  /// Returns the value of an arbitrary header member.
  pub fn get(&self, name: &str) -> Option<&Value> {
    self.inner.get(name)
  }

  /// Sets the value of an arbitrary header member.
  ///
  /// Writing a null value removes the member.
  pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
    let name: String = name.into();
    let value: Value = value.into();
    if value.is_null() {
      self.inner.shift_remove(&name);
    } else {
      self.inner.insert(name, value);
    }
  }

  /// Removes and returns an arbitrary header member.
  pub fn remove(&mut self, name: &str) -> Option<Value> {
    self.inner.shift_remove(name)
  }

  /// Returns a reference to the underlying JSON object.
  pub fn as_object(&self) -> &JsonObject {
    &self.inner
  }

  fn str_member(&self, name: &str) -> Option<&str> {
    self.inner.get(name).and_then(Value::as_str)
  }
}
