// Copyright 2020-2024 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use crate::jwe::JweAlgorithm;
use crate::jwe::JweEncryption;
use crate::jwu::JsonObject;

/// A JSON Web Encryption JOSE Header
/// ([RFC 7516 §4](https://tools.ietf.org/html/rfc7516#section-4)).
///
/// Like [`JwsHeader`][crate::jws::JwsHeader], a typed façade over an ordered
/// JSON object. Key wrapping algorithms may write additional members (`iv`,
/// `tag`) before the header is encoded.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JweHeader {
  inner: JsonObject,
}

impl JweHeader {
  /// Creates a new `JweHeader` with the given algorithms.
  pub fn new(algorithm: JweAlgorithm, encryption: JweEncryption) -> Self {
    let mut header: Self = Self {
      inner: JsonObject::new(),
    };
    header.set_alg(algorithm);
    header.set_enc(encryption);
    header
  }

  /// Returns the value of the `alg` property.
  pub fn alg(&self) -> Option<&str> {
    self.str_member("alg")
  }

  /// Sets the value of the `alg` property.
  pub fn set_alg(&mut self, value: JweAlgorithm) {
    self.set("alg", value.name());
  }

  /// Returns the value of the `enc` property.
  pub fn enc(&self) -> Option<&str> {
    self.str_member("enc")
  }

  /// Sets the value of the `enc` property.
  pub fn set_enc(&mut self, value: JweEncryption) {
    self.set("enc", value.name());
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

  /// Returns the value of the `iv` property, written by AES GCM key wrapping.
  pub fn iv(&self) -> Option<&str> {
    self.str_member("iv")
  }

  /// Sets the value of the `iv` property.
  pub fn set_iv(&mut self, value: impl Into<String>) {
    self.set("iv", value.into());
  }

  /// Returns the value of the `tag` property, written by AES GCM key wrapping.
  pub fn tag(&self) -> Option<&str> {
    self.str_member("tag")
  }

  /// Sets the value of the `tag` property.
  pub fn set_tag(&mut self, value: impl Into<String>) {
    self.set("tag", value.into());
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
