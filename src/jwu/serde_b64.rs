// Copyright 2020-2024 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

//! Serde adapters for JWK members that are base64-encoded on the wire but
//! raw bytes in memory.

/// `x5t`-style members: unpadded base64url of a byte string.
pub(crate) mod bytes_b64url {
  use serde::Deserialize;
  use serde::Deserializer;
  use serde::Serializer;

  pub(crate) fn serialize<S: Serializer>(value: &Option<Vec<u8>>, serializer: S) -> Result<S::Ok, S::Error> {
    match value {
      Some(bytes) => serializer.serialize_str(&crate::jwu::encode_b64(bytes)),
      None => serializer.serialize_none(),
    }
  }

  pub(crate) fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Vec<u8>>, D::Error> {
    match Option::<String>::deserialize(deserializer)? {
      Some(string) => crate::jwu::decode_b64(string)
        .map(Some)
        .map_err(serde::de::Error::custom),
      None => Ok(None),
    }
  }
}

/// `x5c`-style members: a list of standard (not URL-safe) base64 strings,
/// one DER certificate each (RFC 7517 §4.7).
pub(crate) mod cert_chain_b64 {
  use serde::Deserialize;
  use serde::Deserializer;
  use serde::Serializer;

  pub(crate) fn serialize<S: Serializer>(value: &Option<Vec<Vec<u8>>>, serializer: S) -> Result<S::Ok, S::Error> {
    match value {
      Some(certificates) => {
        let encoded: Vec<String> = certificates
          .iter()
          .map(|der| base64::encode_config(der, base64::STANDARD))
          .collect();
        serializer.collect_seq(encoded)
      }
      None => serializer.serialize_none(),
    }
  }

  pub(crate) fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Vec<Vec<u8>>>, D::Error> {
    match Option::<Vec<String>>::deserialize(deserializer)? {
      Some(encoded) => encoded
        .into_iter()
        .map(|der| base64::decode_config(der, base64::STANDARD).map_err(serde::de::Error::custom))
        .collect::<Result<Vec<Vec<u8>>, D::Error>>()
        .map(Some),
      None => Ok(None),
    }
  }
}
