// Copyright 2020-2024 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

mod fixtures;

use futures::stream;
use libjwt::error::Error;
use libjwt::jwa::JwaRegistry;
use libjwt::jwe::Decoder;
use libjwt::jwe::Encoder;
use libjwt::jwe::JweAlgorithm;
use libjwt::jwe::JweEncryption;
use libjwt::jwe::JweHeader;
use libjwt::jwk::Jwk;
use libjwt::jwu;
use serde_json::Value;

use crate::fixtures::jwk;

const PLAINTEXT: &[u8] = b"The true sign of intelligence is not knowledge but imagination.";

fn recipient_key(algorithm: JweAlgorithm, encryption: JweEncryption) -> Jwk {
  match algorithm {
    JweAlgorithm::DIR => Jwk::random_oct(encryption.key_len()).unwrap(),
    JweAlgorithm::RSA1_5 | JweAlgorithm::RSA_OAEP | JweAlgorithm::RSA_OAEP_256 => jwk(fixtures::RSA_BILBO_JWK),
    JweAlgorithm::A128GCMKW => Jwk::random_oct(16).unwrap(),
    JweAlgorithm::A192GCMKW => Jwk::random_oct(24).unwrap(),
    JweAlgorithm::A256GCMKW => Jwk::random_oct(32).unwrap(),
    _ => unreachable!(),
  }
}

#[tokio::test]
async fn test_jwe_roundtrip() {
  let registry: JwaRegistry = JwaRegistry::standard();

  let algorithms: &[JweAlgorithm] = &[
    JweAlgorithm::DIR,
    JweAlgorithm::RSA1_5,
    JweAlgorithm::RSA_OAEP,
    JweAlgorithm::RSA_OAEP_256,
    JweAlgorithm::A128GCMKW,
    JweAlgorithm::A192GCMKW,
    JweAlgorithm::A256GCMKW,
  ];

  for algorithm in algorithms.iter().copied() {
    for encryption in JweEncryption::ALL.iter().copied() {
      let key: Jwk = recipient_key(algorithm, encryption);
      let header: JweHeader = JweHeader::new(algorithm, encryption);

      let encoded: String = Encoder::new(&registry).encode(PLAINTEXT, &key, header).unwrap();
      assert_eq!(encoded.split('.').count(), 5, "{algorithm} {encryption}");

      let (header, plaintext) = Decoder::new(&registry)
        .decode(&encoded, stream::iter(vec![key]))
        .await
        .unwrap();

      assert_eq!(header.alg(), Some(algorithm.name()), "{algorithm} {encryption}");
      assert_eq!(header.enc(), Some(encryption.name()), "{algorithm} {encryption}");
      assert_eq!(plaintext, PLAINTEXT, "{algorithm} {encryption}");
    }
  }
}

#[tokio::test]
async fn test_tamper_detection() {
  let registry: JwaRegistry = JwaRegistry::standard();
  let key: Jwk = jwk(fixtures::OCT_A256_ENC_JWK);
  let header: JweHeader = JweHeader::new(JweAlgorithm::DIR, JweEncryption::A256GCM);

  let encoded: String = Encoder::new(&registry).encode(PLAINTEXT, &key, header).unwrap();
  let segments: Vec<&str> = encoded.split('.').collect();

  for index in [0, 2, 3, 4] {
    let mut tampered: Vec<String> = segments.iter().map(|s| (*s).to_owned()).collect();
    let mut chars: Vec<char> = tampered[index].chars().collect();
    chars[0] = if chars[0] == 'A' { 'B' } else { 'A' };
    tampered[index] = chars.into_iter().collect();

    let result = Decoder::new(&registry)
      .decode(&tampered.join("."), stream::iter(vec![key.clone()]))
      .await;
    assert!(result.is_err(), "segment {index} accepted after tampering");
  }

  // The encrypted-key segment of a direct token is empty; any content there
  // disqualifies the key.
  let mut tampered: Vec<String> = segments.iter().map(|s| (*s).to_owned()).collect();
  tampered[1] = "AA".to_owned();
  let result = Decoder::new(&registry)
    .decode(&tampered.join("."), stream::iter(vec![key.clone()]))
    .await;
  assert!(matches!(
    result,
    Err(Error::InvalidToken("failed to decrypt with any available key"))
  ));
}

// Decryption binds the received header bytes, not a re-serialization: the
// same members in a different order must fail authentication.
#[tokio::test]
async fn test_aad_uses_received_header_bytes() {
  let registry: JwaRegistry = JwaRegistry::standard();
  let key: Jwk = jwk(fixtures::RSA_BILBO_JWK);
  let header: JweHeader = JweHeader::new(JweAlgorithm::RSA_OAEP_256, JweEncryption::A256CBC_HS512);

  let encoded: String = Encoder::new(&registry).encode(PLAINTEXT, &key, header).unwrap();
  let segments: Vec<&str> = encoded.split('.').collect();

  let parsed: serde_json::Map<String, Value> =
    serde_json::from_slice(&jwu::decode_b64(segments[0]).unwrap()).unwrap();
  let reversed: serde_json::Map<String, Value> = parsed.into_iter().rev().collect();
  let reordered: String = jwu::encode_b64(serde_json::to_vec(&reversed).unwrap());
  assert_ne!(reordered, segments[0]);

  let shuffled: String = format!(
    "{}.{}.{}.{}.{}",
    reordered, segments[1], segments[2], segments[3], segments[4]
  );

  let result = Decoder::new(&registry).decode(&shuffled, stream::iter(vec![key])).await;
  assert!(matches!(
    result,
    Err(Error::InvalidToken("failed to decrypt with any available key"))
  ));
}

#[tokio::test]
async fn test_wrong_key_fails_silently() {
  let registry: JwaRegistry = JwaRegistry::standard();
  let key: Jwk = Jwk::random_oct(32).unwrap();
  let other: Jwk = Jwk::random_oct(32).unwrap();
  let header: JweHeader = JweHeader::new(JweAlgorithm::A256GCMKW, JweEncryption::A128GCM);

  let encoded: String = Encoder::new(&registry).encode(PLAINTEXT, &key, header).unwrap();

  let result = Decoder::new(&registry).decode(&encoded, stream::iter(vec![other])).await;
  assert!(matches!(
    result,
    Err(Error::InvalidToken("failed to decrypt with any available key"))
  ));

  // The right key after the wrong one still succeeds.
  let (_, plaintext) = Decoder::new(&registry)
    .decode(&encoded, stream::iter(vec![Jwk::random_oct(32).unwrap(), key]))
    .await
    .unwrap();
  assert_eq!(plaintext, PLAINTEXT);
}

#[test]
fn test_direct_encryption_key_length_mismatch() {
  let registry: JwaRegistry = JwaRegistry::standard();

  // A256CBC-HS512 needs a 64-byte key; a 32-byte octet key cannot serve.
  let key: Jwk = jwk(fixtures::OCT_A256_ENC_JWK);
  let header: JweHeader = JweHeader::new(JweAlgorithm::DIR, JweEncryption::A256CBC_HS512);

  let result = Encoder::new(&registry).encode(PLAINTEXT, &key, header);
  assert!(matches!(result, Err(Error::InvalidKey(_))));
}

#[test]
fn test_unimplemented_key_management_is_unsupported() {
  let registry: JwaRegistry = JwaRegistry::standard();
  let key: Jwk = Jwk::random_oct(16).unwrap();
  let header: JweHeader = JweHeader::new(JweAlgorithm::PBES2_HS256_A128KW, JweEncryption::A128GCM);

  let result = Encoder::new(&registry).encode(PLAINTEXT, &key, header);
  assert!(matches!(result, Err(Error::UnsupportedAlgorithm(_))));
}
