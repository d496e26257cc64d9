// Copyright 2020-2024 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

mod fixtures;

use futures::stream;
use libjwt::error::Error;
use libjwt::jwa::JwaRegistry;
use libjwt::jwk::EcCurve;
use libjwt::jwk::Jwk;
use libjwt::jws::Decoder;
use libjwt::jws::Encoder;
use libjwt::jws::JwsAlgorithm;
use libjwt::jws::JwsHeader;
use libjwt::jws::Token;
use libjwt::jwu;

use crate::fixtures::jwk;

const CLAIMS: &[u8] = br#"{"sub":"alice"}"#;

fn signing_key(algorithm: JwsAlgorithm) -> Jwk {
  match algorithm {
    JwsAlgorithm::HS256 => jwk(fixtures::OCT_HS256_JWK),
    JwsAlgorithm::HS384 | JwsAlgorithm::HS512 => Jwk::random_oct(64).unwrap(),
    JwsAlgorithm::RS256
    | JwsAlgorithm::RS384
    | JwsAlgorithm::RS512
    | JwsAlgorithm::PS256
    | JwsAlgorithm::PS384
    | JwsAlgorithm::PS512 => jwk(fixtures::RSA_BILBO_JWK),
    JwsAlgorithm::ES256 => jwk(fixtures::EC_P256_ALICE_JWK),
    JwsAlgorithm::ES384 => Jwk::random_ec(EcCurve::P384).unwrap(),
    JwsAlgorithm::ES512 => jwk(fixtures::EC_P521_BILBO_JWK),
    JwsAlgorithm::NONE => unreachable!(),
  }
}

#[tokio::test]
async fn test_jws_roundtrip() {
  let registry: JwaRegistry = JwaRegistry::standard();

  for algorithm in JwsAlgorithm::ALL.iter().copied() {
    if algorithm == JwsAlgorithm::NONE {
      continue;
    }

    let key: Jwk = signing_key(algorithm);
    let mut header: JwsHeader = JwsHeader::new();
    header.set_alg(algorithm);

    let encoded: String = Encoder::new(&registry).encode(CLAIMS, &header, Some(&key)).unwrap();
    assert_eq!(encoded.split('.').count(), 3, "{algorithm}");

    let token: Token = Decoder::new(&registry)
      .decode(&encoded, stream::iter(vec![key]))
      .await
      .unwrap();

    assert_eq!(token.header.alg(), Some(algorithm.name()), "{algorithm}");
    assert_eq!(token.claims, CLAIMS, "{algorithm}");
  }
}

#[tokio::test]
async fn test_verification_works_with_sanitized_public_key() {
  let registry: JwaRegistry = JwaRegistry::standard();
  let secret: Jwk = jwk(fixtures::EC_P256_ALICE_JWK);
  let public: Jwk = secret.sanitize(false).unwrap();

  let mut header: JwsHeader = JwsHeader::new();
  header.set_alg(JwsAlgorithm::ES256);

  let encoded: String = Encoder::new(&registry).encode(CLAIMS, &header, Some(&secret)).unwrap();
  let token: Token = Decoder::new(&registry)
    .decode(&encoded, stream::iter(vec![public]))
    .await
    .unwrap();

  assert_eq!(token.claims, CLAIMS);
}

// RFC 7515 Appendix A.1
#[tokio::test]
async fn test_rfc7515_hs256_reference() {
  let registry: JwaRegistry = JwaRegistry::standard();
  let key: Jwk = jwk(fixtures::OCT_HS256_JWK);

  let token: Token = Decoder::new(&registry)
    .decode(fixtures::RFC7515_A1_TOKEN, stream::iter(vec![key]))
    .await
    .unwrap();

  assert_eq!(token.header.alg(), Some("HS256"));
  assert_eq!(token.header.typ(), Some("JWT"));

  let claims: serde_json::Value = serde_json::from_slice(&token.claims).unwrap();
  assert_eq!(claims["iss"], "joe");
  assert_eq!(claims["exp"], 1300819380);
}

#[tokio::test]
async fn test_tamper_detection() {
  let registry: JwaRegistry = JwaRegistry::standard();
  let key: Jwk = jwk(fixtures::OCT_HS256_JWK);

  let mut header: JwsHeader = JwsHeader::new();
  header.set_alg(JwsAlgorithm::HS256);

  let encoded: String = Encoder::new(&registry).encode(CLAIMS, &header, Some(&key)).unwrap();
  let segments: Vec<&str> = encoded.split('.').collect();

  // Corrupted payload: the signature no longer matches.
  let claims_tampered: String = format!(
    "{}.{}.{}",
    segments[0],
    flip_char(segments[1]),
    segments[2]
  );
  let result = Decoder::new(&registry)
    .decode(&claims_tampered, stream::iter(vec![key.clone()]))
    .await;
  assert!(matches!(result, Err(Error::InvalidToken("invalid signature"))));

  // Corrupted signature.
  let signature_tampered: String = format!(
    "{}.{}.{}",
    segments[0],
    segments[1],
    flip_char(segments[2])
  );
  let result = Decoder::new(&registry)
    .decode(&signature_tampered, stream::iter(vec![key.clone()]))
    .await;
  assert!(matches!(result, Err(Error::InvalidToken("invalid signature"))));

  // Corrupted header: either unparseable or no longer authenticated.
  let header_tampered: String = format!(
    "{}.{}.{}",
    flip_char(segments[0]),
    segments[1],
    segments[2]
  );
  let result = Decoder::new(&registry)
    .decode(&header_tampered, stream::iter(vec![key]))
    .await;
  assert!(result.is_err());
}

fn flip_char(segment: &str) -> String {
  let mut chars: Vec<char> = segment.chars().collect();
  chars[0] = if chars[0] == 'A' { 'B' } else { 'A' };
  chars.into_iter().collect()
}

// A token issued under RS256 must not verify after the header is rewritten
// to claim HS256, no matter which key material the verifier holds.
#[tokio::test]
async fn test_algorithm_confusion_is_rejected() {
  let registry: JwaRegistry = JwaRegistry::standard();
  let secret: Jwk = jwk(fixtures::RSA_BILBO_NO_KID_JWK);

  let mut header: JwsHeader = JwsHeader::new();
  header.set_alg(JwsAlgorithm::RS256);

  let encoded: String = Encoder::new(&registry).encode(CLAIMS, &header, Some(&secret)).unwrap();
  let segments: Vec<&str> = encoded.split('.').collect();

  let mut confused_header: JwsHeader = JwsHeader::new();
  confused_header.set_alg(JwsAlgorithm::HS256);
  let confused: String = format!(
    "{}.{}.{}",
    jwu::encode_b64(serde_json::to_vec(&confused_header).unwrap()),
    segments[1],
    segments[2]
  );

  // The RSA key itself is not usable as an HMAC secret.
  let result = Decoder::new(&registry)
    .decode(&confused, stream::iter(vec![secret.sanitize(false).unwrap()]))
    .await;
  assert!(matches!(result, Err(Error::InvalidToken("invalid signature"))));

  // Neither is an octet key carved out of the RSA modulus bytes.
  let modulus: Vec<u8> = jwu::decode_b64(
    serde_json::from_str::<serde_json::Value>(fixtures::RSA_BILBO_NO_KID_JWK).unwrap()["n"]
      .as_str()
      .unwrap(),
  )
  .unwrap();
  let derived: Jwk = Jwk::from_params(libjwt::jwk::JwkParamsOct {
    k: Some(jwu::encode_b64(&modulus)),
  });

  let result = Decoder::new(&registry).decode(&confused, stream::iter(vec![derived])).await;
  assert!(matches!(result, Err(Error::InvalidToken("invalid signature"))));
}

#[tokio::test]
async fn test_kid_selection() {
  let registry: JwaRegistry = JwaRegistry::standard();

  let mut right: Jwk = jwk(fixtures::OCT_HS256_JWK);
  right.set_kid("key-2");
  let mut wrong: Jwk = Jwk::random_oct(32).unwrap();
  wrong.set_kid("key-1");

  let mut header: JwsHeader = JwsHeader::new();
  header.set_alg(JwsAlgorithm::HS256);

  let encoded: String = Encoder::new(&registry).encode(CLAIMS, &header, Some(&right)).unwrap();

  // The full set verifies: the matching identifier is selected.
  let token: Token = Decoder::new(&registry)
    .decode(&encoded, stream::iter(vec![wrong.clone(), right.clone()]))
    .await
    .unwrap();
  assert_eq!(token.header.kid(), Some("key-2"));

  // Only the wrong identifier available: no candidate is even tried.
  let result = Decoder::new(&registry).decode(&encoded, stream::iter(vec![wrong])).await;
  assert!(matches!(result, Err(Error::InvalidToken("no signing keys found"))));
}

#[tokio::test]
async fn test_empty_key_set() {
  let registry: JwaRegistry = JwaRegistry::standard();
  let key: Jwk = jwk(fixtures::OCT_HS256_JWK);

  let mut header: JwsHeader = JwsHeader::new();
  header.set_alg(JwsAlgorithm::HS256);

  let encoded: String = Encoder::new(&registry).encode(CLAIMS, &header, Some(&key)).unwrap();

  let result = Decoder::new(&registry).decode(&encoded, stream::iter(Vec::new())).await;
  assert!(matches!(result, Err(Error::InvalidToken("no signing keys found"))));
}

#[tokio::test]
async fn test_unsecured_token_roundtrip() {
  let registry: JwaRegistry = JwaRegistry::standard();

  // A stale algorithm selection is overridden by the missing key.
  let mut header: JwsHeader = JwsHeader::new();
  header.set_alg(JwsAlgorithm::HS256);
  header.set_kid("stale");

  let encoded: String = Encoder::new(&registry).encode(CLAIMS, &header, None).unwrap();
  assert!(encoded.ends_with('.'));

  let token: Token = Decoder::new(&registry)
    .decode(&encoded, stream::iter(Vec::new()))
    .await
    .unwrap();
  assert_eq!(token.header.alg(), Some("none"));
  assert_eq!(token.header.kid(), None);
  assert_eq!(token.claims, CLAIMS);
}

#[test]
fn test_explicit_none_with_key_is_rejected() {
  let registry: JwaRegistry = JwaRegistry::standard();
  let key: Jwk = jwk(fixtures::OCT_HS256_JWK);

  let mut header: JwsHeader = JwsHeader::new();
  header.set_alg(JwsAlgorithm::NONE);

  let result = Encoder::new(&registry).encode(CLAIMS, &header, Some(&key));
  assert!(matches!(result, Err(Error::AlgorithmMismatch)));
}

#[test]
fn test_header_and_key_algorithm_disagreement() {
  let registry: JwaRegistry = JwaRegistry::standard();

  let mut key: Jwk = jwk(fixtures::OCT_HS256_JWK);
  key.set_alg("HS512");

  let mut header: JwsHeader = JwsHeader::new();
  header.set_alg(JwsAlgorithm::HS256);

  let result = Encoder::new(&registry).encode(CLAIMS, &header, Some(&key));
  assert!(matches!(result, Err(Error::AlgorithmMismatch)));
}

#[test]
fn test_weak_hmac_key_is_rejected() {
  let registry: JwaRegistry = JwaRegistry::standard();
  let key: Jwk = Jwk::random_oct(16).unwrap();

  let mut header: JwsHeader = JwsHeader::new();
  header.set_alg(JwsAlgorithm::HS256);

  let result = Encoder::new(&registry).encode(CLAIMS, &header, Some(&key));
  assert!(matches!(result, Err(Error::WeakKey(_))));
}
