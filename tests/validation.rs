// Copyright 2020-2024 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

mod fixtures;

use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;

use futures::stream;
use futures::StreamExt;
use libjwt::error::Error;
use libjwt::issuer::IssueOptions;
use libjwt::issuer::JwtIssuer;
use libjwt::jwa::JwaRegistry;
use libjwt::jwk::Jwk;
use libjwt::jwt::Jwt;
use libjwt::jwu;
use libjwt::validator::DecodedToken;
use libjwt::validator::JwtValidator;
use libjwt::validator::ValidationParameters;

use crate::fixtures::jwk;
use crate::fixtures::key_stream;

/// The 32-byte shared secret 0x00..0x1f.
fn counting_key() -> Jwk {
  let bytes: Vec<u8> = (0u8..32).collect();
  let mut key: Jwk = serde_json::from_value(serde_json::json!({
    "kty": "oct",
    "k": jwu::encode_b64(bytes),
  }))
  .unwrap();
  key.set_alg("HS256");
  key
}

fn hs256_token(registry: &JwaRegistry, key: &Jwk) -> String {
  let mut token: Jwt = Jwt::new();
  token.claims.set_sub("alice");
  token.claims.set_exp(2_000_000_000);

  JwtIssuer::new(registry)
    .issue(&token, &IssueOptions::new().signing_key(key))
    .unwrap()
}

#[tokio::test]
async fn test_hs256_roundtrip_before_expiry() {
  let registry: JwaRegistry = JwaRegistry::standard();
  let key: Jwk = counting_key();
  let compact: String = hs256_token(&registry, &key);

  let resolver_key: Jwk = key.clone();
  let params: ValidationParameters = ValidationParameters::new()
    .signing_keys(move |_| key_stream(vec![resolver_key.clone()]))
    .clock(|| 1_999_999_999);

  let decoded: DecodedToken = JwtValidator::new(&registry).validate(&compact, &params).await.unwrap();
  assert_eq!(decoded.header.alg(), Some("HS256"));
  assert_eq!(decoded.claims.sub(), Some("alice"));
}

#[tokio::test]
async fn test_hs256_expired() {
  let registry: JwaRegistry = JwaRegistry::standard();
  let key: Jwk = counting_key();
  let compact: String = hs256_token(&registry, &key);

  let resolver_key: Jwk = key.clone();
  let params: ValidationParameters = ValidationParameters::new()
    .signing_keys(move |_| key_stream(vec![resolver_key.clone()]))
    .clock(|| 2_000_000_001);

  let result = JwtValidator::new(&registry).validate(&compact, &params).await;
  assert!(matches!(result, Err(Error::TokenExpired)));
}

#[tokio::test]
async fn test_clock_skew_extends_validity() {
  let registry: JwaRegistry = JwaRegistry::standard();
  let key: Jwk = counting_key();
  let compact: String = hs256_token(&registry, &key);

  let resolver_key: Jwk = key.clone();
  let params: ValidationParameters = ValidationParameters::new()
    .signing_keys(move |_| key_stream(vec![resolver_key.clone()]))
    .clock(|| 2_000_000_004)
    .clock_skew(Duration::from_secs(5));

  assert!(JwtValidator::new(&registry).validate(&compact, &params).await.is_ok());
}

#[tokio::test]
async fn test_not_yet_valid() {
  let registry: JwaRegistry = JwaRegistry::standard();
  let key: Jwk = counting_key();

  let mut token: Jwt = Jwt::new();
  token.claims.set_sub("alice");
  token.claims.set_nbf(1_000_000_000);
  token.claims.set_exp(2_000_000_000);
  let compact: String = JwtIssuer::new(&registry)
    .issue(&token, &IssueOptions::new().signing_key(&key))
    .unwrap();

  let resolver_key: Jwk = key.clone();
  let params: ValidationParameters = ValidationParameters::new()
    .signing_keys(move |_| key_stream(vec![resolver_key.clone()]))
    .clock(|| 999_999_000);

  let result = JwtValidator::new(&registry).validate(&compact, &params).await;
  assert!(matches!(result, Err(Error::TokenNotYetValid)));
}

#[tokio::test]
async fn test_rs256_with_wrong_public_key() {
  let registry: JwaRegistry = JwaRegistry::standard();

  let mut signing: Jwk = jwk(fixtures::RSA_BILBO_NO_KID_JWK);
  signing.set_alg("RS256");

  let mut token: Jwt = Jwt::new();
  token.claims.set_sub("alice");
  token.claims.set_exp(2_000_000_000);
  let compact: String = JwtIssuer::new(&registry)
    .issue(&token, &IssueOptions::new().signing_key(&signing))
    .unwrap();

  let params: ValidationParameters = ValidationParameters::new()
    .signing_keys(move |_| key_stream(vec![jwk(fixtures::RSA_2011_PUBLIC_JWK)]))
    .clock(|| 1_999_999_999);

  let result = JwtValidator::new(&registry).validate(&compact, &params).await;
  assert!(matches!(result, Err(Error::InvalidToken("invalid signature"))));
}

#[tokio::test]
async fn test_nested_jwe_roundtrip() {
  let registry: JwaRegistry = JwaRegistry::standard();

  let mut rsa: Jwk = jwk(fixtures::RSA_BILBO_JWK);
  rsa.set_alg("RS256");

  let mut token: Jwt = Jwt::new();
  token.claims.set("hello", "world");

  let compact: String = JwtIssuer::new(&registry)
    .issue(
      &token,
      &IssueOptions::new().signing_key(&rsa).encryption_key(&rsa).typ("JWT"),
    )
    .unwrap();
  assert_eq!(compact.split('.').count(), 5);

  // `typ` travels on the outermost header only, alongside the nesting marker.
  let outer: serde_json::Value =
    serde_json::from_slice(&jwu::decode_b64(compact.split('.').next().unwrap()).unwrap()).unwrap();
  assert_eq!(outer["typ"], "JWT");
  assert_eq!(outer["cty"], "JWT");

  let signing_rsa: Jwk = rsa.clone();
  let decryption_rsa: Jwk = rsa.clone();
  let params: ValidationParameters = ValidationParameters::new()
    .signing_keys(move |_| key_stream(vec![signing_rsa.clone()]))
    .decryption_keys(move |_| key_stream(vec![decryption_rsa.clone()]));

  let decoded: DecodedToken = JwtValidator::new(&registry).validate(&compact, &params).await.unwrap();
  assert_eq!(decoded.claims.get("hello"), Some(&serde_json::Value::String("world".to_owned())));
  assert_eq!(decoded.header.typ(), None);
}

#[tokio::test]
async fn test_jwe_without_decryption_keys() {
  let registry: JwaRegistry = JwaRegistry::standard();

  let mut rsa: Jwk = jwk(fixtures::RSA_BILBO_JWK);
  rsa.set_alg("RS256");

  let mut token: Jwt = Jwt::new();
  token.claims.set_sub("alice");
  let compact: String = JwtIssuer::new(&registry)
    .issue(&token, &IssueOptions::new().signing_key(&rsa).encryption_key(&rsa))
    .unwrap();

  let params: ValidationParameters = ValidationParameters::new();
  let result = JwtValidator::new(&registry).validate(&compact, &params).await;
  assert!(matches!(result, Err(Error::InvalidToken("no decryption keys configured"))));
}

#[tokio::test]
async fn test_unsigned_tokens_are_opt_in() {
  let registry: JwaRegistry = JwaRegistry::standard();

  let mut token: Jwt = Jwt::new();
  token.claims.set_sub("alice");
  token.claims.set_exp(2_000_000_000);
  let compact: String = JwtIssuer::new(&registry).issue(&token, &IssueOptions::new()).unwrap();

  // The default policy rejects the unsecured algorithm outright.
  let params: ValidationParameters = ValidationParameters::new().clock(|| 1_999_999_999);
  let result = JwtValidator::new(&registry).validate(&compact, &params).await;
  assert!(matches!(result, Err(Error::InvalidToken(_))));

  // Accepting it requires the explicit opt-out.
  let params: ValidationParameters = ValidationParameters::new()
    .require_signed_tokens(false)
    .clock(|| 1_999_999_999);
  let decoded: DecodedToken = JwtValidator::new(&registry).validate(&compact, &params).await.unwrap();
  assert_eq!(decoded.header.alg(), Some("none"));
}

#[tokio::test]
async fn test_audience_validation() {
  let registry: JwaRegistry = JwaRegistry::standard();
  let key: Jwk = counting_key();

  let issue = |aud: Vec<&str>| {
    let mut token: Jwt = Jwt::new();
    token.claims.set_aud(aud);
    token.claims.set_exp(2_000_000_000);
    JwtIssuer::new(&registry)
      .issue(&token, &IssueOptions::new().signing_key(&key))
      .unwrap()
  };

  let parameters = |key: Jwk| {
    ValidationParameters::new()
      .signing_keys(move |_| key_stream(vec![key.clone()]))
      .audience_validator(|aud| aud.iter().any(|value| value == "b"))
      .clock(|| 1_999_999_999)
  };

  let decoded: DecodedToken = JwtValidator::new(&registry)
    .validate(&issue(vec!["a", "b"]), &parameters(key.clone()))
    .await
    .unwrap();
  assert_eq!(decoded.claims.aud(), vec!["a", "b"]);

  let result = JwtValidator::new(&registry)
    .validate(&issue(vec!["a"]), &parameters(key.clone()))
    .await;
  assert!(matches!(result, Err(Error::AudienceRejected)));
}

#[tokio::test]
async fn test_issuer_validation_and_resolver_narrowing() {
  let registry: JwaRegistry = JwaRegistry::standard();
  let key: Jwk = counting_key();

  let mut token: Jwt = Jwt::new();
  token.claims.set_iss("https://issuer.example.com");
  token.claims.set_exp(2_000_000_000);
  let compact: String = JwtIssuer::new(&registry)
    .issue(&token, &IssueOptions::new().signing_key(&key))
    .unwrap();

  let seen: Arc<Mutex<Option<String>>> = Arc::new(Mutex::new(None));
  let recorded: Arc<Mutex<Option<String>>> = Arc::clone(&seen);
  let resolver_key: Jwk = key.clone();

  let params: ValidationParameters = ValidationParameters::new()
    .signing_keys(move |issuer| {
      *recorded.lock().unwrap() = issuer.map(str::to_owned);
      key_stream(vec![resolver_key.clone()])
    })
    .issuer_validator(|iss| iss == "https://issuer.example.com")
    .clock(|| 1_999_999_999);

  assert!(JwtValidator::new(&registry).validate(&compact, &params).await.is_ok());
  assert_eq!(seen.lock().unwrap().as_deref(), Some("https://issuer.example.com"));

  let resolver_key: Jwk = key.clone();
  let params: ValidationParameters = ValidationParameters::new()
    .signing_keys(move |_| key_stream(vec![resolver_key.clone()]))
    .issuer_validator(|iss| iss == "https://other.example.com")
    .clock(|| 1_999_999_999);

  let result = JwtValidator::new(&registry).validate(&compact, &params).await;
  assert!(matches!(result, Err(Error::IssuerRejected)));
}

// Disabling issuer-scoped key resolution widens the resolver call; it never
// turns off the signature check itself.
#[tokio::test]
async fn test_signature_is_checked_without_issuer_scoped_resolution() {
  let registry: JwaRegistry = JwaRegistry::standard();
  let key: Jwk = counting_key();

  let mut token: Jwt = Jwt::new();
  token.claims.set_iss("https://issuer.example.com");
  token.claims.set_exp(2_000_000_000);
  let compact: String = JwtIssuer::new(&registry)
    .issue(&token, &IssueOptions::new().signing_key(&key))
    .unwrap();

  let seen: Arc<Mutex<Option<String>>> = Arc::new(Mutex::new(None));
  let recorded: Arc<Mutex<Option<String>>> = Arc::clone(&seen);
  let resolver_key: Jwk = key.clone();

  let params: ValidationParameters = ValidationParameters::new()
    .validate_signing_key(false)
    .signing_keys(move |issuer| {
      *recorded.lock().unwrap() = issuer.map(str::to_owned);
      key_stream(vec![resolver_key.clone()])
    })
    .clock(|| 1_999_999_999);

  assert!(JwtValidator::new(&registry).validate(&compact, &params).await.is_ok());
  assert_eq!(*seen.lock().unwrap(), None);

  // A token the resolved keys cannot verify still fails.
  let wrong: Jwk = Jwk::random_oct(32).unwrap();
  let params: ValidationParameters = ValidationParameters::new()
    .validate_signing_key(false)
    .signing_keys(move |_| key_stream(vec![wrong.clone()]))
    .clock(|| 1_999_999_999);

  let result = JwtValidator::new(&registry).validate(&compact, &params).await;
  assert!(matches!(result, Err(Error::InvalidToken("invalid signature"))));
}

// The first successful candidate wins; the rest of the stream is never
// polled.
#[tokio::test]
async fn test_key_resolution_short_circuits() {
  let registry: JwaRegistry = JwaRegistry::standard();
  let key: Jwk = counting_key();
  let compact: String = hs256_token(&registry, &key);

  let polled: Arc<AtomicUsize> = Arc::new(AtomicUsize::new(0));
  let counter: Arc<AtomicUsize> = Arc::clone(&polled);
  let resolver_key: Jwk = key.clone();

  let params: ValidationParameters = ValidationParameters::new()
    .signing_keys(move |_| {
      let counter: Arc<AtomicUsize> = Arc::clone(&counter);
      let key: Jwk = resolver_key.clone();
      stream::iter(std::iter::repeat_with(move || key.clone()).take(8))
        .inspect(move |_| {
          counter.fetch_add(1, Ordering::SeqCst);
        })
        .boxed()
    })
    .clock(|| 1_999_999_999);

  assert!(JwtValidator::new(&registry).validate(&compact, &params).await.is_ok());
  assert_eq!(polled.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_malformed_compact_serializations() {
  let registry: JwaRegistry = JwaRegistry::standard();
  let params: ValidationParameters = ValidationParameters::new();

  for input in ["", "a.b", "a.b.c.d", "a.b.c.d.e.f"] {
    let result = JwtValidator::new(&registry).validate(input, &params).await;
    assert!(
      matches!(result, Err(Error::InvalidToken("malformed compact serialization"))),
      "{input:?}"
    );
  }
}
