// Copyright 2020-2024 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeMap;

use crate::error::Error;
use crate::error::Result;
use crate::jwa::AesCbcHmacEncryption;
use crate::jwa::AesGcmEncryption;
use crate::jwa::AesGcmKeyWrap;
use crate::jwa::DirectKeyWrap;
use crate::jwa::EcdsaSigner;
use crate::jwa::HmacSigner;
use crate::jwa::JweContentEncryption;
use crate::jwa::JweKeyWrap;
use crate::jwa::JwsSigner;
use crate::jwa::NoneSigner;
use crate::jwa::RsaKeyWrap;
use crate::jwa::RsaSigner;
use crate::jwe::JweAlgorithm;
use crate::jwe::JweEncryption;
use crate::jws::JwsAlgorithm;

/// An immutable mapping from algorithm identifiers to implementations.
///
/// The registry is populated once at construction and is the single point
/// where algorithms are added. A lookup miss surfaces as
/// [`Error::UnsupportedAlgorithm`]; an algorithm identifier that is merely
/// *recognised* (such as the PBES2 family) is not *supported* until an
/// implementation is registered for it.
pub struct JwaRegistry {
  signers: BTreeMap<JwsAlgorithm, Box<dyn JwsSigner>>,
  key_wraps: BTreeMap<JweAlgorithm, Box<dyn JweKeyWrap>>,
  content_encryptions: BTreeMap<JweEncryption, Box<dyn JweContentEncryption>>,
}

impl JwaRegistry {
  /// Creates a new empty [`JwaRegistryBuilder`].
  pub fn builder() -> JwaRegistryBuilder {
    JwaRegistryBuilder {
      signers: BTreeMap::new(),
      key_wraps: BTreeMap::new(),
      content_encryptions: BTreeMap::new(),
    }
  }

  /// Creates a registry with every algorithm this library implements,
  /// including the unsecured `none` algorithm.
  pub fn standard() -> Self {
    Self::builder()
      .signer(NoneSigner)
      .signer(HmacSigner::new(JwsAlgorithm::HS256))
      .signer(HmacSigner::new(JwsAlgorithm::HS384))
      .signer(HmacSigner::new(JwsAlgorithm::HS512))
      .signer(RsaSigner::new(JwsAlgorithm::RS256))
      .signer(RsaSigner::new(JwsAlgorithm::RS384))
      .signer(RsaSigner::new(JwsAlgorithm::RS512))
      .signer(RsaSigner::new(JwsAlgorithm::PS256))
      .signer(RsaSigner::new(JwsAlgorithm::PS384))
      .signer(RsaSigner::new(JwsAlgorithm::PS512))
      .signer(EcdsaSigner::new(JwsAlgorithm::ES256))
      .signer(EcdsaSigner::new(JwsAlgorithm::ES384))
      .signer(EcdsaSigner::new(JwsAlgorithm::ES512))
      .key_wrap(DirectKeyWrap)
      .key_wrap(RsaKeyWrap::new(JweAlgorithm::RSA1_5))
      .key_wrap(RsaKeyWrap::new(JweAlgorithm::RSA_OAEP))
      .key_wrap(RsaKeyWrap::new(JweAlgorithm::RSA_OAEP_256))
      .key_wrap(AesGcmKeyWrap::new(JweAlgorithm::A128GCMKW))
      .key_wrap(AesGcmKeyWrap::new(JweAlgorithm::A192GCMKW))
      .key_wrap(AesGcmKeyWrap::new(JweAlgorithm::A256GCMKW))
      .content_encryption(AesCbcHmacEncryption::new(JweEncryption::A128CBC_HS256))
      .content_encryption(AesCbcHmacEncryption::new(JweEncryption::A192CBC_HS384))
      .content_encryption(AesCbcHmacEncryption::new(JweEncryption::A256CBC_HS512))
      .content_encryption(AesGcmEncryption::new(JweEncryption::A128GCM))
      .content_encryption(AesGcmEncryption::new(JweEncryption::A192GCM))
      .content_encryption(AesGcmEncryption::new(JweEncryption::A256GCM))
      .build()
  }

  /// Returns the signer registered for `algorithm`.
  pub fn signer(&self, algorithm: JwsAlgorithm) -> Result<&dyn JwsSigner> {
    self
      .signers
      .get(&algorithm)
      .map(AsRef::as_ref)
      .ok_or_else(|| Error::UnsupportedAlgorithm(algorithm.name().to_owned()))
  }

  /// Returns the key management implementation registered for `algorithm`.
  pub fn key_wrap(&self, algorithm: JweAlgorithm) -> Result<&dyn JweKeyWrap> {
    self
      .key_wraps
      .get(&algorithm)
      .map(AsRef::as_ref)
      .ok_or_else(|| Error::UnsupportedAlgorithm(algorithm.name().to_owned()))
  }

  /// Returns the content encryption implementation registered for
  /// `encryption`.
  pub fn content_encryption(&self, encryption: JweEncryption) -> Result<&dyn JweContentEncryption> {
    self
      .content_encryptions
      .get(&encryption)
      .map(AsRef::as_ref)
      .ok_or_else(|| Error::UnsupportedAlgorithm(encryption.name().to_owned()))
  }

  /// Returns every registered signing algorithm.
  pub fn supported_signing_algorithms(&self) -> Vec<JwsAlgorithm> {
    self.signers.keys().copied().collect()
  }

  /// Returns every registered key management algorithm.
  pub fn supported_key_management_algorithms(&self) -> Vec<JweAlgorithm> {
    self.key_wraps.keys().copied().collect()
  }

  /// Returns every registered content encryption algorithm.
  pub fn supported_content_encryption_algorithms(&self) -> Vec<JweEncryption> {
    self.content_encryptions.keys().copied().collect()
  }
}

/// A builder for [`JwaRegistry`].
pub struct JwaRegistryBuilder {
  signers: BTreeMap<JwsAlgorithm, Box<dyn JwsSigner>>,
  key_wraps: BTreeMap<JweAlgorithm, Box<dyn JweKeyWrap>>,
  content_encryptions: BTreeMap<JweEncryption, Box<dyn JweContentEncryption>>,
}

impl JwaRegistryBuilder {
  /// Registers a signature algorithm implementation.
  pub fn signer(mut self, signer: impl JwsSigner + 'static) -> Self {
    self.signers.insert(signer.alg(), Box::new(signer));
    self
  }

  /// Registers a key management algorithm implementation.
  pub fn key_wrap(mut self, wrapper: impl JweKeyWrap + 'static) -> Self {
    self.key_wraps.insert(wrapper.alg(), Box::new(wrapper));
    self
  }

  /// Registers a content encryption algorithm implementation.
  pub fn content_encryption(mut self, encryption: impl JweContentEncryption + 'static) -> Self {
    self.content_encryptions.insert(encryption.enc(), Box::new(encryption));
    self
  }

  /// Builds the immutable registry.
  pub fn build(self) -> JwaRegistry {
    JwaRegistry {
      signers: self.signers,
      key_wraps: self.key_wraps,
      content_encryptions: self.content_encryptions,
    }
  }
}
