//! Ident Validator
//!
//! Pure predicate over candidate strings. Structure is always checked;
//! each tag is checked only when its key is configured. The sign tag is
//! recomputed over whatever verify bytes were decoded, so a sign-only
//! validator still detects tampering with the verify tag.

use tracing::{debug, trace};

use crate::adapters::{Base32H, Sha256Mac, SnowflakeLayout};
use crate::domain::{
    compute_sign_tag, compute_verify_tag, is_lax_candidate, tags_match, ConfigError, Envelope,
    IdentKey, Rejection, TrustMode, ALL_SIZE, SIGN_SIZE,
};
use crate::ports::{IdInspector, IdentValidatorApi, KeyedHash, TextCodec};

/// Validator keys. Both optional; an empty key counts as absent.
#[derive(Clone, Debug, Default)]
pub struct ValidatorConfig {
    /// Key for the sign tag
    pub sign_key: Option<IdentKey>,
    /// Key for the verify tag
    pub verify_key: Option<IdentKey>,
}

impl ValidatorConfig {
    /// Both keys.
    pub fn both(sign_key: impl Into<IdentKey>, verify_key: impl Into<IdentKey>) -> Self {
        Self {
            sign_key: Some(sign_key.into()),
            verify_key: Some(verify_key.into()),
        }
    }

    /// Sign key only.
    pub fn sign_only(sign_key: impl Into<IdentKey>) -> Self {
        Self {
            sign_key: Some(sign_key.into()),
            verify_key: None,
        }
    }

    /// Verify key only.
    pub fn verify_only(verify_key: impl Into<IdentKey>) -> Self {
        Self {
            sign_key: None,
            verify_key: Some(verify_key.into()),
        }
    }

    fn has_sign_key(&self) -> bool {
        self.sign_key.as_ref().is_some_and(|k| !k.is_empty())
    }

    fn has_verify_key(&self) -> bool {
        self.verify_key.as_ref().is_some_and(|k| !k.is_empty())
    }
}

/// Ident validator. Immutable once built.
#[derive(Debug)]
pub struct IdentValidator<
    I: IdInspector = SnowflakeLayout,
    C: TextCodec = Base32H,
    H: KeyedHash = Sha256Mac,
> {
    inspector: I,
    codec: C,
    hasher: H,
    sign_key: Option<IdentKey>,
    verify_key: Option<IdentKey>,
}

impl IdentValidator<SnowflakeLayout, Base32H, Sha256Mac> {
    /// Validator for any key combination.
    pub fn new(config: ValidatorConfig) -> Self {
        Self::build(config, SnowflakeLayout, Base32H, Sha256Mac)
    }

    /// Validator that must check the sign tag.
    pub fn require_sign(config: ValidatorConfig) -> Result<Self, ConfigError> {
        if !config.has_sign_key() {
            return Err(ConfigError::MissingSignKey);
        }
        Ok(Self::new(config))
    }

    /// Validator that must check the verify tag.
    pub fn require_verify(config: ValidatorConfig) -> Result<Self, ConfigError> {
        if !config.has_verify_key() {
            return Err(ConfigError::MissingVerifyKey);
        }
        Ok(Self::new(config))
    }

    /// Validator that must check both tags.
    pub fn require_both(config: ValidatorConfig) -> Result<Self, ConfigError> {
        if !config.has_sign_key() {
            return Err(ConfigError::MissingSignKey);
        }
        if !config.has_verify_key() {
            return Err(ConfigError::MissingVerifyKey);
        }
        Ok(Self::new(config))
    }
}

impl<I: IdInspector, C: TextCodec, H: KeyedHash> IdentValidator<I, C, H> {
    /// Validator with every collaborator supplied.
    ///
    /// Fails with `DigestTooShort` if the keyed hash cannot cover the sign tag.
    pub fn with_providers(
        config: ValidatorConfig,
        inspector: I,
        codec: C,
        hasher: H,
    ) -> Result<Self, ConfigError> {
        if hasher.output_len() < SIGN_SIZE {
            return Err(ConfigError::DigestTooShort {
                len: hasher.output_len(),
                min: SIGN_SIZE,
            });
        }
        Ok(Self::build(config, inspector, codec, hasher))
    }

    fn build(config: ValidatorConfig, inspector: I, codec: C, hasher: H) -> Self {
        let sign_key = config.sign_key.filter(|k| !k.is_empty());
        let verify_key = config.verify_key.filter(|k| !k.is_empty());
        let validator = Self {
            inspector,
            codec,
            hasher,
            sign_key,
            verify_key,
        };
        debug!("[ident] validator ready: {:?}", validator.trust_mode());
        validator
    }

    /// Consume the validator into a plain predicate.
    pub fn into_predicate(self) -> impl Fn(&str) -> bool + Send + Sync {
        move |candidate: &str| self.validate(candidate)
    }
}

fn rejected(reason: Rejection) -> Rejection {
    trace!("[ident] rejected: {}", reason);
    reason
}

impl<I: IdInspector, C: TextCodec, H: KeyedHash> IdentValidatorApi for IdentValidator<I, C, H> {
    fn check(&self, candidate: &str) -> Result<Envelope, Rejection> {
        let envelope = self.decode_envelope(candidate)?;

        let id = envelope.id();
        if !self.inspector.is_valid(id) {
            return Err(rejected(Rejection::InvalidId { id }));
        }

        if let Some(key) = &self.verify_key {
            let expected = compute_verify_tag(&self.hasher, key, envelope.verify_message());
            if !tags_match(&expected, envelope.verify_tag()) {
                return Err(rejected(Rejection::VerifyMismatch));
            }
        }

        if let Some(key) = &self.sign_key {
            let expected = compute_sign_tag(&self.hasher, key, envelope.sign_message());
            if !tags_match(&expected, envelope.sign_tag()) {
                return Err(rejected(Rejection::SignMismatch));
            }
        }

        Ok(envelope)
    }

    fn decode_envelope(&self, candidate: &str) -> Result<Envelope, Rejection> {
        if !is_lax_candidate(candidate) {
            return Err(rejected(Rejection::NotAlphanumeric));
        }

        let decoded = self
            .codec
            .decode(candidate)
            .map_err(|_| rejected(Rejection::Undecodable))?;

        let start = decoded.iter().position(|&b| b != 0).unwrap_or(decoded.len());
        let content = &decoded[start..];
        if content.len() > ALL_SIZE {
            return Err(rejected(Rejection::Overlong { len: content.len() }));
        }

        let mut buffer = [0u8; ALL_SIZE];
        buffer[ALL_SIZE - content.len()..].copy_from_slice(content);
        Envelope::parse(&buffer).map_err(|err| rejected(Rejection::Malformed(err)))
    }

    fn trust_mode(&self) -> TrustMode {
        TrustMode::from_keys(self.verify_key.is_some(), self.sign_key.is_some())
    }
}
