//! Ident Generator
//!
//! Pulls an id, pads it with random bytes, seals it with the verify and
//! sign tags and renders it as Base32H without leading zero symbols.

use tracing::{debug, error, trace};

use crate::adapters::{
    Base32H, Clock, OsRandom, Sha256Mac, SnowflakeOptions, SnowflakeSequence, SystemClock,
};
use crate::domain::{ConfigError, Envelope, IdentError, IdentKey, RND_SIZE, SIGN_SIZE};
use crate::ports::{IdSource, IdentGeneratorApi, KeyedHash, RandomSource, TextCodec};

/// Generator keys.
#[derive(Clone, Debug)]
pub struct GeneratorConfig {
    /// Key for the sign tag. Empty is legal.
    pub sign_key: IdentKey,
    /// Key for the verify tag. `None` computes the tag with an empty key.
    pub verify_key: Option<IdentKey>,
}

impl GeneratorConfig {
    /// Config with a sign key and no verify key.
    pub fn new(sign_key: impl Into<IdentKey>) -> Self {
        Self {
            sign_key: sign_key.into(),
            verify_key: None,
        }
    }

    /// Set the verify key.
    pub fn with_verify_key(mut self, verify_key: impl Into<IdentKey>) -> Self {
        self.verify_key = Some(verify_key.into());
        self
    }
}

/// Unbounded ident producer.
///
/// Single-threaded: `next_ident` takes `&mut self`. Wrap in a `Mutex` to
/// share one generator between threads.
#[derive(Debug)]
pub struct IdentGenerator<
    S: IdSource = SnowflakeSequence,
    R: RandomSource = OsRandom,
    C: TextCodec = Base32H,
    H: KeyedHash = Sha256Mac,
> {
    ids: S,
    random: R,
    codec: C,
    hasher: H,
    sign_key: IdentKey,
    verify_key: IdentKey,
}

impl IdentGenerator<SnowflakeSequence<SystemClock>, OsRandom, Base32H, Sha256Mac> {
    /// Generator with the system clock and OS randomness.
    pub fn new(config: GeneratorConfig, options: SnowflakeOptions) -> Result<Self, ConfigError> {
        Self::from_parts(
            config,
            SnowflakeSequence::new(options)?,
            OsRandom,
            Base32H,
            Sha256Mac,
        )
    }
}

impl<K: Clock, R: RandomSource> IdentGenerator<SnowflakeSequence<K>, R, Base32H, Sha256Mac> {
    /// Generator with a custom clock and random source.
    pub fn with_clock(
        config: GeneratorConfig,
        options: SnowflakeOptions,
        clock: K,
        random: R,
    ) -> Result<Self, ConfigError> {
        Self::from_parts(
            config,
            SnowflakeSequence::with_clock(options, clock)?,
            random,
            Base32H,
            Sha256Mac,
        )
    }
}

impl<S: IdSource, R: RandomSource, C: TextCodec, H: KeyedHash> IdentGenerator<S, R, C, H> {
    /// Generator with every collaborator supplied.
    pub fn from_parts(
        config: GeneratorConfig,
        ids: S,
        random: R,
        codec: C,
        hasher: H,
    ) -> Result<Self, ConfigError> {
        if hasher.output_len() < SIGN_SIZE {
            return Err(ConfigError::DigestTooShort {
                len: hasher.output_len(),
                min: SIGN_SIZE,
            });
        }
        debug!(
            "[ident] generator ready (verify key {})",
            if config.verify_key.is_some() { "set" } else { "empty" }
        );
        Ok(Self {
            ids,
            random,
            codec,
            hasher,
            sign_key: config.sign_key,
            verify_key: config.verify_key.unwrap_or_default(),
        })
    }
}

impl<S: IdSource, R: RandomSource, C: TextCodec, H: KeyedHash> IdentGeneratorApi
    for IdentGenerator<S, R, C, H>
{
    fn next_ident(&mut self) -> Result<String, IdentError> {
        let id = self.ids.next_id().map_err(|err| {
            error!("[ident] id source failed: {}", err);
            IdentError::from(err)
        })?;

        let mut random = [0u8; RND_SIZE];
        self.random.fill_bytes(&mut random);

        let envelope =
            Envelope::assemble(id, &random, &self.verify_key, &self.sign_key, &self.hasher);
        let encoded = self.codec.encode(envelope.as_bytes());
        let ident = encoded
            .trim_start_matches(|c: char| self.codec.is_zero_symbol(c))
            .to_string();

        trace!("[ident] generated id={}", id);
        Ok(ident)
    }
}

impl<S: IdSource, R: RandomSource, C: TextCodec, H: KeyedHash> Iterator
    for IdentGenerator<S, R, C, H>
{
    type Item = Result<String, IdentError>;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.next_ident())
    }
}
