//! # Ident Core
//!
//! Short, opaque, tamper-evident public identifiers ("idents").
//!
//! An ident is a fixed 22-byte envelope rendered in the Base32H alphabet:
//!
//! ```text
//! [ id: u64 BE ][ random: 8 ][ verify: 2 ][ sign: 4 ]
//!                             HMAC(verify_key, id||random)[..2]
//!                                          HMAC(sign_key, id||random||verify)[..4]
//! ```
//!
//! ## Architecture
//!
//! This crate follows hexagonal architecture:
//! - **Domain Layer** (`domain/`): byte layout, envelope assembly/parsing, tags, keys
//! - **Ports Layer** (`ports/`): inbound APIs and the outbound collaborator traits
//! - **Adapters Layer** (`adapters/`): snowflake id source, Base32H codec,
//!   random sources, HMAC-SHA256
//! - **Service Layer** (`service/`): `IdentGenerator` and `IdentValidator`
//!
//! ## Trust Modes
//!
//! | Mode         | Verify key | Sign key | Checks performed                |
//! |--------------|------------|----------|---------------------------------|
//! | `Open`       | -          | -        | structure + id validity         |
//! | `VerifyOnly` | yes        | -        | + 2-byte verify tag             |
//! | `SignOnly`   | -          | yes      | + 4-byte sign tag               |
//! | `Both`       | yes        | yes      | + both tags                     |
//!
//! ## Usage Example
//!
//! ```ignore
//! use ident_core::{GeneratorConfig, IdentGenerator, IdentValidator, SnowflakeOptions,
//!     ValidatorConfig, IdentGeneratorApi, IdentValidatorApi};
//!
//! let config = GeneratorConfig::new("apple1").with_verify_key("banana1");
//! let mut generator = IdentGenerator::new(config, SnowflakeOptions::default())?;
//! let ident = generator.next_ident()?;
//!
//! let validator = IdentValidator::require_both(ValidatorConfig::both("apple1", "banana1"))?;
//! assert!(validator.validate(&ident));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

// Re-exports
pub use adapters::{
    Base32H, Clock, FixedClock, FixedRandom, OsRandom, SeededRandom, Sha256Mac, SnowflakeLayout,
    SnowflakeOptions, SnowflakeSequence, SystemClock,
};
pub use domain::{
    ConfigError, Envelope, IdentError, IdentKey, ParseError, Rejection, TrustMode, ALL_SIZE,
    HMAC_ALGORITHM, ID_SIZE, RND_SIZE, SIGN_SIZE, VERIFY_SIZE,
};
pub use ports::{
    CodecError, ExplodedId, IdInspector, IdSource, IdSourceError, IdentGeneratorApi,
    IdentValidatorApi, KeyedHash, RandomSource, TextCodec,
};
pub use service::{GeneratorConfig, IdentGenerator, IdentValidator, ValidatorConfig};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    #[test]
    fn test_version() {
        assert!(!super::VERSION.is_empty());
    }
}
