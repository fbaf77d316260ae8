//! # Domain Errors
//!
//! Error types for ident generation and configuration.
//!
//! Validation failures are deliberately absent: a rejected candidate is a
//! `false` (or a `Rejection` value), never an error.

use crate::ports::outbound::IdSourceError;
use thiserror::Error;

/// Configuration errors, raised at construction time.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A sign key is required by the chosen validator policy.
    #[error("sign key is required")]
    MissingSignKey,

    /// A verify key is required by the chosen validator policy.
    #[error("verify key is required")]
    MissingVerifyKey,

    /// Snowflake node id does not fit in its bit field.
    #[error("Node id out of range: {node} > {max}")]
    NodeOutOfRange {
        /// Requested node id
        node: u16,
        /// Largest representable node id
        max: u16,
    },

    /// Keyed hash output cannot cover the widest tag.
    #[error("Keyed hash output too short: {len} < {min}")]
    DigestTooShort {
        /// Output width of the keyed hash
        len: usize,
        /// Minimum width required
        min: usize,
    },

    /// A setting could not be parsed.
    #[error("Invalid setting {name}: {reason}")]
    InvalidSetting {
        /// Setting name (environment variable or flag)
        name: String,
        /// Why it was rejected
        reason: String,
    },
}

/// Errors that abort ident generation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdentError {
    /// The identifier source broke its contract. Fatal; do not retry.
    #[error("Identifier source failed: {0}")]
    IdSource(#[from] IdSourceError),
}

/// Structural envelope errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    /// Buffer is not exactly one envelope long.
    #[error("Wrong envelope length: expected {expected}, got {actual}")]
    WrongLength {
        /// Required length
        expected: usize,
        /// Length supplied
        actual: usize,
    },
}
