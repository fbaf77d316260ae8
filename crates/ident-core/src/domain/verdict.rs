//! # Validation Verdicts
//!
//! Why a candidate was rejected, and which trust configuration judged it.

use thiserror::Error;

use crate::domain::errors::ParseError;

/// Reason a candidate ident was rejected.
///
/// These are outcomes, not failures: the boolean validator never surfaces
/// them as errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Rejection {
    /// Empty, or contains characters outside `[0-9A-Za-z]`.
    #[error("not alphanumeric")]
    NotAlphanumeric,
    /// The codec refused the text.
    #[error("undecodable")]
    Undecodable,
    /// Decoded content is longer than one envelope.
    #[error("overlong ({len} bytes)")]
    Overlong {
        /// Decoded length after trimming leading zero bytes
        len: usize,
    },
    /// The normalized buffer could not be parsed.
    #[error("malformed: {0}")]
    Malformed(ParseError),
    /// The identifier is not structurally valid.
    #[error("invalid id {id:#x}")]
    InvalidId {
        /// The rejected identifier
        id: u64,
    },
    /// Verify tag does not match the configured verify key.
    #[error("verify tag mismatch")]
    VerifyMismatch,
    /// Sign tag does not match the configured sign key.
    #[error("sign tag mismatch")]
    SignMismatch,
}

/// Which tags a validator checks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TrustMode {
    /// No keys: structure and id validity only.
    Open,
    /// Verify key only.
    VerifyOnly,
    /// Sign key only.
    SignOnly,
    /// Both keys.
    Both,
}

impl TrustMode {
    /// Mode for a given pair of configured keys.
    pub fn from_keys(has_verify: bool, has_sign: bool) -> Self {
        match (has_verify, has_sign) {
            (false, false) => Self::Open,
            (true, false) => Self::VerifyOnly,
            (false, true) => Self::SignOnly,
            (true, true) => Self::Both,
        }
    }

    /// Whether the verify tag is checked.
    pub fn checks_verify(&self) -> bool {
        matches!(self, Self::VerifyOnly | Self::Both)
    }

    /// Whether the sign tag is checked.
    pub fn checks_sign(&self) -> bool {
        matches!(self, Self::SignOnly | Self::Both)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trust_mode_from_keys() {
        assert_eq!(TrustMode::from_keys(false, false), TrustMode::Open);
        assert_eq!(TrustMode::from_keys(true, false), TrustMode::VerifyOnly);
        assert_eq!(TrustMode::from_keys(false, true), TrustMode::SignOnly);
        assert_eq!(TrustMode::from_keys(true, true), TrustMode::Both);
    }

    #[test]
    fn test_trust_mode_checks() {
        assert!(!TrustMode::Open.checks_verify());
        assert!(!TrustMode::Open.checks_sign());
        assert!(TrustMode::VerifyOnly.checks_verify());
        assert!(!TrustMode::VerifyOnly.checks_sign());
        assert!(TrustMode::Both.checks_verify() && TrustMode::Both.checks_sign());
    }

    #[test]
    fn test_rejection_display() {
        assert_eq!(Rejection::SignMismatch.to_string(), "sign tag mismatch");
        assert_eq!(Rejection::Overlong { len: 23 }.to_string(), "overlong (23 bytes)");
        assert_eq!(Rejection::InvalidId { id: 0 }.to_string(), "invalid id 0x0");
    }
}
