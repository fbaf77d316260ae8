//! # Inbound Ports (Driving Ports / API)
//!
//! What callers of this crate see: ident generation and ident validation.

use crate::domain::{Envelope, IdentError, Rejection, TrustMode};

/// Ident generation API.
pub trait IdentGeneratorApi {
    /// Produce the next ident.
    ///
    /// Fails only when the identifier source breaks its contract.
    fn next_ident(&mut self) -> Result<String, IdentError>;
}

/// Ident validation API.
///
/// Validators are immutable after construction and safe to share.
pub trait IdentValidatorApi: Send + Sync {
    /// Whether `candidate` is a well-formed ident accepted by the
    /// configured keys. Never panics, never errors.
    fn validate(&self, candidate: &str) -> bool {
        self.check(candidate).is_ok()
    }

    /// Full validation, reporting the reason for rejection.
    fn check(&self, candidate: &str) -> Result<Envelope, Rejection>;

    /// Structural steps only: alphabet, decoding, length normalization.
    /// No id or tag checks.
    fn decode_envelope(&self, candidate: &str) -> Result<Envelope, Rejection>;

    /// Which tags this validator checks.
    fn trust_mode(&self) -> TrustMode;
}
