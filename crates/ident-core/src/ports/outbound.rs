//! # Outbound Ports (Driven Ports / SPI)
//!
//! Collaborators the envelope protocol depends on. Every service
//! constructor receives them explicitly; there are no global defaults.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error from an identifier source.
///
/// The source is contractually infinite, so any of these is a defect in the
/// collaborator and fatal for generation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdSourceError {
    /// The timestamp no longer fits in its bit field.
    #[error("Identifier sequence exhausted: timestamp {timestamp} > {max}")]
    Exhausted {
        /// Tick that would have been issued
        timestamp: u64,
        /// Largest representable tick
        max: u64,
    },

    /// The clock reads at or before the configured epoch.
    #[error("Clock {now_ms} is not after epoch {epoch_ms}")]
    ClockBeforeEpoch {
        /// Clock reading (ms)
        now_ms: u64,
        /// Configured epoch (ms)
        epoch_ms: u64,
    },
}

/// Error from a text codec.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CodecError {
    /// Character outside the alphabet and its aliases.
    #[error("Invalid symbol {symbol:?} at position {position}")]
    InvalidSymbol {
        /// Offending character
        symbol: char,
        /// Character index in the input
        position: usize,
    },
}

/// Monotonic, sortable 64-bit identifier source.
///
/// Sharing one source across threads requires the source itself to be
/// synchronized; `&mut self` keeps a single generator single-threaded.
pub trait IdSource: Send {
    /// Next identifier. Never legitimately exhausted.
    fn next_id(&mut self) -> Result<u64, IdSourceError>;
}

/// Structural view of an identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplodedId {
    /// Milliseconds since the source's epoch
    pub timestamp: u64,
    /// Node that issued the id
    pub node: u16,
    /// Per-tick sequence number
    pub sequence: u16,
    /// Whether the id is well-formed
    pub valid: bool,
}

/// Validity predicate for identifiers, independent of any tag.
pub trait IdInspector: Send + Sync {
    /// Split an identifier into its parts.
    fn explode(&self, id: u64) -> ExplodedId;

    /// Whether the identifier is structurally valid.
    fn is_valid(&self, id: u64) -> bool {
        self.explode(id).valid
    }
}

/// Byte buffer <-> restricted-alphabet text.
///
/// `decode(encode(b))` must equal `b` up to leading zero bytes.
pub trait TextCodec: Send + Sync {
    /// Encode bytes to text.
    fn encode(&self, bytes: &[u8]) -> String;

    /// Decode text to bytes.
    fn decode(&self, text: &str) -> Result<Vec<u8>, CodecError>;

    /// Whether `symbol` decodes to the zero value.
    fn is_zero_symbol(&self, symbol: char) -> bool;
}

/// Cryptographically secure byte source, overridable for tests.
pub trait RandomSource: Send {
    /// Fill `dest` with random bytes.
    fn fill_bytes(&mut self, dest: &mut [u8]);
}

/// HMAC-class keyed hash with a fixed output width.
pub trait KeyedHash: Send + Sync {
    /// Output width in bytes.
    fn output_len(&self) -> usize;

    /// Full-width tag of `message` under `key`.
    fn mac(&self, key: &[u8], message: &[u8]) -> Vec<u8>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct EvenIds;

    impl IdInspector for EvenIds {
        fn explode(&self, id: u64) -> ExplodedId {
            ExplodedId {
                timestamp: id,
                node: 0,
                sequence: 0,
                valid: id % 2 == 0,
            }
        }
    }

    #[test]
    fn test_is_valid_defaults_to_explode() {
        assert!(EvenIds.is_valid(4));
        assert!(!EvenIds.is_valid(5));
    }

    #[test]
    fn test_exploded_id_serializes() {
        let exploded = ExplodedId {
            timestamp: 1,
            node: 2,
            sequence: 3,
            valid: true,
        };
        let json = serde_json::to_string(&exploded).unwrap();
        assert_eq!(json, r#"{"timestamp":1,"node":2,"sequence":3,"valid":true}"#);
        let back: ExplodedId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, exploded);
    }

    #[test]
    fn test_id_source_error_messages() {
        let err = IdSourceError::ClockBeforeEpoch {
            now_ms: 5,
            epoch_ms: 10,
        };
        assert!(err.to_string().contains("not after epoch 10"));
        let err = CodecError::InvalidSymbol {
            symbol: '!',
            position: 3,
        };
        assert!(err.to_string().contains("position 3"));
    }
}
