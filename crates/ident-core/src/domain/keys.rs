//! # Tag Keys
//!
//! Secret key material for the verify and sign tags.

use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// HMAC key for one of the two tags.
///
/// Any byte string is accepted, including the empty string. Key bytes are
/// zeroized on drop and never appear in `Debug` output.
#[derive(Clone, Default, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct IdentKey(Vec<u8>);

impl IdentKey {
    /// Create a key from raw bytes.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// The empty key (HMAC with a zero-length key).
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    /// Key bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Key length in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true for the empty key.
    ///
    /// Validators treat an empty key as "not configured".
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for IdentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IdentKey(<redacted {} bytes>)", self.0.len())
    }
}

impl From<&str> for IdentKey {
    fn from(value: &str) -> Self {
        Self::new(value.as_bytes())
    }
}

impl From<String> for IdentKey {
    fn from(value: String) -> Self {
        Self::new(value.into_bytes())
    }
}

impl From<&[u8]> for IdentKey {
    fn from(value: &[u8]) -> Self {
        Self::new(value)
    }
}

impl From<Vec<u8>> for IdentKey {
    fn from(value: Vec<u8>) -> Self {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_is_redacted() {
        let key = IdentKey::from("apple1");
        let rendered = format!("{:?}", key);
        assert!(!rendered.contains("apple1"));
        assert!(rendered.contains("6 bytes"));
    }

    #[test]
    fn test_empty_key() {
        assert!(IdentKey::empty().is_empty());
        assert!(IdentKey::from("").is_empty());
        assert!(!IdentKey::from("x").is_empty());
        assert_eq!(IdentKey::default(), IdentKey::empty());
    }

    #[test]
    fn test_conversions_agree() {
        let a = IdentKey::from("banana1");
        let b = IdentKey::from(String::from("banana1"));
        let c = IdentKey::from(b"banana1".as_slice());
        let d = IdentKey::from(b"banana1".to_vec());
        assert_eq!(a, b);
        assert_eq!(b, c);
        assert_eq!(c, d);
        assert_eq!(a.as_bytes(), b"banana1");
        assert_eq!(a.len(), 7);
    }
}
