//! # Envelope Layout
//!
//! Field sizes and offsets shared by generation and validation.
//!
//! ```text
//! 0        8        16   18       22
//! +--------+--------+----+--------+
//! |   id   | random | vt |  sign  |
//! +--------+--------+----+--------+
//! ```
//!
//! There is no version byte. Changing any of these constants invalidates
//! every ident issued before the change.

/// Keyed hash used for both tags.
pub const HMAC_ALGORITHM: &str = "sha256";

/// Identifier width (u64, big-endian).
pub const ID_SIZE: usize = 8;

/// Random padding width.
pub const RND_SIZE: usize = 8;

/// Truncated verify tag width.
pub const VERIFY_SIZE: usize = 2;

/// Truncated sign tag width.
pub const SIGN_SIZE: usize = 4;

/// Total envelope width.
pub const ALL_SIZE: usize = ID_SIZE + RND_SIZE + VERIFY_SIZE + SIGN_SIZE;

/// Offset of the random padding.
pub const RND_OFFSET: usize = ID_SIZE;

/// Offset of the verify tag; also the length of the verify tag's message.
pub const VERIFY_OFFSET: usize = ID_SIZE + RND_SIZE;

/// Offset of the sign tag; also the length of the sign tag's message.
pub const SIGN_OFFSET: usize = VERIFY_OFFSET + VERIFY_SIZE;

/// Cheap pre-filter applied before decoding a candidate ident.
///
/// Accepts any non-empty ASCII alphanumeric string. Aliases, lower case and
/// leading zero symbols are left for the codec to normalize.
pub fn is_lax_candidate(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_alphanumeric())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sizes() {
        assert_eq!(ID_SIZE, 8);
        assert_eq!(RND_SIZE, 8);
        assert_eq!(VERIFY_SIZE, 2);
        assert_eq!(SIGN_SIZE, 4);
        assert_eq!(ALL_SIZE, 22);
        assert_eq!(HMAC_ALGORITHM, "sha256");
    }

    #[test]
    fn test_offsets_are_contiguous() {
        assert_eq!(RND_OFFSET, 8);
        assert_eq!(VERIFY_OFFSET, 16);
        assert_eq!(SIGN_OFFSET, 18);
        assert_eq!(SIGN_OFFSET + SIGN_SIZE, ALL_SIZE);
    }

    #[test]
    fn test_lax_candidate() {
        assert!(is_lax_candidate("1000000000000000005Z4F3HZMWV"));
        assert!(is_lax_candidate("0oO0abcXYZ"));
        assert!(!is_lax_candidate(""));
        assert!(!is_lax_candidate("ABC-123"));
        assert!(!is_lax_candidate("ABC 123"));
        assert!(!is_lax_candidate("ÄBC"));
    }
}
