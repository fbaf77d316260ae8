//! # Truncated Tags
//!
//! The verify and sign tags are prefixes of a keyed hash. Two bytes of
//! verify tag and four bytes of sign tag give forgery odds of 2^-16 and
//! 2^-32 per attempt; the random padding keeps those odds from being
//! improved by precomputation.
//!
//! ## Security
//!
//! Comparison goes through `subtle::ConstantTimeEq` so that repeated
//! validation attempts cannot recover tag bytes one at a time.

use crate::domain::keys::IdentKey;
use crate::domain::layout::{SIGN_SIZE, VERIFY_SIZE};
use crate::ports::outbound::KeyedHash;
use subtle::ConstantTimeEq;

/// Verify tag over `id || random`.
pub fn compute_verify_tag<H: KeyedHash + ?Sized>(
    hasher: &H,
    key: &IdentKey,
    message: &[u8],
) -> [u8; VERIFY_SIZE] {
    truncate(&hasher.mac(key.as_bytes(), message))
}

/// Sign tag over `id || random || verify`.
pub fn compute_sign_tag<H: KeyedHash + ?Sized>(
    hasher: &H,
    key: &IdentKey,
    message: &[u8],
) -> [u8; SIGN_SIZE] {
    truncate(&hasher.mac(key.as_bytes(), message))
}

/// Constant-time tag equality.
///
/// Only defined for equal-length inputs; both sides always come from the
/// fixed envelope layout.
pub fn tags_match(expected: &[u8], actual: &[u8]) -> bool {
    debug_assert_eq!(expected.len(), actual.len(), "tag widths must match");
    bool::from(expected.ct_eq(actual))
}

fn truncate<const N: usize>(digest: &[u8]) -> [u8; N] {
    // Hashers shorter than N are refused at service construction.
    let mut tag = [0u8; N];
    let n = N.min(digest.len());
    tag[..n].copy_from_slice(&digest[..n]);
    tag
}
