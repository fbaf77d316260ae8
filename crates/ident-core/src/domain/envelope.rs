//! # Envelope
//!
//! Assembly and parsing of the fixed 22-byte envelope.
//!
//! Design notes:
//! - Field order must match `layout.rs` exactly; there is no version byte.
//! - `assemble` is infallible: the random width is enforced by the type.
//! - `parse` only checks length. Id validity and tags are the validator's job.

use std::fmt;

use crate::domain::errors::ParseError;
use crate::domain::keys::IdentKey;
use crate::domain::layout::{
    ALL_SIZE, ID_SIZE, RND_OFFSET, RND_SIZE, SIGN_OFFSET, SIGN_SIZE, VERIFY_OFFSET, VERIFY_SIZE,
};
use crate::domain::tags::{compute_sign_tag, compute_verify_tag};
use crate::ports::outbound::KeyedHash;

/// A complete envelope. Immutable once built.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Envelope {
    bytes: [u8; ALL_SIZE],
}

impl Envelope {
    /// Build an envelope and compute both tags.
    ///
    /// The verify tag covers bytes `[0, 16)`; the sign tag covers
    /// `[0, 18)`, so it also commits to the verify tag.
    pub fn assemble<H: KeyedHash + ?Sized>(
        id: u64,
        random: &[u8; RND_SIZE],
        verify_key: &IdentKey,
        sign_key: &IdentKey,
        hasher: &H,
    ) -> Self {
        let mut bytes = [0u8; ALL_SIZE];
        bytes[..ID_SIZE].copy_from_slice(&id.to_be_bytes()); // 0..8   id
        bytes[RND_OFFSET..VERIFY_OFFSET].copy_from_slice(random); // 8..16  random

        let verify = compute_verify_tag(hasher, verify_key, &bytes[..VERIFY_OFFSET]);
        bytes[VERIFY_OFFSET..SIGN_OFFSET].copy_from_slice(&verify); // 16..18 verify

        let sign = compute_sign_tag(hasher, sign_key, &bytes[..SIGN_OFFSET]);
        bytes[SIGN_OFFSET..].copy_from_slice(&sign); // 18..22 sign

        Self { bytes }
    }

    /// Parse a normalized buffer.
    ///
    /// The buffer must be exactly `ALL_SIZE` bytes; left-padding a decoded
    /// ident is the caller's responsibility.
    pub fn parse(buffer: &[u8]) -> Result<Self, ParseError> {
        let bytes: [u8; ALL_SIZE] = buffer.try_into().map_err(|_| ParseError::WrongLength {
            expected: ALL_SIZE,
            actual: buffer.len(),
        })?;
        Ok(Self { bytes })
    }

    /// The identifier.
    pub fn id(&self) -> u64 {
        let mut id = [0u8; ID_SIZE];
        id.copy_from_slice(&self.bytes[..ID_SIZE]);
        u64::from_be_bytes(id)
    }

    /// Random padding.
    pub fn random(&self) -> &[u8] {
        &self.bytes[RND_OFFSET..VERIFY_OFFSET]
    }

    /// Verify tag as carried by the envelope.
    pub fn verify_tag(&self) -> &[u8] {
        &self.bytes[VERIFY_OFFSET..SIGN_OFFSET]
    }

    /// Sign tag as carried by the envelope.
    pub fn sign_tag(&self) -> &[u8] {
        &self.bytes[SIGN_OFFSET..]
    }

    /// Bytes covered by the verify tag.
    pub fn verify_message(&self) -> &[u8] {
        &self.bytes[..VERIFY_OFFSET]
    }

    /// Bytes covered by the sign tag.
    pub fn sign_message(&self) -> &[u8] {
        &self.bytes[..SIGN_OFFSET]
    }

    /// Raw envelope bytes.
    pub fn as_bytes(&self) -> &[u8; ALL_SIZE] {
        &self.bytes
    }
}

impl fmt::Debug for Envelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Envelope")
            .field("id", &self.id())
            .field("random", &self.random())
            .field("verify", &self.verify_tag())
            .field("sign", &self.sign_tag())
            .finish()
    }
}

// Keep the layout and the tag widths in lock step.
const _: () = assert!(SIGN_OFFSET + SIGN_SIZE == ALL_SIZE);
const _: () = assert!(VERIFY_OFFSET + VERIFY_SIZE == SIGN_OFFSET);
