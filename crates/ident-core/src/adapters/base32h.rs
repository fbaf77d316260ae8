//! # Base32H Codec
//!
//! Human-oriented base-32: digits plus the Latin alphabet minus `I O S U`.
//! Decoding folds case and accepts the visual aliases `O->0`, `I->1`,
//! `S->5`, `U->V`, so every ASCII alphanumeric character decodes.
//!
//! Binary mode works in 5-byte / 8-symbol groups. Input shorter than a
//! whole group is left-padded with zeros, so leading zeros are not
//! preserved across a round trip.

use crate::ports::outbound::{CodecError, TextCodec};

/// Canonical digit alphabet, value = index.
pub const ALPHABET: &[u8; 32] = b"0123456789ABCDEFGHJKLMNPQRTVWXYZ";

/// Bytes per group.
const GROUP_BYTES: usize = 5;

/// Symbols per group.
const GROUP_SYMBOLS: usize = 8;

/// Base32H binary codec.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Base32H;

impl Base32H {
    /// Digit value of `symbol`, aliases and lowercase included.
    pub fn digit_value(symbol: char) -> Option<u8> {
        let upper = symbol.to_ascii_uppercase();
        let canonical = match upper {
            'O' => '0',
            'I' => '1',
            'S' => '5',
            'U' => 'V',
            other => other,
        };
        if !canonical.is_ascii() {
            return None;
        }
        ALPHABET
            .iter()
            .position(|&b| b == canonical as u8)
            .map(|idx| idx as u8)
    }

    /// Whether `text` is in the form the generator emits: canonical
    /// uppercase digits only, at least two of them, no leading zero.
    pub fn is_canonical(text: &str) -> bool {
        let bytes = text.as_bytes();
        bytes.len() >= 2
            && bytes[0] != b'0'
            && bytes.iter().all(|b| ALPHABET.contains(b))
    }
}

impl TextCodec for Base32H {
    fn encode(&self, bytes: &[u8]) -> String {
        let pad = (GROUP_BYTES - bytes.len() % GROUP_BYTES) % GROUP_BYTES;
        let mut padded = vec![0u8; pad];
        padded.extend_from_slice(bytes);

        let mut out = String::with_capacity(padded.len() / GROUP_BYTES * GROUP_SYMBOLS);
        for group in padded.chunks_exact(GROUP_BYTES) {
            let value = group.iter().fold(0u64, |acc, &b| (acc << 8) | u64::from(b));
            for shift in (0..GROUP_SYMBOLS).rev() {
                let digit = (value >> (shift * 5)) & 0x1f;
                out.push(ALPHABET[digit as usize] as char);
            }
        }
        out
    }

    fn decode(&self, text: &str) -> Result<Vec<u8>, CodecError> {
        let mut digits = Vec::with_capacity(text.len() + GROUP_SYMBOLS);
        for (position, symbol) in text.chars().enumerate() {
            let value = Self::digit_value(symbol)
                .ok_or(CodecError::InvalidSymbol { symbol, position })?;
            digits.push(value);
        }
        let pad = (GROUP_SYMBOLS - digits.len() % GROUP_SYMBOLS) % GROUP_SYMBOLS;
        let mut padded = vec![0u8; pad];
        padded.extend(digits);

        let mut out = Vec::with_capacity(padded.len() / GROUP_SYMBOLS * GROUP_BYTES);
        for group in padded.chunks_exact(GROUP_SYMBOLS) {
            let value = group.iter().fold(0u64, |acc, &d| (acc << 5) | u64::from(d));
            for shift in (0..GROUP_BYTES).rev() {
                out.push((value >> (shift * 8)) as u8);
            }
        }
        Ok(out)
    }

    fn is_zero_symbol(&self, symbol: char) -> bool {
        matches!(symbol, '0' | 'o' | 'O')
    }
}
