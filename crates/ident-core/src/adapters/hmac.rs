//! HMAC-SHA256 keyed hash.

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::ports::outbound::KeyedHash;

type HmacSha256 = Hmac<Sha256>;

/// SHA-256 output width in bytes.
const SHA256_LEN: usize = 32;

/// HMAC-SHA256, the protocol's keyed hash.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Sha256Mac;

impl KeyedHash for Sha256Mac {
    fn output_len(&self) -> usize {
        SHA256_LEN
    }

    fn mac(&self, key: &[u8], message: &[u8]) -> Vec<u8> {
        let mut mac = HmacSha256::new_from_slice(key).expect("HMAC can take key of any size");
        mac.update(message);
        mac.finalize().into_bytes().to_vec()
    }
}
