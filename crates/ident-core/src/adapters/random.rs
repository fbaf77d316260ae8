//! Random byte sources.
//!
//! `OsRandom` is the production source. `FixedRandom` and `SeededRandom`
//! make generated idents reproducible in tests.

use rand::rngs::{OsRng, StdRng};
use rand::{RngCore, SeedableRng};

use crate::ports::outbound::RandomSource;

/// Operating system CSPRNG.
#[derive(Clone, Copy, Debug, Default)]
pub struct OsRandom;

impl RandomSource for OsRandom {
    fn fill_bytes(&mut self, dest: &mut [u8]) {
        OsRng.fill_bytes(dest);
    }
}

/// Fills every byte with the same value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedRandom {
    byte: u8,
}

impl FixedRandom {
    /// Source that always yields `byte`.
    pub fn new(byte: u8) -> Self {
        Self { byte }
    }
}

impl RandomSource for FixedRandom {
    fn fill_bytes(&mut self, dest: &mut [u8]) {
        dest.fill(self.byte);
    }
}

/// Deterministic pseudo-random stream from a 64-bit seed. Not for production.
#[derive(Clone, Debug)]
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    /// Stream seeded with `seed`.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededRandom {
    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.rng.fill_bytes(dest);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_random() {
        let mut buf = [0u8; 8];
        FixedRandom::new(0xff).fill_bytes(&mut buf);
        assert_eq!(buf, [0xff; 8]);
    }

    #[test]
    fn test_seeded_random_is_reproducible() {
        let mut a = SeededRandom::new(7);
        let mut b = SeededRandom::new(7);
        let (mut x, mut y) = ([0u8; 16], [0u8; 16]);
        a.fill_bytes(&mut x);
        b.fill_bytes(&mut y);
        assert_eq!(x, y);
    }

    #[test]
    fn test_os_random_varies() {
        let mut rng = OsRandom;
        let (mut x, mut y) = ([0u8; 16], [0u8; 16]);
        rng.fill_bytes(&mut x);
        rng.fill_bytes(&mut y);
        assert_ne!(x, y);
    }
}
