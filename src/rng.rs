//! Seeded random number generation
//!
//! A 64-bit linear congruential generator used wherever content has to be
//! reproducible from a calendar bucket: shop stock, daily challenges and the
//! traveling merchant. The generator also implements `rand::RngCore`, so any
//! `&mut impl Rng` helper in the crate accepts it.

use rand::{Error, RngCore, SeedableRng};

/// Knuth's MMIX multiplier
const MULTIPLIER: u64 = 6_364_136_223_846_793_005;
/// Odd increment, gives the full 2^64 period
const INCREMENT: u64 = 1_442_695_040_888_963_407;

/// Deterministic LCG with a single word of state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeededRng {
    state: u64,
}

impl SeededRng {
    /// Create a generator from a raw seed
    pub fn seed(value: u64) -> Self {
        Self { state: value }
    }

    /// Advance the state and return it
    pub fn next(&mut self) -> u64 {
        self.state = self.state.wrapping_mul(MULTIPLIER).wrapping_add(INCREMENT);
        self.state
    }

    /// Uniform pick in `low..=high`. Returns `low` for an empty or inverted range.
    pub fn range_inclusive(&mut self, low: i64, high: i64) -> i64 {
        if high <= low {
            return low;
        }
        let span = (high - low) as u64 + 1;
        low + (self.next() % span) as i64
    }

    /// Uniform index in `0..len`. `len` must be non-zero.
    pub fn index(&mut self, len: usize) -> usize {
        (self.next() % len as u64) as usize
    }

    /// True when a draw modulo `denominator` lands below `numerator`
    pub fn chance_in(&mut self, numerator: u64, denominator: u64) -> bool {
        if denominator == 0 {
            return false;
        }
        self.next() % denominator < numerator
    }

    /// Fisher-Yates shuffle, walking from the last index down to 1
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        if items.len() < 2 {
            return;
        }
        for i in (1..items.len()).rev() {
            let j = (self.next() % (i as u64 + 1)) as usize;
            items.swap(i, j);
        }
    }
}

impl RngCore for SeededRng {
    fn next_u32(&mut self) -> u32 {
        // High bits of an LCG are the well-mixed ones
        (self.next() >> 32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        self.next()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(8) {
            let bytes = self.next().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for SeededRng {
    type Seed = [u8; 8];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::seed(u64::from_le_bytes(seed))
    }

    fn seed_from_u64(state: u64) -> Self {
        Self::seed(state)
    }
}
