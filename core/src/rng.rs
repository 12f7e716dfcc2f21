//! Deterministic randomness for deck order and sampled hero stats
//!
//! Battles themselves are deterministic; randomness only enters through the
//! deck shuffle at construction and the batch driver's stat sampling.

/// Source of randomness for battle setup
pub trait BattleRng {
    /// Generate a random u32
    fn next_u32(&mut self) -> u32;

    /// Generate a random number in range [0, max)
    fn gen_range(&mut self, max: usize) -> usize {
        if max == 0 {
            return 0;
        }
        (self.next_u32() as usize) % max
    }

    /// Generate a random number in range [min, max]; a reversed range yields `min`
    fn gen_inclusive(&mut self, min: i32, max: i32) -> i32 {
        if max <= min {
            return min;
        }
        let span = (max as i64 - min as i64 + 1) as u64;
        min + (self.next_u32() as u64 % span) as i32
    }

    /// Fisher-Yates shuffle
    fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.gen_range(i + 1);
            slice.swap(i, j);
        }
    }
}

/// XorShift32 - the same seed always produces the same sequence
#[derive(Debug, Clone)]
pub struct XorShiftRng {
    state: u32,
}

impl XorShiftRng {
    /// Fold a u64 seed into a non-zero u32 state
    pub fn seed_from_u64(seed: u64) -> Self {
        let state = ((seed as u32) ^ ((seed >> 32) as u32)).max(1);
        Self { state }
    }

    /// Independent stream for one run of a batch
    pub fn for_run(seed: u64, run_index: u32) -> Self {
        Self::seed_from_u64(seed.wrapping_add(run_index as u64))
    }
}

impl BattleRng for XorShiftRng {
    fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }
}
