//! Process-wide random source for playouts.
//!
//! A 128-bit xorshift generator (four 32-bit words of state). The playout
//! loop draws from a single process-wide instance: the engine is
//! single-threaded, and a shared stream keeps runs reproducible. Seed it
//! exactly once at startup, either from OS entropy ([`seed_from_entropy`])
//! or from a fixed value ([`set_seed`]) for deterministic runs and tests.

use std::cell::RefCell;

use rand::RngCore;

/// Xorshift128 generator.
#[derive(Debug, Clone)]
pub struct XorShift128 {
    x: u32,
    y: u32,
    z: u32,
    w: u32,
}

impl Default for XorShift128 {
    fn default() -> Self {
        Self {
            x: 192_479_812,
            y: 784_892_731,
            z: 427_398_108,
            w: 48_382_934,
        }
    }
}

impl XorShift128 {
    pub fn new() -> Self {
        Self::default()
    }

    /// A generator with all four words set to `seed`; one draw is discarded
    /// to mix the state.
    pub fn from_seed(seed: u32) -> Self {
        let mut rng = Self {
            x: seed,
            y: seed,
            z: seed,
            w: seed,
        };
        rng.next_u32();
        rng
    }

    /// Next 32 random bits.
    #[inline]
    pub fn next_u32(&mut self) -> u32 {
        let t = self.x ^ (self.x << 11);
        self.x = self.y;
        self.y = self.z;
        self.z = self.w;
        self.w = (self.w ^ (self.w >> 19)) ^ (t ^ (t >> 8));
        self.w
    }

    /// A draw in `[0, n)` via the multiply-high trick; close enough to
    /// uniform for the small `n` the playout uses.
    #[inline]
    pub fn bounded(&mut self, n: u32) -> u32 {
        ((u64::from(self.next_u32()) * u64::from(n)) >> 32) as u32
    }
}

thread_local! {
    static PLAYOUT_RNG: RefCell<XorShift128> = RefCell::new(XorShift128::new());
}

/// Reseed the process-wide generator. Call once at startup, or between runs
/// in test harnesses that need reproducible playouts.
pub fn set_seed(seed: u32) {
    PLAYOUT_RNG.with(|rng| *rng.borrow_mut() = XorShift128::from_seed(seed));
}

/// Seed the process-wide generator from the operating system entropy
/// source.
pub fn seed_from_entropy() {
    set_seed(rand::rngs::OsRng.next_u32());
}

/// Next 32 random bits from the process-wide generator.
#[inline]
pub(crate) fn next_u32() -> u32 {
    PLAYOUT_RNG.with(|rng| rng.borrow_mut().next_u32())
}

/// Uniform draw in `[0, n)` from the process-wide generator.
#[inline]
pub(crate) fn bounded(n: u32) -> u32 {
    PLAYOUT_RNG.with(|rng| rng.borrow_mut().bounded(n))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = XorShift128::from_seed(12345);
        let mut b = XorShift128::from_seed(12345);
        for _ in 0..1000 {
            assert_eq!(a.next_u32(), b.next_u32());
        }
    }

    #[test]
    fn different_seeds_diverge() {
        let mut a = XorShift128::from_seed(1);
        let mut b = XorShift128::from_seed(2);
        let same = (0..100).filter(|_| a.next_u32() == b.next_u32()).count();
        assert!(same < 100);
    }

    #[test]
    fn bounded_stays_in_range() {
        let mut rng = XorShift128::from_seed(99);
        for n in [1u32, 2, 3, 5, 17, 35, 36] {
            for _ in 0..500 {
                assert!(rng.bounded(n) < n);
            }
        }
    }

    #[test]
    fn bounded_one_is_always_zero() {
        let mut rng = XorShift128::from_seed(7);
        for _ in 0..100 {
            assert_eq!(rng.bounded(1), 0);
        }
    }

    #[test]
    fn global_reseeding_restarts_the_stream() {
        set_seed(4242);
        let first: Vec<u32> = (0..32).map(|_| next_u32()).collect();
        set_seed(4242);
        let second: Vec<u32> = (0..32).map(|_| next_u32()).collect();
        assert_eq!(first, second);
    }
}
