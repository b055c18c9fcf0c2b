//! Inspiration source: example suggestions for free-text questions.
//!
//! Drawing is isolated behind a trait so hosts use real randomness while
//! tests swap in a deterministic source. A drawn suggestion is display-only;
//! it never touches answer state.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64Mcg;

/// Supplies one example string from a fixed pool.
pub trait InspirationSource {
    /// Uniformly pick an element of `pool`. `None` iff the pool is empty.
    fn draw<'a>(&mut self, pool: &'a [String]) -> Option<&'a str>;
}

/// Thread-rng backed source for interactive hosts.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomInspiration;

impl InspirationSource for RandomInspiration {
    fn draw<'a>(&mut self, pool: &'a [String]) -> Option<&'a str> {
        if pool.is_empty() {
            return None;
        }
        let idx = rand::thread_rng().gen_range(0..pool.len());
        Some(&pool[idx])
    }
}

/// Seeded PCG source for reproducible draws.
#[derive(Debug, Clone)]
pub struct SeededInspiration {
    rng: Pcg64Mcg,
}

impl SeededInspiration {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg64Mcg::seed_from_u64(seed),
        }
    }
}

impl InspirationSource for SeededInspiration {
    fn draw<'a>(&mut self, pool: &'a [String]) -> Option<&'a str> {
        if pool.is_empty() {
            return None;
        }
        let idx = self.rng.gen_range(0..pool.len());
        Some(&pool[idx])
    }
}
