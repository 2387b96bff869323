//! Randomness for table draws.
//!
//! Tables never own a random number generator. Every draw takes a
//! [`RandomSource`], which is implemented for all `rand` generators, for plain
//! closures via [`FnSource`], and for replayed scripts via [`ScriptedSource`].
//!
//! [`SeedTree`] expands one master seed into independent per-table streams.
//! Sub-seeds are derived by BLAKE3 hashing, so they do not depend on the order
//! in which tables ask for them.

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

/// Source of uniform draws in `[0, 1)`.
pub trait RandomSource {
    fn next_unit(&mut self) -> f64;
}

impl<R: RngCore> RandomSource for R {
    fn next_unit(&mut self) -> f64 {
        self.gen::<f64>()
    }
}

/// Adapts a closure into a [`RandomSource`].
pub struct FnSource<F>(F);

impl<F: FnMut() -> f64> FnSource<F> {
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

impl<F: FnMut() -> f64> RandomSource for FnSource<F> {
    fn next_unit(&mut self) -> f64 {
        (self.0)()
    }
}

/// Replays a fixed list of draws, cycling when it runs out.
///
/// An empty script always yields `0.0`.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    draws: Vec<f64>,
    cursor: usize,
}

impl ScriptedSource {
    pub fn new(draws: impl Into<Vec<f64>>) -> Self {
        Self {
            draws: draws.into(),
            cursor: 0,
        }
    }

    /// Number of draws consumed so far.
    pub fn consumed(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for ScriptedSource {
    fn next_unit(&mut self) -> f64 {
        if self.draws.is_empty() {
            return 0.0;
        }
        let value = self.draws[self.cursor % self.draws.len()];
        self.cursor += 1;
        value
    }
}

/// Deterministic seed hierarchy for tables.
///
/// Each `(table, stream)` pair gets its own sub-seed. Because derivation is
/// hash-based, asking for "weapons" then "armor" yields the same seeds as the
/// reverse order.
#[derive(Debug, Clone)]
pub struct SeedTree {
    master_seed: u64,
}

impl SeedTree {
    pub fn new(master_seed: u64) -> Self {
        Self { master_seed }
    }

    pub fn master_seed(&self) -> u64 {
        self.master_seed
    }

    /// Derive the sub-seed for a named table and stream index.
    pub fn sub_seed(&self, table: &str, stream: u64) -> u64 {
        let mut hasher = blake3::Hasher::new();
        hasher.update(&self.master_seed.to_le_bytes());
        hasher.update(table.as_bytes());
        hasher.update(&stream.to_le_bytes());
        let hash = hasher.finalize();
        let mut head = [0u8; 8];
        head.copy_from_slice(&hash.as_bytes()[..8]);
        u64::from_le_bytes(head)
    }

    /// Seeded generator for a named table and stream index.
    pub fn rng_for(&self, table: &str, stream: u64) -> StdRng {
        StdRng::seed_from_u64(self.sub_seed(table, stream))
    }
}
