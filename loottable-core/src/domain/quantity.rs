//! Remaining stock of a table entry.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU64;

/// How many more times an entry can be drawn.
///
/// A limited quantity is never zero: an entry whose last unit is drawn leaves
/// the table, so "exhausted" is not a storable state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Quantity {
    #[default]
    Unbounded,
    Limited(NonZeroU64),
}

impl Quantity {
    /// Quantity from an integer count. Zero and negative counts mean unbounded.
    pub fn from_count(count: i64) -> Self {
        u64::try_from(count)
            .ok()
            .and_then(NonZeroU64::new)
            .map_or(Quantity::Unbounded, Quantity::Limited)
    }

    /// Quantity from an untyped numeric value (config files, foreign data).
    ///
    /// Missing, non-finite, non-positive and fractional values all mean
    /// unbounded.
    pub fn from_raw(raw: Option<f64>) -> Self {
        match raw {
            Some(q) if q.is_finite() && q >= 1.0 && q.fract() == 0.0 && q <= u64::MAX as f64 => {
                NonZeroU64::new(q as u64).map_or(Quantity::Unbounded, Quantity::Limited)
            }
            _ => Quantity::Unbounded,
        }
    }

    pub fn is_unbounded(&self) -> bool {
        matches!(self, Quantity::Unbounded)
    }

    /// Remaining count, `None` when unbounded.
    pub fn count(&self) -> Option<u64> {
        match self {
            Quantity::Unbounded => None,
            Quantity::Limited(n) => Some(n.get()),
        }
    }

    /// Consume one unit. Returns `true` when that was the last one.
    pub fn take_one(&mut self) -> bool {
        match *self {
            Quantity::Unbounded => false,
            Quantity::Limited(n) => match NonZeroU64::new(n.get() - 1) {
                Some(rest) => {
                    *self = Quantity::Limited(rest);
                    false
                }
                None => true,
            },
        }
    }
}

impl From<u64> for Quantity {
    fn from(count: u64) -> Self {
        NonZeroU64::new(count).map_or(Quantity::Unbounded, Quantity::Limited)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Quantity::Unbounded => write!(f, "unbounded"),
            Quantity::Limited(n) => write!(f, "{n}"),
        }
    }
}
