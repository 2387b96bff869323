//! A single weighted entry in a loot table.

use super::Quantity;

/// Weight given to entries whose supplied weight is unusable.
pub const DEFAULT_WEIGHT: f64 = 1.0;

/// Normalize a caller-supplied weight.
///
/// Missing, NaN, infinite, zero and negative weights become [`DEFAULT_WEIGHT`],
/// so every stored weight is finite and strictly positive.
pub fn normalize_weight(raw: Option<f64>) -> f64 {
    match raw {
        Some(w) if w.is_finite() && w > 0.0 => w,
        _ => DEFAULT_WEIGHT,
    }
}

/// An item with its selection weight and remaining quantity.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry<T> {
    item: T,
    weight: f64,
    remaining: Quantity,
}

impl<T> Entry<T> {
    /// Build an entry, normalizing weight and quantity.
    pub fn new(item: T, weight: Option<f64>, quantity: Option<i64>) -> Self {
        Self {
            item,
            weight: normalize_weight(weight),
            remaining: quantity.map_or(Quantity::Unbounded, Quantity::from_count),
        }
    }

    /// Build an entry from an already-typed quantity.
    pub fn with_quantity(item: T, weight: Option<f64>, remaining: Quantity) -> Self {
        Self {
            item,
            weight: normalize_weight(weight),
            remaining,
        }
    }

    /// Shorthand for an unbounded entry.
    pub fn weighted(item: T, weight: f64) -> Self {
        Self::with_quantity(item, Some(weight), Quantity::Unbounded)
    }

    pub fn item(&self) -> &T {
        &self.item
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn remaining(&self) -> Quantity {
        self.remaining
    }

    pub fn into_item(self) -> T {
        self.item
    }

    /// Consume one unit; `true` when the entry is now exhausted.
    pub(crate) fn take_one(&mut self) -> bool {
        self.remaining.take_one()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bad_weights_default_to_one() {
        assert_eq!(normalize_weight(None), 1.0);
        assert_eq!(normalize_weight(Some(0.0)), 1.0);
        assert_eq!(normalize_weight(Some(-3.0)), 1.0);
        assert_eq!(normalize_weight(Some(f64::NAN)), 1.0);
        assert_eq!(normalize_weight(Some(f64::INFINITY)), 1.0);
        assert_eq!(normalize_weight(Some(0.25)), 0.25);
    }

    #[test]
    fn entry_normalizes_on_construction() {
        let e = Entry::new("gem", Some(-3.0), Some(-1));
        assert_eq!(e.weight(), 1.0);
        assert!(e.remaining().is_unbounded());
        assert_eq!(*e.item(), "gem");
    }
}
