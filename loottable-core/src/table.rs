//! The loot table: weighted draws with depletion.
//!
//! A draw partitions `[0, total_weight)` into consecutive spans, one per entry
//! in insertion order, each as wide as the entry's weight. A uniform value is
//! scaled onto that range and the entry whose span contains it is selected,
//! so an entry of weight `w` is picked with probability `w / total_weight`.
//!
//! Entries with a limited quantity lose one unit per selection and are removed
//! as soon as the last unit is drawn. Everything stored is therefore eligible
//! and `total_weight` is a plain sum.

use tracing::{debug, trace};

use crate::domain::Entry;
use crate::rng::RandomSource;

/// Ordered collection of weighted entries.
#[derive(Debug, Clone, PartialEq)]
pub struct LootTable<T> {
    entries: Vec<Entry<T>>,
}

impl<T> Default for LootTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> LootTable<T> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Build a table from an initial list of entries, keeping their order.
    pub fn from_entries(entries: impl IntoIterator<Item = Entry<T>>) -> Self {
        entries.into_iter().collect()
    }

    /// Append an item.
    ///
    /// Weights are relative, not percentages. A missing or unusable weight
    /// becomes 1; a missing or non-positive quantity means the item never runs
    /// out. Adding the same item twice creates two independent entries.
    pub fn add(&mut self, item: T, weight: Option<f64>, quantity: Option<i64>) {
        self.insert(Entry::new(item, weight, quantity));
    }

    /// Append a pre-built entry.
    pub fn insert(&mut self, entry: Entry<T>) {
        self.entries.push(entry);
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        debug!(dropped = self.entries.len(), "loot table cleared");
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order.
    pub fn entries(&self) -> &[Entry<T>] {
        &self.entries
    }

    /// Sum of the weights of all entries that can still be drawn.
    ///
    /// Saturates to infinity when finite weights add up past `f64::MAX`; draws
    /// and [`odds`](Self::odds) stay proportional in that case.
    pub fn total_weight(&self) -> f64 {
        self.entries.iter().map(Entry::weight).sum()
    }

    /// Divisor applied to every weight during a draw, and the scaled total.
    ///
    /// The divisor is 1 unless the plain sum overflows, in which case weights
    /// are divided by the largest one so the sum stays finite.
    fn weight_scale(&self) -> Option<(f64, f64)> {
        let total = self.total_weight();
        if self.entries.is_empty() || total <= 0.0 {
            return None;
        }
        if total.is_finite() {
            return Some((1.0, total));
        }
        let max = self.entries.iter().map(Entry::weight).fold(0.0, f64::max);
        let scaled = self.entries.iter().map(|e| e.weight() / max).sum();
        Some((max, scaled))
    }

    /// Selection probability of each entry for the next draw, in insertion order.
    pub fn odds(&self) -> Vec<f64> {
        match self.weight_scale() {
            Some((divisor, total)) => self
                .entries
                .iter()
                .map(|e| e.weight() / divisor / total)
                .collect(),
            None => Vec::new(),
        }
    }

    /// Number of draws left before the table runs dry, `None` when some entry
    /// is unbounded.
    pub fn draws_remaining(&self) -> Option<u64> {
        self.entries
            .iter()
            .map(|e| e.remaining().count())
            .try_fold(0u64, |acc, n| n.map(|n| acc.saturating_add(n)))
    }

    /// Index of the entry whose weight span contains the next draw.
    fn pick_index<S: RandomSource + ?Sized>(&self, source: &mut S) -> Option<usize> {
        let (divisor, total) = self.weight_scale()?;

        // NaN survives the clamp and falls through to the last entry below.
        let point = source.next_unit().clamp(0.0, 1.0) * total;
        let mut cumulative = 0.0;
        for (index, entry) in self.entries.iter().enumerate() {
            cumulative += entry.weight() / divisor;
            if point < cumulative {
                trace!(total_weight = total, point, index, "drew entry");
                return Some(index);
            }
        }

        // Draw on or past the upper boundary: rounding, or a source yielding 1.0 or NaN.
        let last = self.entries.len() - 1;
        trace!(total_weight = total, point, index = last, "draw clamped to last entry");
        Some(last)
    }
}

impl<T: Clone> LootTable<T> {
    /// Draw one item, or `None` when nothing is left to draw.
    ///
    /// The selected entry loses one unit of quantity and leaves the table when
    /// it runs out. Items are returned as stored: a nested table comes back as
    /// the table itself, not as one of its items.
    pub fn choose<S: RandomSource + ?Sized>(&mut self, source: &mut S) -> Option<T> {
        let index = self.pick_index(source)?;
        if self.entries[index].take_one() {
            let entry = self.entries.remove(index);
            debug!(index, left = self.entries.len(), "entry exhausted");
            Some(entry.into_item())
        } else {
            Some(self.entries[index].item().clone())
        }
    }

    /// Draw up to `n` items, stopping early once the table runs dry.
    pub fn choose_many<S: RandomSource + ?Sized>(&mut self, n: usize, source: &mut S) -> Vec<T> {
        let mut drawn = Vec::new();
        for _ in 0..n {
            match self.choose(source) {
                Some(item) => drawn.push(item),
                None => break,
            }
        }
        drawn
    }
}

impl<T> FromIterator<Entry<T>> for LootTable<T> {
    fn from_iter<I: IntoIterator<Item = Entry<T>>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Raw `(item, weight, quantity)` triples, normalized like [`LootTable::add`].
impl<T> FromIterator<(T, Option<f64>, Option<i64>)> for LootTable<T> {
    fn from_iter<I: IntoIterator<Item = (T, Option<f64>, Option<i64>)>>(iter: I) -> Self {
        iter.into_iter()
            .map(|(item, weight, quantity)| Entry::new(item, weight, quantity))
            .collect()
    }
}

impl<T> Extend<Entry<T>> for LootTable<T> {
    fn extend<I: IntoIterator<Item = Entry<T>>>(&mut self, iter: I) {
        self.entries.extend(iter);
    }
}

// ─── Tests ───────────────────────────────────────────────────────────
