//! Domain types for loot tables

pub mod entry;
pub mod quantity;

pub use entry::{normalize_weight, Entry, DEFAULT_WEIGHT};
pub use quantity::Quantity;
