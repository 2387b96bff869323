//! Loot tables: weighted random draws with finite quantities.
//!
//! A [`LootTable`] holds weighted entries and picks one per draw with
//! probability proportional to its weight. Entries may carry a quantity; each
//! draw consumes one unit and an entry is dropped once it runs out.
//!
//! ```
//! use loottable_core::LootTable;
//! use rand::SeedableRng;
//!
//! let mut loot = LootTable::new();
//! loot.add("sword", Some(20.0), None);
//! loot.add("shield", Some(5.0), None);
//! loot.add("gold", Some(5.0), Some(3));
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(7);
//! let item = loot.choose(&mut rng); // most likely a sword
//! assert!(item.is_some());
//! ```
//!
//! - `domain`: entries, quantities and input normalization
//! - `table`: the table and the weighted draw
//! - `rng`: randomness sources and seeded per-table streams
//! - `config`: TOML/JSON table specs
//! - `nested`: "nothing" drops and tables inside tables

pub mod config;
pub mod domain;
pub mod nested;
pub mod rng;
pub mod table;

pub use config::{ConfigError, EntrySpec, TableSpec};
pub use domain::{Entry, Quantity};
pub use nested::{Loot, ResolveError, SharedTable};
pub use rng::{FnSource, RandomSource, ScriptedSource, SeedTree};
pub use table::LootTable;
