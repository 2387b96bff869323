//! Declarative loot tables.
//!
//! A table can be written down as a list of entries and loaded from TOML or
//! JSON. Loading normalizes every entry exactly like [`LootTable::add`]:
//!
//! ```toml
//! [[entries]]
//! item = "sword"
//! weight = 20
//!
//! [[entries]]
//! item = "gold"
//! weight = 5
//! quantity = 3
//! ```
//!
//! `LootTable` serializes through the same shape. Unbounded quantities are
//! written as a missing `quantity` field.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;
use tracing::debug;

use crate::domain::{Entry, Quantity};
use crate::table::LootTable;

/// Errors that can occur while reading or writing table specs.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("parse loot table TOML: {0}")]
    TomlParse(#[from] toml::de::Error),
    #[error("serialize loot table TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
    #[error("loot table JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// One entry as written in a config file. Values are raw; nothing is rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntrySpec<T> {
    pub item: T,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<f64>,
}

impl<T> EntrySpec<T> {
    pub fn new(item: T) -> Self {
        Self {
            item,
            weight: None,
            quantity: None,
        }
    }

    pub fn weight(mut self, weight: f64) -> Self {
        self.weight = Some(weight);
        self
    }

    pub fn quantity(mut self, quantity: f64) -> Self {
        self.quantity = Some(quantity);
        self
    }
}

impl<T> From<EntrySpec<T>> for Entry<T> {
    fn from(spec: EntrySpec<T>) -> Self {
        Entry::with_quantity(spec.item, spec.weight, Quantity::from_raw(spec.quantity))
    }
}

/// A whole table as written in a config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableSpec<T> {
    #[serde(default = "Vec::new")]
    pub entries: Vec<EntrySpec<T>>,
}

impl<T> Default for TableSpec<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T: DeserializeOwned> TableSpec<T> {
    /// Parse a table spec from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let spec: Self = toml::from_str(content)?;
        debug!(entries = spec.entries.len(), "loot table spec parsed from TOML");
        Ok(spec)
    }

    /// Parse a table spec from a JSON string.
    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        let spec: Self = serde_json::from_str(content)?;
        debug!(entries = spec.entries.len(), "loot table spec parsed from JSON");
        Ok(spec)
    }
}

impl<T: Serialize> TableSpec<T> {
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl<T> From<TableSpec<T>> for LootTable<T> {
    fn from(spec: TableSpec<T>) -> Self {
        spec.entries.into_iter().map(Entry::from).collect()
    }
}

impl<T: Clone> LootTable<T> {
    /// Current state of the table as a spec, remaining quantities included.
    pub fn to_spec(&self) -> TableSpec<T> {
        TableSpec {
            entries: self
                .entries()
                .iter()
                .map(|e| EntrySpec {
                    item: e.item().clone(),
                    weight: Some(e.weight()),
                    quantity: e.remaining().count().map(|n| n as f64),
                })
                .collect(),
        }
    }
}

impl<T: DeserializeOwned> LootTable<T> {
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        TableSpec::<T>::from_toml(content).map(Self::from)
    }

    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        TableSpec::<T>::from_json(content).map(Self::from)
    }
}

impl<T: Serialize> LootTable<T> {
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

// ─── Serde ───────────────────────────────────────────────────────────

#[derive(Serialize)]
struct EntryView<'a, T> {
    item: &'a T,
    weight: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    quantity: Option<u64>,
}

#[derive(Serialize)]
struct TableView<'a, T> {
    entries: Vec<EntryView<'a, T>>,
}

impl<T: Serialize> Serialize for LootTable<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        TableView {
            entries: self
                .entries()
                .iter()
                .map(|e| EntryView {
                    item: e.item(),
                    weight: e.weight(),
                    quantity: e.remaining().count(),
                })
                .collect(),
        }
        .serialize(serializer)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for LootTable<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        TableSpec::<T>::deserialize(deserializer).map(Self::from)
    }
}
