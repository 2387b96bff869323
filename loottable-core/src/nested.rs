//! Table payloads that can be "nothing" or another table.
//!
//! [`LootTable::choose`] treats items as opaque, so a drawn nested table comes
//! back as the table itself. [`Loot::resolve`] is the caller-side step that
//! keeps drawing down nested tables until it reaches a value.
//!
//! Nested tables are shared (`Rc<RefCell<_>>`): the same table can sit in
//! several places, and its limited entries deplete across all of them.

use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::Rc;
use thiserror::Error;
use tracing::trace;

use crate::rng::RandomSource;
use crate::table::LootTable;

/// Deepest chain of nested tables [`Loot::resolve`] will follow.
pub const MAX_NESTING_DEPTH: usize = 64;

/// A nested table shared between owners.
pub type SharedTable<T> = Rc<RefCell<LootTable<Loot<T>>>>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResolveError {
    #[error("nested tables deeper than {limit} levels (cycle?)")]
    TooDeep { limit: usize },
    #[error("nested table at depth {depth} is already borrowed")]
    TableInUse { depth: usize },
}

/// What a table entry yields.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Loot<T> {
    /// An explicit empty drop.
    Nothing,
    Value(T),
    Table(SharedTable<T>),
}

impl<T> Loot<T> {
    /// Wrap a table so it can be stored inside other tables.
    pub fn table(table: LootTable<Loot<T>>) -> Self {
        Loot::Table(Rc::new(RefCell::new(table)))
    }

    pub fn is_nothing(&self) -> bool {
        matches!(self, Loot::Nothing)
    }

    pub fn as_table(&self) -> Option<&SharedTable<T>> {
        match self {
            Loot::Table(table) => Some(table),
            _ => None,
        }
    }
}

impl<T: Clone> Loot<T> {
    /// Follow nested tables down to a value.
    ///
    /// Yields `None` for [`Loot::Nothing`] and for nested tables with nothing
    /// left to draw.
    pub fn resolve<S: RandomSource + ?Sized>(
        self,
        source: &mut S,
    ) -> Result<Option<T>, ResolveError> {
        let mut current = self;
        for depth in 0..=MAX_NESTING_DEPTH {
            let table = match current {
                Loot::Nothing => return Ok(None),
                Loot::Value(value) => return Ok(Some(value)),
                Loot::Table(table) => table,
            };
            let drawn = match table.try_borrow_mut() {
                Ok(mut inner) => inner.choose(source),
                Err(_) => return Err(ResolveError::TableInUse { depth }),
            };
            match drawn {
                Some(next) => current = next,
                None => {
                    trace!(depth, "nested table is empty");
                    return Ok(None);
                }
            }
        }
        Err(ResolveError::TooDeep {
            limit: MAX_NESTING_DEPTH,
        })
    }
}

impl<T: Clone> LootTable<Loot<T>> {
    /// Draw from this table and resolve whatever comes out.
    pub fn choose_resolved<S: RandomSource + ?Sized>(
        &mut self,
        source: &mut S,
    ) -> Result<Option<T>, ResolveError> {
        match self.choose(source) {
            Some(loot) => loot.resolve(source),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ScriptedSource;

    fn gems() -> LootTable<Loot<&'static str>> {
        let mut table = LootTable::new();
        table.add(Loot::Value("ruby"), None, Some(1));
        table.add(Loot::Value("opal"), None, Some(1));
        table
    }

    #[test]
    fn choose_returns_nested_table_unresolved() {
        let inner = Loot::table(gems());
        let inner_rc = Rc::clone(inner.as_table().unwrap());

        let mut outer = LootTable::new();
        outer.add(inner, None, None);

        let mut src = ScriptedSource::new(vec![0.0]);
        match outer.choose(&mut src) {
            Some(Loot::Table(t)) => assert!(Rc::ptr_eq(&t, &inner_rc)),
            other => panic!("expected the nested table, got {other:?}"),
        }
        assert_eq!(inner_rc.borrow().len(), 2, "outer draw must not touch the nested table");
    }

    #[test]
    fn resolve_walks_down_and_depletes_shared_table() {
        let mut outer = LootTable::new();
        outer.add(Loot::table(gems()), None, None);

        let mut src = ScriptedSource::new(vec![0.0]);
        assert_eq!(outer.choose_resolved(&mut src), Ok(Some("ruby")));
        assert_eq!(outer.choose_resolved(&mut src), Ok(Some("opal")));
        // nested table is now dry but still present in the outer table
        assert_eq!(outer.choose_resolved(&mut src), Ok(None));
        assert_eq!(outer.len(), 1);
    }

    #[test]
    fn nothing_resolves_to_none() {
        let mut table: LootTable<Loot<u32>> = LootTable::new();
        table.add(Loot::Nothing, None, Some(1));
        let mut src = ScriptedSource::new(vec![0.5]);
        let drawn = table.choose(&mut src).unwrap();
        assert!(drawn.is_nothing());
        assert_eq!(drawn.resolve(&mut src), Ok(None));
        assert!(table.is_empty());
    }

    #[test]
    fn self_referencing_table_hits_depth_limit() {
        let shared: SharedTable<u8> = Rc::new(RefCell::new(LootTable::new()));
        shared
            .borrow_mut()
            .add(Loot::Table(Rc::clone(&shared)), None, None);

        let mut src = ScriptedSource::new(vec![0.0]);
        let result = Loot::Table(Rc::clone(&shared)).resolve(&mut src);
        assert_eq!(
            result,
            Err(ResolveError::TooDeep {
                limit: MAX_NESTING_DEPTH
            })
        );

        // break the cycle so the test does not leak
        shared.borrow_mut().clear();
    }

    #[test]
    fn borrowed_table_is_reported() {
        let loot = Loot::table(gems());
        let shared = Rc::clone(loot.as_table().unwrap());
        let guard = shared.borrow();
        let mut src = ScriptedSource::new(vec![0.0]);
        assert_eq!(
            loot.resolve(&mut src),
            Err(ResolveError::TableInUse { depth: 0 })
        );
        drop(guard);
    }

    #[test]
    fn nested_tables_from_json() {
        let json = r#"{ "entries": [
            { "item": "nothing", "weight": 1 },
            { "item": { "value": "sword" }, "weight": 20 },
            { "item": { "table": { "entries": [ { "item": { "value": "gem" } } ] } } }
        ] }"#;
        let table: LootTable<Loot<String>> = LootTable::from_json(json).unwrap();
        assert!(table.entries()[0].item().is_nothing());
        let nested = table.entries()[2].item().as_table().unwrap();
        assert_eq!(nested.borrow().len(), 1);
    }
}
