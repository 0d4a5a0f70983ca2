use crate::{
    db::{
        query::{
            OrderSpec, PageWindow,
            predicate::{Predicate, eval},
        },
        store::Store,
    },
    error::InternalError,
    traits::EntityKind,
};
use std::{
    collections::BTreeMap,
    sync::{RwLock, RwLockReadGuard, RwLockWriteGuard},
};

///
/// MemoryStore
///
/// In-process store keyed by primary key. Every query is a full scan:
/// filter, sort, then slice.
///

#[derive(Debug)]
pub struct MemoryStore<E: EntityKind> {
    pub(super) rows: RwLock<BTreeMap<E::Key, E>>,
}

impl<E: EntityKind> MemoryStore<E> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            rows: RwLock::new(BTreeMap::new()),
        }
    }

    /// Insert or replace a row, returning the previous row under that key.
    pub fn insert(&self, row: E) -> Result<Option<E>, InternalError> {
        Ok(self.write()?.insert(row.key(), row))
    }

    /// Insert many rows.
    pub fn extend(&self, rows: impl IntoIterator<Item = E>) -> Result<(), InternalError> {
        let mut guard = self.write()?;
        for row in rows {
            guard.insert(row.key(), row);
        }

        Ok(())
    }

    pub fn remove(&self, key: &E::Key) -> Result<Option<E>, InternalError> {
        Ok(self.write()?.remove(key))
    }

    pub fn get(&self, key: &E::Key) -> Result<Option<E>, InternalError> {
        Ok(self.read()?.get(key).cloned())
    }

    pub fn len(&self) -> Result<usize, InternalError> {
        Ok(self.read()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, InternalError> {
        Ok(self.read()?.is_empty())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, BTreeMap<E::Key, E>>, InternalError> {
        self.rows
            .read()
            .map_err(|_| InternalError::store_internal(format!("{} store lock poisoned", E::PATH)))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, BTreeMap<E::Key, E>>, InternalError> {
        self.rows
            .write()
            .map_err(|_| InternalError::store_internal(format!("{} store lock poisoned", E::PATH)))
    }
}

impl<E: EntityKind> Default for MemoryStore<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: EntityKind> FromIterator<E> for MemoryStore<E> {
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        let rows = iter.into_iter().map(|row| (row.key(), row)).collect();

        Self {
            rows: RwLock::new(rows),
        }
    }
}

// Filter, sort, then slice one snapshot of the rows.
fn ordered_window<E: EntityKind>(
    rows: &BTreeMap<E::Key, E>,
    predicate: &Predicate,
    order: &OrderSpec,
    window: PageWindow,
) -> (u64, Vec<E>) {
    let mut matched: Vec<&E> = rows.values().filter(|row| eval(*row, predicate)).collect();
    let total_count = matched.len() as u64;
    matched.sort_by(|a, b| order.compare(*a, *b));

    // a window that starts past addressable memory is past the end
    let Ok(offset) = usize::try_from(window.offset) else {
        return (total_count, Vec::new());
    };

    let page = matched
        .into_iter()
        .skip(offset)
        .take(window.limit as usize)
        .cloned()
        .collect();

    (total_count, page)
}

impl<E: EntityKind> Store<E> for MemoryStore<E> {
    fn count(&self, predicate: &Predicate) -> Result<u64, InternalError> {
        let rows = self.read()?;
        let matched = rows.values().filter(|row| eval(*row, predicate)).count();

        Ok(matched as u64)
    }

    fn load(
        &self,
        predicate: &Predicate,
        order: &OrderSpec,
        window: PageWindow,
    ) -> Result<Vec<E>, InternalError> {
        let rows = self.read()?;
        let (_, page) = ordered_window(&rows, predicate, order, window);

        Ok(page)
    }

    // One read guard covers both halves.
    fn count_and_load(
        &self,
        predicate: &Predicate,
        order: &OrderSpec,
        window: PageWindow,
    ) -> Result<(u64, Vec<E>), InternalError> {
        let rows = self.read()?;

        Ok(ordered_window(&rows, predicate, order, window))
    }
}
