//! Module: store
//! Responsibility: the storage boundary a query plan is applied to.
//! Does not own: planning or pagination metadata.

mod memory;


pub use memory::MemoryStore;

use crate::{
    db::query::{OrderSpec, PageWindow, predicate::Predicate},
    error::InternalError,
    traits::EntityKind,
};

///
/// Store
///
/// Anything that can answer a plan: count the rows a predicate matches and
/// load one ordered window of them. Implementations must apply the order
/// before the window so consecutive windows never overlap.
///

pub trait Store<E: EntityKind> {
    /// Number of rows matching `predicate`, ignoring any window.
    fn count(&self, predicate: &Predicate) -> Result<u64, InternalError>;

    /// Rows matching `predicate`, sorted by `order`, restricted to `window`.
    fn load(
        &self,
        predicate: &Predicate,
        order: &OrderSpec,
        window: PageWindow,
    ) -> Result<Vec<E>, InternalError>;

    /// Total count and one window, as the session needs them for a page.
    ///
    /// The default makes two separate calls, so a write landing between
    /// them can make the count disagree with the rows. Stores that can
    /// read both from one snapshot should override it.
    fn count_and_load(
        &self,
        predicate: &Predicate,
        order: &OrderSpec,
        window: PageWindow,
    ) -> Result<(u64, Vec<E>), InternalError> {
        let total_count = self.count(predicate)?;
        let rows = self.load(predicate, order, window)?;

        Ok((total_count, rows))
    }
}

impl<E: EntityKind, S: Store<E> + ?Sized> Store<E> for &S {
    fn count(&self, predicate: &Predicate) -> Result<u64, InternalError> {
        (**self).count(predicate)
    }

    fn load(
        &self,
        predicate: &Predicate,
        order: &OrderSpec,
        window: PageWindow,
    ) -> Result<Vec<E>, InternalError> {
        (**self).load(predicate, order, window)
    }

    fn count_and_load(
        &self,
        predicate: &Predicate,
        order: &OrderSpec,
        window: PageWindow,
    ) -> Result<(u64, Vec<E>), InternalError> {
        (**self).count_and_load(predicate, order, window)
    }
}
