//! Module: query::plan
//! Responsibility: combine filter, sort, and page requests into one
//! validated, storage-agnostic query plan.
//! Does not own: execution or store access.

use crate::db::query::{
    filter::FilterSpec,
    order::{OrderSpec, SortField, SortSpec, UnknownSortField},
    page::{PageError, PageWindow, PaginationSpec, QueryLimits},
    predicate::Predicate,
};
use thiserror::Error as ThisError;

///
/// PlanError
///
/// Caller-input failures detected while planning. A plan either builds
/// completely or fails with exactly one of these.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum PlanError {
    #[error("{0}")]
    Page(#[from] PageError),

    #[error("{0}")]
    Sort(#[from] UnknownSortField),
}

///
/// QueryPlan
///
/// Everything a store needs to answer one page: the normalized predicate,
/// the total ordering, and the row window.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct QueryPlan {
    pub predicate: Predicate,
    pub order: OrderSpec,
    pub window: PageWindow,
    /// The caller's page with its size resolved against the limits.
    pub page: PaginationSpec,
}

/// Build a query plan. Pagination is checked first, then the sort field.
pub fn plan_query(
    filter: &FilterSpec,
    sort: &SortSpec,
    page: PaginationSpec,
    limits: &QueryLimits,
) -> Result<QueryPlan, PlanError> {
    let window = page.window(limits)?;
    let field: SortField = sort.field.parse()?;

    Ok(QueryPlan {
        predicate: filter.to_predicate(),
        order: OrderSpec::with_tie_breaks(field, sort.direction),
        window,
        page: page.resolve(limits),
    })
}
