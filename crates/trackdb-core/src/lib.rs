//! Core runtime for trackdb: values, the issue model, predicate trees,
//! filter/sort/page specs, the planner, stores, and observability.
#![warn(unreachable_pub)]

// public exports are one module level down
pub mod db;
pub mod error;
pub mod model;
pub mod obs;
pub mod traits;
pub mod types;
pub mod value;

// test
#[cfg(test)]
pub(crate) mod test_support;

///
/// CONSTANTS
///

/// Page size used when a request does not name one.
pub const DEFAULT_PAGE_SIZE: u32 = 25;

/// Upper bound on page size unless configuration raises or lowers it.
pub const DEFAULT_MAX_PAGE_SIZE: u32 = 100;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No errors, executors, stores, or helpers are re-exported here.
///

pub mod prelude {
    pub use crate::{
        db::query::{FilterSpec, OrderDirection, PaginationSpec, SortSpec},
        model::issue::{Issue, IssuePriority, IssueStatus},
        traits::{EntityKind, FieldValues, Path},
        types::{CycleId, Float64, IssueId, LabelId, ProjectId, TeamId, Timestamp, UserId},
        value::Value,
    };
}
