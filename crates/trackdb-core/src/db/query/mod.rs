//! Query specification modules: filter, sort, and page requests, the
//! predicate tree they compile into, and the planner that joins them.

pub mod filter;
pub mod order;
pub mod page;
pub mod plan;
pub mod predicate;

pub use filter::{FilterAxis, FilterSpec};
pub use order::{OrderDirection, OrderSpec, SortField, SortSpec, UnknownSortField};
pub use page::{PageError, PageWindow, PaginationSpec, QueryLimits, total_pages};
pub use plan::{PlanError, QueryPlan, plan_query};
