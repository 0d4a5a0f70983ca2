pub mod query;
pub mod response;
pub mod session;
pub mod store;

pub use query::{
    FilterSpec, OrderDirection, PaginationSpec, PlanError, QueryLimits, QueryPlan, SortSpec,
    plan_query,
};
pub use response::{PageInfo, PaginatedResult};
pub use session::Session;
pub use store::{MemoryStore, Store};
