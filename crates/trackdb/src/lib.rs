//! ## Crate layout
//! - `core`: values, the issue model, predicates, filter/sort/page specs,
//!   the planner, stores, sessions, and observability.
//! - `config`: TOML-backed query limits.
//!
//! The `prelude` module mirrors the surface most callers need to build and
//! run issue queries.

pub use trackdb_config as config;
pub use trackdb_core as core;

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use crate::core::{db, error::Error};

use crate::{config::Config, core::db::Session};

/// Open a session over `store` with the limits from `config`.
#[must_use]
pub fn session<S>(store: S, config: &Config) -> Session<S> {
    Session::new(store, config.query.limits())
}

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        config::{Config, QueryConfig},
        core::{
            db::{
                FilterSpec, MemoryStore, OrderDirection, PaginatedResult, PaginationSpec,
                QueryLimits, Session, SortSpec, Store,
                query::{FilterAxis, SortField},
                response::PageInfo,
            },
            error::Error,
            model::issue::{Issue, IssuePriority, IssueStatus},
            traits::{EntityKind as _, FieldValues as _},
            types::*,
            value::Value,
        },
    };
    pub use serde::{Deserialize, Serialize};
}
