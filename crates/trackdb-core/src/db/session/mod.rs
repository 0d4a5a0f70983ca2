//! Module: session
//! Responsibility: run one paginated query end to end against a store.
//! Does not own: filter compilation, planning rules, or storage layout.

#[cfg(test)]
mod tests;

use crate::{
    db::{
        query::{FilterSpec, PaginationSpec, QueryLimits, QueryPlan, SortSpec, plan_query},
        response::{PageInfo, PaginatedResult},
        store::Store,
    },
    error::{Error, InternalError},
    model::issue::Issue,
    obs::sink::{MetricsEvent, MetricsSink, record, with_metrics_sink},
    traits::EntityKind,
};
use std::sync::Arc;
use tracing::debug;

///
/// Session
///
/// Store handle plus query policy (page limits, metrics routing).
/// Every query is planned before the store is touched, so a rejected
/// request never reaches storage.
///
/// A session is `Send + Sync` whenever its store is, so one session over
/// a shared store can serve concurrent callers.
///

pub struct Session<S> {
    store: S,
    limits: QueryLimits,
    metrics: Option<Arc<dyn MetricsSink>>,
}

impl<S> Session<S> {
    #[must_use]
    pub const fn new(store: S, limits: QueryLimits) -> Self {
        Self {
            store,
            limits,
            metrics: None,
        }
    }

    /// Route this session's metrics events to `sink` instead of the
    /// thread-local counters.
    #[must_use]
    pub fn metrics_sink(mut self, sink: Arc<dyn MetricsSink>) -> Self {
        self.metrics = Some(sink);
        self
    }

    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    #[must_use]
    pub const fn limits(&self) -> &QueryLimits {
        &self.limits
    }

    fn with_metrics<T>(&self, f: impl FnOnce() -> T) -> T {
        match &self.metrics {
            Some(sink) => with_metrics_sink(Arc::clone(sink), f),
            None => f(),
        }
    }

    /// Filter, sort, and paginate issues.
    pub fn query_issues(
        &self,
        filter: &FilterSpec,
        sort: &SortSpec,
        page: PaginationSpec,
    ) -> Result<PaginatedResult<Issue>, Error>
    where
        S: Store<Issue>,
    {
        self.query(filter, sort, page)
    }

    /// Filter, sort, and paginate any entity the store holds.
    pub fn query<E>(
        &self,
        filter: &FilterSpec,
        sort: &SortSpec,
        page: PaginationSpec,
    ) -> Result<PaginatedResult<E>, Error>
    where
        E: EntityKind,
        S: Store<E>,
    {
        self.with_metrics(|| {
            record(MetricsEvent::QueryStart {
                entity_path: E::PATH,
            });

            let plan = plan_query(filter, sort, page, &self.limits).map_err(|err| {
                record(MetricsEvent::ValidationReject {
                    entity_path: E::PATH,
                });
                debug!(entity = E::PATH, error = %err, "query rejected");
                err
            })?;

            self.execute(&plan).inspect_err(|_| {
                record(MetricsEvent::StoreError {
                    entity_path: E::PATH,
                });
            })
        })
    }

    // One count and one windowed load, read together.
    fn execute<E>(&self, plan: &QueryPlan) -> Result<PaginatedResult<E>, Error>
    where
        E: EntityKind,
        S: Store<E>,
    {
        debug!(
            entity = E::PATH,
            predicate = ?plan.predicate,
            order = ?plan.order.fields,
            offset = plan.window.offset,
            limit = plan.window.limit,
            "query planned"
        );

        let (total_count, rows) = self
            .store
            .count_and_load(&plan.predicate, &plan.order, plan.window)?;

        if rows.len() > plan.window.limit as usize {
            return Err(InternalError::executor_invariant(format!(
                "store returned {} rows for a window of {}",
                rows.len(),
                plan.window.limit
            ))
            .into());
        }

        let rows_returned = rows.len() as u64;
        record(MetricsEvent::QueryFinish {
            entity_path: E::PATH,
            rows_matched: total_count,
            rows_returned,
        });
        debug!(
            entity = E::PATH,
            total_count, rows_returned, "query executed"
        );

        Ok(PaginatedResult::new(
            rows,
            PageInfo::new(plan.page.page, plan.window.limit, total_count),
        ))
    }
}
