//! Metrics sink boundary.
//!
//! Query execution never touches `obs::metrics` directly. All
//! instrumentation flows through `MetricsEvent` and `MetricsSink`.
use crate::obs::metrics::{self, EventReport};
use std::{cell::RefCell, sync::Arc};

thread_local! {
    static SINK_OVERRIDE: RefCell<Option<Arc<dyn MetricsSink>>> = RefCell::new(None);
}

///
/// MetricsEvent
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MetricsEvent {
    QueryStart {
        entity_path: &'static str,
    },
    QueryFinish {
        entity_path: &'static str,
        rows_matched: u64,
        rows_returned: u64,
    },
    ValidationReject {
        entity_path: &'static str,
    },
    StoreError {
        entity_path: &'static str,
    },
}

///
/// MetricsSink
///
/// Sinks are shared across threads, so implementations synchronize their
/// own state.
///

pub trait MetricsSink: Send + Sync {
    fn record(&self, event: MetricsEvent);
}

/// GlobalMetricsSink
/// Default sink that writes into the thread-local counters.
/// Used whenever no scoped override is installed.

pub(crate) struct GlobalMetricsSink;

impl MetricsSink for GlobalMetricsSink {
    fn record(&self, event: MetricsEvent) {
        match event {
            MetricsEvent::QueryStart { entity_path } => {
                metrics::with_ops_mut(entity_path, metrics::EventOps::add_query);
            }

            MetricsEvent::QueryFinish {
                entity_path,
                rows_matched,
                rows_returned,
            } => {
                metrics::with_ops_mut(entity_path, |ops| {
                    ops.add_rows(rows_matched, rows_returned);
                });
            }

            MetricsEvent::ValidationReject { entity_path } => {
                metrics::with_ops_mut(entity_path, metrics::EventOps::add_validation_reject);
            }

            MetricsEvent::StoreError { entity_path } => {
                metrics::with_ops_mut(entity_path, metrics::EventOps::add_store_error);
            }
        }
    }
}

pub(crate) const GLOBAL_METRICS_SINK: GlobalMetricsSink = GlobalMetricsSink;

/// Route one event to the scoped override, or to the global counters.
pub(crate) fn record(event: MetricsEvent) {
    let sink = SINK_OVERRIDE.with(|cell| cell.borrow().clone());

    match sink {
        Some(sink) => sink.record(event),
        None => GLOBAL_METRICS_SINK.record(event),
    }
}

/// Snapshot the current thread's query counters.
#[must_use]
pub fn metrics_report() -> EventReport {
    metrics::report()
}

/// Reset all query counters on the current thread.
pub fn metrics_reset_all() {
    metrics::reset_all();
}

/// Run a closure with `sink` receiving every event recorded on this
/// thread. The previous sink is restored on return and on unwind.
pub fn with_metrics_sink<T>(sink: Arc<dyn MetricsSink>, f: impl FnOnce() -> T) -> T {
    struct Guard(Option<Arc<dyn MetricsSink>>);

    impl Drop for Guard {
        fn drop(&mut self) {
            let prev = self.0.take();
            SINK_OVERRIDE.with(|cell| {
                *cell.borrow_mut() = prev;
            });
        }
    }

    let prev = SINK_OVERRIDE.with(|cell| cell.borrow_mut().replace(sink));
    let _guard = Guard(prev);

    f()
}
