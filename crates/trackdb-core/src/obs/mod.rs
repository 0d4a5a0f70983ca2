//! Observability: runtime query counters and the sink they flow through.
//!
//! Diagnostic logging goes through `tracing` at the call sites; this
//! module only owns counters.

pub(crate) mod metrics;
pub(crate) mod sink;

// re-exports
pub use metrics::{EntitySummary, EventOps, EventReport};
pub use sink::{MetricsEvent, MetricsSink, metrics_report, metrics_reset_all, with_metrics_sink};
