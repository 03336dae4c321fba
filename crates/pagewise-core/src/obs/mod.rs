//! Observability: runtime telemetry (metrics) and sink abstractions.
//!
//! This module never reaches into datasets.

pub(crate) mod metrics;
pub(crate) mod sink;

// re-exports
pub use metrics::{EventOps, EventReport, EventState, TraversalCounters};
pub use sink::{ExecKind, MetricsEvent, MetricsSink, metrics_report, metrics_reset_all};
