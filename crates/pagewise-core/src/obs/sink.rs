//! Metrics sink boundary.
//!
//! Paging and traversal logic MUST NOT touch obs::metrics directly.
//! All instrumentation flows through MetricsEvent and MetricsSink.
use crate::obs::metrics;
use std::cell::Cell;

thread_local! {
    static SINK_OVERRIDE: Cell<Option<&'static dyn MetricsSink>> = const { Cell::new(None) };
}

///
/// ExecKind
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ExecKind {
    Page,
    Count,
    Traversal,
}

///
/// MetricsEvent
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MetricsEvent {
    ExecStart {
        kind: ExecKind,
    },
    ExecFinish {
        kind: ExecKind,
        rows: u64,
    },
    SnapshotTaken {
        keys: u64,
    },
    BatchFetched {
        requested: u64,
        returned: u64,
    },
}

///
/// MetricsSink
///

pub trait MetricsSink {
    fn record(&self, event: MetricsEvent);
}

/// GlobalMetricsSink
/// Default thread-local sink that writes into the global counters.
/// Acts as the concrete sink when no scoped override is installed.

pub(crate) struct GlobalMetricsSink;

impl MetricsSink for GlobalMetricsSink {
    fn record(&self, event: MetricsEvent) {
        match event {
            MetricsEvent::ExecStart { kind } => {
                metrics::with_state_mut(|m| match kind {
                    ExecKind::Page => m.ops.page_calls = m.ops.page_calls.saturating_add(1),
                    ExecKind::Count => m.ops.count_calls = m.ops.count_calls.saturating_add(1),
                    ExecKind::Traversal => {
                        m.ops.traversal_calls = m.ops.traversal_calls.saturating_add(1);
                    }
                });
            }

            MetricsEvent::ExecFinish { kind, rows } => {
                metrics::with_state_mut(|m| match kind {
                    ExecKind::Page | ExecKind::Traversal => {
                        m.ops.rows_loaded = m.ops.rows_loaded.saturating_add(rows);
                    }
                    ExecKind::Count => {}
                });
            }

            MetricsEvent::SnapshotTaken { keys } => {
                metrics::with_state_mut(|m| {
                    m.traversal.snapshots = m.traversal.snapshots.saturating_add(1);
                    m.traversal.keys_snapshotted =
                        m.traversal.keys_snapshotted.saturating_add(keys);
                });
            }

            MetricsEvent::BatchFetched {
                requested,
                returned,
            } => {
                metrics::with_state_mut(|m| {
                    m.traversal.batches = m.traversal.batches.saturating_add(1);
                    m.traversal.keys_requested =
                        m.traversal.keys_requested.saturating_add(requested);
                    m.traversal.records_fetched =
                        m.traversal.records_fetched.saturating_add(returned);
                });
            }
        }
    }
}

pub(crate) const GLOBAL_METRICS_SINK: GlobalMetricsSink = GlobalMetricsSink;

pub(crate) fn record(event: MetricsEvent) {
    match SINK_OVERRIDE.with(Cell::get) {
        Some(sink) => sink.record(event),
        None => GLOBAL_METRICS_SINK.record(event),
    }
}

/// Snapshot the current metrics state for endpoint/test plumbing.
#[must_use]
pub fn metrics_report() -> metrics::EventReport {
    metrics::report()
}

/// Reset all metrics counters.
pub fn metrics_reset_all() {
    metrics::reset_all();
}

/// Run a closure with a temporary metrics sink override.
pub(crate) fn with_metrics_sink<T>(sink: &'static dyn MetricsSink, f: impl FnOnce() -> T) -> T {
    struct Guard(Option<&'static dyn MetricsSink>);

    impl Drop for Guard {
        fn drop(&mut self) {
            SINK_OVERRIDE.with(|cell| cell.set(self.0));
        }
    }

    let prev = SINK_OVERRIDE.with(|cell| cell.replace(Some(sink)));
    let _guard = Guard(prev);

    f()
}

/// Span
/// RAII guard that emits start/finish metrics events for one call.
/// Ensures finish accounting happens even on error or unwind.

pub(crate) struct Span {
    kind: ExecKind,
    rows: u64,
}

impl Span {
    #[must_use]
    pub(crate) fn new(kind: ExecKind) -> Self {
        record(MetricsEvent::ExecStart { kind });

        Self { kind, rows: 0 }
    }

    pub(crate) const fn set_rows(&mut self, rows: u64) {
        self.rows = rows;
    }

    pub(crate) const fn add_rows(&mut self, rows: u64) {
        self.rows = self.rows.saturating_add(rows);
    }
}

impl Drop for Span {
    fn drop(&mut self) {
        record(MetricsEvent::ExecFinish {
            kind: self.kind,
            rows: self.rows,
        });
    }
}

///
/// TESTS
///
