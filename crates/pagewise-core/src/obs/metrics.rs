use candid::CandidType;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;

///
/// EventState
/// Ephemeral, in-memory counters for paging and traversal calls.
///

#[derive(CandidType, Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct EventState {
    pub ops: EventOps,
    pub traversal: TraversalCounters,
}

///
/// EventOps
///

#[derive(CandidType, Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct EventOps {
    // Entrypoints
    pub page_calls: u64,
    pub count_calls: u64,
    pub traversal_calls: u64,

    // Rows handed back to callers
    pub rows_loaded: u64,
}

///
/// TraversalCounters
///

#[derive(CandidType, Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct TraversalCounters {
    pub snapshots: u64,
    pub keys_snapshotted: u64,
    pub batches: u64,
    pub keys_requested: u64,
    pub records_fetched: u64,
}

impl TraversalCounters {
    /// Keys that were snapshotted but had no record by the time their batch
    /// was fetched.
    #[must_use]
    pub const fn keys_missing(&self) -> u64 {
        self.keys_requested.saturating_sub(self.records_fetched)
    }
}

///
/// EventReport
/// Point-in-time copy of the counters for endpoints and tests.
///

pub type EventReport = EventState;

thread_local! {
    static EVENT_STATE: RefCell<EventState> = RefCell::new(EventState::default());
}

/// Borrow metrics immutably.
pub(crate) fn with_state<R>(f: impl FnOnce(&EventState) -> R) -> R {
    EVENT_STATE.with(|m| f(&m.borrow()))
}

/// Borrow metrics mutably.
pub(crate) fn with_state_mut<R>(f: impl FnOnce(&mut EventState) -> R) -> R {
    EVENT_STATE.with(|m| f(&mut m.borrow_mut()))
}

/// Copy out the current counters.
#[must_use]
pub(crate) fn report() -> EventReport {
    with_state(Clone::clone)
}

/// Reset all counters (useful in tests).
pub(crate) fn reset_all() {
    with_state_mut(|m| *m = EventState::default());
}

///
/// TESTS
///
