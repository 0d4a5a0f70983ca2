use serde::{Deserialize, Serialize};
use std::{cell::RefCell, collections::BTreeMap};

///
/// EventState
/// Ephemeral, in-memory query counters for the current thread.
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub(crate) struct EventState {
    pub(crate) ops: EventOps,
    pub(crate) entities: BTreeMap<String, EventOps>,
}

///
/// EventOps
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct EventOps {
    // Entrypoints
    pub query_calls: u64,

    // Rows
    pub rows_matched: u64,
    pub rows_returned: u64,

    // Failures
    pub validation_rejects: u64,
    pub store_errors: u64,
}

impl EventOps {
    pub(crate) const fn add_query(&mut self) {
        self.query_calls = self.query_calls.saturating_add(1);
    }

    pub(crate) const fn add_rows(&mut self, matched: u64, returned: u64) {
        self.rows_matched = self.rows_matched.saturating_add(matched);
        self.rows_returned = self.rows_returned.saturating_add(returned);
    }

    pub(crate) const fn add_validation_reject(&mut self) {
        self.validation_rejects = self.validation_rejects.saturating_add(1);
    }

    pub(crate) const fn add_store_error(&mut self) {
        self.store_errors = self.store_errors.saturating_add(1);
    }
}

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

/// Update the global counters and the per-entity counters in one borrow.
pub(crate) fn with_ops_mut(entity_path: &str, f: impl Fn(&mut EventOps)) {
    with_state_mut(|m| {
        f(&mut m.ops);
        f(m.entities.entry(entity_path.to_string()).or_default());
    });
}

/// Reset all counters.
pub(crate) fn reset_all() {
    with_state_mut(|m| *m = EventState::default());
}

///
/// EventReport
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct EventReport {
    pub counters: EventOps,
    pub entity_counters: Vec<EntitySummary>,
}

///
/// EntitySummary
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct EntitySummary {
    pub path: String,
    pub ops: EventOps,
    pub avg_rows_per_query: f64,
}

/// Build a report from the in-memory counters.
#[must_use]
#[expect(clippy::cast_precision_loss)]
pub(crate) fn report() -> EventReport {
    let snap = with_state(Clone::clone);

    let entity_counters = snap
        .entities
        .into_iter()
        .map(|(path, ops)| {
            let avg_rows_per_query = if ops.query_calls > 0 {
                ops.rows_returned as f64 / ops.query_calls as f64
            } else {
                0.0
            };

            EntitySummary {
                path,
                ops,
                avg_rows_per_query,
            }
        })
        .collect();

    EventReport {
        counters: snap.ops,
        entity_counters,
    }
}
