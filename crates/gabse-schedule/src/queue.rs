//! `ActionQueue` — the pending-action scheduler.
//!
//! # Layout
//!
//! Actions live in an arena (`FxHashMap<ActionId, Action<P>>`) keyed by their
//! stable id.  Ordering is kept separately in a `BTreeSet` of small
//! `(time, priority, sequence, id)` keys.  Cancelling an action removes one
//! arena entry and one key, both O(log n) or better, without touching any
//! other action or invalidating outstanding ids.
//!
//! # Time floor and sealed ticks
//!
//! The queue tracks the current simulated time (`floor`).  Inserting before
//! the floor is rejected.  Popping a batch for time `t` *seals* `t`: any later
//! insert for `t` is moved to `t + 1`, so resolving a tick can never feed
//! that same tick again.  The seal stays in place until the next batch is
//! popped.

use std::collections::BTreeSet;

use gabse_core::{ActionId, AgentId, Tick};
use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use crate::action::OrderKey;
use crate::{Action, ActionSpec, ScheduleError, ScheduleResult};

/// Time-ordered queue of pending actions.
pub struct ActionQueue<P> {
    order:    BTreeSet<OrderKey>,
    table:    FxHashMap<ActionId, Action<P>>,
    next_id:  u64,
    next_seq: u64,
    floor:    Tick,
    sealed:   Option<Tick>,
}

impl<P> Default for ActionQueue<P> {
    fn default() -> Self {
        Self::new(Tick::ZERO)
    }
}

impl<P> ActionQueue<P> {
    /// An empty queue whose current time is `start`.
    pub fn new(start: Tick) -> Self {
        Self {
            order:    BTreeSet::new(),
            table:    FxHashMap::default(),
            next_id:  0,
            next_seq: 0,
            floor:    start,
            sealed:   None,
        }
    }

    // ── Insertion ─────────────────────────────────────────────────────────

    /// Queue `spec` and return its id.
    ///
    /// Fails with [`ScheduleError::InvalidSchedule`] if `spec.time` is
    /// earlier than the queue's current time; the queue is unchanged.  A spec
    /// for an already-popped tick is deferred to the following tick, which
    /// fails with [`ScheduleError::TimeOverflow`] at `Tick(u64::MAX)`.
    pub fn insert(&mut self, spec: ActionSpec<P>) -> ScheduleResult<ActionId> {
        if spec.time < self.floor {
            return Err(ScheduleError::InvalidSchedule {
                requested: spec.time,
                now:       self.floor,
            });
        }
        if spec.interval == Some(0) {
            return Err(ScheduleError::ZeroInterval);
        }

        let time = if self.sealed == Some(spec.time) {
            debug!(agent = %spec.agent, from = %spec.time, "same-tick action deferred");
            spec.time
                .checked_next()
                .ok_or(ScheduleError::TimeOverflow { from: spec.time, by: 1 })?
        } else {
            spec.time
        };

        let id = ActionId(self.next_id);
        self.next_id += 1;
        let sequence = self.next_seq;
        self.next_seq += 1;

        let action = Action {
            id,
            sequence,
            time,
            agent:    spec.agent,
            priority: spec.priority,
            interval: spec.interval,
            payload:  spec.payload,
        };
        trace!(action = %id, agent = %action.agent, %time, sequence, "action queued");
        self.order.insert(action.key());
        self.table.insert(id, action);
        Ok(id)
    }

    // ── Extraction ────────────────────────────────────────────────────────

    /// Earliest scheduled time among pending actions, or `None` if empty.
    pub fn peek_next_time(&self) -> Option<Tick> {
        self.order.first().map(|k| k.time)
    }

    /// Remove and return, in tie-break order, every action scheduled for
    /// exactly `time`.
    ///
    /// Actions for other times stay queued, earlier ones included.  Moves
    /// the queue's current time up to `time` and seals it; neither ever moves
    /// back, so popping a time below the floor drains it without reopening
    /// it for inserts.  Returns an empty `Vec` if nothing is due at `time`.
    pub fn pop_due(&mut self, time: Tick) -> Vec<Action<P>> {
        self.floor = self.floor.max(time);
        self.sealed = Some(self.sealed.map_or(time, |s| s.max(time)));

        let due: Vec<OrderKey> = self
            .order
            .range(OrderKey::first_at(time)..=OrderKey::last_at(time))
            .copied()
            .collect();

        let mut batch = Vec::with_capacity(due.len());
        for key in due {
            self.order.remove(&key);
            if let Some(action) = self.table.remove(&key.id) {
                batch.push(action);
            }
        }
        batch
    }

    // ── Cancellation ──────────────────────────────────────────────────────

    /// Remove a pending action.
    ///
    /// Returns the removed action, or `None` if it already resolved, was
    /// already cancelled, or never existed.  None of those is an error.
    pub fn cancel(&mut self, id: ActionId) -> Option<Action<P>> {
        let action = self.table.remove(&id)?;
        self.order.remove(&action.key());
        trace!(action = %id, "action cancelled");
        Some(action)
    }

    /// Remove every pending action targeting `agent`.  Returns how many
    /// were removed.
    pub fn cancel_agent(&mut self, agent: AgentId) -> usize {
        let doomed: Vec<ActionId> = self
            .table
            .values()
            .filter(|a| a.agent == agent)
            .map(|a| a.id)
            .collect();
        for id in &doomed {
            self.cancel(*id);
        }
        if !doomed.is_empty() {
            debug!(%agent, cancelled = doomed.len(), "agent actions cancelled");
        }
        doomed.len()
    }

    /// Drop every pending action.
    pub fn clear(&mut self) {
        self.order.clear();
        self.table.clear();
    }

    // ── Inspection ────────────────────────────────────────────────────────

    pub fn get(&self, id: ActionId) -> Option<&Action<P>> {
        self.table.get(&id)
    }

    pub fn contains(&self, id: ActionId) -> bool {
        self.table.contains_key(&id)
    }

    /// Pending actions in the order they would resolve.
    pub fn pending(&self) -> impl Iterator<Item = &Action<P>> + '_ {
        self.order.iter().filter_map(|k| self.table.get(&k.id))
    }

    /// Number of pending actions.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// The queue's current time: the earliest time an insert may target.
    pub fn floor(&self) -> Tick {
        self.floor
    }

    /// The latest tick popped so far, if any.
    pub fn sealed(&self) -> Option<Tick> {
        self.sealed
    }
}
