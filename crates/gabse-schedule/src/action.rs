//! Action records.
//!
//! An [`ActionSpec`] is what callers submit; the queue stamps it with an id
//! and a sequence number and stores it as an [`Action`].  Queued actions are
//! immutable: "rescheduling" means cancelling one action and submitting a new
//! spec, which yields a new id.

use gabse_core::{ActionId, AgentId, Tick};

use crate::{ScheduleError, ScheduleResult};

/// A request to run `payload` for `agent` at `time`.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionSpec<P> {
    pub time:     Tick,
    pub agent:    AgentId,
    pub payload:  P,
    /// Lower values resolve first among actions with the same time.
    /// Default: 0.
    pub priority: i32,
    /// If set, a fresh copy of this action is scheduled `interval` ticks
    /// after each resolution.
    pub interval: Option<u64>,
}

impl<P> ActionSpec<P> {
    /// A one-shot action with default priority.
    pub fn new(time: Tick, agent: AgentId, payload: P) -> Self {
        Self { time, agent, payload, priority: 0, interval: None }
    }

    pub fn priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Make the action recurring with the given period.
    pub fn every(mut self, interval: u64) -> Self {
        self.interval = Some(interval);
        self
    }
}

/// A queued action.  Fields are read-only once the queue has accepted it.
#[derive(Debug, Clone, PartialEq)]
pub struct Action<P> {
    pub(crate) id:       ActionId,
    pub(crate) sequence: u64,
    pub(crate) time:     Tick,
    pub(crate) agent:    AgentId,
    pub(crate) priority: i32,
    pub(crate) interval: Option<u64>,
    pub(crate) payload:  P,
}

impl<P> Action<P> {
    #[inline]
    pub fn id(&self) -> ActionId {
        self.id
    }

    /// Insertion counter used as the final tie-break.
    #[inline]
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    #[inline]
    pub fn time(&self) -> Tick {
        self.time
    }

    #[inline]
    pub fn agent(&self) -> AgentId {
        self.agent
    }

    #[inline]
    pub fn priority(&self) -> i32 {
        self.priority
    }

    #[inline]
    pub fn interval(&self) -> Option<u64> {
        self.interval
    }

    #[inline]
    pub fn payload(&self) -> &P {
        &self.payload
    }

    /// Consume the record, keeping only its payload.
    pub fn into_payload(self) -> P {
        self.payload
    }

    /// The spec for this action's next occurrence, or `Ok(None)` for a
    /// one-shot action.  Fails if the next occurrence would fall past
    /// `Tick(u64::MAX)`.
    pub fn recurrence(&self) -> ScheduleResult<Option<ActionSpec<P>>>
    where
        P: Clone,
    {
        let Some(interval) = self.interval else {
            return Ok(None);
        };
        let time = self
            .time
            .checked_offset(interval)
            .ok_or(ScheduleError::TimeOverflow { from: self.time, by: interval })?;
        Ok(Some(ActionSpec {
            time,
            agent:    self.agent,
            payload:  self.payload.clone(),
            priority: self.priority,
            interval: Some(interval),
        }))
    }

    pub(crate) fn key(&self) -> OrderKey {
        OrderKey {
            time:     self.time,
            priority: self.priority,
            sequence: self.sequence,
            id:       self.id,
        }
    }
}

/// Position of an action in the queue.  Field order is the sort order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) struct OrderKey {
    pub(crate) time:     Tick,
    pub(crate) priority: i32,
    pub(crate) sequence: u64,
    pub(crate) id:       ActionId,
}

impl OrderKey {
    /// Sorts before every key at `time`.
    pub(crate) fn first_at(time: Tick) -> Self {
        OrderKey { time, priority: i32::MIN, sequence: 0, id: ActionId(0) }
    }

    /// Sorts after every key at `time`.
    pub(crate) fn last_at(time: Tick) -> Self {
        OrderKey { time, priority: i32::MAX, sequence: u64::MAX, id: ActionId(u64::MAX) }
    }
}
