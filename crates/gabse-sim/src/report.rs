//! Per-tick and per-run reports handed to observers and callers.

use std::fmt;

use gabse_behavior::ResolutionError;
use gabse_core::{ActionId, AgentId, Tick};

/// One action that resolved successfully.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResolvedAction {
    pub id:    ActionId,
    pub agent: AgentId,
    pub kind:  &'static str,
}

/// Why a popped action was dropped without calling the handler.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipReason {
    /// The target agent was removed before the action came due.
    UnknownAgent,
    /// Another action for the same agent won under the configured
    /// same-agent policy.
    Superseded,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SkippedAction {
    pub id:     ActionId,
    pub agent:  AgentId,
    pub reason: SkipReason,
}

/// An isolated resolution failure.  The rest of the batch still ran.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolutionFailure {
    pub id:    ActionId,
    pub agent: AgentId,
    pub kind:  &'static str,
    pub error: ResolutionError,
}

/// Everything that happened during one tick.
#[derive(Clone, Debug, PartialEq)]
pub struct TickReport {
    /// Time of the tick.
    pub time:      Tick,
    /// Successfully resolved actions, in resolution order.
    pub resolved:  Vec<ResolvedAction>,
    pub skipped:   Vec<SkippedAction>,
    pub failures:  Vec<ResolutionFailure>,
    /// Actions submitted by handlers during the tick.
    pub produced:  Vec<ActionId>,
    /// Queued actions cancelled by handlers during the tick.
    pub cancelled: Vec<ActionId>,
    /// Agents removed by handlers during the tick.
    pub removed:   Vec<AgentId>,
    /// Queue length after the tick, recurrences included.
    pub pending:   usize,
}

impl TickReport {
    pub(crate) fn new(time: Tick) -> Self {
        Self {
            time,
            resolved:  Vec::new(),
            skipped:   Vec::new(),
            failures:  Vec::new(),
            produced:  Vec::new(),
            cancelled: Vec::new(),
            removed:   Vec::new(),
            pending:   0,
        }
    }

    /// Ids of resolved actions in resolution order.
    pub fn resolved_ids(&self) -> impl Iterator<Item = ActionId> + '_ {
        self.resolved.iter().map(|r| r.id)
    }

    /// Number of actions popped this tick, whatever their fate.
    pub fn popped(&self) -> usize {
        self.resolved.len() + self.skipped.len() + self.failures.len()
    }

    pub fn superseded(&self) -> usize {
        self.skipped.iter().filter(|s| s.reason == SkipReason::Superseded).count()
    }
}

/// Why the engine reached `Terminated`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StopReason {
    /// No actions left.
    QueueEmpty,
    /// The next tick lies beyond `SimConfig::end_time`.
    Horizon,
    /// `SimConfig::max_ticks` ticks have resolved.
    MaxTicks,
    /// The `run` termination condition fired.
    Condition,
    /// A handler called `request_stop`.
    Requested,
    /// `Engine::stop` was called.
    Stopped,
    /// `Engine::abort` was called.
    Aborted,
    /// A fatal error halted the engine.
    Fatal,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StopReason::QueueEmpty => "queue empty",
            StopReason::Horizon    => "end time reached",
            StopReason::MaxTicks   => "tick limit reached",
            StopReason::Condition  => "termination condition",
            StopReason::Requested  => "stop requested by handler",
            StopReason::Stopped    => "stopped",
            StopReason::Aborted    => "aborted",
            StopReason::Fatal      => "fatal error",
        };
        f.write_str(s)
    }
}

/// Totals over the engine's lifetime.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub ticks:       u64,
    pub resolved:     u64,
    pub skipped:      u64,
    pub superseded:  u64,
    pub failed:      u64,
    /// Clock value when the summary was taken.
    pub final_time:  Tick,
    /// Actions still queued.
    pub pending:      usize,
    /// `None` while the engine can still run.
    pub stop_reason: Option<StopReason>,
}
