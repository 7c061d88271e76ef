//! Plain data row types written by output backends.

/// Counters for one resolved tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSummaryRow {
    pub tick:          u64,
    pub resolved:      u64,
    pub skipped:       u64,
    pub failed:        u64,
    /// Actions queued during the tick, recurrences included.
    pub produced:      u64,
    /// Queue length after the tick.
    pub pending:       u64,
    pub active_agents: u64,
}

/// Number of active agents of one kind at a given tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KindCountRow {
    pub tick:  u64,
    pub kind:  String,
    pub count: u64,
}

/// One isolated resolution failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureRow {
    pub tick:      u64,
    pub action_id: u64,
    pub agent_id:  u32,
    pub kind:      &'static str,
    pub error:     String,
}

/// One entry of an agent's sensor log.  `reading` is the reading's display
/// form (`[a;b]` for vectors).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SensorSampleRow {
    pub agent_id:   u32,
    pub agent_kind: String,
    pub tick:       u64,
    pub sensor:     String,
    pub reading:    String,
}
