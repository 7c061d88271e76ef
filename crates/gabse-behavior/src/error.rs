use gabse_agent::AgentError;
use gabse_core::AgentId;
use gabse_schedule::ScheduleError;
use thiserror::Error;

/// Failure of a single action's resolution.
///
/// Every variant except [`ResolutionError::Fatal`] is isolated by the
/// engine: it is reported and the rest of the batch still runs.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ResolutionError {
    #[error("no handler registered for payload kind `{0}`")]
    NoHandler(&'static str),

    #[error("agent {0} is not active")]
    UnknownAgent(AgentId),

    #[error("scheduling failed: {0}")]
    Schedule(#[from] ScheduleError),

    #[error("registration failed: {0}")]
    Agent(#[from] AgentError),

    #[error("resolution failed: {0}")]
    Failed(String),

    /// The context can no longer be trusted; the engine halts.
    #[error("fatal resolution failure: {0}")]
    Fatal(String),
}

impl ResolutionError {
    /// Convenience constructor for handler-defined failures.
    pub fn failed(msg: impl Into<String>) -> Self {
        ResolutionError::Failed(msg.into())
    }

    pub fn is_fatal(&self) -> bool {
        matches!(self, ResolutionError::Fatal(_))
    }
}

pub type ResolutionResult<T> = Result<T, ResolutionError>;
