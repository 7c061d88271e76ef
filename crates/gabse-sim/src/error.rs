use gabse_agent::AgentError;
use gabse_behavior::ResolutionError;
use gabse_core::{ActionId, AgentId, CoreError};
use gabse_schedule::ScheduleError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Core(#[from] CoreError),

    #[error("engine has terminated")]
    EngineStopped,

    #[error("agent {0} is not registered or has been removed")]
    UnknownAgent(AgentId),

    #[error(transparent)]
    Schedule(#[from] ScheduleError),

    #[error(transparent)]
    Agent(#[from] AgentError),

    /// The queue returned something that breaks its ordering contract.
    #[error("scheduler corruption: {0}")]
    SchedulerCorruption(String),

    #[error("fatal failure resolving {action} for {agent}: {source}")]
    Fatal {
        action: ActionId,
        agent:  AgentId,
        source: ResolutionError,
    },

    #[error("{failures} resolution failures exceed the limit of {limit}")]
    FailureLimitExceeded { limit: usize, failures: usize },
}

pub type SimResult<T> = Result<T, SimError>;
