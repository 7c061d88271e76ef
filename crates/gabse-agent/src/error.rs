use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AgentError {
    /// Every `AgentId` has been handed out.  Ids are never reused, so no
    /// further agent can be registered in this run.
    #[error("agent id space exhausted after {registered} registrations")]
    IdsExhausted { registered: usize },
}

pub type AgentResult<T> = Result<T, AgentError>;
