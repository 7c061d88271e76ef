use gabse_core::Tick;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    /// The requested time is earlier than the queue's current time.
    #[error("cannot schedule an action at {requested}: clock is already at {now}")]
    InvalidSchedule { requested: Tick, now: Tick },

    #[error("recurring action interval must be at least one tick")]
    ZeroInterval,

    /// `from + by` does not fit in a `Tick`.
    #[error("time overflow: {from} + {by} ticks is past the end of representable time")]
    TimeOverflow { from: Tick, by: u64 },
}

pub type ScheduleResult<T> = Result<T, ScheduleError>;
