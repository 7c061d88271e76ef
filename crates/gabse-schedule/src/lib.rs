//! `gabse-schedule` — action records and the time-ordered action queue.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                  |
//! |------------|-----------------------------------------------------------|
//! | [`action`] | `ActionSpec` (what to submit), `Action` (queued record)   |
//! | [`queue`]  | `ActionQueue` — arena of actions + ordered key index      |
//! | [`error`]  | `ScheduleError`, `ScheduleResult<T>`                      |
//!
//! # Ordering model (summary)
//!
//! Every queued action carries an ordering key:
//!
//! ```text
//! (time, priority, sequence)
//! ```
//!
//! `sequence` is a per-queue insertion counter, so two actions with equal
//! time and priority resolve first-inserted-first.  All actions sharing the
//! smallest `time` form one batch (a *tick*).  Once a tick's batch has been
//! popped, inserts for that same time are deferred to the next time value so
//! a tick can never re-enter itself.

pub mod action;
pub mod error;
pub mod queue;


pub use action::{Action, ActionSpec};
pub use error::{ScheduleError, ScheduleResult};
pub use queue::ActionQueue;
