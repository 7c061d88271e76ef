//! `gabse-behavior` — how actions are resolved.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                        |
//! |-------------|-----------------------------------------------------------------|
//! | [`payload`] | `Payload` trait — tagged action payloads keyed by kind          |
//! | [`resolve`] | `Resolve<'a>` — everything a handler may touch during one call  |
//! | [`handler`] | `ActionHandler` trait, `FnHandler`, `handler_fn`                |
//! | [`table`]   | `HandlerTable` — per-kind dispatch with optional fallback       |
//! | [`noop`]    | `NoopHandler` — accepts every action and does nothing           |
//! | [`error`]   | `ResolutionError`, `ResolutionResult<T>`                        |
//!
//! # Design notes
//!
//! Resolution is strictly sequential: the engine hands one `Resolve` scope to
//! one handler at a time, so a handler has exclusive access to the context
//! without any locking.  Mutations apply immediately.  Actions submitted
//! through the scope go straight into the queue (subject to same-tick
//! deferral); cancellations take effect at once for queued actions but never
//! affect the batch currently resolving, which has already left the queue.

pub mod error;
pub mod handler;
pub mod noop;
pub mod payload;
pub mod resolve;
pub mod table;

#[cfg(test)]
mod tests;

pub use error::{ResolutionError, ResolutionResult};
pub use handler::{ActionHandler, FnHandler, handler_fn};
pub use noop::NoopHandler;
pub use payload::Payload;
pub use resolve::{Resolve, ResolveOutcome};
pub use table::HandlerTable;
