//! Framework error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one
//! variant via `#[from]`, so `?` works across crate boundaries.

use thiserror::Error;

use crate::Tick;

/// Errors raised by the core time and configuration primitives.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// The clock was asked to move backwards.  Always an engine bug.
    #[error("clock regression: cannot move from {from} back to {to}")]
    ClockRegression { from: Tick, to: Tick },

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `gabse-core`.
pub type CoreResult<T> = Result<T, CoreError>;
