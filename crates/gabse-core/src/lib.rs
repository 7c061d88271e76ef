//! `gabse-core` — foundational types for the GABSE simulation framework.
//!
//! This crate is a dependency of every other `gabse-*` crate.  It has no
//! `gabse-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module      | Contents                                                  |
//! |-------------|-----------------------------------------------------------|
//! | [`ids`]     | `AgentId`, `ActionId`                                     |
//! | [`time`]    | `Tick`, `SimClock`, `SimConfig`, `SameAgentPolicy`        |
//! | [`rng`]     | `AgentRng` (per-agent), `SimRng` (global)                 |
//! | [`error`]   | `CoreError`, `CoreResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to ids, time and config.    |

pub mod error;
pub mod ids;
pub mod rng;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use ids::{ActionId, AgentId};
pub use rng::{AgentRng, SimRng};
pub use time::{SameAgentPolicy, SimClock, SimConfig, Tick};
