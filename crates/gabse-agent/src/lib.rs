//! `gabse-agent` — agents, sensors, and the simulation context.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                   |
//! |--------------|------------------------------------------------------------|
//! | [`agent`]    | `Agent` record, `AgentBuilder` (registration input)        |
//! | [`registry`] | `AgentRegistry` — id-indexed slots, never reused           |
//! | [`sensor`]   | `Sensor` trait, `Reading`, `SensorSample`, `SensorLog`     |
//! | [`context`]  | `Context` — registry plus scenario-defined world state     |
//! | [`error`]    | `AgentError`, `AgentResult<T>`                             |
//!
//! # Ownership
//!
//! The engine owns exactly one [`Context`].  The context owns every agent;
//! each agent owns its sensors.  Nothing outside the engine keeps a
//! reference to the context across ticks: handlers and sensors borrow it for
//! the length of one call.
//!
//! Both `Context` and `Agent` are generic over `W` (scenario world state)
//! and `A` (per-agent domain state).

pub mod agent;
pub mod context;
pub mod error;
pub mod registry;
pub mod sensor;

#[cfg(test)]
mod tests;

pub use agent::{Agent, AgentBuilder};
pub use context::Context;
pub use error::{AgentError, AgentResult};
pub use registry::AgentRegistry;
pub use sensor::{Reading, Sensor, SensorLog, SensorSample};
