//! The sensor contract and per-agent sensor logs.
//!
//! A [`Sensor`] is a pure query over the [`Context`].  It never mutates
//! anything and holds no timeline state, so the engine may call it any
//! number of times within a tick.  Readings an agent wants to keep are
//! appended to its [`SensorLog`] as [`SensorSample`]s.

use std::fmt;

use gabse_core::{AgentId, Tick};

use crate::Context;

// ── Trait ─────────────────────────────────────────────────────────────────────

/// Read-only perception of the simulation context on behalf of one agent.
///
/// # Contract
///
/// - Must not mutate anything observable (no interior mutability tricks).
/// - Must be deterministic for a given context state.
/// - Must be `Send + Sync` so engines can move between sweep threads.
pub trait Sensor<W, A>: Send + Sync + 'static {
    /// Short label used in sensor logs.
    fn name(&self) -> &str;

    /// Observe `ctx` from `owner`'s point of view.
    fn sense(&self, owner: AgentId, ctx: &Context<W, A>) -> Reading;
}

// ── Reading ───────────────────────────────────────────────────────────────────

/// A value produced by a sensor.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Reading {
    /// Nothing observed.
    Empty,
    Flag(bool),
    Count(u64),
    Scalar(f64),
    Vector(Vec<f64>),
    /// Ids of observed agents, e.g. neighbours.
    Agents(Vec<AgentId>),
    Text(String),
}

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reading::Empty     => Ok(()),
            Reading::Flag(b)   => write!(f, "{b}"),
            Reading::Count(n)  => write!(f, "{n}"),
            Reading::Scalar(x) => write!(f, "{x}"),
            Reading::Vector(v) => {
                let parts: Vec<String> = v.iter().map(|x| x.to_string()).collect();
                write!(f, "[{}]", parts.join(";"))
            }
            Reading::Agents(ids) => {
                let parts: Vec<String> = ids.iter().map(|a| a.0.to_string()).collect();
                write!(f, "[{}]", parts.join(";"))
            }
            Reading::Text(s) => f.write_str(s),
        }
    }
}

// ── Sensor log ────────────────────────────────────────────────────────────────

/// One recorded reading.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SensorSample {
    pub time:    Tick,
    pub sensor:  String,
    pub reading: Reading,
}

/// Append-only history of an agent's sensor samples.
#[derive(Debug, Clone, Default)]
pub struct SensorLog {
    samples: Vec<SensorSample>,
}

impl SensorLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, sample: SensorSample) {
        self.samples.push(sample);
    }

    pub fn samples(&self) -> &[SensorSample] {
        &self.samples
    }

    /// Samples taken by one named sensor, oldest first.
    pub fn by_sensor<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a SensorSample> + 'a {
        self.samples.iter().filter(move |s| s.sensor == name)
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}
