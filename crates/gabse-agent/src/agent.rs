//! The `Agent` record and its registration input.

use std::fmt;

use gabse_core::{AgentId, AgentRng, Tick};

use crate::{Sensor, SensorLog};

/// Everything needed to register an agent, minus what the registry assigns
/// (id, RNG, registration time).
///
/// ```rust,ignore
/// let id = engine.register_agent(
///     AgentBuilder::new("zombie", Health::default()).sensor(Proximity { radius: 2.0 }),
/// )?;
/// ```
pub struct AgentBuilder<W, A> {
    pub(crate) kind:    String,
    pub(crate) state:   A,
    pub(crate) sensors: Vec<Box<dyn Sensor<W, A>>>,
}

impl<W, A> AgentBuilder<W, A> {
    /// `kind` groups agents for counting and output (e.g. `"human"`).
    pub fn new(kind: impl Into<String>, state: A) -> Self {
        Self { kind: kind.into(), state, sensors: Vec::new() }
    }

    /// Attach a sensor.  Sensors keep their attachment order.
    pub fn sensor<S: Sensor<W, A>>(mut self, sensor: S) -> Self {
        self.sensors.push(Box::new(sensor));
        self
    }
}

/// A registered agent.
///
/// `state` is the scenario's per-agent payload.  The rest is managed by the
/// registry: the id is fixed for the whole run, and `removed_at` is set once
/// when the agent leaves the simulation.  Removed agents stay in the
/// registry so their sensor logs can be collected after the run.
pub struct Agent<W, A> {
    pub(crate) id:            AgentId,
    pub(crate) kind:          String,
    pub state:                A,
    pub(crate) sensors:       Vec<Box<dyn Sensor<W, A>>>,
    pub(crate) log:           SensorLog,
    pub(crate) rng:           AgentRng,
    pub(crate) registered_at: Tick,
    pub(crate) removed_at:    Option<Tick>,
}

impl<W, A> Agent<W, A> {
    #[inline]
    pub fn id(&self) -> AgentId {
        self.id
    }

    #[inline]
    pub fn kind(&self) -> &str {
        &self.kind
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.removed_at.is_none()
    }

    pub fn registered_at(&self) -> Tick {
        self.registered_at
    }

    pub fn removed_at(&self) -> Option<Tick> {
        self.removed_at
    }

    pub fn sensors(&self) -> &[Box<dyn Sensor<W, A>>] {
        &self.sensors
    }

    pub fn sensor_count(&self) -> usize {
        self.sensors.len()
    }

    pub fn log(&self) -> &SensorLog {
        &self.log
    }

    pub fn log_mut(&mut self) -> &mut SensorLog {
        &mut self.log
    }

    pub fn rng(&mut self) -> &mut AgentRng {
        &mut self.rng
    }

    /// Add a sensor after registration.
    pub fn attach_sensor(&mut self, sensor: Box<dyn Sensor<W, A>>) {
        self.sensors.push(sensor);
    }
}

impl<W, A: fmt::Debug> fmt::Debug for Agent<W, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Agent")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("state", &self.state)
            .field("sensors", &self.sensors.len())
            .field("removed_at", &self.removed_at)
            .finish()
    }
}
