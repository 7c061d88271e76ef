//! `AgentRegistry` — id-indexed agent storage.
//!
//! Ids are handed out densely from 0 and are the index into `slots`.  A
//! removed agent keeps its slot (marked with `removed_at`), so an id is never
//! reassigned and a stale id always resolves to "inactive", never to a
//! different agent.

use gabse_core::{AgentId, AgentRng, Tick};

use crate::{Agent, AgentBuilder, AgentError, AgentResult, Sensor};

pub struct AgentRegistry<W, A> {
    slots:  Vec<Agent<W, A>>,
    active: usize,
    seed:   u64,
}

impl<W, A> AgentRegistry<W, A> {
    /// An empty registry; agent RNGs are derived from `seed`.
    pub fn new(seed: u64) -> Self {
        Self { slots: Vec::new(), active: 0, seed }
    }

    /// Register a new agent at time `now` and return its id.
    ///
    /// Fails once every `AgentId` has been used.
    pub fn register(&mut self, builder: AgentBuilder<W, A>, now: Tick) -> AgentResult<AgentId> {
        let id = slot_id(self.slots.len())?;
        self.slots.push(Agent {
            id,
            kind:          builder.kind,
            state:         builder.state,
            sensors:       builder.sensors,
            log:           Default::default(),
            rng:           AgentRng::new(self.seed, id),
            registered_at: now,
            removed_at:    None,
        });
        self.active += 1;
        Ok(id)
    }

    /// Mark `id` as removed at `now`.
    ///
    /// Returns `false` if the id is unknown or the agent was already removed.
    pub fn remove(&mut self, id: AgentId, now: Tick) -> bool {
        match self.slots.get_mut(id.index()) {
            Some(agent) if agent.removed_at.is_none() => {
                agent.removed_at = Some(now);
                self.active -= 1;
                true
            }
            _ => false,
        }
    }

    /// Attach a sensor to an active agent.  Returns `false` if `id` is not
    /// active.
    pub fn attach_sensor(&mut self, id: AgentId, sensor: Box<dyn Sensor<W, A>>) -> bool {
        match self.get_mut(id) {
            Some(agent) => {
                agent.attach_sensor(sensor);
                true
            }
            None => false,
        }
    }

    // ── Lookup ────────────────────────────────────────────────────────────

    /// The agent, if it is registered and still active.
    pub fn get(&self, id: AgentId) -> Option<&Agent<W, A>> {
        self.slots.get(id.index()).filter(|a| a.is_active())
    }

    pub fn get_mut(&mut self, id: AgentId) -> Option<&mut Agent<W, A>> {
        self.slots.get_mut(id.index()).filter(|a| a.is_active())
    }

    /// The agent record regardless of removal.
    pub fn get_any(&self, id: AgentId) -> Option<&Agent<W, A>> {
        self.slots.get(id.index())
    }

    pub fn is_active(&self, id: AgentId) -> bool {
        self.get(id).is_some()
    }

    // ── Iteration ─────────────────────────────────────────────────────────

    /// Active agents in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = &Agent<W, A>> + '_ {
        self.slots.iter().filter(|a| a.is_active())
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Agent<W, A>> + '_ {
        self.slots.iter_mut().filter(|a| a.is_active())
    }

    /// Every agent ever registered, removed ones included.
    pub fn iter_all(&self) -> impl Iterator<Item = &Agent<W, A>> + '_ {
        self.slots.iter()
    }

    /// Ids of active agents in ascending order.
    pub fn active_ids(&self) -> impl Iterator<Item = AgentId> + '_ {
        self.iter().map(|a| a.id)
    }

    // ── Counts ────────────────────────────────────────────────────────────

    /// Number of active agents.
    pub fn len(&self) -> usize {
        self.active
    }

    pub fn is_empty(&self) -> bool {
        self.active == 0
    }

    /// Number of agents ever registered.
    pub fn total(&self) -> usize {
        self.slots.len()
    }
}

/// The id for slot `slot`, if it fits in an `AgentId`.
pub(crate) fn slot_id(slot: usize) -> AgentResult<AgentId> {
    u32::try_from(slot)
        .map(AgentId)
        .map_err(|_| AgentError::IdsExhausted { registered: slot })
}
