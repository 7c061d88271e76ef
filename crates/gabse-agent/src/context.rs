//! The simulation context: agent registry plus scenario world state.

use std::collections::BTreeMap;

use gabse_core::AgentId;

use crate::{Agent, AgentRegistry, Reading};

/// Process-wide simulation state.
///
/// Owned exclusively by the engine.  Handlers receive it for the duration of
/// one resolution call; observers and sensors receive a shared borrow.
///
/// `world` holds whatever shared scalars or fields the scenario defines
/// (infection counters, a grid, resource pools, …).
pub struct Context<W, A> {
    pub world:  W,
    agents:     AgentRegistry<W, A>,
}

impl<W, A> Context<W, A> {
    /// A context with no agents; agent RNGs are derived from `seed`.
    pub fn new(world: W, seed: u64) -> Self {
        Self { world, agents: AgentRegistry::new(seed) }
    }

    pub fn agents(&self) -> &AgentRegistry<W, A> {
        &self.agents
    }

    pub fn agents_mut(&mut self) -> &mut AgentRegistry<W, A> {
        &mut self.agents
    }

    /// Shorthand for `agents().get(id)`: active agents only.
    pub fn agent(&self, id: AgentId) -> Option<&Agent<W, A>> {
        self.agents.get(id)
    }

    // ── Aggregate queries ─────────────────────────────────────────────────

    /// Active agents per kind, sorted by kind name.
    pub fn agent_counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for agent in self.agents.iter() {
            *counts.entry(agent.kind.clone()).or_insert(0) += 1;
        }
        counts
    }

    /// Active agents of one kind, in ascending id order.
    pub fn agents_of_kind<'a>(&'a self, kind: &'a str) -> impl Iterator<Item = &'a Agent<W, A>> + 'a {
        self.agents.iter().filter(move |a| a.kind == kind)
    }

    /// Number of active agents of one kind.
    pub fn count_kind(&self, kind: &str) -> usize {
        self.agents_of_kind(kind).count()
    }

    // ── Sensor queries ────────────────────────────────────────────────────

    /// Query sensor `index` of active agent `owner`.
    ///
    /// Returns `None` if the agent is not active or has no such sensor.
    pub fn sense(&self, owner: AgentId, index: usize) -> Option<Reading>
    where
        W: 'static,
        A: 'static,
    {
        let sensor = self.agents.get(owner)?.sensors.get(index)?;
        Some(sensor.sense(owner, self))
    }

    /// Query every sensor of `owner` in attachment order, paired with the
    /// sensor names.  Empty if the agent is not active.
    pub fn sense_all(&self, owner: AgentId) -> Vec<(String, Reading)>
    where
        W: 'static,
        A: 'static,
    {
        match self.agents.get(owner) {
            None => Vec::new(),
            Some(agent) => agent
                .sensors
                .iter()
                .map(|s| (s.name().to_owned(), s.sense(owner, self)))
                .collect(),
        }
    }
}
