//! `Resolve` — the scope a handler works in while one action resolves.

use gabse_agent::{Agent, AgentBuilder, Context, Reading, SensorSample};
use gabse_core::{ActionId, AgentId, AgentRng, Tick};
use gabse_schedule::{ActionQueue, ActionSpec, ScheduleError};

use crate::{Payload, ResolutionError, ResolutionResult};

/// What a resolution left behind besides its context mutations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolveOutcome {
    /// Ids of actions submitted during the call, in submission order.
    pub produced:        Vec<ActionId>,
    /// Ids of queued actions this call cancelled.
    pub cancelled:       Vec<ActionId>,
    /// Agents removed during the call.
    pub removed:         Vec<AgentId>,
    /// The handler asked not to re-issue a recurring action.
    pub stop_recurrence: bool,
    /// The handler asked the engine to wind down after this batch.
    pub stop_requested:  bool,
}

/// Exclusive access to the simulation for the duration of one resolution.
///
/// Built by the engine; handlers only ever see `&mut Resolve`.  The acting
/// agent's state is writable; every other agent is visible read-only
/// through [`context`][Self::context].  Effects on other agents go through
/// actions submitted with [`schedule`][Self::schedule].
pub struct Resolve<'a, W, A, P> {
    now:     Tick,
    agent:   AgentId,
    ctx:     &'a mut Context<W, A>,
    queue:   &'a mut ActionQueue<P>,
    outcome: ResolveOutcome,
}

impl<'a, W, A, P: Payload> Resolve<'a, W, A, P> {
    /// Open a scope for `agent` at time `now`.
    pub fn new(
        now:   Tick,
        agent: AgentId,
        ctx:   &'a mut Context<W, A>,
        queue: &'a mut ActionQueue<P>,
    ) -> Self {
        Self { now, agent, ctx, queue, outcome: ResolveOutcome::default() }
    }

    /// Close the scope and return what happened besides context mutations.
    pub fn finish(self) -> ResolveOutcome {
        self.outcome
    }

    // ── Time and identity ─────────────────────────────────────────────────

    /// Current simulated time.  Constant for the whole tick.
    #[inline]
    pub fn now(&self) -> Tick {
        self.now
    }

    /// The agent the current action belongs to.
    #[inline]
    pub fn agent_id(&self) -> AgentId {
        self.agent
    }

    // ── Acting agent ──────────────────────────────────────────────────────

    /// The acting agent.  Fails if the handler already removed it.
    pub fn agent(&self) -> ResolutionResult<&Agent<W, A>> {
        self.ctx.agent(self.agent).ok_or(ResolutionError::UnknownAgent(self.agent))
    }

    pub fn state(&self) -> ResolutionResult<&A> {
        self.agent().map(|a| &a.state)
    }

    pub fn state_mut(&mut self) -> ResolutionResult<&mut A> {
        let id = self.agent;
        self.ctx
            .agents_mut()
            .get_mut(id)
            .map(|a| &mut a.state)
            .ok_or(ResolutionError::UnknownAgent(id))
    }

    /// The acting agent's deterministic RNG.
    pub fn rng(&mut self) -> ResolutionResult<&mut AgentRng> {
        let id = self.agent;
        self.ctx
            .agents_mut()
            .get_mut(id)
            .map(|a| a.rng())
            .ok_or(ResolutionError::UnknownAgent(id))
    }

    // ── Shared state ──────────────────────────────────────────────────────

    /// Read-only view of the whole context, other agents included.
    pub fn context(&self) -> &Context<W, A> {
        self.ctx
    }

    pub fn world(&self) -> &W {
        &self.ctx.world
    }

    pub fn world_mut(&mut self) -> &mut W {
        &mut self.ctx.world
    }

    // ── Sensors ───────────────────────────────────────────────────────────

    /// Query sensor `index` of the acting agent.
    pub fn sense(&self, index: usize) -> Option<Reading>
    where
        W: 'static,
        A: 'static,
    {
        self.ctx.sense(self.agent, index)
    }

    /// Query every sensor of the acting agent.
    pub fn sense_all(&self) -> Vec<(String, Reading)>
    where
        W: 'static,
        A: 'static,
    {
        self.ctx.sense_all(self.agent)
    }

    /// Query every sensor of the acting agent and append the readings to its
    /// sensor log, stamped with the current time.  Returns the number of
    /// samples recorded.
    pub fn sample_sensors(&mut self) -> ResolutionResult<usize>
    where
        W: 'static,
        A: 'static,
    {
        let readings = self.ctx.sense_all(self.agent);
        let now = self.now;
        let id = self.agent;
        let agent = self
            .ctx
            .agents_mut()
            .get_mut(id)
            .ok_or(ResolutionError::UnknownAgent(id))?;
        let n = readings.len();
        for (sensor, reading) in readings {
            agent.log_mut().record(SensorSample { time: now, sensor, reading });
        }
        Ok(n)
    }

    // ── Scheduling ────────────────────────────────────────────────────────

    /// Submit a new action.
    ///
    /// The target agent must be active.  Specs for the current time are
    /// deferred to the next tick by the queue.
    pub fn schedule(&mut self, spec: ActionSpec<P>) -> ResolutionResult<ActionId> {
        if !self.ctx.agents().is_active(spec.agent) {
            return Err(ResolutionError::UnknownAgent(spec.agent));
        }
        let id = self.queue.insert(spec)?;
        self.outcome.produced.push(id);
        Ok(id)
    }

    /// Submit `payload` for the acting agent `delay` ticks from now.
    pub fn schedule_in(&mut self, delay: u64, payload: P) -> ResolutionResult<ActionId> {
        let time = self
            .now
            .checked_offset(delay)
            .ok_or(ScheduleError::TimeOverflow { from: self.now, by: delay })?;
        self.schedule(ActionSpec::new(time, self.agent, payload))
    }

    /// Cancel a queued action.  Returns `false` if it was not queued, which
    /// includes every action of the batch currently resolving.
    pub fn cancel(&mut self, id: ActionId) -> bool {
        let hit = self.queue.cancel(id).is_some();
        if hit {
            self.outcome.cancelled.push(id);
        }
        hit
    }

    /// Do not re-issue the current action even if it is recurring.
    pub fn stop_recurrence(&mut self) {
        self.outcome.stop_recurrence = true;
    }

    /// Ask the engine to stop once the current batch has resolved.
    pub fn request_stop(&mut self) {
        self.outcome.stop_requested = true;
    }

    // ── Population changes ────────────────────────────────────────────────

    /// Register a new agent, effective immediately.
    pub fn register_agent(&mut self, builder: AgentBuilder<W, A>) -> ResolutionResult<AgentId> {
        Ok(self.ctx.agents_mut().register(builder, self.now)?)
    }

    /// Remove an agent, effective immediately.
    ///
    /// Its queued actions stay queued and are skipped by the engine when
    /// they come due; call [`cancel_agent_actions`][Self::cancel_agent_actions]
    /// to drop them eagerly.  Returns `false` if the agent was not active.
    pub fn remove_agent(&mut self, id: AgentId) -> bool {
        if !self.ctx.agents_mut().remove(id, self.now) {
            return false;
        }
        self.outcome.removed.push(id);
        true
    }

    /// Cancel every queued action targeting `id`.  Returns how many were
    /// cancelled.
    pub fn cancel_agent_actions(&mut self, id: AgentId) -> usize {
        self.queue.cancel_agent(id)
    }
}
