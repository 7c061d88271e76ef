//! Fluent builder for constructing an [`Engine`].

use gabse_agent::{AgentBuilder, Context};
use gabse_behavior::{ActionHandler, Payload};
use gabse_core::SimConfig;
use gabse_schedule::{ActionQueue, ActionSpec};

use crate::{Engine, SimError, SimResult};

/// Fluent builder for [`Engine<W, A, P, H>`].
///
/// # Required inputs
///
/// - [`SimConfig`]: start/end time, seed, tick bounds, same-agent policy
/// - `W`: the scenario's world state
/// - `H: ActionHandler`: usually a [`gabse_behavior::HandlerTable`]
///
/// # Optional inputs
///
/// | Method         | Default            |
/// |----------------|--------------------|
/// | `.agent(b)`    | No agents          |
/// | `.action(s)`   | Empty queue        |
///
/// Agents are registered in call order, so the n-th `.agent()` call gets
/// `AgentId(n)` and bootstrap actions may refer to it by that id.
///
/// # Example
///
/// ```rust,ignore
/// let mut engine = EngineBuilder::new(config, World::default(), handlers)
///     .agent(AgentBuilder::new("human", Body::default()))
///     .action(ActionSpec::new(Tick(0), AgentId(0), Cmd::Wander))
///     .build()?;
/// engine.run(Exhaust, &mut NoopObserver)?;
/// ```
pub struct EngineBuilder<W, A, P, H> {
    config:  SimConfig,
    world:   W,
    handler: H,
    agents:  Vec<AgentBuilder<W, A>>,
    actions: Vec<ActionSpec<P>>,
}

impl<W, A, P, H> EngineBuilder<W, A, P, H>
where
    P: Payload,
    H: ActionHandler<W, A, P>,
{
    pub fn new(config: SimConfig, world: W, handler: H) -> Self {
        Self { config, world, handler, agents: Vec::new(), actions: Vec::new() }
    }

    /// Register an agent before the first tick.
    pub fn agent(mut self, agent: AgentBuilder<W, A>) -> Self {
        self.agents.push(agent);
        self
    }

    pub fn agents(mut self, agents: impl IntoIterator<Item = AgentBuilder<W, A>>) -> Self {
        self.agents.extend(agents);
        self
    }

    /// Queue a bootstrap action.
    pub fn action(mut self, spec: ActionSpec<P>) -> Self {
        self.actions.push(spec);
        self
    }

    /// Validate the configuration, register agents, queue bootstrap actions
    /// and return an engine in the `Initializing` state.
    pub fn build(self) -> SimResult<Engine<W, A, P, H>> {
        self.config.validate()?;

        let start = self.config.start_time;
        let mut context = Context::new(self.world, self.config.seed);
        for agent in self.agents {
            context.agents_mut().register(agent, start)?;
        }

        let mut queue = ActionQueue::new(start);
        for spec in self.actions {
            if !context.agents().is_active(spec.agent) {
                return Err(SimError::UnknownAgent(spec.agent));
            }
            queue.insert(spec)?;
        }

        Ok(Engine::from_parts(self.config, context, queue, self.handler))
    }
}
