//! Unit tests for gabse-behavior.

use gabse_agent::{AgentBuilder, Context, Reading, Sensor};
use gabse_core::{AgentId, Tick};
use gabse_schedule::{Action, ActionQueue, ActionSpec};

use crate::{
    ActionHandler, HandlerTable, NoopHandler, Payload, Resolve, ResolutionError, ResolutionResult,
    handler_fn,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
enum Cmd {
    Grow(u32),
    Spawn,
    Unknown,
}

impl Payload for Cmd {
    fn kind(&self) -> &'static str {
        match self {
            Cmd::Grow(_) => "grow",
            Cmd::Spawn   => "spawn",
            Cmd::Unknown => "unknown",
        }
    }
}

#[derive(Default)]
struct World {
    total: u32,
}

#[derive(Debug, Default, PartialEq)]
struct Plant {
    size: u32,
}

type Ctx = Context<World, Plant>;

struct SizeSensor;

impl Sensor<World, Plant> for SizeSensor {
    fn name(&self) -> &str {
        "size"
    }

    fn sense(&self, owner: AgentId, ctx: &Ctx) -> Reading {
        ctx.agent(owner).map_or(Reading::Empty, |a| Reading::Count(a.state.size as u64))
    }
}

fn setup(n: usize) -> (Ctx, ActionQueue<Cmd>, Vec<AgentId>) {
    let mut ctx = Context::new(World::default(), 3);
    let ids = (0..n)
        .map(|_| ctx.agents_mut().register(AgentBuilder::new("plant", Plant::default()).sensor(SizeSensor), Tick(0)).unwrap())
        .collect();
    (ctx, ActionQueue::new(Tick(0)), ids)
}

/// Pop the single action queued at `t` for use as the "current" action.
fn pop_one(queue: &mut ActionQueue<Cmd>, t: u64) -> Action<Cmd> {
    let mut batch = queue.pop_due(Tick(t));
    assert_eq!(batch.len(), 1);
    batch.remove(0)
}

fn grow(action: &Action<Cmd>, scope: &mut Resolve<'_, World, Plant, Cmd>) -> ResolutionResult<()> {
    let Cmd::Grow(by) = action.payload() else {
        return Err(ResolutionError::failed("not a grow action"));
    };
    scope.state_mut()?.size += by;
    scope.world_mut().total += by;
    Ok(())
}

fn table() -> HandlerTable<World, Plant, Cmd> {
    HandlerTable::new()
        .on("grow", grow)
        .on("spawn", |_action, scope| {
            let child = scope.register_agent(AgentBuilder::new("plant", Plant { size: 1 }))?;
            scope.schedule(ActionSpec::new(scope.now() + 1, child, Cmd::Grow(1)))?;
            Ok(())
        })
}

// ── Dispatch ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod dispatch {
    use super::*;

    #[test]
    fn table_routes_by_kind() {
        let (mut ctx, mut queue, ids) = setup(1);
        queue.insert(ActionSpec::new(Tick(0), ids[0], Cmd::Grow(4))).unwrap();
        let action = pop_one(&mut queue, 0);

        let handlers = table();
        let mut scope = Resolve::new(Tick(0), ids[0], &mut ctx, &mut queue);
        handlers.resolve(&action, &mut scope).unwrap();
        scope.finish();

        assert_eq!(ctx.agent(ids[0]).unwrap().state.size, 4);
        assert_eq!(ctx.world.total, 4);
    }

    #[test]
    fn missing_kind_is_no_handler() {
        let (mut ctx, mut queue, ids) = setup(1);
        queue.insert(ActionSpec::new(Tick(0), ids[0], Cmd::Unknown)).unwrap();
        let action = pop_one(&mut queue, 0);

        let handlers = table();
        assert!(handlers.handles("grow"));
        assert!(!handlers.handles("unknown"));
        let mut scope = Resolve::new(Tick(0), ids[0], &mut ctx, &mut queue);
        let err = handlers.resolve(&action, &mut scope).unwrap_err();
        assert_eq!(err, ResolutionError::NoHandler("unknown"));
        assert!(!err.is_fatal());
    }

    #[test]
    fn fallback_catches_unregistered_kinds() {
        let (mut ctx, mut queue, ids) = setup(1);
        queue.insert(ActionSpec::new(Tick(0), ids[0], Cmd::Unknown)).unwrap();
        let action = pop_one(&mut queue, 0);

        let handlers = table().fallback(NoopHandler);
        assert!(handlers.handles("anything"));
        assert_eq!(handlers.len(), 2);
        let mut scope = Resolve::new(Tick(0), ids[0], &mut ctx, &mut queue);
        assert!(handlers.resolve(&action, &mut scope).is_ok());
    }

    #[test]
    fn str_payloads_are_their_own_kind() {
        assert_eq!("move".kind(), "move");
    }

    #[test]
    fn closure_handler_runs() {
        let (mut ctx, mut queue, ids) = setup(1);
        queue.insert(ActionSpec::new(Tick(0), ids[0], Cmd::Spawn)).unwrap();
        let action = pop_one(&mut queue, 0);

        let h = handler_fn(|_a: &Action<Cmd>, scope: &mut Resolve<'_, World, Plant, Cmd>| {
            scope.world_mut().total = 99;
            Ok(())
        });
        let mut scope = Resolve::new(Tick(0), ids[0], &mut ctx, &mut queue);
        h.resolve(&action, &mut scope).unwrap();
        assert_eq!(ctx.world.total, 99);
    }
}

// ── Resolve scope ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod scope {
    use super::*;

    #[test]
    fn schedule_records_produced_ids() {
        let (mut ctx, mut queue, ids) = setup(1);
        queue.insert(ActionSpec::new(Tick(0), ids[0], Cmd::Spawn)).unwrap();
        let action = pop_one(&mut queue, 0);

        let handlers = table();
        let mut scope = Resolve::new(Tick(0), ids[0], &mut ctx, &mut queue);
        handlers.resolve(&action, &mut scope).unwrap();
        let outcome = scope.finish();

        assert_eq!(outcome.produced.len(), 1);
        assert_eq!(ctx.agents().len(), 2, "spawn registered a new agent");
        let queued = queue.get(outcome.produced[0]).unwrap();
        assert_eq!(queued.time(), Tick(1));
        assert_eq!(queued.agent(), AgentId(1));
    }

    #[test]
    fn same_tick_submission_is_deferred() {
        let (mut ctx, mut queue, ids) = setup(1);
        queue.insert(ActionSpec::new(Tick(5), ids[0], Cmd::Grow(1))).unwrap();
        let _current = pop_one(&mut queue, 5);

        let mut scope = Resolve::new(Tick(5), ids[0], &mut ctx, &mut queue);
        let id = scope.schedule_in(0, Cmd::Grow(1)).unwrap();
        scope.finish();
        assert_eq!(queue.get(id).unwrap().time(), Tick(6));
    }

    #[test]
    fn past_submission_fails() {
        let (mut ctx, mut queue, ids) = setup(1);
        queue.insert(ActionSpec::new(Tick(5), ids[0], Cmd::Grow(1))).unwrap();
        let _current = pop_one(&mut queue, 5);

        let mut scope = Resolve::new(Tick(5), ids[0], &mut ctx, &mut queue);
        let err = scope.schedule(ActionSpec::new(Tick(2), ids[0], Cmd::Grow(1))).unwrap_err();
        assert!(matches!(err, ResolutionError::Schedule(_)));
        assert!(scope.finish().produced.is_empty());
        assert!(queue.is_empty());
    }

    #[test]
    fn schedule_for_inactive_agent_fails() {
        let (mut ctx, mut queue, ids) = setup(2);
        ctx.agents_mut().remove(ids[1], Tick(0));
        let mut scope = Resolve::new(Tick(0), ids[0], &mut ctx, &mut queue);
        let err = scope.schedule(ActionSpec::new(Tick(1), ids[1], Cmd::Grow(1))).unwrap_err();
        assert_eq!(err, ResolutionError::UnknownAgent(ids[1]));
    }

    #[test]
    fn cancel_only_hits_queued_actions() {
        let (mut ctx, mut queue, ids) = setup(1);
        let current = queue.insert(ActionSpec::new(Tick(0), ids[0], Cmd::Grow(1))).unwrap();
        let future = queue.insert(ActionSpec::new(Tick(3), ids[0], Cmd::Grow(1))).unwrap();
        let _batch = queue.pop_due(Tick(0));

        let mut scope = Resolve::new(Tick(0), ids[0], &mut ctx, &mut queue);
        assert!(!scope.cancel(current), "in-flight action is not in the queue");
        assert!(scope.cancel(future));
        assert!(!scope.cancel(future));
        let outcome = scope.finish();
        assert_eq!(outcome.cancelled, vec![future]);
        assert!(queue.is_empty());
    }

    #[test]
    fn remove_agent_leaves_queue_alone() {
        let (mut ctx, mut queue, ids) = setup(2);
        queue.insert(ActionSpec::new(Tick(4), ids[1], Cmd::Grow(1))).unwrap();
        queue.insert(ActionSpec::new(Tick(4), ids[0], Cmd::Grow(1))).unwrap();

        let mut scope = Resolve::new(Tick(0), ids[0], &mut ctx, &mut queue);
        assert!(scope.remove_agent(ids[1]));
        assert!(!scope.remove_agent(ids[1]));
        let outcome = scope.finish();
        assert_eq!(outcome.removed, vec![ids[1]]);
        assert_eq!(queue.len(), 2, "stale actions are dropped at resolution time");
        assert!(!ctx.agents().is_active(ids[1]));
    }

    #[test]
    fn cancel_agent_actions_drops_queued_entries() {
        let (mut ctx, mut queue, ids) = setup(2);
        queue.insert(ActionSpec::new(Tick(4), ids[1], Cmd::Grow(1))).unwrap();
        queue.insert(ActionSpec::new(Tick(6), ids[1], Cmd::Grow(2))).unwrap();
        queue.insert(ActionSpec::new(Tick(4), ids[0], Cmd::Grow(1))).unwrap();

        let mut scope = Resolve::new(Tick(0), ids[0], &mut ctx, &mut queue);
        scope.remove_agent(ids[1]);
        assert_eq!(scope.cancel_agent_actions(ids[1]), 2);
        scope.finish();
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn self_removal_makes_state_unavailable() {
        let (mut ctx, mut queue, ids) = setup(1);
        let mut scope = Resolve::new(Tick(0), ids[0], &mut ctx, &mut queue);
        assert!(scope.state().is_ok());
        scope.remove_agent(ids[0]);
        assert_eq!(scope.state_mut().unwrap_err(), ResolutionError::UnknownAgent(ids[0]));
        assert!(scope.rng().is_err());
    }

    #[test]
    fn sample_sensors_appends_to_log() {
        let (mut ctx, mut queue, ids) = setup(1);
        let mut scope = Resolve::new(Tick(7), ids[0], &mut ctx, &mut queue);
        scope.state_mut().unwrap().size = 3;
        assert_eq!(scope.sense(0), Some(Reading::Count(3)));
        assert_eq!(scope.sample_sensors().unwrap(), 1);
        scope.finish();

        let log = ctx.agent(ids[0]).unwrap().log();
        assert_eq!(log.len(), 1);
        assert_eq!(log.samples()[0].time, Tick(7));
        assert_eq!(log.samples()[0].sensor, "size");
        assert_eq!(log.samples()[0].reading, Reading::Count(3));
    }

    #[test]
    fn flags_are_reported() {
        let (mut ctx, mut queue, ids) = setup(1);
        let mut scope = Resolve::new(Tick(0), ids[0], &mut ctx, &mut queue);
        scope.stop_recurrence();
        scope.request_stop();
        let outcome = scope.finish();
        assert!(outcome.stop_recurrence);
        assert!(outcome.stop_requested);
    }
}
