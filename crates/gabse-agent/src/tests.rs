//! Unit tests for gabse-agent.

use gabse_core::{AgentId, Tick};

use crate::{AgentBuilder, Context, Reading, Sensor, SensorSample};

// ── Helpers ───────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Clone, PartialEq)]
struct Health {
    hp: u32,
}

#[derive(Default)]
struct World {
    alarm: bool,
}

/// Counts other active agents of the same kind.
struct KinCounter;

impl Sensor<World, Health> for KinCounter {
    fn name(&self) -> &str {
        "kin"
    }

    fn sense(&self, owner: AgentId, ctx: &Context<World, Health>) -> Reading {
        let Some(me) = ctx.agent(owner) else {
            return Reading::Empty;
        };
        let n = ctx.agents_of_kind(me.kind()).filter(|a| a.id() != owner).count();
        Reading::Count(n as u64)
    }
}

/// Reports the world alarm flag.
struct AlarmSensor;

impl Sensor<World, Health> for AlarmSensor {
    fn name(&self) -> &str {
        "alarm"
    }

    fn sense(&self, _owner: AgentId, ctx: &Context<World, Health>) -> Reading {
        Reading::Flag(ctx.world.alarm)
    }
}

fn human(hp: u32) -> AgentBuilder<World, Health> {
    AgentBuilder::new("human", Health { hp })
}

fn zombie() -> AgentBuilder<World, Health> {
    AgentBuilder::new("zombie", Health { hp: 1 })
}

// ── Registry ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod registry {
    use super::*;

    #[test]
    fn ids_are_dense_and_sequential() {
        let mut ctx: Context<World, Health> = Context::new(World::default(), 1);
        let a = ctx.agents_mut().register(human(10), Tick(0)).unwrap();
        let b = ctx.agents_mut().register(zombie(), Tick(0)).unwrap();
        assert_eq!(a, AgentId(0));
        assert_eq!(b, AgentId(1));
        assert_eq!(ctx.agents().len(), 2);
        assert_eq!(ctx.agent(a).unwrap().state.hp, 10);
        assert_eq!(ctx.agent(b).unwrap().kind(), "zombie");
    }

    #[test]
    fn removed_ids_are_never_reused() {
        let mut ctx: Context<World, Health> = Context::new(World::default(), 1);
        let a = ctx.agents_mut().register(human(1), Tick(0)).unwrap();
        assert!(ctx.agents_mut().remove(a, Tick(4)));
        let b = ctx.agents_mut().register(human(2), Tick(5)).unwrap();
        assert_ne!(a, b);
        assert!(ctx.agent(a).is_none());
        assert_eq!(ctx.agents().get_any(a).unwrap().removed_at(), Some(Tick(4)));
        assert_eq!(ctx.agents().len(), 1);
        assert_eq!(ctx.agents().total(), 2);
    }

    #[test]
    fn double_remove_and_unknown_remove_are_false() {
        let mut ctx: Context<World, Health> = Context::new(World::default(), 1);
        let a = ctx.agents_mut().register(human(1), Tick(0)).unwrap();
        assert!(ctx.agents_mut().remove(a, Tick(1)));
        assert!(!ctx.agents_mut().remove(a, Tick(2)));
        assert!(!ctx.agents_mut().remove(AgentId(99), Tick(2)));
        assert_eq!(ctx.agents().len(), 0);
    }

    #[test]
    fn iteration_skips_removed() {
        let mut ctx: Context<World, Health> = Context::new(World::default(), 1);
        let ids: Vec<_> = (0..4).map(|i| ctx.agents_mut().register(human(i), Tick(0)).unwrap()).collect();
        ctx.agents_mut().remove(ids[1], Tick(0));
        let active: Vec<_> = ctx.agents().active_ids().collect();
        assert_eq!(active, vec![ids[0], ids[2], ids[3]]);
        assert_eq!(ctx.agents().iter_all().count(), 4);
        assert!(ctx.agents_mut().iter_mut().all(|a| a.is_active()));
    }

    #[test]
    fn agent_rngs_are_seeded_per_id() {
        let mut c1: Context<World, Health> = Context::new(World::default(), 9);
        let mut c2: Context<World, Health> = Context::new(World::default(), 9);
        let a1 = c1.agents_mut().register(human(1), Tick(0)).unwrap();
        let a2 = c2.agents_mut().register(human(1), Tick(0)).unwrap();
        let x: u64 = c1.agents_mut().get_mut(a1).unwrap().rng().random();
        let y: u64 = c2.agents_mut().get_mut(a2).unwrap().rng().random();
        assert_eq!(x, y);
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn slot_past_the_id_space_is_refused() {
        use crate::registry::slot_id;
        use crate::AgentError;

        let last = u32::MAX as usize;
        assert_eq!(slot_id(last), Ok(AgentId(u32::MAX)));
        assert_eq!(slot_id(last + 1), Err(AgentError::IdsExhausted { registered: last + 1 }));
    }
}

// ── Context queries ───────────────────────────────────────────────────────────

#[cfg(test)]
mod context {
    use super::*;

    #[test]
    fn counts_by_kind() {
        let mut ctx: Context<World, Health> = Context::new(World::default(), 1);
        ctx.agents_mut().register(human(1), Tick(0)).unwrap();
        ctx.agents_mut().register(human(2), Tick(0)).unwrap();
        let z = ctx.agents_mut().register(zombie(), Tick(0)).unwrap();
        ctx.agents_mut().register(zombie(), Tick(0)).unwrap();
        ctx.agents_mut().remove(z, Tick(1));

        let counts = ctx.agent_counts();
        assert_eq!(counts.get("human"), Some(&2));
        assert_eq!(counts.get("zombie"), Some(&1));
        assert_eq!(ctx.count_kind("human"), 2);
        assert_eq!(ctx.count_kind("ghost"), 0);
    }
}

// ── Sensors ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod sensors {
    use super::*;

    #[test]
    fn sense_reads_context() {
        let mut ctx: Context<World, Health> = Context::new(World::default(), 1);
        let a = ctx.agents_mut().register(human(1).sensor(KinCounter).sensor(AlarmSensor), Tick(0)).unwrap();
        ctx.agents_mut().register(human(1), Tick(0)).unwrap();
        ctx.agents_mut().register(zombie(), Tick(0)).unwrap();

        assert_eq!(ctx.sense(a, 0), Some(Reading::Count(1)));
        assert_eq!(ctx.sense(a, 1), Some(Reading::Flag(false)));
        ctx.world.alarm = true;
        assert_eq!(ctx.sense(a, 1), Some(Reading::Flag(true)));
        assert_eq!(ctx.sense(a, 2), None);
    }

    #[test]
    fn sensing_is_repeatable() {
        let mut ctx: Context<World, Health> = Context::new(World::default(), 1);
        let a = ctx.agents_mut().register(human(1).sensor(KinCounter), Tick(0)).unwrap();
        let first = ctx.sense_all(a);
        let second = ctx.sense_all(a);
        assert_eq!(first, second);
        assert_eq!(first, vec![("kin".to_owned(), Reading::Count(0))]);
    }

    #[test]
    fn removed_agent_senses_nothing() {
        let mut ctx: Context<World, Health> = Context::new(World::default(), 1);
        let a = ctx.agents_mut().register(human(1).sensor(AlarmSensor), Tick(0)).unwrap();
        ctx.agents_mut().remove(a, Tick(0));
        assert_eq!(ctx.sense(a, 0), None);
        assert!(ctx.sense_all(a).is_empty());
    }

    #[test]
    fn attach_sensor_after_registration() {
        let mut ctx: Context<World, Health> = Context::new(World::default(), 1);
        let a = ctx.agents_mut().register(human(1), Tick(0)).unwrap();
        assert!(ctx.agents_mut().attach_sensor(a, Box::new(AlarmSensor)));
        assert_eq!(ctx.agent(a).unwrap().sensor_count(), 1);
        assert!(!ctx.agents_mut().attach_sensor(AgentId(42), Box::new(AlarmSensor)));
    }

    #[test]
    fn sensor_log_filters_by_name() {
        let mut ctx: Context<World, Health> = Context::new(World::default(), 1);
        let a = ctx.agents_mut().register(human(1), Tick(0)).unwrap();
        let log = ctx.agents_mut().get_mut(a).unwrap().log_mut();
        log.record(SensorSample { time: Tick(0), sensor: "kin".into(), reading: Reading::Count(3) });
        log.record(SensorSample { time: Tick(1), sensor: "alarm".into(), reading: Reading::Flag(true) });
        log.record(SensorSample { time: Tick(2), sensor: "kin".into(), reading: Reading::Count(4) });

        let log = ctx.agent(a).unwrap().log();
        assert_eq!(log.len(), 3);
        let kin: Vec<_> = log.by_sensor("kin").map(|s| s.time).collect();
        assert_eq!(kin, vec![Tick(0), Tick(2)]);
    }

    #[test]
    fn reading_display() {
        assert_eq!(Reading::Count(3).to_string(), "3");
        assert_eq!(Reading::Flag(true).to_string(), "true");
        assert_eq!(Reading::Vector(vec![1.0, 2.5]).to_string(), "[1;2.5]");
        assert_eq!(Reading::Agents(vec![AgentId(1), AgentId(4)]).to_string(), "[1;4]");
        assert_eq!(Reading::Empty.to_string(), "");
        assert_eq!(Reading::Text("hi".into()).to_string(), "hi");
    }
}
