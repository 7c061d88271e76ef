//! Unit tests for gabse-core primitives.

#[cfg(test)]
mod ids {
    use crate::{ActionId, AgentId};

    #[test]
    fn index_is_the_raw_number() {
        assert_eq!(AgentId(42).index(), 42);
        assert_eq!(ActionId(9).index(), 9);
    }

    #[test]
    fn ordering() {
        assert!(AgentId(0) < AgentId(1));
        assert!(ActionId(100) > ActionId(99));
    }

    #[test]
    fn display() {
        assert_eq!(AgentId(7).to_string(), "agent#7");
        assert_eq!(ActionId(12).to_string(), "action#12");
    }
}

#[cfg(test)]
mod time {
    use crate::{CoreError, SameAgentPolicy, SimClock, SimConfig, Tick};

    #[test]
    fn tick_arithmetic() {
        assert_eq!(Tick(5) + 3, Tick(8));
        assert_eq!(Tick(9) - Tick(4), 5);
        assert_eq!(Tick(2).offset(10), Tick(12));
        assert_eq!(Tick(2).checked_next(), Some(Tick(3)));
        assert_eq!(Tick(2).since(Tick(7)), 0);
        assert_eq!(Tick(7).since(Tick(2)), 5);
    }

    #[test]
    fn tick_arithmetic_near_the_end_of_time() {
        let last = Tick(u64::MAX);
        assert_eq!(last.checked_next(), None);
        assert_eq!(Tick(5).checked_offset(u64::MAX), None);
        assert_eq!(Tick(5).checked_offset(u64::MAX - 5), Some(last));
        assert_eq!(Tick(5) + u64::MAX, last);
        assert_eq!(Tick(1) - Tick(3), 0);
    }

    #[test]
    fn tick_display() {
        assert_eq!(Tick(17).to_string(), "T17");
    }

    #[test]
    fn clock_advances_forward() {
        let mut clock = SimClock::new(Tick(3));
        clock.advance_to(Tick(3)).unwrap();
        assert_eq!(clock.current(), Tick(3));
        clock.advance_to(Tick(10)).unwrap();
        assert_eq!(clock.current(), Tick(10));
    }

    #[test]
    fn clock_rejects_regression() {
        let mut clock = SimClock::new(Tick(10));
        let err = clock.advance_to(Tick(4)).unwrap_err();
        assert_eq!(err, CoreError::ClockRegression { from: Tick(10), to: Tick(4) });
        assert_eq!(clock.current(), Tick(10), "failed advance must not move the clock");
    }

    #[test]
    fn config_defaults() {
        let cfg = SimConfig::default();
        assert_eq!(cfg.start_time, Tick::ZERO);
        assert_eq!(cfg.end_time, None);
        assert_eq!(cfg.same_agent_policy, SameAgentPolicy::ApplyAll);
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.make_clock().current(), Tick::ZERO);
    }

    #[test]
    fn config_rejects_end_before_start() {
        let cfg = SimConfig {
            start_time: Tick(10),
            end_time:   Some(Tick(5)),
            ..SimConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(CoreError::Config(_))));
    }

    #[test]
    fn config_rejects_zero_max_ticks() {
        let cfg = SimConfig { max_ticks: Some(0), ..SimConfig::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn horizon_is_inclusive() {
        let cfg = SimConfig { end_time: Some(Tick(5)), ..SimConfig::default() };
        assert!(!cfg.past_horizon(Tick(5)));
        assert!(cfg.past_horizon(Tick(6)));
        assert!(!SimConfig::default().past_horizon(Tick(u64::MAX)));
    }
}

#[cfg(test)]
mod rng {
    use crate::{AgentId, AgentRng, SimRng};

    #[test]
    fn agent_rng_deterministic() {
        let mut a = AgentRng::new(42, AgentId(3));
        let mut b = AgentRng::new(42, AgentId(3));
        let xs: Vec<u64> = (0..8).map(|_| a.random()).collect();
        let ys: Vec<u64> = (0..8).map(|_| b.random()).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn agents_get_distinct_streams() {
        let mut a = AgentRng::new(42, AgentId(0));
        let mut b = AgentRng::new(42, AgentId(1));
        let x: u64 = a.random();
        let y: u64 = b.random();
        assert_ne!(x, y);
    }

    #[test]
    fn gen_bool_clamps() {
        let mut r = AgentRng::new(1, AgentId(0));
        assert!(r.gen_bool(2.0));
        assert!(!r.gen_bool(-1.0));
    }

    #[test]
    fn choose_empty_is_none() {
        let mut r = AgentRng::new(1, AgentId(0));
        let empty: [u8; 0] = [];
        assert!(r.choose(&empty).is_none());
        assert_eq!(r.choose(&[9]), Some(&9));
    }

    #[test]
    fn child_seeds_reproducible() {
        let mut a = SimRng::new(7);
        let mut b = SimRng::new(7);
        let xs: Vec<u64> = (0..4).map(|i| a.child_seed(i)).collect();
        let ys: Vec<u64> = (0..4).map(|i| b.child_seed(i)).collect();
        assert_eq!(xs, ys);
        let mut c1 = a.child(0);
        let mut c2 = b.child(0);
        assert_eq!(c1.random::<u32>(), c2.random::<u32>());
    }
}
