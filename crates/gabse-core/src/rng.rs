//! Seeded random streams.
//!
//! A run draws randomness from exactly two places:
//!
//! - every agent owns an [`AgentRng`], lent to handlers only while one of
//!   that agent's actions resolves;
//! - a [`SimRng`] built from the master seed derives the seeds of the
//!   independent instances in a parameter sweep.
//!
//! Agent streams are keyed on `(run seed, agent id)`.  Resolution order
//! within a tick is fixed and ids are never reused, so the same seed and the
//! same bootstrap replay the same draws, and agents registered mid-run never
//! shift the streams of older agents.

use rand::distributions::uniform::{SampleRange, SampleUniform};
use rand::distributions::{Distribution, Standard};
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::AgentId;

/// Golden-ratio multiplier; spreads consecutive salts across the seed space.
const SALT_MIX: u64 = 0x9e37_79b9_7f4a_7c15;

#[inline]
fn salted(seed: u64, salt: u64) -> u64 {
    seed ^ salt.wrapping_mul(SALT_MIX)
}

// ── AgentRng ──────────────────────────────────────────────────────────────────

/// One agent's random stream.
#[derive(Clone, Debug)]
pub struct AgentRng(SmallRng);

impl AgentRng {
    pub fn new(run_seed: u64, agent: AgentId) -> Self {
        AgentRng(SmallRng::seed_from_u64(salted(run_seed, u64::from(agent.0))))
    }

    /// The underlying generator, for `rand` distributions not wrapped here.
    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    #[inline]
    pub fn random<T>(&mut self) -> T
    where
        Standard: Distribution<T>,
    {
        self.0.sample(Standard)
    }

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: SampleUniform,
        R: SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// Bernoulli draw.  `p` outside `[0, 1]` saturates instead of panicking,
    /// so rates computed from agent state can be passed straight in.
    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }

    /// Pick one element, e.g. a target among nearby agents.
    #[inline]
    pub fn choose<'a, T>(&mut self, candidates: &'a [T]) -> Option<&'a T> {
        candidates.choose(&mut self.0)
    }
}

// ── SimRng ────────────────────────────────────────────────────────────────────

/// Run-level stream, used to fan one master seed out into many.
#[derive(Clone, Debug)]
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Next derived seed.  `index` is mixed in so that two derivations never
    /// collide even if the underlying draws did.
    pub fn child_seed(&mut self, index: u64) -> u64 {
        let draw: u64 = self.0.sample(Standard);
        salted(draw, index)
    }

    /// A child stream seeded by [`child_seed`][Self::child_seed].
    pub fn child(&mut self, index: u64) -> SimRng {
        SimRng::new(self.child_seed(index))
    }

    #[inline]
    pub fn random<T>(&mut self) -> T
    where
        Standard: Distribution<T>,
    {
        self.0.sample(Standard)
    }
}
