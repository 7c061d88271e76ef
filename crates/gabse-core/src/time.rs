//! Simulation time model.
//!
//! # Design
//!
//! Simulated time is an integer `Tick` counter.  The framework attaches no
//! wall-clock meaning to a tick; scenarios pick their own unit (seconds,
//! minutes, turns).  Integer time keeps schedule arithmetic exact: equal-time
//! batches are detected with `==`, never with an epsilon, and the "next
//! distinct time" after `t` is always `t + 1`.
//!
//! `SimClock` only moves forward.  The engine is its sole writer; everything
//! else reads `current()`.

use std::fmt;

use crate::{CoreError, CoreResult};

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation time.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// The tick `n` steps after `self`, or `None` past `u64::MAX`.
    ///
    /// Anything that ends up in the action queue goes through this, so an
    /// oversized delay is reported instead of wrapping.
    #[inline]
    pub fn checked_offset(self, n: u64) -> Option<Tick> {
        self.0.checked_add(n).map(Tick)
    }

    /// The next distinct time value after `self`, or `None` at the end of
    /// representable time.
    #[inline]
    pub fn checked_next(self) -> Option<Tick> {
        self.checked_offset(1)
    }

    /// The tick `n` steps after `self`, saturating at `u64::MAX`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0.saturating_add(n))
    }

    /// Ticks elapsed from `earlier` to `self`, saturating at zero.
    #[inline]
    pub fn since(self, earlier: Tick) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

/// Saturating; see [`Tick::checked_offset`].
impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        self.offset(rhs)
    }
}

/// Saturating at zero, like [`Tick::since`].
impl std::ops::Sub for Tick {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Tick) -> u64 {
        self.since(rhs)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// The simulation's current time.
///
/// Cheap to copy; holds no heap data.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    current: Tick,
}

impl SimClock {
    /// A clock starting at `start`.
    pub fn new(start: Tick) -> Self {
        Self { current: start }
    }

    #[inline]
    pub fn current(&self) -> Tick {
        self.current
    }

    /// Move the clock to `to`.
    ///
    /// Staying at the current tick is allowed; moving backwards is a
    /// [`CoreError::ClockRegression`] and leaves the clock unchanged.
    pub fn advance_to(&mut self, to: Tick) -> CoreResult<()> {
        if to < self.current {
            return Err(CoreError::ClockRegression { from: self.current, to });
        }
        self.current = to;
        Ok(())
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.current)
    }
}

// ── SameAgentPolicy ───────────────────────────────────────────────────────────

/// What to do when one batch holds several actions for the same agent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SameAgentPolicy {
    /// Resolve every action in tie-break order.
    #[default]
    ApplyAll,
    /// Resolve only the first action per agent; later ones are superseded.
    KeepFirst,
    /// Resolve only the last action per agent; earlier ones are superseded.
    KeepLast,
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level simulation configuration.
///
/// Typically built in code or loaded from a file by the application (enable
/// the `serde` feature) and passed to the engine builder.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Time at which the clock starts.  Bootstrap actions may not be
    /// scheduled earlier than this.
    pub start_time: Tick,

    /// Model horizon.  A tick whose time is later than this is never
    /// started; those actions stay pending.  `None` runs until the queue
    /// drains or another bound hits.
    pub end_time: Option<Tick>,

    /// Maximum number of ticks to resolve in one engine lifetime.
    pub max_ticks: Option<u64>,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// Handling of multiple same-time actions for one agent.
    pub same_agent_policy: SameAgentPolicy,

    /// Isolated resolution failures tolerated before the engine halts.
    /// `None` tolerates any number.
    pub failure_limit: Option<usize>,

    /// Collect aggregate output every N ticks.  0 disables periodic output.
    pub output_interval_ticks: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            start_time:            Tick::ZERO,
            end_time:              None,
            max_ticks:             None,
            seed:                  0,
            same_agent_policy:     SameAgentPolicy::ApplyAll,
            failure_limit:         None,
            output_interval_ticks: 1,
        }
    }
}

impl SimConfig {
    /// Reject self-contradictory settings.
    pub fn validate(&self) -> CoreResult<()> {
        match self.end_time {
            Some(end) if end < self.start_time => {
                return Err(CoreError::Config(format!(
                    "end_time {end} is before start_time {}",
                    self.start_time
                )));
            }
            _ => {}
        }
        if self.max_ticks == Some(0) {
            return Err(CoreError::Config("max_ticks must be at least 1".into()));
        }
        Ok(())
    }

    /// `true` if a tick at `time` lies beyond the model horizon.
    #[inline]
    pub fn past_horizon(&self, time: Tick) -> bool {
        self.end_time.is_some_and(|end| time > end)
    }

    /// Construct a `SimClock` pre-configured for this run.
    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.start_time)
    }
}
