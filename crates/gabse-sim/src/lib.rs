//! `gabse-sim` — the discrete-event execution engine for the GABSE framework.
//!
//! # Tick loop
//!
//! ```text
//! loop:
//!   ① Peek     — earliest pending time t; none left → Terminated.
//!   ② Bounds   — t beyond end_time, or max_ticks reached → Terminated.
//!   ③ Advance  — clock := t.
//!   ④ Pop      — every action due at exactly t, in (priority, sequence)
//!                order; same-agent policy marks losers as superseded.
//!   ⑤ Resolve  — one action at a time through the ActionHandler:
//!                  removed agent      → skipped
//!                  Err(non-fatal)     → reported, batch continues
//!                  Err(Fatal)         → engine halts
//!                submissions for t land on t + 1.
//!   ⑥ Recur    — recurring actions are re-queued at t + interval.
//!   ⑦ Report   — TickObserver::on_tick_end; termination condition.
//! ```
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | [`sweep::run_sweep`] runs instances on Rayon's pool.   |
//! | `serde`    | Serde derives on ids, time and config.                 |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use gabse_agent::AgentBuilder;
//! use gabse_behavior::HandlerTable;
//! use gabse_core::{SimConfig, Tick};
//! use gabse_sim::{EngineBuilder, Exhaust, NoopObserver};
//!
//! let handlers = HandlerTable::new().on("wander", wander);
//! let mut engine = EngineBuilder::new(SimConfig::default(), World::default(), handlers)
//!     .build()?;
//! let id = engine.register_agent(AgentBuilder::new("human", Body::default()))?;
//! engine.submit_action(Tick(0), id, Cmd::Wander)?;
//! let summary = engine.run(Exhaust, &mut NoopObserver)?;
//! ```

pub mod builder;
pub mod engine;
pub mod error;
pub mod observer;
pub mod report;
pub mod sweep;
pub mod termination;


pub use builder::EngineBuilder;
pub use engine::{Engine, EngineState};
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, TickObserver};
pub use report::{
    ResolutionFailure, ResolvedAction, RunSummary, SkipReason, SkippedAction, StopReason, TickReport,
};
pub use sweep::{run_sweep, sweep_seeds};
pub use termination::{Exhaust, StopAt, Termination, TickBudget};
