//! Termination conditions for [`Engine::run`][crate::Engine::run].

use gabse_agent::Context;
use gabse_core::Tick;

use crate::TickReport;

/// Checked after every tick of a `run`; returning `true` stops the engine
/// once that tick is complete.
///
/// Closures of the shape `FnMut(&TickReport, &Context<W, A>) -> bool`
/// implement this trait:
///
/// ```rust,ignore
/// engine.run(
///     |r: &TickReport, ctx: &Context<World, Body>| r.time > Tick(100) || ctx.count_kind("zombie") == 0,
///     &mut NoopObserver,
/// )?;
/// ```
pub trait Termination<W, A> {
    fn should_stop(&mut self, report: &TickReport, ctx: &Context<W, A>) -> bool;
}

impl<W, A, F> Termination<W, A> for F
where
    F: FnMut(&TickReport, &Context<W, A>) -> bool,
{
    fn should_stop(&mut self, report: &TickReport, ctx: &Context<W, A>) -> bool {
        self(report, ctx)
    }
}

/// Never stops early; the run ends on an empty queue or a configured bound.
#[derive(Clone, Copy, Debug, Default)]
pub struct Exhaust;

impl<W, A> Termination<W, A> for Exhaust {
    fn should_stop(&mut self, _report: &TickReport, _ctx: &Context<W, A>) -> bool {
        false
    }
}

/// Stops once a tick at or after the given time has resolved.
#[derive(Clone, Copy, Debug)]
pub struct StopAt(pub Tick);

impl<W, A> Termination<W, A> for StopAt {
    fn should_stop(&mut self, report: &TickReport, _ctx: &Context<W, A>) -> bool {
        report.time >= self.0
    }
}

/// Stops after this many ticks of the current `run` call.
#[derive(Clone, Copy, Debug)]
pub struct TickBudget(pub u64);

impl<W, A> Termination<W, A> for TickBudget {
    fn should_stop(&mut self, _report: &TickReport, _ctx: &Context<W, A>) -> bool {
        self.0 = self.0.saturating_sub(1);
        self.0 == 0
    }
}
