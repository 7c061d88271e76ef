//! Engine observer trait for progress reporting and data collection.

use gabse_agent::Context;
use gabse_core::Tick;

use crate::{RunSummary, TickReport};

/// Callbacks invoked by the engine at tick and run boundaries.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.  Observers run synchronously on the
/// engine's thread and see the context read-only.
///
/// Any `FnMut(&TickReport, &Context<W, A>)` closure is an observer that
/// only implements [`on_tick_end`][Self::on_tick_end].
///
/// # Example: progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter { interval: u64 }
///
/// impl<W, A> TickObserver<W, A> for ProgressPrinter {
///     fn on_tick_end(&mut self, report: &TickReport, _ctx: &Context<W, A>) {
///         if report.time.0 % self.interval == 0 {
///             println!("{}: resolved {}", report.time, report.resolved.len());
///         }
///     }
/// }
/// ```
pub trait TickObserver<W, A> {
    /// Called once, when the engine leaves `Initializing`.
    fn on_run_start(&mut self, _start: Tick, _ctx: &Context<W, A>) {}

    /// Called after every resolved tick, once the batch and all of its
    /// follow-up insertions are complete.
    fn on_tick_end(&mut self, _report: &TickReport, _ctx: &Context<W, A>) {}

    /// Called once, when the engine terminates during `step` or `run`.
    fn on_run_end(&mut self, _summary: &RunSummary, _ctx: &Context<W, A>) {}
}

/// A [`TickObserver`] that does nothing.
pub struct NoopObserver;

impl<W, A> TickObserver<W, A> for NoopObserver {}

impl<W, A, F> TickObserver<W, A> for F
where
    F: FnMut(&TickReport, &Context<W, A>),
{
    fn on_tick_end(&mut self, report: &TickReport, ctx: &Context<W, A>) {
        self(report, ctx)
    }
}
