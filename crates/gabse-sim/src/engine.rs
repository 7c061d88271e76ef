//! The `Engine` struct and its tick loop.

use std::fmt;

use gabse_agent::{AgentBuilder, Context, Sensor};
use gabse_behavior::{ActionHandler, Payload, Resolve};
use gabse_core::{ActionId, AgentId, SameAgentPolicy, SimClock, SimConfig, Tick};
use gabse_schedule::{Action, ActionQueue, ActionSpec, ScheduleError, ScheduleResult};
use rustc_hash::FxHashSet;
use tracing::{debug, error, info, trace, warn};

use crate::{
    ResolutionFailure, ResolvedAction, RunSummary, SimError, SimResult, SkipReason, SkippedAction,
    StopReason, Termination, TickObserver, TickReport,
};

// ── EngineState ───────────────────────────────────────────────────────────────

/// Lifecycle of an [`Engine`].  Transitions only move forward.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EngineState {
    /// Built; agents and bootstrap actions may be added.  No tick has run.
    Initializing,
    /// Ticks are being resolved.
    Running,
    /// A stop was requested; the in-flight batch finishes, then the engine
    /// terminates.
    Draining,
    /// Final.  Every control call except `stop`/`abort` fails with
    /// [`SimError::EngineStopped`].
    Terminated,
}

impl fmt::Display for EngineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[derive(Clone, Copy, Debug, Default)]
struct Totals {
    ticks:      u64,
    resolved:   u64,
    skipped:    u64,
    superseded: u64,
    failed:     u64,
}

// ── Engine ────────────────────────────────────────────────────────────────────

/// The discrete-event execution engine.
///
/// `Engine<W, A, P, H>` owns the clock, the action queue and the context
/// (world state `W` plus agents with state `A`), and drives the tick loop:
///
/// 1. **Peek**: find the earliest pending time.  None left: terminate.
/// 2. **Advance**: move the clock to that time.
/// 3. **Pop**: take the whole batch due at exactly that time, in
///    `(priority, sequence)` order, and apply the same-agent policy.
/// 4. **Resolve**: hand each action to `H` one at a time.  Actions for
///    removed agents are skipped; failures are isolated and reported.
///    Submissions for the current time land on the next tick.
/// 5. **Follow up**: re-issue recurring actions, report the tick to the
///    observer, check termination.
///
/// Create via [`EngineBuilder`][crate::EngineBuilder].
pub struct Engine<W, A, P, H> {
    config:      SimConfig,
    clock:       SimClock,
    queue:       ActionQueue<P>,
    context:     Context<W, A>,
    handler:     H,
    state:       EngineState,
    stop_reason: Option<StopReason>,
    totals:      Totals,
}

impl<W, A, P, H> Engine<W, A, P, H>
where
    P: Payload,
    H: ActionHandler<W, A, P>,
{
    pub(crate) fn from_parts(
        config:  SimConfig,
        context: Context<W, A>,
        queue:   ActionQueue<P>,
        handler: H,
    ) -> Self {
        Self {
            clock: config.make_clock(),
            config,
            queue,
            context,
            handler,
            state: EngineState::Initializing,
            stop_reason: None,
            totals: Totals::default(),
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Current simulated time.
    #[inline]
    pub fn now(&self) -> Tick {
        self.clock.current()
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn context(&self) -> &Context<W, A> {
        &self.context
    }

    pub fn world(&self) -> &W {
        &self.context.world
    }

    /// Mutable world access between ticks, for scenario setup and
    /// interventions.  Never available while a batch is resolving.
    pub fn world_mut(&mut self) -> &mut W {
        &mut self.context.world
    }

    /// Read-only view of the pending actions.
    pub fn queue(&self) -> &ActionQueue<P> {
        &self.queue
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    /// Ticks resolved so far.
    pub fn ticks(&self) -> u64 {
        self.totals.ticks
    }

    pub fn stop_reason(&self) -> Option<StopReason> {
        self.stop_reason
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            ticks:       self.totals.ticks,
            resolved:    self.totals.resolved,
            skipped:     self.totals.skipped,
            superseded:  self.totals.superseded,
            failed:      self.totals.failed,
            final_time:  self.clock.current(),
            pending:     self.queue.len(),
            stop_reason: self.stop_reason,
        }
    }

    // ── Population and submissions ────────────────────────────────────────

    pub fn register_agent(&mut self, agent: AgentBuilder<W, A>) -> SimResult<AgentId> {
        self.ensure_live()?;
        let id = self.context.agents_mut().register(agent, self.clock.current())?;
        debug!(agent = %id, time = %self.clock.current(), "agent registered");
        Ok(id)
    }

    /// Remove an agent.  Its queued actions stay queued and are skipped
    /// when they come due; see [`cancel_agent_actions`][Self::cancel_agent_actions].
    pub fn remove_agent(&mut self, id: AgentId) -> SimResult<()> {
        self.ensure_live()?;
        if !self.context.agents_mut().remove(id, self.clock.current()) {
            return Err(SimError::UnknownAgent(id));
        }
        debug!(agent = %id, time = %self.clock.current(), "agent removed");
        Ok(())
    }

    /// Cancel every queued action targeting `id`.  Returns how many were
    /// cancelled.
    pub fn cancel_agent_actions(&mut self, id: AgentId) -> usize {
        self.queue.cancel_agent(id)
    }

    pub fn attach_sensor<S: Sensor<W, A>>(&mut self, id: AgentId, sensor: S) -> SimResult<()> {
        self.ensure_live()?;
        if self.context.agents_mut().attach_sensor(id, Box::new(sensor)) {
            Ok(())
        } else {
            Err(SimError::UnknownAgent(id))
        }
    }

    /// Submit `payload` for `agent` at `time` with default priority.
    pub fn submit_action(&mut self, time: Tick, agent: AgentId, payload: P) -> SimResult<ActionId> {
        self.submit(ActionSpec::new(time, agent, payload))
    }

    /// Submit a fully specified action (priority, recurrence).
    ///
    /// A spec for the tick that was just resolved is deferred to the next
    /// tick; a spec for an earlier time fails with
    /// [`ScheduleError::InvalidSchedule`][gabse_schedule::ScheduleError::InvalidSchedule].
    pub fn submit(&mut self, spec: ActionSpec<P>) -> SimResult<ActionId> {
        self.ensure_live()?;
        if !self.context.agents().is_active(spec.agent) {
            return Err(SimError::UnknownAgent(spec.agent));
        }
        Ok(self.queue.insert(spec)?)
    }

    /// Cancel a queued action.  Returns `false` if it was not queued.
    pub fn cancel(&mut self, id: ActionId) -> bool {
        self.queue.cancel(id).is_some()
    }

    // ── Run control ───────────────────────────────────────────────────────

    /// Terminate now.  Pending actions stay queued for inspection.
    ///
    /// No observer is told; use [`stop_with`][Self::stop_with] when one
    /// still has to flush.
    pub fn stop(&mut self) {
        self.terminate(StopReason::Stopped);
    }

    /// Terminate now and drop every pending action.
    pub fn abort(&mut self) {
        self.terminate(StopReason::Aborted);
        self.queue.clear();
    }

    /// [`stop`][Self::stop], then hand the final summary to
    /// `observer.on_run_end`.  Does nothing if already terminated.
    pub fn stop_with<O: TickObserver<W, A>>(&mut self, observer: &mut O) {
        if self.state != EngineState::Terminated {
            self.finish(StopReason::Stopped, observer);
        }
    }

    /// [`abort`][Self::abort], then hand the final summary (with nothing
    /// pending) to `observer.on_run_end`.  Does nothing if already
    /// terminated.
    pub fn abort_with<O: TickObserver<W, A>>(&mut self, observer: &mut O) {
        if self.state != EngineState::Terminated {
            self.queue.clear();
            self.finish(StopReason::Aborted, observer);
        }
    }

    /// Resolve ticks until the queue drains, a configured bound hits, a
    /// handler requests a stop, or `until` fires.
    pub fn run<T, O>(&mut self, mut until: T, observer: &mut O) -> SimResult<RunSummary>
    where
        T: Termination<W, A>,
        O: TickObserver<W, A>,
    {
        self.ensure_live()?;
        while let Some(report) = self.step(observer)? {
            if self.state == EngineState::Terminated {
                break;
            }
            if until.should_stop(&report, &self.context) {
                self.state = EngineState::Draining;
                self.finish(StopReason::Condition, observer);
                break;
            }
        }
        Ok(self.summary())
    }

    /// Resolve exactly one tick.
    ///
    /// Returns `Ok(None)` when the engine terminates instead of resolving a
    /// tick (empty queue, end time, tick limit).  Calling `step` after that
    /// fails with [`SimError::EngineStopped`].
    pub fn step<O: TickObserver<W, A>>(&mut self, observer: &mut O) -> SimResult<Option<TickReport>> {
        self.ensure_live()?;
        if self.state == EngineState::Initializing {
            self.start(observer);
        }

        if self.config.max_ticks.is_some_and(|max| self.totals.ticks >= max) {
            self.finish(StopReason::MaxTicks, observer);
            return Ok(None);
        }
        let Some(next) = self.queue.peek_next_time() else {
            self.finish(StopReason::QueueEmpty, observer);
            return Ok(None);
        };
        if self.config.past_horizon(next) {
            self.finish(StopReason::Horizon, observer);
            return Ok(None);
        }

        if next < self.clock.current() || self.queue.sealed().is_some_and(|sealed| next <= sealed) {
            let err = SimError::SchedulerCorruption(format!(
                "next pending time {next} is not after the last resolved tick {}",
                self.clock.current()
            ));
            return Err(self.halt(err, observer));
        }
        if let Err(e) = self.clock.advance_to(next) {
            return Err(self.halt(SimError::SchedulerCorruption(e.to_string()), observer));
        }

        let batch = self.queue.pop_due(next);
        if batch.is_empty() {
            let err = SimError::SchedulerCorruption(format!("peek reported {next} but no action was due"));
            return Err(self.halt(err, observer));
        }
        if let Some(stray) = batch.iter().find(|a| a.time() != next) {
            let err = SimError::SchedulerCorruption(format!(
                "{} due at {} popped with the batch for {next}",
                stray.id(),
                stray.time()
            ));
            return Err(self.halt(err, observer));
        }

        let mut report = self.resolve_batch(next, batch, observer)?;
        report.pending = self.queue.len();
        self.totals.ticks += 1;
        debug!(
            time     = %next,
            resolved = report.resolved.len(),
            skipped  = report.skipped.len(),
            failed   = report.failures.len(),
            pending  = report.pending,
            "tick complete"
        );
        observer.on_tick_end(&report, &self.context);

        if self.state == EngineState::Draining {
            self.finish(StopReason::Requested, observer);
        }
        Ok(Some(report))
    }

    // ── Tick internals ────────────────────────────────────────────────────

    fn resolve_batch<O: TickObserver<W, A>>(
        &mut self,
        now:      Tick,
        batch:    Vec<Action<P>>,
        observer: &mut O,
    ) -> SimResult<TickReport> {
        let mut report = TickReport::new(now);
        let batch = self.apply_same_agent_policy(batch, &mut report);

        for action in batch {
            let id = action.id();
            let agent = action.agent();
            let kind = action.payload().kind();

            if !self.context.agents().is_active(agent) {
                debug!(action = %id, agent = %agent, time = %now, "skipping action for removed agent");
                report.skipped.push(SkippedAction { id, agent, reason: SkipReason::UnknownAgent });
                self.totals.skipped += 1;
                continue;
            }

            let mut scope = Resolve::new(now, agent, &mut self.context, &mut self.queue);
            let result = self.handler.resolve(&action, &mut scope);
            let outcome = scope.finish();

            report.produced.extend(outcome.produced);
            report.cancelled.extend(outcome.cancelled);
            report.removed.extend(outcome.removed);
            if outcome.stop_requested && self.state == EngineState::Running {
                info!(action = %id, agent = %agent, time = %now, "stop requested by handler");
                self.state = EngineState::Draining;
            }

            match result {
                Ok(()) => {
                    report.resolved.push(ResolvedAction { id, agent, kind });
                    self.totals.resolved += 1;
                }
                Err(source) if source.is_fatal() => {
                    return Err(self.halt(SimError::Fatal { action: id, agent, source }, observer));
                }
                Err(error) => {
                    warn!(action = %id, agent = %agent, time = %now, kind, %error, "action failed");
                    report.failures.push(ResolutionFailure { id, agent, kind, error });
                    self.totals.failed += 1;
                }
            }

            if !outcome.stop_recurrence {
                match self.reissue(&action) {
                    Ok(Some(next_id)) => report.produced.push(next_id),
                    Ok(None) => {}
                    Err(ScheduleError::TimeOverflow { .. }) => {
                        warn!(action = %id, agent = %agent, time = %now, kind, "recurrence runs past the last tick; not re-issued");
                    }
                    Err(err) => {
                        let err = SimError::SchedulerCorruption(format!("re-issuing {id} at {now} failed: {err}"));
                        return Err(self.halt(err, observer));
                    }
                }
            }

            if let Some(limit) = self.config.failure_limit {
                let failures = self.totals.failed as usize;
                if failures > limit {
                    return Err(self.halt(SimError::FailureLimitExceeded { limit, failures }, observer));
                }
            }
        }

        Ok(report)
    }

    /// Drop actions that lose under the same-agent policy, recording them
    /// as superseded.
    fn apply_same_agent_policy(&mut self, batch: Vec<Action<P>>, report: &mut TickReport) -> Vec<Action<P>> {
        let mut keep = vec![true; batch.len()];
        let mut seen = FxHashSet::default();
        match self.config.same_agent_policy {
            SameAgentPolicy::ApplyAll => return batch,
            SameAgentPolicy::KeepFirst => {
                for (i, action) in batch.iter().enumerate() {
                    keep[i] = seen.insert(action.agent());
                }
            }
            SameAgentPolicy::KeepLast => {
                for (i, action) in batch.iter().enumerate().rev() {
                    keep[i] = seen.insert(action.agent());
                }
            }
        }

        let mut kept = Vec::with_capacity(seen.len());
        for (action, keep) in batch.into_iter().zip(keep) {
            if keep {
                kept.push(action);
            } else {
                trace!(action = %action.id(), agent = %action.agent(), "superseded");
                report.skipped.push(SkippedAction {
                    id:     action.id(),
                    agent:  action.agent(),
                    reason: SkipReason::Superseded,
                });
                self.totals.superseded += 1;
            }
        }
        kept
    }

    /// Queue the next occurrence of a recurring action whose agent is
    /// still active.
    fn reissue(&mut self, action: &Action<P>) -> ScheduleResult<Option<ActionId>> {
        if !self.context.agents().is_active(action.agent()) {
            return Ok(None);
        }
        match action.recurrence()? {
            Some(spec) => self.queue.insert(spec).map(Some),
            None => Ok(None),
        }
    }

    // ── State transitions ─────────────────────────────────────────────────

    fn ensure_live(&self) -> SimResult<()> {
        match self.state {
            EngineState::Terminated => Err(SimError::EngineStopped),
            _ => Ok(()),
        }
    }

    fn start<O: TickObserver<W, A>>(&mut self, observer: &mut O) {
        self.state = EngineState::Running;
        info!(
            start   = %self.clock.current(),
            agents  = self.context.agents().len(),
            pending = self.queue.len(),
            seed    = self.config.seed,
            "engine started"
        );
        observer.on_run_start(self.clock.current(), &self.context);
    }

    fn terminate(&mut self, reason: StopReason) {
        if self.state == EngineState::Terminated {
            return;
        }
        self.state = EngineState::Terminated;
        self.stop_reason = Some(reason);
        info!(
            time     = %self.clock.current(),
            ticks    = self.totals.ticks,
            resolved = self.totals.resolved,
            failed   = self.totals.failed,
            pending  = self.queue.len(),
            %reason,
            "engine terminated"
        );
    }

    fn finish<O: TickObserver<W, A>>(&mut self, reason: StopReason, observer: &mut O) {
        self.terminate(reason);
        observer.on_run_end(&self.summary(), &self.context);
    }

    /// Log a fatal error, terminate, and hand the error back for returning.
    fn halt<O: TickObserver<W, A>>(&mut self, err: SimError, observer: &mut O) -> SimError {
        error!(time = %self.clock.current(), error = %err, "engine halted");
        self.finish(StopReason::Fatal, observer);
        err
    }
}

impl<W, A, P, H> fmt::Debug for Engine<W, A, P, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("state", &self.state)
            .field("now", &self.clock.current())
            .field("agents", &self.context.agents().len())
            .field("pending", &self.queue.len())
            .field("ticks", &self.totals.ticks)
            .finish()
    }
}
