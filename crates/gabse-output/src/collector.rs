//! `DataCollector<O>` — bridges `TickObserver` to an `OutputWriter`.

use gabse_agent::Context;
use gabse_core::{SimConfig, Tick};
use gabse_sim::{RunSummary, TickObserver, TickReport};
use tracing::{debug, warn};

use crate::row::{FailureRow, KindCountRow, SensorSampleRow, TickSummaryRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`TickObserver`] that records a run through any [`OutputWriter`]
/// backend (CSV, SQLite).
///
/// | When                            | What is written                       |
/// |---------------------------------|---------------------------------------|
/// | run start                       | agent counts per kind                 |
/// | every tick                      | tick summary, isolated failures       |
/// | every `output_interval_ticks`   | agent counts per kind                 |
/// | run end                         | sensor logs of every agent ever registered |
///
/// Errors from the writer are stored internally because observer methods
/// have no return value.  After the run returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct DataCollector<O: OutputWriter> {
    writer:     O,
    interval:   u64,
    ticks_seen: u64,
    last_error: Option<OutputError>,
}

impl<O: OutputWriter> DataCollector<O> {
    /// Create a collector backed by `writer`, taking the count interval from
    /// `config.output_interval_ticks` (0 disables periodic counts).
    pub fn new(writer: O, config: &SimConfig) -> Self {
        Self {
            writer,
            interval:   config.output_interval_ticks,
            ticks_seen: 0,
            last_error: None,
        }
    }

    /// Take the stored write error (if any) after the run returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the run).
    pub fn into_writer(self) -> O {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            warn!(error = %e, "output write failed");
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }

    fn write_counts<W, A>(&mut self, time: Tick, ctx: &Context<W, A>) {
        let rows: Vec<KindCountRow> = ctx
            .agent_counts()
            .into_iter()
            .map(|(kind, count)| KindCountRow { tick: time.0, kind, count: count as u64 })
            .collect();
        if !rows.is_empty() {
            let result = self.writer.write_kind_counts(&rows);
            self.store_err(result);
        }
    }
}

impl<W, A, O: OutputWriter> TickObserver<W, A> for DataCollector<O> {
    fn on_run_start(&mut self, start: Tick, ctx: &Context<W, A>) {
        self.write_counts(start, ctx);
    }

    fn on_tick_end(&mut self, report: &TickReport, ctx: &Context<W, A>) {
        let row = TickSummaryRow {
            tick:          report.time.0,
            resolved:      report.resolved.len() as u64,
            skipped:       report.skipped.len() as u64,
            failed:        report.failures.len() as u64,
            produced:      report.produced.len() as u64,
            pending:       report.pending as u64,
            active_agents: ctx.agents().len() as u64,
        };
        let result = self.writer.write_tick_summary(&row);
        self.store_err(result);

        if !report.failures.is_empty() {
            let rows: Vec<FailureRow> = report
                .failures
                .iter()
                .map(|f| FailureRow {
                    tick:      report.time.0,
                    action_id: f.id.0,
                    agent_id:  f.agent.0,
                    kind:      f.kind,
                    error:     f.error.to_string(),
                })
                .collect();
            let result = self.writer.write_failures(&rows);
            self.store_err(result);
        }

        self.ticks_seen += 1;
        if self.interval > 0 && self.ticks_seen % self.interval == 0 {
            self.write_counts(report.time, ctx);
        }
    }

    fn on_run_end(&mut self, summary: &RunSummary, ctx: &Context<W, A>) {
        let rows: Vec<SensorSampleRow> = ctx
            .agents()
            .iter_all()
            .flat_map(|agent| {
                agent.log().samples().iter().map(move |s| SensorSampleRow {
                    agent_id:   agent.id().0,
                    agent_kind: agent.kind().to_owned(),
                    tick:       s.time.0,
                    sensor:     s.sensor.clone(),
                    reading:    s.reading.to_string(),
                })
            })
            .collect();
        debug!(samples = rows.len(), ticks = summary.ticks, "writing sensor logs");
        if !rows.is_empty() {
            let result = self.writer.write_sensor_samples(&rows);
            self.store_err(result);
        }

        let result = self.writer.finish();
        self.store_err(result);
    }
}
