//! CSV output backend.
//!
//! Creates four files in the configured output directory:
//! - `tick_summaries.csv`
//! - `kind_counts.csv`
//! - `failures.csv`
//! - `sensor_samples.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{FailureRow, KindCountRow, OutputResult, SensorSampleRow, TickSummaryRow};

/// Writes simulation output to CSV files.
pub struct CsvWriter {
    summaries: Writer<File>,
    counts:    Writer<File>,
    failures:  Writer<File>,
    samples:   Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Open (or create) the CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut summaries = Writer::from_path(dir.join("tick_summaries.csv"))?;
        summaries.write_record(["tick", "resolved", "skipped", "failed", "produced", "pending", "active_agents"])?;

        let mut counts = Writer::from_path(dir.join("kind_counts.csv"))?;
        counts.write_record(["tick", "kind", "count"])?;

        let mut failures = Writer::from_path(dir.join("failures.csv"))?;
        failures.write_record(["tick", "action_id", "agent_id", "kind", "error"])?;

        let mut samples = Writer::from_path(dir.join("sensor_samples.csv"))?;
        samples.write_record(["agent_id", "agent_kind", "tick", "sensor", "reading"])?;

        Ok(Self { summaries, counts, failures, samples, finished: false })
    }
}

impl OutputWriter for CsvWriter {
    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.tick.to_string(),
            row.resolved.to_string(),
            row.skipped.to_string(),
            row.failed.to_string(),
            row.produced.to_string(),
            row.pending.to_string(),
            row.active_agents.to_string(),
        ])?;
        Ok(())
    }

    fn write_kind_counts(&mut self, rows: &[KindCountRow]) -> OutputResult<()> {
        for row in rows {
            self.counts.write_record(&[row.tick.to_string(), row.kind.clone(), row.count.to_string()])?;
        }
        Ok(())
    }

    fn write_failures(&mut self, rows: &[FailureRow]) -> OutputResult<()> {
        for row in rows {
            self.failures.write_record(&[
                row.tick.to_string(),
                row.action_id.to_string(),
                row.agent_id.to_string(),
                row.kind.to_string(),
                row.error.clone(),
            ])?;
        }
        Ok(())
    }

    fn write_sensor_samples(&mut self, rows: &[SensorSampleRow]) -> OutputResult<()> {
        for row in rows {
            self.samples.write_record(&[
                row.agent_id.to_string(),
                row.agent_kind.clone(),
                row.tick.to_string(),
                row.sensor.clone(),
                row.reading.clone(),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.summaries.flush()?;
        self.counts.flush()?;
        self.failures.flush()?;
        self.samples.flush()?;
        Ok(())
    }
}
