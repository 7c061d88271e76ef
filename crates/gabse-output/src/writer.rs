//! The `OutputWriter` trait implemented by all backend writers.

use crate::{FailureRow, KindCountRow, OutputResult, SensorSampleRow, TickSummaryRow};

/// Trait implemented by the CSV and SQLite writers.
///
/// All methods are infallible from the engine's perspective: errors are
/// stored by the collector and retrieved with
/// [`DataCollector::take_error`][crate::DataCollector::take_error].
pub trait OutputWriter {
    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()>;

    fn write_kind_counts(&mut self, rows: &[KindCountRow]) -> OutputResult<()>;

    fn write_failures(&mut self, rows: &[FailureRow]) -> OutputResult<()>;

    fn write_sensor_samples(&mut self, rows: &[SensorSampleRow]) -> OutputResult<()>;

    /// Flush and close all underlying handles.
    ///
    /// Idempotent: safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
