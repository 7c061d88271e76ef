//! `gabse-output` — data collection for GABSE runs.
//!
//! Two backends are provided, the second behind a Cargo feature:
//!
//! | Feature   | Backend | Files created                                                     |
//! |-----------|---------|-------------------------------------------------------------------|
//! | *(none)*  | CSV     | `tick_summaries.csv`, `kind_counts.csv`, `failures.csv`, `sensor_samples.csv` |
//! | `sqlite`  | SQLite  | `output.db`                                                       |
//!
//! Both implement [`OutputWriter`] and are driven by [`DataCollector`], which
//! implements `gabse_sim::TickObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use gabse_output::{CsvWriter, DataCollector};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut collector = DataCollector::new(writer, engine.config());
//! engine.run(Exhaust, &mut collector)?;
//! if let Some(e) = collector.take_error() {
//!     eprintln!("output error: {e}");
//! }
//! ```

pub mod collector;
pub mod csv;
pub mod error;
pub mod row;
pub mod writer;

#[cfg(feature = "sqlite")]
pub mod sqlite;


pub use collector::DataCollector;
pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use row::{FailureRow, KindCountRow, SensorSampleRow, TickSummaryRow};
pub use writer::OutputWriter;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteWriter;
