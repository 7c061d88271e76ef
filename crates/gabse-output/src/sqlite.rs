//! SQLite output backend (feature `sqlite`).
//!
//! Creates a single `output.db` file in the configured output directory with
//! four tables: `tick_summaries`, `kind_counts`, `failures` and
//! `sensor_samples`.

use std::path::Path;

use rusqlite::Connection;

use crate::writer::OutputWriter;
use crate::{FailureRow, KindCountRow, OutputResult, SensorSampleRow, TickSummaryRow};

/// Writes simulation output to an SQLite database.
pub struct SqliteWriter {
    conn:     Connection,
    finished: bool,
}

impl SqliteWriter {
    /// Open (or create) `output.db` in `dir` and initialise the schema.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let conn = Connection::open(dir.join("output.db"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS tick_summaries (
                 tick          INTEGER PRIMARY KEY,
                 resolved      INTEGER NOT NULL,
                 skipped       INTEGER NOT NULL,
                 failed        INTEGER NOT NULL,
                 produced      INTEGER NOT NULL,
                 pending       INTEGER NOT NULL,
                 active_agents INTEGER NOT NULL
             );
             CREATE TABLE IF NOT EXISTS kind_counts (
                 tick  INTEGER NOT NULL,
                 kind  TEXT    NOT NULL,
                 count INTEGER NOT NULL
             );
             CREATE TABLE IF NOT EXISTS failures (
                 tick      INTEGER NOT NULL,
                 action_id INTEGER NOT NULL,
                 agent_id  INTEGER NOT NULL,
                 kind      TEXT    NOT NULL,
                 error     TEXT    NOT NULL
             );
             CREATE TABLE IF NOT EXISTS sensor_samples (
                 agent_id   INTEGER NOT NULL,
                 agent_kind TEXT    NOT NULL,
                 tick       INTEGER NOT NULL,
                 sensor     TEXT    NOT NULL,
                 reading    TEXT    NOT NULL
             );",
        )?;

        Ok(Self { conn, finished: false })
    }
}

impl OutputWriter for SqliteWriter {
    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.conn.execute(
            "INSERT INTO tick_summaries \
             (tick, resolved, skipped, failed, produced, pending, active_agents) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            rusqlite::params![
                row.tick as i64,
                row.resolved as i64,
                row.skipped as i64,
                row.failed as i64,
                row.produced as i64,
                row.pending as i64,
                row.active_agents as i64,
            ],
        )?;
        Ok(())
    }

    fn write_kind_counts(&mut self, rows: &[KindCountRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt =
                tx.prepare_cached("INSERT INTO kind_counts (tick, kind, count) VALUES (?1, ?2, ?3)")?;
            for row in rows {
                stmt.execute(rusqlite::params![row.tick as i64, row.kind, row.count as i64])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_failures(&mut self, rows: &[FailureRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO failures (tick, action_id, agent_id, kind, error) \
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![
                    row.tick as i64,
                    row.action_id as i64,
                    row.agent_id,
                    row.kind,
                    row.error,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_sensor_samples(&mut self, rows: &[SensorSampleRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO sensor_samples (agent_id, agent_kind, tick, sensor, reading) \
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![
                    row.agent_id,
                    row.agent_kind,
                    row.tick as i64,
                    row.sensor,
                    row.reading,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}
