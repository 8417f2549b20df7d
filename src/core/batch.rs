use crate::db::queries::insert_flights;
use crate::errors::{AppError, AppResult};
use crate::models::flight::Flight;
use rusqlite::Connection;

pub const DEFAULT_BATCH_SIZE: usize = 500;

/// Upper bound for one multi-row insert: 1000 rows × 30 columns stays below
/// SQLite's bound-parameter limit.
pub const MAX_BATCH_SIZE: usize = 1000;

/// Counters kept across all flushes of one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchStats {
    pub flushes: usize,
    pub failed_flushes: usize,
    /// Rows handed to flush calls, committed or not.
    pub rows_flushed: usize,
    pub rows_persisted: usize,
    pub rows_failed: usize,
}

#[derive(Debug)]
pub enum FlushOutcome {
    Empty,
    Committed(usize),
    RolledBack { rows: usize, error: AppError },
}

/// Accumulates flights and writes them with one multi-row insert per flush.
/// Every flush is its own transaction: either all of its rows land or none.
pub struct BatchWriter {
    capacity: usize,
    pending: Vec<Flight>,
    stats: BatchStats,
}

impl BatchWriter {
    pub fn new(capacity: usize) -> AppResult<Self> {
        crate::config::validate_batch_size(capacity)?;

        Ok(Self {
            capacity,
            pending: Vec::with_capacity(capacity),
            stats: BatchStats::default(),
        })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    pub fn is_full(&self) -> bool {
        self.pending.len() >= self.capacity
    }

    pub fn push(&mut self, flight: Flight) {
        self.pending.push(flight);
    }

    pub fn stats(&self) -> BatchStats {
        self.stats
    }

    /// Write the pending rows. A failing insert rolls back the whole batch;
    /// its rows are counted as failed and the writer stays usable.
    pub fn flush(&mut self, conn: &mut Connection) -> FlushOutcome {
        if self.pending.is_empty() {
            return FlushOutcome::Empty;
        }

        let rows = std::mem::take(&mut self.pending);
        self.stats.flushes += 1;
        self.stats.rows_flushed += rows.len();

        match write_batch(conn, &rows) {
            Ok(n) => {
                self.stats.rows_persisted += n;
                FlushOutcome::Committed(n)
            }
            Err(error) => {
                self.stats.failed_flushes += 1;
                self.stats.rows_failed += rows.len();
                FlushOutcome::RolledBack {
                    rows: rows.len(),
                    error,
                }
            }
        }
    }
}

fn write_batch(conn: &mut Connection, rows: &[Flight]) -> AppResult<usize> {
    let tx = conn.transaction()?;
    let n = insert_flights(&tx, rows)?;
    tx.commit()?;
    Ok(n)
}
