use crate::core::batch::{BatchStats, BatchWriter, DEFAULT_BATCH_SIZE, FlushOutcome};
use crate::core::normalize::{RowRejection, normalize_row};
use crate::core::resolver::AirportResolver;
use crate::db::log::ttlog;
use crate::db::queries::{
    AirportStats, FlightStats, airport_stats, clear_imported_data, flight_stats,
};
use crate::errors::AppResult;
use crate::reference::AirportDirectory;
use crate::source::{ColumnMap, Sheet};
use crate::ui::messages::{detail, header, info, success, warning};
use crate::utils::colors::{RESET, color_for_count, color_for_problems, or_dash};
use crate::utils::time::format_hours;
use rusqlite::Connection;

#[derive(Debug, Clone)]
pub struct ImportOptions {
    /// Shown in messages and in the internal log (usually the file name).
    pub source: String,
    pub batch_size: usize,
    /// Delete existing flights (and airports) before importing.
    pub replace: bool,
    /// With `replace`, keep the airports table untouched.
    pub keep_airports: bool,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            source: String::new(),
            batch_size: DEFAULT_BATCH_SIZE,
            replace: false,
            keep_airports: false,
        }
    }
}

/// A row that did not make it into a batch.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedRow {
    /// Spreadsheet line, header being line 1.
    pub line: usize,
    pub reason: RowRejection,
}

#[derive(Debug, Clone)]
pub struct ImportSummary {
    pub rows_read: usize,
    pub imported: usize,
    pub skipped: Vec<SkippedRow>,
    pub failed: usize,
    pub batch: BatchStats,
    pub airports_created: usize,
    pub placeholder_airports: usize,
    /// `(flights, airports)` removed by `--replace`.
    pub cleared: Option<(usize, usize)>,
    pub flights: FlightStats,
    pub airports: AirportStats,
}

impl ImportSummary {
    /// Rows that passed normalization and airport resolution.
    pub fn accepted(&self) -> usize {
        self.imported + self.failed
    }

    pub fn print(&self) {
        header("Import summary");

        println!(
            "  imported: {}{}{}",
            color_for_count(self.imported),
            self.imported,
            RESET
        );
        println!(
            "  skipped:  {}{}{}",
            color_for_problems(self.skipped.len()),
            self.skipped.len(),
            RESET
        );
        println!(
            "  failed:   {}{}{}",
            color_for_problems(self.failed),
            self.failed,
            RESET
        );

        println!(
            "  airports created: {} ({} without reference data)",
            self.airports_created, self.placeholder_airports
        );

        println!();
        println!("  flights in database: {}", self.flights.count);
        println!(
            "  date range: {} → {}",
            or_dash(self.flights.first),
            or_dash(self.flights.last)
        );
        println!(
            "  total time: {}",
            or_dash(self.flights.total_hours.map(format_hours))
        );
        println!(
            "  airports in database: {} ({} with coordinates)",
            self.airports.total, self.airports.with_coordinates
        );
    }
}

pub struct ImportLogic;

impl ImportLogic {
    /// Import every row of `sheet` into `flights`, creating the airports the
    /// rows reference. Rows are committed batch by batch, so a failure part
    /// way leaves earlier batches in place.
    pub fn run(
        conn: &mut Connection,
        sheet: &Sheet,
        map: &ColumnMap,
        directory: &AirportDirectory,
        opts: &ImportOptions,
    ) -> AppResult<ImportSummary> {
        // 1️⃣ Header checks: required columns are fatal, the others are not
        map.check_required(sheet)?;

        for (field, column) in map.unmatched(sheet) {
            warning(format!(
                "Column '{}' not found, {} will be left empty",
                column,
                field.column()
            ));
        }

        let mut batch = BatchWriter::new(opts.batch_size)?;

        // 2️⃣ Optional clean slate
        let cleared = if opts.replace {
            let (flights, airports) = clear_imported_data(conn, opts.keep_airports)?;
            ttlog(
                conn,
                "clear",
                &opts.source,
                &format!("Deleted {flights} flights and {airports} airports before import"),
            )?;
            info(format!(
                "Cleared {} flights and {} airports",
                flights, airports
            ));
            Some((flights, airports))
        } else {
            None
        };

        // 3️⃣ Normalize, resolve, stage
        let mut resolver = AirportResolver::new(directory);
        let mut skipped = Vec::new();

        info(format!(
            "Importing {} rows from {} (batch size {})",
            sheet.len(),
            opts.source,
            batch.capacity()
        ));

        for (idx, row) in sheet.rows().iter().enumerate() {
            let line = idx + 2;

            let staged = normalize_row(row, map).and_then(|flight| {
                resolver.resolve_route(conn, &flight.from_airport, &flight.to_airport)?;
                Ok(flight)
            });

            match staged {
                Ok(flight) => batch.push(flight),
                Err(reason) => {
                    warning(format!("Row {line} skipped: {reason}"));
                    skipped.push(SkippedRow { line, reason });
                    continue;
                }
            }

            if batch.is_full() {
                report_flush(batch.flush(conn), batch.stats());
            }
        }

        // 4️⃣ Remainder
        report_flush(batch.flush(conn), batch.stats());

        // 5️⃣ Totals and audit line
        let stats = batch.stats();
        let flights = flight_stats(conn)?;
        let airports = airport_stats(conn)?;

        ttlog(
            conn,
            "import",
            &opts.source,
            &format!(
                "Imported {} flights, skipped {}, failed {}, created {} airports",
                stats.rows_persisted,
                skipped.len(),
                stats.rows_failed,
                resolver.created()
            ),
        )?;

        if stats.rows_failed == 0 {
            success(format!("Imported {} flights", stats.rows_persisted));
        } else {
            warning(format!(
                "Imported {} flights, {} lost in failed batches",
                stats.rows_persisted, stats.rows_failed
            ));
        }

        Ok(ImportSummary {
            rows_read: sheet.len(),
            imported: stats.rows_persisted,
            skipped,
            failed: stats.rows_failed,
            batch: stats,
            airports_created: resolver.created(),
            placeholder_airports: resolver.placeholders(),
            cleared,
            flights,
            airports,
        })
    }
}

fn report_flush(outcome: FlushOutcome, stats: BatchStats) {
    match outcome {
        FlushOutcome::Empty => {}
        FlushOutcome::Committed(n) => {
            info(format!(
                "Batch {}: {} flights committed ({} so far)",
                stats.flushes, n, stats.rows_persisted
            ));
        }
        FlushOutcome::RolledBack { rows, error } => {
            warning(format!(
                "Batch {} rolled back, {} flights not imported",
                stats.flushes, rows
            ));
            detail(error);
        }
    }
}
