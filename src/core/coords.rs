use crate::db::log::ttlog;
use crate::db::queries::{AirportStats, airport_stats, load_airports, update_airport};
use crate::errors::AppResult;
use crate::models::airport::Airport;
use crate::reference::AirportDirectory;
use crate::ui::messages::{detail, info, success};
use rusqlite::Connection;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoordsSummary {
    /// Airports that had a reference entry and were eligible.
    pub matched: usize,
    /// Rows whose stored values actually changed.
    pub updated: usize,
    pub airports: AirportStats,
}

pub struct CoordsLogic;

impl CoordsLogic {
    /// Overwrite airports with their reference data, in one transaction.
    /// With `missing_only`, rows that already have coordinates are left alone.
    pub fn run(
        conn: &mut Connection,
        directory: &AirportDirectory,
        missing_only: bool,
    ) -> AppResult<CoordsSummary> {
        let tx = conn.transaction()?;

        let mut matched = 0;
        let mut updated = 0;

        for current in load_airports(&tx)? {
            if missing_only && current.has_coordinates() {
                continue;
            }

            let Some(entry) = directory.lookup(&current.code) else {
                continue;
            };
            matched += 1;

            let upgraded = Airport::from_reference(&current.code, entry);
            if upgraded == current {
                continue;
            }

            if update_airport(&tx, &upgraded)? {
                detail(format!(
                    "{}: {} ({:.4}, {:.4})",
                    upgraded.code, upgraded.name, entry.latitude, entry.longitude
                ));
                updated += 1;
            }
        }

        ttlog(
            &tx,
            "coords",
            if missing_only { "missing-only" } else { "all" },
            &format!("Updated {updated} of {matched} airports found in reference data"),
        )?;

        tx.commit()?;

        let airports = airport_stats(conn)?;

        if updated > 0 {
            success(format!("Updated {} airports", updated));
        } else {
            info("No airport needed an update");
        }
        info(format!(
            "{} of {} airports have coordinates",
            airports.with_coordinates, airports.total
        ));

        Ok(CoordsSummary {
            matched,
            updated,
            airports,
        })
    }
}
