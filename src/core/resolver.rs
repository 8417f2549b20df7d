use crate::core::normalize::RowRejection;
use crate::db::queries::{airport_exists, insert_airport_if_absent};
use crate::errors::AppResult;
use crate::models::airport::Airport;
use crate::reference::{AirportDirectory, normalize_code};
use rusqlite::Connection;
use std::collections::HashSet;

/// Makes sure an `airports` row exists for every code a flight uses.
///
/// Existing rows are never modified: the first writer of a code wins.
/// New rows come from the reference directory, or are placeholders for
/// unknown codes.
pub struct AirportResolver<'a> {
    directory: &'a AirportDirectory,
    known: HashSet<String>,
    created: usize,
    placeholders: usize,
}

impl<'a> AirportResolver<'a> {
    pub fn new(directory: &'a AirportDirectory) -> Self {
        Self {
            directory,
            known: HashSet::new(),
            created: 0,
            placeholders: 0,
        }
    }

    /// Ensure `code` exists; returns `true` when this call inserted it.
    pub fn resolve(&mut self, conn: &Connection, code: &str) -> AppResult<bool> {
        let code = normalize_code(code);

        if self.known.contains(&code) {
            return Ok(false);
        }

        if airport_exists(conn, &code)? {
            self.known.insert(code);
            return Ok(false);
        }

        let airport = match self.directory.lookup(&code) {
            Some(info) => Airport::from_reference(&code, info),
            None => Airport::placeholder(&code),
        };

        // ON CONFLICT DO NOTHING: a concurrent writer simply wins
        let inserted = insert_airport_if_absent(conn, &airport)?;
        if inserted {
            self.created += 1;
            if !airport.has_coordinates() {
                self.placeholders += 1;
            }
        }

        self.known.insert(code);
        Ok(inserted)
    }

    /// Ensure both ends of a route exist. The two airports are written in one
    /// savepoint: when either fails, neither is kept and the resolver forgets
    /// what it learned for this route.
    pub fn resolve_route(
        &mut self,
        conn: &mut Connection,
        from: &str,
        to: &str,
    ) -> Result<(), RowRejection> {
        let sp = conn.savepoint().map_err(|e| rejection(from, e))?;
        let counts = (self.created, self.placeholders);
        let mut learned = Vec::new();

        let outcome = [from, to]
            .into_iter()
            .try_for_each(|code| -> Result<(), RowRejection> {
                let code = normalize_code(code);
                let fresh = !self.known.contains(&code);
                self.resolve(&sp, &code).map_err(|e| rejection(&code, e))?;
                if fresh {
                    learned.push(code);
                }
                Ok(())
            })
            .and_then(|()| sp.commit().map_err(|e| rejection(to, e)));

        // an uncommitted savepoint rolls back when dropped
        if outcome.is_err() {
            for code in &learned {
                self.known.remove(code);
            }
            (self.created, self.placeholders) = counts;
        }

        outcome
    }

    /// Airports inserted by this resolver.
    pub fn created(&self) -> usize {
        self.created
    }

    /// Inserted airports that had no reference entry.
    pub fn placeholders(&self) -> usize {
        self.placeholders
    }
}

fn rejection(code: &str, reason: impl std::fmt::Display) -> RowRejection {
    RowRejection::Airport {
        code: normalize_code(code),
        reason: reason.to_string(),
    }
}
