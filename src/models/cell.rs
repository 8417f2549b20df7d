//! Typed cell values and raw rows, as produced by the spreadsheet readers
//! and consumed by the row normalizer.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    /// Time of day without a date (e.g. an Excel cell formatted "h:mm").
    Time(NaiveTime),
}

static EMPTY: Cell = Cell::Empty;

impl Cell {
    /// Shared blank cell, returned for columns a row does not have.
    pub fn blank() -> &'static Cell {
        &EMPTY
    }

    pub fn text(s: impl Into<String>) -> Self {
        Cell::Text(s.into())
    }

    pub fn is_blank(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Trimmed textual rendering of the cell, `None` when blank.
    pub fn as_text(&self) -> Option<String> {
        let s = match self {
            Cell::Empty => return None,
            Cell::Text(s) => s.trim().to_string(),
            // f64 Display already drops a trailing ".0"
            Cell::Number(n) => n.to_string(),
            Cell::Bool(b) => b.to_string(),
            Cell::Date(d) => d.format("%Y-%m-%d").to_string(),
            Cell::DateTime(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
            Cell::Time(t) => t.format("%H:%M").to_string(),
        };

        if s.is_empty() { None } else { Some(s) }
    }
}

/// One data row keyed by header name. Header names are stored trimmed, so
/// `" flight_from"` and `"flight_from"` address the same cell.
#[derive(Debug, Clone, Default)]
pub struct RawRow {
    cells: HashMap<String, Cell>,
}

impl RawRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, header: &str, cell: Cell) {
        self.cells.insert(header.trim().to_string(), cell);
    }

    /// Cell under `header`; a missing column reads as `Cell::Empty`.
    pub fn get(&self, header: &str) -> &Cell {
        self.cells.get(header.trim()).unwrap_or(Cell::blank())
    }

    /// True when every cell of the row is blank.
    pub fn is_blank(&self) -> bool {
        self.cells.values().all(Cell::is_blank)
    }
}

impl<K: AsRef<str>> FromIterator<(K, Cell)> for RawRow {
    fn from_iter<I: IntoIterator<Item = (K, Cell)>>(iter: I) -> Self {
        let mut row = RawRow::new();
        for (k, v) in iter {
            row.insert(k.as_ref(), v);
        }
        row
    }
}
