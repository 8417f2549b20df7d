// src/source/workbook.rs

use crate::errors::{AppError, AppResult};
use crate::models::cell::{Cell, RawRow};
use crate::source::Sheet;
use crate::source::excel_date::excel_datetime_to_cell;
use calamine::{Data, Reader, open_workbook_auto};
use chrono::{NaiveDate, NaiveDateTime};
use std::path::Path;

/// Read one worksheet of an Excel/ODS workbook. Uses `sheet` when given,
/// the first worksheet otherwise. The first row is the header.
pub(crate) fn read_workbook(path: &Path, sheet: Option<&str>) -> AppResult<Sheet> {
    let mut workbook = open_workbook_auto(path)?;
    let names = workbook.sheet_names();

    let name = match sheet {
        Some(wanted) => names
            .iter()
            .find(|n| n.as_str() == wanted)
            .cloned()
            .ok_or_else(|| {
                AppError::Spreadsheet(format!(
                    "sheet '{}' not found (available: {})",
                    wanted,
                    names.join(", ")
                ))
            })?,
        None => names
            .first()
            .cloned()
            .ok_or_else(|| AppError::Spreadsheet("workbook contains no sheets".to_string()))?,
    };

    let range = workbook.worksheet_range(&name)?;
    let mut data_rows = range.rows();

    let headers: Vec<String> = match data_rows.next() {
        Some(first) => first
            .iter()
            .map(|c| to_cell(c).as_text().unwrap_or_default())
            .collect(),
        None => Vec::new(),
    };

    let mut rows = Vec::new();

    for data in data_rows {
        let row: RawRow = headers
            .iter()
            .zip(data.iter())
            .filter(|(h, _)| !h.trim().is_empty())
            .map(|(h, c)| (h.as_str(), to_cell(c)))
            .collect();

        if !row.is_blank() {
            rows.push(row);
        }
    }

    Ok(Sheet::new(headers, rows))
}

fn to_cell(data: &Data) -> Cell {
    match data {
        Data::Empty | Data::Error(_) => Cell::Empty,
        Data::String(s) => Cell::Text(s.clone()),
        Data::Float(f) => Cell::Number(*f),
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Bool(b) => Cell::Bool(*b),
        Data::DateTime(dt) => excel_datetime_to_cell(dt),
        Data::DateTimeIso(s) => parse_iso(s),
        Data::DurationIso(s) => Cell::Text(s.clone()),
    }
}

/// ISO 8601 values stored by ODS files.
fn parse_iso(s: &str) -> Cell {
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return Cell::DateTime(dt);
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Cell::Date(d);
    }
    Cell::Text(s.to_string())
}
