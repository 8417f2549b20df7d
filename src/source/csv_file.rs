use crate::errors::AppResult;
use crate::models::cell::{Cell, RawRow};
use crate::source::Sheet;
use std::path::Path;

/// Read a CSV file with a header row. Every non-blank value becomes a text
/// cell; typing happens later in the normalizer. Bytes that are not valid
/// UTF-8 are replaced with U+FFFD instead of failing the file.
pub(crate) fn read_csv(path: &Path) -> AppResult<Sheet> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(true)
        .from_path(path)?;

    let headers: Vec<String> = rdr.byte_headers()?.iter().map(decode).collect();

    let mut rows = Vec::new();

    for record in rdr.byte_records() {
        let record = record?;

        let row: RawRow = headers
            .iter()
            .zip(record.iter().map(decode))
            .map(|(h, v)| {
                let cell = if v.trim().is_empty() {
                    Cell::Empty
                } else {
                    Cell::text(v)
                };
                (h.as_str(), cell)
            })
            .collect();

        if !row.is_blank() {
            rows.push(row);
        }
    }

    Ok(Sheet::new(headers, rows))
}

fn decode(field: &[u8]) -> String {
    String::from_utf8_lossy(field).into_owned()
}
