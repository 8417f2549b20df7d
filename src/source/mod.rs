// src/source/mod.rs

mod csv_file;
pub mod excel_date;
mod workbook;

use crate::errors::{AppError, AppResult};
use crate::models::cell::{Cell, RawRow};
use crate::models::flight::FlightField;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Known spreadsheet layouts for flight logs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceFormat {
    /// Full logbook export: flight_*, aircraft_* and aircraftType_* columns.
    #[default]
    Logbook,
    /// Flight-only export: aircraft id, type and notes live in flight_* columns.
    Compact,
}

impl SourceFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceFormat::Logbook => "logbook",
            SourceFormat::Compact => "compact",
        }
    }
}

/// Header row plus data rows of one sheet. Fully blank rows are dropped by
/// the readers.
#[derive(Debug, Clone, Default)]
pub struct Sheet {
    headers: Vec<String>,
    rows: Vec<RawRow>,
}

impl Sheet {
    pub fn new(headers: Vec<String>, rows: Vec<RawRow>) -> Self {
        let headers = headers.iter().map(|h| h.trim().to_string()).collect();
        Self { headers, rows }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[RawRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, header: &str) -> bool {
        let wanted = header.trim();
        self.headers.iter().any(|h| h == wanted)
    }
}

/// Read an input file, choosing the reader by extension.
pub fn read_sheet(path: &Path, sheet: Option<&str>) -> AppResult<Sheet> {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "csv" => csv_file::read_csv(path),
        "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => workbook::read_workbook(path, sheet),
        _ => Err(AppError::UnsupportedInput(format!(
            "{} (expected .csv, .xlsx, .xls or .ods)",
            path.display()
        ))),
    }
}

/// Maps flight fields to the header that carries them in a source sheet.
/// Fields without a header are always read as blank.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnMap {
    headers: BTreeMap<FlightField, String>,
}

impl ColumnMap {
    pub fn preset(format: SourceFormat) -> Self {
        use FlightField::*;

        let mut pairs: Vec<(FlightField, &str)> = vec![
            (FlightDate, "flight_flightDate"),
            (FlightNumber, "flight_flightNumber"),
            (FromAirport, "flight_from"),
            (ToAirport, "flight_to"),
            (SelectedCrewPic, "flight_selectedCrewPIC"),
            (SelectedCrewSic, "flight_selectedCrewSIC"),
            (SelectedCrewRelief, "flight_selectedCrewRelief"),
            (SelectedCrewStudent, "flight_selectedCrewStudent"),
            (ActualDepartureTime, "flight_actualDepartureTime"),
            (ActualArrivalTime, "flight_actualArrivalTime"),
            (Distance, "flight_distance"),
            (TotalTime, "flight_totalTime"),
            (Pic, "flight_pic"),
            (Sic, "flight_sic"),
            (Night, "flight_night"),
            (ActualInstrument, "flight_actualInstrument"),
            (DualReceived, "flight_dualReceived"),
            (DualGiven, "flight_dualGiven"),
            (Simulator, "flight_simulator"),
            (PicNight, "flight_picNight"),
            (SicNight, "flight_sicNight"),
        ];

        match format {
            SourceFormat::Logbook => pairs.extend([
                (DualReceivedNight, "flight_dualReceivedNight"),
                (AircraftId, "aircraft_aircraftID"),
                (AircraftType, "aircraftType_type"),
                (AircraftMake, "aircraftType_make"),
                (AircraftModel, "aircraftType_model"),
                (EngineType, "aircraftType_selectedEngineType"),
                (Category, "aircraftType_selectedCategory"),
                (AircraftClass, "aircraftType_selectedAircraftClass"),
                (Notes, "aircraftType_notes"),
            ]),
            SourceFormat::Compact => pairs.extend([
                (AircraftType, "flight_aircraftType"),
                (AircraftId, "flight_aircraftID"),
                (Notes, "flight_notes"),
            ]),
        }

        Self {
            headers: pairs
                .into_iter()
                .map(|(f, h)| (f, h.to_string()))
                .collect(),
        }
    }

    /// Replace the header of individual fields. A blank header unmaps the field.
    pub fn with_overrides(mut self, overrides: &BTreeMap<FlightField, String>) -> Self {
        for (field, header) in overrides {
            let header = header.trim();
            if header.is_empty() {
                self.headers.remove(field);
            } else {
                self.headers.insert(*field, header.to_string());
            }
        }
        self
    }

    pub fn header(&self, field: FlightField) -> Option<&str> {
        self.headers.get(&field).map(String::as_str)
    }

    /// Cell carrying `field` in `row`, blank when the field is unmapped.
    pub fn cell<'r>(&self, row: &'r RawRow, field: FlightField) -> &'r Cell {
        match self.header(field) {
            Some(h) => row.get(h),
            None => Cell::blank(),
        }
    }

    /// Fail when the sheet lacks a column the importer cannot do without.
    pub fn check_required(&self, sheet: &Sheet) -> AppResult<()> {
        for field in FlightField::REQUIRED {
            match self.header(field) {
                Some(h) if sheet.has_column(h) => {}
                Some(h) => {
                    return Err(AppError::MissingColumn {
                        column: h.to_string(),
                    });
                }
                None => {
                    return Err(AppError::MissingColumn {
                        column: field.column().to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Mapped fields whose header does not appear in the sheet.
    pub fn unmatched(&self, sheet: &Sheet) -> Vec<(FlightField, &str)> {
        self.headers
            .iter()
            .filter(|(_, h)| !sheet.has_column(h))
            .map(|(f, h)| (*f, h.as_str()))
            .collect()
    }
}

impl Default for ColumnMap {
    fn default() -> Self {
        Self::preset(SourceFormat::default())
    }
}
