//! Raw spreadsheet row → `Flight`.

use crate::models::cell::{Cell, RawRow};
use crate::models::flight::{Flight, FlightField};
use crate::reference::normalize_code;
use crate::source::ColumnMap;
use crate::utils::date::{is_storable_date, parse_flight_date};
use crate::utils::time::{parse_duration_hours, time_to_hours};
use chrono::NaiveDate;
use thiserror::Error;

/// Why a single row was not imported. Never aborts the run.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RowRejection {
    #[error("flight date is blank")]
    BlankDate,

    #[error("unparseable flight date '{0}'")]
    UnparseableDate(String),

    #[error("flight date {0} is out of range")]
    DateOutOfRange(String),

    #[error("origin airport is blank")]
    MissingOrigin,

    #[error("destination airport is blank")]
    MissingDestination,

    #[error("cannot create airport {code}: {reason}")]
    Airport { code: String, reason: String },
}

pub fn normalize_row(row: &RawRow, map: &ColumnMap) -> Result<Flight, RowRejection> {
    use FlightField::*;

    let text = |field| map.cell(row, field).as_text();
    let number = |field| cell_number(map.cell(row, field));
    let duration = |field| cell_duration(map.cell(row, field));

    let flight_date = cell_date(map.cell(row, FlightDate))?;
    let from_airport = text(FromAirport)
        .map(|c| normalize_code(&c))
        .ok_or(RowRejection::MissingOrigin)?;
    let to_airport = text(ToAirport)
        .map(|c| normalize_code(&c))
        .ok_or(RowRejection::MissingDestination)?;

    Ok(Flight {
        flight_date,
        flight_number: text(FlightNumber),
        from_airport,
        to_airport,
        selected_crew_pic: text(SelectedCrewPic),
        selected_crew_sic: text(SelectedCrewSic),
        selected_crew_relief: text(SelectedCrewRelief),
        selected_crew_student: text(SelectedCrewStudent),
        actual_departure_time: text(ActualDepartureTime),
        actual_arrival_time: text(ActualArrivalTime),
        distance: number(Distance),
        total_time: duration(TotalTime),
        pic: duration(Pic),
        sic: duration(Sic),
        night: duration(Night),
        actual_instrument: duration(ActualInstrument),
        dual_received: number(DualReceived),
        dual_given: number(DualGiven),
        simulator: duration(Simulator),
        pic_night: duration(PicNight),
        sic_night: duration(SicNight),
        dual_received_night: duration(DualReceivedNight),
        aircraft_id: text(AircraftId),
        aircraft_type: text(AircraftType),
        aircraft_make: text(AircraftMake),
        aircraft_model: text(AircraftModel),
        engine_type: text(EngineType),
        category: text(Category),
        aircraft_class: text(AircraftClass),
        notes: text(Notes),
    })
}

fn cell_date(cell: &Cell) -> Result<NaiveDate, RowRejection> {
    let date = match cell {
        Cell::Date(d) => *d,
        Cell::DateTime(dt) => dt.date(),
        other => {
            let raw = other.as_text().ok_or(RowRejection::BlankDate)?;
            return parse_flight_date(&raw).ok_or(RowRejection::UnparseableDate(raw));
        }
    };

    if is_storable_date(&date) {
        Ok(date)
    } else {
        Err(RowRejection::DateOutOfRange(date.to_string()))
    }
}

fn cell_number(cell: &Cell) -> Option<f64> {
    match cell {
        Cell::Number(n) => Some(*n),
        Cell::Text(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    }
}

fn cell_duration(cell: &Cell) -> Option<f64> {
    match cell {
        Cell::Number(n) => Some(*n),
        Cell::Time(t) => Some(time_to_hours(t)),
        Cell::Text(s) => parse_duration_hours(s),
        _ => None,
    }
}
