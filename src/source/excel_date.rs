// src/source/excel_date.rs

use crate::models::cell::Cell;
use calamine::ExcelDateTime;
use chrono::NaiveDateTime;

/// Typed cell for an Excel date/time value.
///
/// The calendar conversion (1900 or 1904 date system) is done by calamine;
/// the raw serial only decides the shape of the cell:
/// - duration ("[h]:mm") → decimal hours
/// - serial below 1      → time of day only
/// - whole number        → calendar date
/// - otherwise           → date and time
pub fn excel_datetime_to_cell(dt: &ExcelDateTime) -> Cell {
    let serial = dt.as_f64();

    if dt.is_duration() {
        return Cell::Number(serial_to_hours(serial));
    }

    match dt.as_datetime() {
        Some(value) => split_datetime(serial, value),
        None => Cell::Number(serial),
    }
}

fn split_datetime(serial: f64, value: NaiveDateTime) -> Cell {
    if !serial.is_finite() || serial < 0.0 {
        return Cell::Number(serial);
    }

    if serial < 1.0 {
        Cell::Time(value.time())
    } else if serial.fract() == 0.0 {
        Cell::Date(value.date())
    } else {
        Cell::DateTime(value)
    }
}

/// Fraction-of-day duration → decimal hours.
pub fn serial_to_hours(serial: f64) -> f64 {
    serial * 24.0
}
