use crate::errors::{AppError, AppResult};
use crate::models::airport::Airport;
use crate::models::flight::{Flight, FlightField};
use crate::utils::date::{format_date, parse_date};
use chrono::NaiveDate;
use rusqlite::types::Value;
use rusqlite::{Connection, OptionalExtension, Row, params, params_from_iter};

// ---------------------------
// Airports
// ---------------------------

pub fn airport_exists(conn: &Connection, code: &str) -> AppResult<bool> {
    let mut stmt = conn.prepare_cached("SELECT 1 FROM airports WHERE code = ?1 LIMIT 1")?;
    let found = stmt.query_row([code], |_| Ok(())).optional()?;
    Ok(found.is_some())
}

/// Insert an airport unless its code already exists.
/// Returns `true` when a row was actually written.
pub fn insert_airport_if_absent(conn: &Connection, airport: &Airport) -> AppResult<bool> {
    let mut stmt = conn.prepare_cached(
        "INSERT INTO airports (code, name, city, country, latitude, longitude)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)
         ON CONFLICT(code) DO NOTHING",
    )?;

    let changed = stmt.execute(params![
        airport.code,
        airport.name,
        airport.city,
        airport.country,
        airport.latitude,
        airport.longitude,
    ])?;

    Ok(changed == 1)
}

/// Overwrite name, location and coordinates of an existing airport.
pub fn update_airport(conn: &Connection, airport: &Airport) -> AppResult<bool> {
    let mut stmt = conn.prepare_cached(
        "UPDATE airports
         SET name = ?2, city = ?3, country = ?4, latitude = ?5, longitude = ?6
         WHERE code = ?1",
    )?;

    let changed = stmt.execute(params![
        airport.code,
        airport.name,
        airport.city,
        airport.country,
        airport.latitude,
        airport.longitude,
    ])?;

    Ok(changed == 1)
}

fn map_airport(row: &Row) -> rusqlite::Result<Airport> {
    Ok(Airport {
        code: row.get("code")?,
        name: row.get("name")?,
        city: row.get("city")?,
        country: row.get("country")?,
        latitude: row.get("latitude")?,
        longitude: row.get("longitude")?,
    })
}

pub fn load_airport(conn: &Connection, code: &str) -> AppResult<Option<Airport>> {
    let mut stmt = conn.prepare_cached(
        "SELECT code, name, city, country, latitude, longitude FROM airports WHERE code = ?1",
    )?;
    Ok(stmt.query_row([code], map_airport).optional()?)
}

pub fn load_airports(conn: &Connection) -> AppResult<Vec<Airport>> {
    let mut stmt = conn.prepare(
        "SELECT code, name, city, country, latitude, longitude FROM airports ORDER BY code ASC",
    )?;

    let rows = stmt.query_map([], map_airport)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

// ---------------------------
// Flights
// ---------------------------

fn field_value(f: &Flight, field: FlightField) -> Value {
    use FlightField::*;

    match field {
        FlightDate => Value::Text(format_date(&f.flight_date)),
        FlightNumber => f.flight_number.clone().into(),
        FromAirport => Value::Text(f.from_airport.clone()),
        ToAirport => Value::Text(f.to_airport.clone()),
        SelectedCrewPic => f.selected_crew_pic.clone().into(),
        SelectedCrewSic => f.selected_crew_sic.clone().into(),
        SelectedCrewRelief => f.selected_crew_relief.clone().into(),
        SelectedCrewStudent => f.selected_crew_student.clone().into(),
        ActualDepartureTime => f.actual_departure_time.clone().into(),
        ActualArrivalTime => f.actual_arrival_time.clone().into(),
        Distance => f.distance.into(),
        TotalTime => f.total_time.into(),
        Pic => f.pic.into(),
        Sic => f.sic.into(),
        Night => f.night.into(),
        ActualInstrument => f.actual_instrument.into(),
        DualReceived => f.dual_received.into(),
        DualGiven => f.dual_given.into(),
        Simulator => f.simulator.into(),
        PicNight => f.pic_night.into(),
        SicNight => f.sic_night.into(),
        DualReceivedNight => f.dual_received_night.into(),
        AircraftId => f.aircraft_id.clone().into(),
        AircraftType => f.aircraft_type.clone().into(),
        AircraftMake => f.aircraft_make.clone().into(),
        AircraftModel => f.aircraft_model.clone().into(),
        EngineType => f.engine_type.clone().into(),
        Category => f.category.clone().into(),
        AircraftClass => f.aircraft_class.clone().into(),
        Notes => f.notes.clone().into(),
    }
}

fn columns_list() -> String {
    FlightField::ALL
        .iter()
        .map(FlightField::column)
        .collect::<Vec<_>>()
        .join(", ")
}

/// `INSERT INTO flights (...) VALUES (?, ...), (?, ...)` for `rows` rows.
fn bulk_insert_sql(rows: usize) -> String {
    let one_row = format!("({})", vec!["?"; FlightField::ALL.len()].join(", "));
    format!(
        "INSERT INTO flights ({}) VALUES {}",
        columns_list(),
        vec![one_row; rows].join(", ")
    )
}

/// Insert all `flights` with a single multi-row statement.
/// Returns the number of inserted rows.
pub fn insert_flights(conn: &Connection, flights: &[Flight]) -> AppResult<usize> {
    if flights.is_empty() {
        return Ok(0);
    }

    let values = flights
        .iter()
        .flat_map(|f| FlightField::ALL.iter().map(move |field| field_value(f, *field)));

    let inserted = conn.execute(&bulk_insert_sql(flights.len()), params_from_iter(values))?;
    Ok(inserted)
}

fn map_flight(row: &Row) -> rusqlite::Result<Flight> {
    let date_str: String = row.get("flight_date")?;
    let flight_date = parse_date(&date_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidDate(date_str.clone())),
        )
    })?;

    Ok(Flight {
        flight_date,
        flight_number: row.get("flight_number")?,
        from_airport: row.get("from_airport")?,
        to_airport: row.get("to_airport")?,
        selected_crew_pic: row.get("selected_crew_pic")?,
        selected_crew_sic: row.get("selected_crew_sic")?,
        selected_crew_relief: row.get("selected_crew_relief")?,
        selected_crew_student: row.get("selected_crew_student")?,
        actual_departure_time: row.get("actual_departure_time")?,
        actual_arrival_time: row.get("actual_arrival_time")?,
        distance: row.get("distance")?,
        total_time: row.get("total_time")?,
        pic: row.get("pic")?,
        sic: row.get("sic")?,
        night: row.get("night")?,
        actual_instrument: row.get("actual_instrument")?,
        dual_received: row.get("dual_received")?,
        dual_given: row.get("dual_given")?,
        simulator: row.get("simulator")?,
        pic_night: row.get("pic_night")?,
        sic_night: row.get("sic_night")?,
        dual_received_night: row.get("dual_received_night")?,
        aircraft_id: row.get("aircraft_id")?,
        aircraft_type: row.get("aircraft_type")?,
        aircraft_make: row.get("aircraft_make")?,
        aircraft_model: row.get("aircraft_model")?,
        engine_type: row.get("engine_type")?,
        category: row.get("category")?,
        aircraft_class: row.get("aircraft_class")?,
        notes: row.get("notes")?,
    })
}

/// All flights in date order (insertion order within a day).
pub fn load_flights(conn: &Connection) -> AppResult<Vec<Flight>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM flights ORDER BY flight_date ASC, id ASC",
        columns_list()
    ))?;

    let rows = stmt.query_map([], map_flight)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

// ---------------------------
// Clearing
// ---------------------------

/// Delete every flight, and every airport unless `keep_airports`.
/// Runs in one transaction; returns `(flights, airports)` deleted.
pub fn clear_imported_data(conn: &mut Connection, keep_airports: bool) -> AppResult<(usize, usize)> {
    let tx = conn.transaction()?;

    let flights = tx.execute("DELETE FROM flights", [])?;
    let airports = if keep_airports {
        0
    } else {
        tx.execute("DELETE FROM airports", [])?
    };

    tx.commit()?;
    Ok((flights, airports))
}

// ---------------------------
// Statistics
// ---------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct FlightStats {
    pub count: i64,
    pub first: Option<NaiveDate>,
    pub last: Option<NaiveDate>,
    pub total_hours: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AirportStats {
    pub total: i64,
    pub with_coordinates: i64,
}

pub fn flight_stats(conn: &Connection) -> AppResult<FlightStats> {
    let (count, first, last, total_hours): (i64, Option<String>, Option<String>, Option<f64>) =
        conn.query_row(
            "SELECT COUNT(*), MIN(flight_date), MAX(flight_date), SUM(total_time) FROM flights",
            [],
            |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?)),
        )?;

    Ok(FlightStats {
        count,
        first: first.as_deref().and_then(parse_date),
        last: last.as_deref().and_then(parse_date),
        total_hours,
    })
}

pub fn airport_stats(conn: &Connection) -> AppResult<AirportStats> {
    let (total, with_coordinates): (i64, i64) = conn.query_row(
        "SELECT COUNT(*),
                COUNT(CASE WHEN latitude IS NOT NULL AND longitude IS NOT NULL THEN 1 END)
         FROM airports",
        [],
        |row| Ok((row.get(0)?, row.get(1)?)),
    )?;

    Ok(AirportStats {
        total,
        with_coordinates,
    })
}
