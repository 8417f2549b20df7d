//! Canonical flight leg as persisted in the `flights` table.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Every persisted flight attribute. The snake_case name of each variant is
/// both its key in the `columns:` config section and its SQL column name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlightField {
    FlightDate,
    FlightNumber,
    FromAirport,
    ToAirport,
    SelectedCrewPic,
    SelectedCrewSic,
    SelectedCrewRelief,
    SelectedCrewStudent,
    ActualDepartureTime,
    ActualArrivalTime,
    Distance,
    TotalTime,
    Pic,
    Sic,
    Night,
    ActualInstrument,
    DualReceived,
    DualGiven,
    Simulator,
    PicNight,
    SicNight,
    DualReceivedNight,
    AircraftId,
    AircraftType,
    AircraftMake,
    AircraftModel,
    EngineType,
    Category,
    AircraftClass,
    Notes,
}

impl FlightField {
    /// All fields, in `flights` column order.
    pub const ALL: [FlightField; 30] = [
        FlightField::FlightDate,
        FlightField::FlightNumber,
        FlightField::FromAirport,
        FlightField::ToAirport,
        FlightField::SelectedCrewPic,
        FlightField::SelectedCrewSic,
        FlightField::SelectedCrewRelief,
        FlightField::SelectedCrewStudent,
        FlightField::ActualDepartureTime,
        FlightField::ActualArrivalTime,
        FlightField::Distance,
        FlightField::TotalTime,
        FlightField::Pic,
        FlightField::Sic,
        FlightField::Night,
        FlightField::ActualInstrument,
        FlightField::DualReceived,
        FlightField::DualGiven,
        FlightField::Simulator,
        FlightField::PicNight,
        FlightField::SicNight,
        FlightField::DualReceivedNight,
        FlightField::AircraftId,
        FlightField::AircraftType,
        FlightField::AircraftMake,
        FlightField::AircraftModel,
        FlightField::EngineType,
        FlightField::Category,
        FlightField::AircraftClass,
        FlightField::Notes,
    ];

    /// Fields a row cannot be persisted without.
    pub const REQUIRED: [FlightField; 3] = [
        FlightField::FlightDate,
        FlightField::FromAirport,
        FlightField::ToAirport,
    ];

    pub fn column(&self) -> &'static str {
        match self {
            FlightField::FlightDate => "flight_date",
            FlightField::FlightNumber => "flight_number",
            FlightField::FromAirport => "from_airport",
            FlightField::ToAirport => "to_airport",
            FlightField::SelectedCrewPic => "selected_crew_pic",
            FlightField::SelectedCrewSic => "selected_crew_sic",
            FlightField::SelectedCrewRelief => "selected_crew_relief",
            FlightField::SelectedCrewStudent => "selected_crew_student",
            FlightField::ActualDepartureTime => "actual_departure_time",
            FlightField::ActualArrivalTime => "actual_arrival_time",
            FlightField::Distance => "distance",
            FlightField::TotalTime => "total_time",
            FlightField::Pic => "pic",
            FlightField::Sic => "sic",
            FlightField::Night => "night",
            FlightField::ActualInstrument => "actual_instrument",
            FlightField::DualReceived => "dual_received",
            FlightField::DualGiven => "dual_given",
            FlightField::Simulator => "simulator",
            FlightField::PicNight => "pic_night",
            FlightField::SicNight => "sic_night",
            FlightField::DualReceivedNight => "dual_received_night",
            FlightField::AircraftId => "aircraft_id",
            FlightField::AircraftType => "aircraft_type",
            FlightField::AircraftMake => "aircraft_make",
            FlightField::AircraftModel => "aircraft_model",
            FlightField::EngineType => "engine_type",
            FlightField::Category => "category",
            FlightField::AircraftClass => "aircraft_class",
            FlightField::Notes => "notes",
        }
    }
}

/// A normalized flight leg.
///
/// Optional attributes are `None` when the source cell was blank, never an
/// empty string. Time accumulators are decimal hours.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Flight {
    pub flight_date: NaiveDate,
    pub flight_number: Option<String>,
    pub from_airport: String,
    pub to_airport: String,

    pub selected_crew_pic: Option<String>,
    pub selected_crew_sic: Option<String>,
    pub selected_crew_relief: Option<String>,
    pub selected_crew_student: Option<String>,

    pub actual_departure_time: Option<String>,
    pub actual_arrival_time: Option<String>,

    pub distance: Option<f64>,
    pub total_time: Option<f64>,
    pub pic: Option<f64>,
    pub sic: Option<f64>,
    pub night: Option<f64>,
    pub actual_instrument: Option<f64>,
    pub dual_received: Option<f64>,
    pub dual_given: Option<f64>,
    pub simulator: Option<f64>,
    pub pic_night: Option<f64>,
    pub sic_night: Option<f64>,
    pub dual_received_night: Option<f64>,

    pub aircraft_id: Option<String>,
    pub aircraft_type: Option<String>,
    pub aircraft_make: Option<String>,
    pub aircraft_model: Option<String>,
    pub engine_type: Option<String>,
    pub category: Option<String>,
    pub aircraft_class: Option<String>,
    pub notes: Option<String>,
}
