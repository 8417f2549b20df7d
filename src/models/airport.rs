use crate::reference::AirportInfo;

/// Placeholder used for city/country of airports missing from reference data.
pub const UNKNOWN: &str = "Unknown";

/// A row of the `airports` table.
#[derive(Debug, Clone, PartialEq)]
pub struct Airport {
    pub code: String,
    pub name: String,
    pub city: Option<String>,
    pub country: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl Airport {
    /// Airport built from an authoritative reference entry.
    pub fn from_reference(code: &str, info: &AirportInfo) -> Self {
        Self {
            code: code.to_string(),
            name: info.name.clone(),
            city: Some(info.city.clone()),
            country: Some(info.country.clone()),
            latitude: Some(info.latitude),
            longitude: Some(info.longitude),
        }
    }

    /// Airport for a code with no reference entry: named after its code,
    /// unknown location, no coordinates.
    pub fn placeholder(code: &str) -> Self {
        Self {
            code: code.to_string(),
            name: code.to_string(),
            city: Some(UNKNOWN.to_string()),
            country: Some(UNKNOWN.to_string()),
            latitude: None,
            longitude: None,
        }
    }

    pub fn has_coordinates(&self) -> bool {
        self.latitude.is_some() && self.longitude.is_some()
    }
}
