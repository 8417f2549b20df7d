use chrono::{Datelike, NaiveDate};

/// Text date patterns accepted for flight dates, tried in this order:
/// ISO year-month-day, then US month/day/year, then day/month/year.
pub const FLIGHT_DATE_PATTERNS: [&str; 3] = ["%Y-%m-%d", "%m/%d/%Y", "%d/%m/%Y"];

/// Parse a textual flight date with the first pattern that matches.
///
/// An ambiguous value such as `"03/04/2024"` is read month-first. The year
/// must be written with exactly four digits: `"03/15/24"` is rejected.
pub fn parse_flight_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    FLIGHT_DATE_PATTERNS
        .iter()
        .filter(|fmt| has_four_digit_year(s, fmt))
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .filter(is_storable_date)
}

fn has_four_digit_year(s: &str, fmt: &str) -> bool {
    let year = if fmt.starts_with("%Y") {
        s.split('-').next()
    } else {
        s.rsplit('/').next()
    };
    year.is_some_and(|y| y.len() == 4 && y.bytes().all(|b| b.is_ascii_digit()))
}

/// Dates that fit the `YYYY-MM-DD` column format.
pub fn is_storable_date(d: &NaiveDate) -> bool {
    (1..=9999).contains(&d.year())
}

pub fn format_date(d: &NaiveDate) -> String {
    d.format("%Y-%m-%d").to_string()
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}
