//! Utility functions for the league engine

use chrono::{Local, NaiveDate};
use uuid::Uuid;

/// Generate a new unique player ID
pub fn generate_player_id() -> String {
    format!("p_{}", Uuid::new_v4().simple())
}

/// Generate a new unique match ID
pub fn generate_match_id() -> String {
    format!("m_{}", Uuid::new_v4().simple())
}

/// Today's date on the local clock
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Parse a strict ISO `YYYY-MM-DD` date
pub fn parse_iso_date(date: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()
}

/// Render a stored ISO date as `DD/MM/YYYY`.
///
/// Only a three-segment dashed value is rearranged; anything else is returned
/// unchanged.
pub fn format_display_date(date: &str) -> String {
    let parts: Vec<&str> = date.split('-').collect();
    match parts.as_slice() {
        [year, month, day] => format!("{}/{}/{}", day, month, year),
        _ => date.to_string(),
    }
}

/// Level with two decimals, as shown next to player names
pub fn format_level(level: f64) -> String {
    format!("{:.2}", level)
}
