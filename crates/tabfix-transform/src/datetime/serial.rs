//! Spreadsheet serial dates: days since 1899-12-30, fraction = time of day.

use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use regex::Regex;

static SERIAL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+(\.\d+)?$").expect("Invalid serial regex"));

/// 9999-12-31, the last day spreadsheets can represent.
const MAX_SERIAL_DAYS: f64 = 2_958_465.0;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Whether the value is a bare non-negative number, the only shape routed to
/// serial parsing.
pub fn is_serial_text(value: &str) -> bool {
    SERIAL_REGEX.is_match(value)
}

/// Parses a spreadsheet serial. Non-numeric text is rejected up front.
pub fn parse_serial(value: &str) -> Option<NaiveDateTime> {
    if !is_serial_text(value) {
        return None;
    }
    let serial: f64 = value.parse().ok()?;
    if serial > MAX_SERIAL_DAYS {
        return None;
    }
    let days = serial.trunc() as i64;
    // Millisecond rounding absorbs float noise; output precision is whole seconds.
    let millis = (serial.fract() * MILLIS_PER_DAY).round() as i64;
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?.and_hms_opt(0, 0, 0)?;
    epoch
        .checked_add_signed(TimeDelta::try_days(days)?)?
        .checked_add_signed(TimeDelta::try_seconds(millis / 1000)?)
}
