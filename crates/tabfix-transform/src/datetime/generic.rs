//! Generic calendar parsing.
//!
//! Tries a fixed list of layouts. Year-first, ISO 8601 and month-name layouts
//! are unambiguous and accepted as-is. Numeric layouts whose first two fields
//! could be either day or month are tried in the preferred order first and in
//! the other order second, so a value that is only valid one way still parses.

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

/// Which reading to prefer for `NN/NN/YYYY`-style values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateOrder {
    DayFirst,
    MonthFirst,
}

impl DateOrder {
    fn other(self) -> Self {
        match self {
            Self::DayFirst => Self::MonthFirst,
            Self::MonthFirst => Self::DayFirst,
        }
    }
}

const YEAR_FIRST_DATETIME: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S%.f",
    "%Y/%m/%d %H:%M",
    "%Y.%m.%d %H:%M:%S%.f",
    "%Y.%m.%d %H:%M",
];

const YEAR_FIRST_DATE: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%Y.%m.%d"];

const NAMED_MONTH_DATETIME: &[&str] = &[
    "%d-%b-%Y %H:%M:%S%.f", // 15-Jan-2024 10:30:00
    "%d-%b-%Y %H:%M",
    "%d %b %Y %H:%M:%S%.f",
    "%d %b %Y %H:%M",
    "%b %d, %Y %H:%M:%S%.f", // Jan 15, 2024 10:30:00
    "%b %d %Y %H:%M:%S%.f",
];

const NAMED_MONTH_DATE: &[&str] = &[
    "%d-%b-%Y", // 15-Jan-2024
    "%d %b %Y", // 15 Jan 2024
    "%b %d, %Y",
    "%b %d %Y",
    "%Y-%b-%d",
];

const SEPARATORS: &[&str] = &["/", "-", "."];

// Two-digit years first: `%Y` would also accept "24" as the year 24.
const YEARS: &[&str] = &["%y", "%Y"];

const TIMES: &[&str] = &[" %H:%M:%S%.f", " %H:%M", " %I:%M:%S %p", " %I:%M %p"];

struct Layouts {
    datetime: Vec<String>,
    date: Vec<String>,
}

fn ambiguous_layouts(first: &str, second: &str) -> Layouts {
    let mut datetime = Vec::new();
    let mut date = Vec::new();
    for year in YEARS {
        for sep in SEPARATORS {
            let date_part = format!("{first}{sep}{second}{sep}{year}");
            for time in TIMES {
                datetime.push(format!("{date_part}{time}"));
            }
            date.push(date_part);
        }
    }
    Layouts { datetime, date }
}

static DAY_MONTH: LazyLock<Layouts> = LazyLock::new(|| ambiguous_layouts("%d", "%m"));
static MONTH_DAY: LazyLock<Layouts> = LazyLock::new(|| ambiguous_layouts("%m", "%d"));

/// Replaces non-breaking spaces and trims.
pub fn clean_date_text(raw: &str) -> String {
    raw.replace('\u{a0}', " ").trim().to_string()
}

/// Parses a cleaned value with the given day/month preference.
pub fn parse_generic(value: &str, order: DateOrder) -> Option<NaiveDateTime> {
    if value.is_empty() {
        return None;
    }
    parse_year_first(value)
        .or_else(|| parse_ambiguous(value, order))
        .or_else(|| parse_ambiguous(value, order.other()))
        .or_else(|| parse_named_month(value))
        .or_else(|| parse_compact(value))
}

fn parse_year_first(value: &str) -> Option<NaiveDateTime> {
    // `%Y` accepts any digit count, so "05/07/24" would otherwise read as year 5.
    if !has_four_digit_year_prefix(value) {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_local());
    }
    try_layouts(value, YEAR_FIRST_DATETIME, YEAR_FIRST_DATE)
}

pub(crate) fn has_four_digit_year_prefix(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() > 4 && bytes[..4].iter().all(u8::is_ascii_digit) && !bytes[4].is_ascii_digit()
}

fn parse_ambiguous(value: &str, order: DateOrder) -> Option<NaiveDateTime> {
    let layouts: &Layouts = match order {
        DateOrder::DayFirst => &DAY_MONTH,
        DateOrder::MonthFirst => &MONTH_DAY,
    };
    try_layouts(value, layouts.datetime.as_slice(), layouts.date.as_slice())
}

fn parse_named_month(value: &str) -> Option<NaiveDateTime> {
    try_layouts(value, NAMED_MONTH_DATETIME, NAMED_MONTH_DATE)
}

/// `YYYYMMDD` with exactly eight digits.
fn parse_compact(value: &str) -> Option<NaiveDateTime> {
    if value.len() != 8 || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    NaiveDate::parse_from_str(value, "%Y%m%d")
        .ok()
        .map(|d| d.and_time(NaiveTime::MIN))
}

fn try_layouts<S: AsRef<str>>(
    value: &str,
    datetime_formats: &[S],
    date_formats: &[S],
) -> Option<NaiveDateTime> {
    for fmt in datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, fmt.as_ref()) {
            return Some(dt);
        }
    }
    for fmt in date_formats {
        if let Ok(d) = NaiveDate::parse_from_str(value, fmt.as_ref()) {
            return Some(d.and_time(NaiveTime::MIN));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    #[test]
    fn ambiguous_value_follows_preference() {
        assert_eq!(
            parse_generic("05/07/2024 10:00:00", DateOrder::DayFirst),
            Some(ts(2024, 7, 5, 10, 0, 0))
        );
        assert_eq!(
            parse_generic("05/07/2024 10:00:00", DateOrder::MonthFirst),
            Some(ts(2024, 5, 7, 10, 0, 0))
        );
    }

    #[test]
    fn impossible_reading_falls_back_to_the_other_order() {
        // 13 cannot be a month
        assert_eq!(
            parse_generic("13/07/2024 10:00", DateOrder::MonthFirst),
            Some(ts(2024, 7, 13, 10, 0, 0))
        );
        assert_eq!(
            parse_generic("07/13/2024", DateOrder::DayFirst),
            Some(ts(2024, 7, 13, 0, 0, 0))
        );
    }

    #[test]
    fn year_first_layouts_ignore_preference() {
        for order in [DateOrder::DayFirst, DateOrder::MonthFirst] {
            assert_eq!(
                parse_generic("2024-05-07 10:00:00", order),
                Some(ts(2024, 5, 7, 10, 0, 0))
            );
            assert_eq!(
                parse_generic("2024-05-07T10:00:00.250", order),
                Some(
                    NaiveDate::from_ymd_opt(2024, 5, 7)
                        .unwrap()
                        .and_hms_milli_opt(10, 0, 0, 250)
                        .unwrap()
                )
            );
            assert_eq!(parse_generic("20240507", order), Some(ts(2024, 5, 7, 0, 0, 0)));
        }
    }

    #[test]
    fn rfc3339_keeps_local_wall_time() {
        assert_eq!(
            parse_generic("2024-05-07T10:00:00+09:00", DateOrder::DayFirst),
            Some(ts(2024, 5, 7, 10, 0, 0))
        );
    }

    #[test]
    fn two_digit_years_and_meridiem() {
        assert_eq!(
            parse_generic("5/7/24 1:30:00 PM", DateOrder::DayFirst),
            Some(ts(2024, 7, 5, 13, 30, 0))
        );
        assert_eq!(
            parse_generic("05/07/24 10:00:00", DateOrder::MonthFirst),
            Some(ts(2024, 5, 7, 10, 0, 0))
        );
        assert_eq!(
            parse_generic("15.01.2024", DateOrder::MonthFirst),
            Some(ts(2024, 1, 15, 0, 0, 0))
        );
    }

    #[test]
    fn named_months() {
        assert_eq!(
            parse_generic("15-Jan-2024 10:30:00", DateOrder::MonthFirst),
            Some(ts(2024, 1, 15, 10, 30, 0))
        );
        assert_eq!(
            parse_generic("Jan 15, 2024", DateOrder::DayFirst),
            Some(ts(2024, 1, 15, 0, 0, 0))
        );
    }

    #[test]
    fn rejects_non_dates() {
        for value in ["", "45000", "45000.5", "not a date", "2024/13/45 10:00:00"] {
            assert_eq!(parse_generic(value, DateOrder::DayFirst), None, "{value}");
        }
    }

    #[test]
    fn clean_replaces_nbsp() {
        assert_eq!(
            clean_date_text("\u{a0}2024/05/07\u{a0}10:00:00 "),
            "2024/05/07 10:00:00"
        );
    }
}
