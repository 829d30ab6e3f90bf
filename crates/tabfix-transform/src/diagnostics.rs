//! Informational statistics over a raw date column.
//!
//! Nothing here feeds back into normalization; the numbers only help a user
//! judge whether a column is day-first, month-first or serial.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use chrono::Datelike;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tabfix_model::CellValue;

use crate::datetime::{DateOrder, clean_date_text, is_serial_text, parse_generic};

static LOOKS_DMY_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{1,2}/\d{1,2}/\d{4}\s+\d{1,2}:\d{2}:\d{2}").expect("Invalid DMY regex")
});

static LOOKS_YMD_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{4}/\d{1,2}/\d{1,2}\s+\d{1,2}:\d{2}:\d{2}").expect("Invalid YMD regex")
});

static SLASH_DATE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{1,2})/(\d{1,2})/\d{2,4}\b").expect("Invalid slash date regex")
});

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateDiagnostics {
    /// Non-missing cells inspected.
    pub rows: usize,
    pub looks_dmy: usize,
    pub looks_ymd: usize,
    pub looks_serial: usize,
    /// Slash dates whose first field exceeds 12.
    pub unambiguous_day_first: usize,
    /// Slash dates whose second field exceeds 12.
    pub unambiguous_month_first: usize,
    pub months_day_first: BTreeMap<u32, usize>,
    pub months_month_first: BTreeMap<u32, usize>,
}

impl DateDiagnostics {
    /// The month with the most values under the given reading, if any parsed.
    pub fn dominant_month(&self, order: DateOrder) -> Option<u32> {
        let months = match order {
            DateOrder::DayFirst => &self.months_day_first,
            DateOrder::MonthFirst => &self.months_month_first,
        };
        // Ties go to the earliest month.
        months
            .iter()
            .fold(None, |best: Option<(u32, usize)>, (&month, &count)| match best {
                Some((_, best_count)) if best_count >= count => best,
                _ => Some((month, count)),
            })
            .map(|(month, _)| month)
    }
}

pub fn diagnose(values: &[CellValue]) -> DateDiagnostics {
    let mut diagnostics = DateDiagnostics::default();
    for value in values.iter().filter_map(CellValue::as_text) {
        let value = clean_date_text(value);
        if value.is_empty() {
            continue;
        }
        diagnostics.rows += 1;

        if LOOKS_DMY_REGEX.is_match(&value) {
            diagnostics.looks_dmy += 1;
        }
        if LOOKS_YMD_REGEX.is_match(&value) {
            diagnostics.looks_ymd += 1;
        }
        if is_serial_text(&value) {
            diagnostics.looks_serial += 1;
        }
        if let Some(caps) = SLASH_DATE_REGEX.captures(&value) {
            let first: u32 = caps[1].parse().unwrap_or(0);
            let second: u32 = caps[2].parse().unwrap_or(0);
            if first > 12 {
                diagnostics.unambiguous_day_first += 1;
            }
            if second > 12 {
                diagnostics.unambiguous_month_first += 1;
            }
        }

        if let Some(parsed) = parse_generic(&value, DateOrder::DayFirst) {
            *diagnostics.months_day_first.entry(parsed.month()).or_default() += 1;
        }
        if let Some(parsed) = parse_generic(&value, DateOrder::MonthFirst) {
            *diagnostics
                .months_month_first
                .entry(parsed.month())
                .or_default() += 1;
        }
    }
    diagnostics
}
