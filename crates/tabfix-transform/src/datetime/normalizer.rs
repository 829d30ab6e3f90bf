//! The date fallback chain and the expected-month correction pass.

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tabfix_model::{CellValue, ExpectedMonth};
use tracing::debug;

use super::generic::clean_date_text;
use super::rules::{DateCandidate, DateRule};

/// Per-column counters collected while normalizing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizationReport {
    pub total: usize,
    pub missing: usize,
    pub strict: usize,
    pub day_first: usize,
    pub month_first: usize,
    pub serial: usize,
    /// Non-empty cells no rule could parse.
    pub unresolved: usize,
    pub month_swapped: usize,
    /// Resolved values left in a month other than the expected one.
    pub month_mismatch_kept: usize,
}

impl NormalizationReport {
    fn record(&mut self, rule: DateRule) {
        match rule {
            DateRule::StrictCanonical => self.strict += 1,
            DateRule::DayFirst => self.day_first += 1,
            DateRule::MonthFirst => self.month_first += 1,
            DateRule::SpreadsheetSerial => self.serial += 1,
        }
    }

    pub fn resolved(&self) -> usize {
        self.strict + self.day_first + self.month_first + self.serial
    }
}

/// Runs the rules in order over a cleaned value and returns the first hit.
pub fn resolve(value: &str) -> Option<DateCandidate> {
    DateRule::ORDER
        .iter()
        .find_map(|&rule| rule.parse(value).map(|value| DateCandidate { value, rule }))
}

/// Swaps day and month when that lands the value in the expected month.
///
/// The swap keeps the time of day. Values whose swap is not a valid date, or
/// whose swap is still in another month, come back unchanged.
pub fn correct_month(value: NaiveDateTime, expected: ExpectedMonth) -> NaiveDateTime {
    if value.month() == expected.get() {
        return value;
    }
    match NaiveDate::from_ymd_opt(value.year(), value.day(), value.month()) {
        Some(swapped) if swapped.month() == expected.get() => swapped.and_time(value.time()),
        _ => value,
    }
}

/// Normalizes a date column into canonical timestamps.
pub fn normalize(values: &[CellValue], expected_month: Option<ExpectedMonth>) -> Vec<CellValue> {
    normalize_with_report(values, expected_month).0
}

/// Like [`normalize`], also returning which rules fired.
pub fn normalize_with_report(
    values: &[CellValue],
    expected_month: Option<ExpectedMonth>,
) -> (Vec<CellValue>, NormalizationReport) {
    let mut report = NormalizationReport {
        total: values.len(),
        ..NormalizationReport::default()
    };

    let output = values
        .iter()
        .enumerate()
        .map(|(row, cell)| {
            let Some(raw) = cell.as_text() else {
                report.missing += 1;
                return CellValue::Missing;
            };
            let cleaned = clean_date_text(raw);
            if cleaned.is_empty() {
                report.missing += 1;
                return CellValue::Missing;
            }
            let Some(candidate) = resolve(&cleaned) else {
                debug!(row, value = %cleaned, "unparseable date");
                report.unresolved += 1;
                return CellValue::Missing;
            };
            report.record(candidate.rule);

            let mut resolved = candidate.value;
            if let Some(expected) = expected_month {
                let corrected = correct_month(resolved, expected);
                if corrected != resolved {
                    report.month_swapped += 1;
                } else if corrected.month() != expected.get() {
                    report.month_mismatch_kept += 1;
                }
                resolved = corrected;
            }
            CellValue::timestamp(resolved)
        })
        .collect();

    (output, report)
}
