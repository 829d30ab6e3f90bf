use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tabfix_model::CANONICAL_TIMESTAMP_FORMAT;

use super::generic::{DateOrder, has_four_digit_year_prefix, parse_generic};
use super::serial::parse_serial;

/// One strategy in the fallback chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateRule {
    StrictCanonical,
    DayFirst,
    MonthFirst,
    SpreadsheetSerial,
}

impl DateRule {
    /// Evaluation order; the first rule that parses wins.
    pub const ORDER: [DateRule; 4] = [
        DateRule::StrictCanonical,
        DateRule::DayFirst,
        DateRule::MonthFirst,
        DateRule::SpreadsheetSerial,
    ];

    /// Applies this rule to an already cleaned, non-empty value.
    pub fn parse(self, value: &str) -> Option<NaiveDateTime> {
        match self {
            Self::StrictCanonical => {
                if !has_four_digit_year_prefix(value) {
                    return None;
                }
                NaiveDateTime::parse_from_str(value, CANONICAL_TIMESTAMP_FORMAT).ok()
            }
            Self::DayFirst => parse_generic(value, DateOrder::DayFirst),
            Self::MonthFirst => parse_generic(value, DateOrder::MonthFirst),
            Self::SpreadsheetSerial => parse_serial(value),
        }
    }
}

/// A resolved value together with the rule that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateCandidate {
    pub value: NaiveDateTime,
    pub rule: DateRule,
}
