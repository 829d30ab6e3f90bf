//! Timestamp parsing and normalization.
//!
//! - **generic**: layout-list parsing with a day-first or month-first preference
//! - **serial**: spreadsheet day-count serials
//! - **rules**: the ordered candidate rules used by the normalizer
//! - **normalizer**: the fallback chain and the expected-month correction pass

pub mod generic;
pub mod normalizer;
pub mod rules;
pub mod serial;

pub use generic::{DateOrder, clean_date_text, parse_generic};
pub use normalizer::{
    NormalizationReport, correct_month, normalize, normalize_with_report, resolve,
};
pub use rules::{DateCandidate, DateRule};
pub use serial::{is_serial_text, parse_serial};
