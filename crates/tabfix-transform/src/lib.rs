//! Cleaning transforms for device and alarm exports.
//!
//! - [`reconcile`]: two-row header to a uniquely-named table, time columns reformatted
//! - [`datetime`]: the ambiguous date fallback chain and month correction
//! - [`filter_columns`]: exact-name column denylist
//! - [`aggregate`]: row-wise merge of several tables
//! - [`clean_alarm_grid`]: the full alarm-log path for one file
//! - [`diagnose`]: informational date statistics

pub mod aggregate;
pub mod alarm;
pub mod datetime;
pub mod diagnostics;
pub mod error;
pub mod filter;
pub mod header;

pub use aggregate::aggregate;
pub use alarm::{AlarmCleaning, alarm_table, clean_alarm_grid};
pub use datetime::{
    DateOrder, DateRule, NormalizationReport, correct_month, normalize, normalize_with_report,
};
pub use diagnostics::{DateDiagnostics, diagnose};
pub use error::{Result, TransformError};
pub use filter::filter_columns;
pub use header::{base_name, deduplicate_headers, is_time_column, reconcile};
