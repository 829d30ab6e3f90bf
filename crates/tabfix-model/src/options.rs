//! Per-run options.
//!
//! A [`RunConfig`] is built once from the command line (and optional config
//! file) and passed by reference through the pipeline; nothing mutates it
//! during a run.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// Header phrases whose columns are dropped from device exports.
pub const DEFAULT_DEVICE_DROP_PHRASES: &[&str] = &[
    "Remaining usage time of memory",
    "Power on duration of memory",
];

/// Column carrying the alarm timestamp in alarm exports.
pub const DEFAULT_ALARM_DATE_COLUMN: &str = "Alarm time";

/// Columns removed from alarm exports before they are merged.
pub const DEFAULT_ALARM_EXCLUDED_COLUMNS: &[&str] = &[
    "Alarm Evidence",
    "Evidence Status",
    "Evidence Size",
    "Evidence generation time",
    "Evidence completion time",
    "Alarm Status",
    "Label",
    "Processing Contents",
    "Operator",
    "Process time",
];

/// Which kind of export a run processes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessingMode {
    /// One cleaned table per file, two-row headers reconciled.
    #[default]
    Device,
    /// Alarm logs: date column normalized, all files merged into one table.
    Alarm,
}

impl ProcessingMode {
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Device => "Device",
            Self::Alarm => "Alarm",
        }
    }
}

impl fmt::Display for ProcessingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A calendar month in `1..=12` that alarm timestamps are expected to fall in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct ExpectedMonth(u32);

impl ExpectedMonth {
    pub fn new(month: u32) -> Result<Self> {
        if (1..=12).contains(&month) {
            Ok(Self(month))
        } else {
            Err(ModelError::InvalidExpectedMonth { value: month })
        }
    }

    /// Interprets the user-facing option value, where `0` disables the check.
    pub fn from_option_value(value: u32) -> Result<Option<Self>> {
        match value {
            0 => Ok(None),
            month => Self::new(month).map(Some),
        }
    }

    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for ExpectedMonth {
    type Error = ModelError;

    fn try_from(value: u32) -> Result<Self> {
        Self::new(value)
    }
}

impl From<ExpectedMonth> for u32 {
    fn from(value: ExpectedMonth) -> Self {
        value.0
    }
}

impl fmt::Display for ExpectedMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}", self.0)
    }
}

/// Subset of the input files to include in a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FileSelection {
    #[default]
    All,
    Named(BTreeSet<String>),
}

impl FileSelection {
    /// `All` when no names are given, otherwise exactly the given names.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: BTreeSet<String> = names.into_iter().map(Into::into).collect();
        if names.is_empty() {
            Self::All
        } else {
            Self::Named(names)
        }
    }

    pub fn includes(&self, file_name: &str) -> bool {
        match self {
            Self::All => true,
            Self::Named(names) => names.contains(file_name),
        }
    }
}

/// Immutable configuration for one processing run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub mode: ProcessingMode,
    pub expected_month: Option<ExpectedMonth>,
    pub selection: FileSelection,
    /// Collect per-file date diagnostics (alarm mode only).
    pub diagnostics: bool,
    pub device_drop_phrases: Vec<String>,
    /// Exact column names removed from reconciled device tables.
    pub device_excluded_columns: Vec<String>,
    pub alarm_date_column: String,
    pub alarm_excluded_columns: Vec<String>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            mode: ProcessingMode::default(),
            expected_month: None,
            selection: FileSelection::All,
            diagnostics: false,
            device_drop_phrases: DEFAULT_DEVICE_DROP_PHRASES
                .iter()
                .map(ToString::to_string)
                .collect(),
            device_excluded_columns: Vec::new(),
            alarm_date_column: DEFAULT_ALARM_DATE_COLUMN.to_string(),
            alarm_excluded_columns: DEFAULT_ALARM_EXCLUDED_COLUMNS
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }
}

impl RunConfig {
    #[must_use]
    pub fn new(mode: ProcessingMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_expected_month(mut self, month: Option<ExpectedMonth>) -> Self {
        self.expected_month = month;
        self
    }

    #[must_use]
    pub fn with_selection(mut self, selection: FileSelection) -> Self {
        self.selection = selection;
        self
    }

    #[must_use]
    pub fn with_diagnostics(mut self, enable: bool) -> Self {
        self.diagnostics = enable;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expected_month_zero_disables() {
        assert_eq!(ExpectedMonth::from_option_value(0), Ok(None));
        assert_eq!(
            ExpectedMonth::from_option_value(5).unwrap().map(ExpectedMonth::get),
            Some(5)
        );
        assert_eq!(
            ExpectedMonth::from_option_value(13),
            Err(ModelError::InvalidExpectedMonth { value: 13 })
        );
    }

    #[test]
    fn empty_selection_means_all() {
        let selection = FileSelection::from_names(Vec::<String>::new());
        assert_eq!(selection, FileSelection::All);
        assert!(selection.includes("anything.csv"));
    }

    #[test]
    fn named_selection_filters() {
        let selection = FileSelection::from_names(["a.csv"]);
        assert!(selection.includes("a.csv"));
        assert!(!selection.includes("b.csv"));
    }

    #[test]
    fn default_config_carries_default_lists() {
        let config = RunConfig::new(ProcessingMode::Alarm);
        assert_eq!(config.alarm_date_column, "Alarm time");
        assert_eq!(config.alarm_excluded_columns.len(), 10);
        assert_eq!(config.device_drop_phrases.len(), 2);
        assert!(config.expected_month.is_none());
    }
}
