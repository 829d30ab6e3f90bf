//! Optional TOML configuration file.
//!
//! ```toml
//! mode = "alarm"
//!
//! [device]
//! drop_phrases = ["Remaining usage time of memory"]
//! excluded_columns = []
//!
//! [alarm]
//! date_column = "Alarm time"
//! excluded_columns = ["Operator"]
//! expected_month = 5
//! ```
//!
//! Every key is optional; missing keys keep the built-in defaults and command
//! line flags override whatever the file sets.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tabfix_model::{ExpectedMonth, ModelError, ProcessingMode, RunConfig};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse TOML config {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid value in config {path}: {source}")]
    Invalid {
        path: PathBuf,
        #[source]
        source: ModelError,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub mode: Option<ProcessingMode>,
    pub device: DeviceSection,
    pub alarm: AlarmSection,
    #[serde(skip)]
    source: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DeviceSection {
    pub drop_phrases: Option<Vec<String>>,
    pub excluded_columns: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AlarmSection {
    pub date_column: Option<String>,
    pub excluded_columns: Option<Vec<String>>,
    /// `0` disables the month check, like on the command line.
    pub expected_month: Option<u32>,
}

pub fn load_config(path: &Path) -> Result<FileConfig, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let mut config: FileConfig = toml::from_str(&contents).map_err(|source| ConfigError::Toml {
        path: path.to_path_buf(),
        source,
    })?;
    config.source = Some(path.to_path_buf());
    Ok(config)
}

impl FileConfig {
    /// Layers the file over the defaults. `mode` wins over the file's mode.
    pub fn into_run_config(self, mode: Option<ProcessingMode>) -> Result<RunConfig, ConfigError> {
        let mut config = RunConfig::new(mode.or(self.mode).unwrap_or_default());
        if let Some(phrases) = self.device.drop_phrases {
            config.device_drop_phrases = phrases;
        }
        if let Some(columns) = self.device.excluded_columns {
            config.device_excluded_columns = columns;
        }
        if let Some(column) = self.alarm.date_column {
            config.alarm_date_column = column;
        }
        if let Some(columns) = self.alarm.excluded_columns {
            config.alarm_excluded_columns = columns;
        }
        if let Some(value) = self.alarm.expected_month {
            config.expected_month =
                ExpectedMonth::from_option_value(value).map_err(|source| ConfigError::Invalid {
                    path: self.source.clone().unwrap_or_default(),
                    source,
                })?;
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_keeps_defaults() {
        let config: FileConfig = toml::from_str("").unwrap();
        assert_eq!(
            config.into_run_config(None).unwrap(),
            RunConfig::default()
        );
    }

    #[test]
    fn sections_override_defaults() {
        let config: FileConfig = toml::from_str(
            r#"
mode = "alarm"

[device]
excluded_columns = ["Serial"]

[alarm]
date_column = "Occurred"
excluded_columns = []
expected_month = 5
"#,
        )
        .unwrap();
        let run = config.into_run_config(None).unwrap();
        assert_eq!(run.mode, ProcessingMode::Alarm);
        assert_eq!(run.device_excluded_columns, vec!["Serial".to_string()]);
        assert_eq!(run.alarm_date_column, "Occurred");
        assert!(run.alarm_excluded_columns.is_empty());
        assert_eq!(run.expected_month.map(ExpectedMonth::get), Some(5));
    }

    #[test]
    fn explicit_mode_wins_over_file() {
        let config: FileConfig = toml::from_str("mode = \"alarm\"").unwrap();
        let run = config.into_run_config(Some(ProcessingMode::Device)).unwrap();
        assert_eq!(run.mode, ProcessingMode::Device);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(toml::from_str::<FileConfig>("[alarm]\ndate_col = \"x\"").is_err());
    }

    #[test]
    fn out_of_range_month_is_invalid() {
        let config: FileConfig = toml::from_str("[alarm]\nexpected_month = 13").unwrap();
        assert!(matches!(
            config.into_run_config(None),
            Err(ConfigError::Invalid { .. })
        ));
    }
}
