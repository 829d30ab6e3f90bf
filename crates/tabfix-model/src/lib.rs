//! Core data model for tabfix.
//!
//! - [`RawGrid`] / [`RawCell`]: untouched cells as read from a source file
//! - [`Table`] / [`CellValue`]: cleaned, uniquely-named columns of text or missing
//! - [`RunConfig`]: the options chosen once per run (mode, expected month, selection)

pub mod cell;
pub mod error;
pub mod grid;
pub mod options;
pub mod table;

pub use cell::{CANONICAL_TIMESTAMP_FORMAT, CellValue};
pub use error::{ModelError, Result};
pub use grid::{RawCell, RawGrid};
pub use options::{
    DEFAULT_ALARM_DATE_COLUMN, DEFAULT_ALARM_EXCLUDED_COLUMNS, DEFAULT_DEVICE_DROP_PHRASES,
    ExpectedMonth, FileSelection, ProcessingMode, RunConfig,
};
pub use table::Table;
