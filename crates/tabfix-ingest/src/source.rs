//! Format dispatch by file extension.

use std::path::Path;

use tabfix_model::RawGrid;

use crate::delimited::read_delimited;
use crate::error::{IngestError, Result};
use crate::xlsx::read_spreadsheet;

/// Input formats recognised by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// Comma-separated text (`.csv`, `.txt`).
    Csv,
    /// Tab-separated text (`.tsv`).
    Tsv,
    /// Workbook readable by calamine (`.xlsx`, `.xlsm`, `.xlsb`, `.xls`, `.ods`).
    Spreadsheet,
}

impl SourceKind {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "csv" | "txt" => Some(Self::Csv),
            "tsv" => Some(Self::Tsv),
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Some(Self::Spreadsheet),
            _ => None,
        }
    }
}

/// Reads any supported file into a raw grid.
pub fn read_grid(path: &Path) -> Result<RawGrid> {
    match SourceKind::from_path(path) {
        Some(SourceKind::Csv) => read_delimited(path, b','),
        Some(SourceKind::Tsv) => read_delimited(path, b'\t'),
        Some(SourceKind::Spreadsheet) => read_spreadsheet(path),
        None => Err(IngestError::UnsupportedExtension {
            path: path.to_path_buf(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_is_case_insensitive() {
        assert_eq!(
            SourceKind::from_path(Path::new("a/B.XLSX")),
            Some(SourceKind::Spreadsheet)
        );
        assert_eq!(
            SourceKind::from_path(Path::new("alarms.csv")),
            Some(SourceKind::Csv)
        );
        assert_eq!(SourceKind::from_path(Path::new("notes.md")), None);
        assert_eq!(SourceKind::from_path(Path::new("noext")), None);
    }

    #[test]
    fn unsupported_extension_is_an_error() {
        let result = read_grid(Path::new("report.pdf"));
        assert!(matches!(
            result,
            Err(IngestError::UnsupportedExtension { .. })
        ));
    }
}
