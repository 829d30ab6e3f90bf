use std::path::PathBuf;

use serde::Serialize;
use tabfix_model::{ProcessingMode, Table};
use tabfix_transform::{DateDiagnostics, NormalizationReport};

/// Outcome of one input file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "message", rename_all = "snake_case")]
pub enum FileStatus {
    Cleaned,
    Failed(String),
}

#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub name: String,
    pub path: PathBuf,
    pub status: FileStatus,
    pub rows: usize,
    pub columns: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_report: Option<NormalizationReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnostics: Option<DateDiagnostics>,
}

impl FileReport {
    pub fn failed(&self) -> bool {
        matches!(self.status, FileStatus::Failed(_))
    }
}

/// A cleaned table and the file name it is written under.
#[derive(Debug, Clone)]
pub struct CleanedOutput {
    pub file_name: String,
    pub table: Table,
}

#[derive(Debug)]
pub struct RunResult {
    pub mode: ProcessingMode,
    pub files: Vec<FileReport>,
    pub outputs: Vec<CleanedOutput>,
    /// Paths written by the output stage; empty for dry runs.
    pub written: Vec<PathBuf>,
    pub errors: Vec<String>,
    pub has_errors: bool,
}

impl RunResult {
    pub fn total_rows(&self) -> usize {
        self.outputs.iter().map(|output| output.table.height()).sum()
    }

    /// True when there is no cleaned row to show or write.
    pub fn is_empty(&self) -> bool {
        self.total_rows() == 0
    }
}
