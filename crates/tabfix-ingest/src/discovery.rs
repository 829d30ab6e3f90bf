//! Expanding input paths into the files a run will read.

use std::path::{Path, PathBuf};

use crate::error::{IngestError, Result};
use crate::source::SourceKind;

/// A readable input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredFile {
    pub path: PathBuf,
    /// File name as shown to the user and matched by file selection.
    pub name: String,
    pub kind: SourceKind,
}

impl DiscoveredFile {
    fn from_path(path: PathBuf) -> Option<Self> {
        let kind = SourceKind::from_path(&path)?;
        let name = path.file_name()?.to_string_lossy().into_owned();
        Some(Self { path, name, kind })
    }
}

/// An input path that could not be turned into a readable file.
#[derive(Debug)]
pub struct RejectedInput {
    pub path: PathBuf,
    /// Last path component, matched by file selection like [`DiscoveredFile::name`].
    pub name: String,
    pub error: IngestError,
}

impl RejectedInput {
    fn new(path: &Path, error: IngestError) -> Self {
        let name = path
            .file_name()
            .map_or_else(|| path.display().to_string(), |name| name.to_string_lossy().into_owned());
        Self {
            path: path.to_path_buf(),
            name,
            error,
        }
    }
}

/// Files found for a run, plus the inputs that were rejected.
#[derive(Debug, Default)]
pub struct Discovery {
    pub files: Vec<DiscoveredFile>,
    pub rejected: Vec<RejectedInput>,
}

impl Discovery {
    /// True when no input produced anything, readable or not.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty() && self.rejected.is_empty()
    }
}

/// Resolves input paths to files.
///
/// Files are taken as given; directories are scanned non-recursively for
/// supported files, sorted by file name. The relative order of the input
/// paths is kept. A missing path, an unsupported extension or an unreadable
/// directory rejects only that input.
pub fn discover_files(inputs: &[PathBuf]) -> Discovery {
    let mut discovery = Discovery::default();
    for input in inputs {
        if input.is_dir() {
            match list_supported_files(input) {
                Ok(files) => discovery.files.extend(files),
                Err(error) => discovery.rejected.push(RejectedInput::new(input, error)),
            }
        } else if input.is_file() {
            match DiscoveredFile::from_path(input.clone()) {
                Some(file) => discovery.files.push(file),
                None => discovery.rejected.push(RejectedInput::new(
                    input,
                    IngestError::UnsupportedExtension {
                        path: input.clone(),
                    },
                )),
            }
        } else {
            discovery.rejected.push(RejectedInput::new(
                input,
                IngestError::FileNotFound {
                    path: input.clone(),
                },
            ));
        }
    }
    discovery
}

fn list_supported_files(dir: &Path) -> Result<Vec<DiscoveredFile>> {
    let entries = std::fs::read_dir(dir).map_err(|e| IngestError::DirectoryRead {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut files = Vec::new();
    for entry_result in entries {
        let entry = entry_result.map_err(|e| IngestError::DirectoryRead {
            path: dir.to_path_buf(),
            source: e,
        })?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        match DiscoveredFile::from_path(path) {
            Some(file) => files.push(file),
            None => tracing::trace!(path = %entry.path().display(), "skipping unsupported file"),
        }
    }

    // Sort by filename
    files.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_dir() -> TempDir {
        let dir = TempDir::new().unwrap();
        for name in &["b_device.csv", "a_alarm.xlsx", "README.md", "c.tsv"] {
            std::fs::write(dir.path().join(name), "header\ndata").unwrap();
        }
        std::fs::create_dir(dir.path().join("nested.csv")).unwrap();
        dir
    }

    #[test]
    fn test_directory_is_scanned_and_sorted() {
        let dir = create_test_dir();
        let files = discover_files(&[dir.path().to_path_buf()]).files;
        let names: Vec<&str> = files.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["a_alarm.xlsx", "b_device.csv", "c.tsv"]);
        assert_eq!(files[0].kind, SourceKind::Spreadsheet);
    }

    #[test]
    fn test_explicit_files_keep_input_order() {
        let dir = create_test_dir();
        let inputs = vec![
            dir.path().join("c.tsv"),
            dir.path().join("b_device.csv"),
        ];
        let files = discover_files(&inputs).files;
        assert_eq!(files[0].name, "c.tsv");
        assert_eq!(files[1].name, "b_device.csv");
    }

    #[test]
    fn test_unsupported_explicit_file() {
        let dir = create_test_dir();
        let discovery = discover_files(&[dir.path().join("README.md")]);
        assert!(discovery.files.is_empty());
        assert_eq!(discovery.rejected[0].name, "README.md");
        assert!(matches!(
            discovery.rejected[0].error,
            IngestError::UnsupportedExtension { .. }
        ));
    }

    #[test]
    fn test_missing_input() {
        let discovery = discover_files(&[PathBuf::from("/no/such/input.csv")]);
        assert!(matches!(
            discovery.rejected[0].error,
            IngestError::FileNotFound { .. }
        ));
    }

    #[test]
    fn test_bad_input_does_not_hide_good_ones() {
        let dir = create_test_dir();
        let discovery = discover_files(&[
            dir.path().join("b_device.csv"),
            dir.path().join("gone.csv"),
            dir.path().join("c.tsv"),
        ]);
        let names: Vec<&str> = discovery.files.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["b_device.csv", "c.tsv"]);
        assert_eq!(discovery.rejected.len(), 1);
        assert_eq!(discovery.rejected[0].name, "gone.csv");
        assert!(!discovery.is_empty());
    }

    #[test]
    fn test_no_inputs_is_empty() {
        assert!(discover_files(&[]).is_empty());
    }
}
