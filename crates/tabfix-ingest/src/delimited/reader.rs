//! Delimited-text files into raw grids.

use std::path::Path;

use csv::ReaderBuilder;
use tabfix_model::{RawCell, RawGrid};

use super::encoding::decode_text;
use crate::error::{IngestError, Result};

/// Reads a delimited-text file into a grid without treating any row as a header.
pub fn read_delimited(path: &Path, delimiter: u8) -> Result<RawGrid> {
    let bytes = std::fs::read(path).map_err(|e| IngestError::io(path, e))?;
    read_delimited_bytes(&bytes, delimiter, path)
}

/// Same as [`read_delimited`] for bytes already in memory. `path` is only used
/// in error messages.
pub fn read_delimited_bytes(bytes: &[u8], delimiter: u8, path: &Path) -> Result<RawGrid> {
    let text = decode_text(bytes, path)?;
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for (idx, record) in reader.records().enumerate() {
        let record = record.map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: format!("record {idx}: {e}"),
        })?;
        let row: Vec<RawCell> = record
            .iter()
            .map(|value| {
                if value.is_empty() {
                    RawCell::Empty
                } else {
                    RawCell::Text(value.to_string())
                }
            })
            .collect();
        rows.push(row);
    }
    tracing::debug!(path = %path.display(), rows = rows.len(), "read delimited file");
    Ok(RawGrid::new(rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn test_read_keeps_every_row() {
        let file = create_temp_csv("Banner,,\nA,B,C\n1,2,3\n");
        let grid = read_delimited(file.path(), b',').unwrap();
        assert_eq!(grid.len(), 3);
        assert_eq!(grid.cell(0, 0), &RawCell::Text("Banner".to_string()));
        assert_eq!(grid.cell(0, 1), &RawCell::Empty);
        assert_eq!(grid.cell(1, 2), &RawCell::Text("C".to_string()));
    }

    #[test]
    fn test_read_ragged_rows() {
        let file = create_temp_csv("A\nB,C,D\n");
        let grid = read_delimited(file.path(), b',').unwrap();
        assert_eq!(grid.rows[0].len(), 1);
        assert_eq!(grid.rows[1].len(), 3);
    }

    #[test]
    fn test_read_quoted_fields() {
        let file = create_temp_csv("\"Alarm time\",\"Name, full\"\n\"05/07/2024 10:00:00\",x\n");
        let grid = read_delimited(file.path(), b',').unwrap();
        assert_eq!(grid.cell(0, 1), &RawCell::Text("Name, full".to_string()));
        assert_eq!(
            grid.cell(1, 0),
            &RawCell::Text("05/07/2024 10:00:00".to_string())
        );
    }

    #[test]
    fn test_read_tab_delimited() {
        let grid = read_delimited_bytes(b"A\tB\n1\t2\n", b'\t', Path::new("x.tsv")).unwrap();
        assert_eq!(grid.cell(1, 1), &RawCell::Text("2".to_string()));
    }

    #[test]
    fn test_read_missing_file() {
        let result = read_delimited(Path::new("/definitely/not/here.csv"), b',');
        assert!(matches!(result, Err(IngestError::FileNotFound { .. })));
    }
}
