//! Spreadsheet reading via `calamine`.

use std::path::Path;

use calamine::{Data, Reader, open_workbook_auto};
use chrono::NaiveDateTime;
use tabfix_model::{RawCell, RawGrid};

use crate::error::{IngestError, Result};

/// Reads the first worksheet of a spreadsheet into a grid.
///
/// Numeric and datetime cells keep their native type. Leading empty rows and
/// columns are preserved so that row positions match what the user sees.
pub fn read_spreadsheet(path: &Path) -> Result<RawGrid> {
    if !path.exists() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let mut workbook = open_workbook_auto(path).map_err(|e| IngestError::Spreadsheet {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let sheet_names: Vec<String> = workbook.sheet_names().to_vec();
    let Some(first) = sheet_names.first() else {
        return Err(IngestError::NoSheets {
            path: path.to_path_buf(),
        });
    };
    if sheet_names.len() > 1 {
        tracing::debug!(
            path = %path.display(),
            sheet = %first,
            ignored = sheet_names.len() - 1,
            "reading first sheet only"
        );
    }

    let range = workbook
        .worksheet_range(first)
        .map_err(|e| IngestError::Spreadsheet {
            path: path.to_path_buf(),
            message: format!("sheet '{first}': {e}"),
        })?;

    let (row_offset, col_offset) = range
        .start()
        .map_or((0, 0), |(row, col)| (row as usize, col as usize));

    let mut rows: Vec<Vec<RawCell>> = Vec::with_capacity(row_offset + range.height());
    rows.resize_with(row_offset, Vec::new);
    for row in range.rows() {
        let mut cells = Vec::with_capacity(col_offset + row.len());
        cells.resize(col_offset, RawCell::Empty);
        cells.extend(row.iter().map(convert_cell));
        rows.push(cells);
    }

    tracing::debug!(path = %path.display(), rows = rows.len(), "read spreadsheet");
    Ok(RawGrid::new(rows))
}

fn convert_cell(cell: &Data) -> RawCell {
    match cell {
        Data::Empty => RawCell::Empty,
        Data::String(value) if value.is_empty() => RawCell::Empty,
        Data::String(value) => RawCell::Text(value.clone()),
        Data::Float(value) => RawCell::Number(*value),
        Data::Int(value) => RawCell::Number(*value as f64),
        Data::Bool(value) => RawCell::Text(if *value { "TRUE" } else { "FALSE" }.to_string()),
        Data::DateTime(value) => value
            .as_datetime()
            .map_or_else(|| RawCell::Number(value.as_f64()), RawCell::DateTime),
        Data::DateTimeIso(value) => parse_iso_datetime(value)
            .map_or_else(|| RawCell::Text(value.clone()), RawCell::DateTime),
        Data::DurationIso(value) => RawCell::Text(value.clone()),
        Data::Error(error) => RawCell::Text(format!("#{error:?}")),
    }
}

fn parse_iso_datetime(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S"))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_scalar_cells() {
        assert_eq!(convert_cell(&Data::Empty), RawCell::Empty);
        assert_eq!(convert_cell(&Data::String(String::new())), RawCell::Empty);
        assert_eq!(
            convert_cell(&Data::String("Alarm".to_string())),
            RawCell::Text("Alarm".to_string())
        );
        assert_eq!(convert_cell(&Data::Int(7)), RawCell::Number(7.0));
        assert_eq!(convert_cell(&Data::Float(1.5)), RawCell::Number(1.5));
        assert_eq!(
            convert_cell(&Data::Bool(true)),
            RawCell::Text("TRUE".to_string())
        );
    }

    #[test]
    fn converts_iso_datetime_strings() {
        let cell = convert_cell(&Data::DateTimeIso("2024-05-07T10:00:00".to_string()));
        let RawCell::DateTime(value) = cell else {
            panic!("expected datetime cell");
        };
        assert_eq!(value.to_string(), "2024-05-07 10:00:00");
    }

    #[test]
    fn missing_workbook_is_not_found() {
        let result = read_spreadsheet(Path::new("/definitely/not/here.xlsx"));
        assert!(matches!(result, Err(IngestError::FileNotFound { .. })));
    }
}
