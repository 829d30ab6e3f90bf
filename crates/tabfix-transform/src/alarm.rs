//! Alarm-log cleaning: single-row header, date column normalization and the
//! exclusion list.

use tabfix_model::{CellValue, ModelError, RawCell, RawGrid, RunConfig, Table};
use tracing::{debug, warn};

use crate::datetime::{NormalizationReport, normalize_with_report};
use crate::diagnostics::{DateDiagnostics, diagnose};
use crate::error::Result;
use crate::filter::filter_columns;
use crate::header::deduplicate_headers;

/// Result of cleaning one alarm grid.
#[derive(Debug, Clone, PartialEq)]
pub struct AlarmCleaning {
    pub table: Table,
    /// `None` when the date column was absent or already typed.
    pub date_report: Option<NormalizationReport>,
    /// Computed only when diagnostics were requested and the date column exists.
    pub diagnostics: Option<DateDiagnostics>,
}

fn normalize_header(raw: &str) -> String {
    raw.replace('\u{a0}', " ").trim().to_string()
}

/// Builds a table from a grid whose first row is the header.
pub fn alarm_table(raw: &RawGrid) -> Result<Table> {
    if raw.is_empty() {
        return Err(ModelError::MalformedTable {
            rows: 0,
            required: 1,
        }
        .into());
    }

    let width = raw.rows.first().map_or(0, Vec::len);
    let headers: Vec<String> = (0..width)
        .map(|col| normalize_header(&raw.cell(0, col).to_text()))
        .collect();
    let names = deduplicate_headers(headers.as_slice());

    let mut table = Table::with_height(raw.len() - 1);
    for (col, name) in names.into_iter().enumerate() {
        let values = (1..raw.len())
            .map(|row| CellValue::from_text(&raw.cell(row, col).to_text()))
            .collect();
        table.push_column(name, values)?;
    }
    Ok(table)
}

/// True when the column has at least one value and every value is a typed
/// spreadsheet datetime.
fn is_native_datetime_column(raw: &RawGrid, col: usize) -> bool {
    let mut cells = (1..raw.len())
        .map(|row| raw.cell(row, col))
        .filter(|cell| !cell.is_empty())
        .peekable();
    cells.peek().is_some() && cells.all(|cell| matches!(cell, RawCell::DateTime(_)))
}

fn render_native(raw: &RawGrid, col: usize) -> Vec<CellValue> {
    (1..raw.len())
        .map(|row| match raw.cell(row, col) {
            RawCell::DateTime(value) => CellValue::timestamp(*value),
            _ => CellValue::Missing,
        })
        .collect()
}

/// Cleans one alarm grid: header, date column, then the exclusion list.
pub fn clean_alarm_grid(raw: &RawGrid, config: &RunConfig) -> Result<AlarmCleaning> {
    let mut table = alarm_table(raw)?;
    let date_column = config.alarm_date_column.as_str();

    let mut date_report = None;
    let mut diagnostics = None;
    let date_index = table
        .column_names()
        .iter()
        .position(|name| *name == date_column);
    match date_index {
        Some(col) => {
            if config.diagnostics {
                diagnostics = table.column(date_column).map(diagnose);
            }
            if is_native_datetime_column(raw, col) {
                debug!(column = date_column, "date column is natively typed");
                table.replace_column(date_column, render_native(raw, col))?;
            } else {
                let values = table.column(date_column).unwrap_or_default();
                let (normalized, report) = normalize_with_report(values, config.expected_month);
                debug!(
                    column = date_column,
                    resolved = report.resolved(),
                    unresolved = report.unresolved,
                    swapped = report.month_swapped,
                    "normalized date column"
                );
                table.replace_column(date_column, normalized)?;
                date_report = Some(report);
            }
        }
        None => warn!(column = date_column, "expected date column not found"),
    }

    let table = filter_columns(table, config.alarm_excluded_columns.as_slice());
    Ok(AlarmCleaning {
        table,
        date_report,
        diagnostics,
    })
}
