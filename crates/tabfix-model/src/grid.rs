//! Raw, untyped grids as produced by the file readers.

use chrono::NaiveDateTime;

/// A source cell before any cleaning.
///
/// Delimited-text readers only ever produce `Empty` and `Text`. Spreadsheet
/// readers keep numbers and machine-typed datetimes so that callers can decide
/// whether they want the native value or its text rendering.
#[derive(Debug, Clone, PartialEq)]
pub enum RawCell {
    Empty,
    Text(String),
    Number(f64),
    DateTime(NaiveDateTime),
}

impl RawCell {
    /// Untyped text view of the cell, as a "read everything as text" reader
    /// would see it.
    pub fn to_text(&self) -> String {
        match self {
            Self::Empty => String::new(),
            Self::Text(value) => value.clone(),
            Self::Number(value) => format_number(*value),
            Self::DateTime(value) => value.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(value) => value.trim().is_empty(),
            Self::Number(_) | Self::DateTime(_) => false,
        }
    }
}

fn format_number(value: f64) -> String {
    // Integers without decimals
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

/// An ordered sequence of rows. Rows may have different lengths.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawGrid {
    pub rows: Vec<Vec<RawCell>>,
}

impl RawGrid {
    pub fn new(rows: Vec<Vec<RawCell>>) -> Self {
        Self { rows }
    }

    /// Builds a grid of text cells; empty strings become [`RawCell::Empty`].
    pub fn from_text_rows<R, S>(rows: R) -> Self
    where
        R: IntoIterator,
        R::Item: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let rows = rows
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .map(|value| {
                        let value = value.into();
                        if value.is_empty() {
                            RawCell::Empty
                        } else {
                            RawCell::Text(value)
                        }
                    })
                    .collect()
            })
            .collect();
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cell at `(row, col)`, treating cells past the end of a short row as empty.
    pub fn cell(&self, row: usize, col: usize) -> &RawCell {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(col))
            .unwrap_or(&RawCell::Empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn number_text_view_drops_integral_decimals() {
        assert_eq!(RawCell::Number(45000.0).to_text(), "45000");
        assert_eq!(RawCell::Number(45000.25).to_text(), "45000.25");
    }

    #[test]
    fn datetime_text_view() {
        let value = NaiveDate::from_ymd_opt(2024, 1, 2)
            .unwrap()
            .and_hms_opt(3, 4, 5)
            .unwrap();
        assert_eq!(RawCell::DateTime(value).to_text(), "2024-01-02 03:04:05");
    }

    #[test]
    fn short_rows_read_as_empty() {
        let grid = RawGrid::from_text_rows(vec![vec!["a", "b"], vec!["c"]]);
        assert_eq!(grid.cell(1, 1), &RawCell::Empty);
        assert_eq!(grid.cell(5, 0), &RawCell::Empty);
        assert_eq!(grid.cell(0, 1), &RawCell::Text("b".to_string()));
    }
}
