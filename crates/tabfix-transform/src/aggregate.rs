//! Row-wise concatenation of cleaned tables.

use tabfix_model::{CellValue, Table};

use crate::error::Result;

/// Concatenates tables into one.
///
/// Columns appear in first-seen order across the inputs. Rows keep input
/// order, and cells of columns a table does not have are missing.
pub fn aggregate(tables: Vec<Table>) -> Result<Table> {
    let mut names: Vec<String> = Vec::new();
    for table in &tables {
        for name in table.column_names() {
            if !names.iter().any(|existing| existing == name) {
                names.push(name.to_string());
            }
        }
    }

    let height: usize = tables.iter().map(Table::height).sum();
    let mut merged: Vec<Vec<CellValue>> = names.iter().map(|_| Vec::with_capacity(height)).collect();
    for table in tables {
        for (name, values) in names.iter().zip(merged.iter_mut()) {
            match table.column(name) {
                Some(column) => values.extend_from_slice(column),
                None => values.extend(std::iter::repeat_n(CellValue::Missing, table.height())),
            }
        }
    }

    let mut combined = Table::with_height(height);
    for (name, values) in names.into_iter().zip(merged) {
        combined.push_column(name, values)?;
    }
    Ok(combined)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(value: &str) -> CellValue {
        CellValue::Text(value.to_string())
    }

    #[test]
    fn empty_input_gives_empty_table() {
        let combined = aggregate(Vec::new()).unwrap();
        assert_eq!(combined.width(), 0);
        assert!(combined.is_empty());
    }

    #[test]
    fn union_of_columns_padded_with_missing() {
        let first = Table::from_columns(vec![
            ("A", vec![text("1"), text("2")]),
            ("B", vec![text("3"), text("4")]),
        ])
        .unwrap();
        let second = Table::from_columns(vec![("B", vec![text("5")]), ("C", vec![text("6")])]).unwrap();

        let combined = aggregate(vec![first, second]).unwrap();
        assert_eq!(combined.column_names(), vec!["A", "B", "C"]);
        assert_eq!(combined.height(), 3);
        assert_eq!(
            combined.column("A").unwrap(),
            &[text("1"), text("2"), CellValue::Missing]
        );
        assert_eq!(combined.column("B").unwrap(), &[text("3"), text("4"), text("5")]);
        assert_eq!(
            combined.column("C").unwrap(),
            &[CellValue::Missing, CellValue::Missing, text("6")]
        );
    }

    #[test]
    fn tables_without_columns_still_contribute_rows() {
        let first = Table::from_columns(vec![("A", vec![text("1")])]).unwrap();
        let combined = aggregate(vec![first, Table::with_height(2)]).unwrap();
        assert_eq!(combined.height(), 3);
        assert_eq!(
            combined.column("A").unwrap(),
            &[text("1"), CellValue::Missing, CellValue::Missing]
        );
    }
}
