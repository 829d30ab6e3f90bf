use tabfix_model::Table;
use tracing::debug;

/// Drops every column whose name exactly matches one of `excluded`.
///
/// Names that are not present are ignored.
pub fn filter_columns<S: AsRef<str>>(mut table: Table, excluded: &[S]) -> Table {
    for name in excluded {
        let name = name.as_ref();
        if table.drop_column(name).is_none() {
            debug!(column = name, "excluded column not present");
        }
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use tabfix_model::CellValue;

    fn table(names: &[&str]) -> Table {
        Table::from_columns(names.iter().map(|name| (*name, vec![CellValue::Missing]))).unwrap()
    }

    #[test]
    fn drops_exact_matches_only() {
        let filtered = filter_columns(table(&["Label", "Label 2", "Value"]), &["Label"]);
        assert_eq!(filtered.column_names(), vec!["Label 2", "Value"]);
    }

    #[test]
    fn absent_names_are_ignored() {
        let filtered = filter_columns(table(&["Value"]), &["Operator", "Alarm Status"]);
        assert_eq!(filtered.column_names(), vec!["Value"]);
        assert_eq!(filtered.height(), 1);
    }
}
