//! Writing cleaned tables and diagnostics.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tabfix_model::{CellValue, Table};
use tracing::info;

use crate::types::{CleanedOutput, FileReport};

/// Writes a table as CSV: header row first, missing cells as empty fields.
pub fn write_table_to<W: Write>(table: &Table, writer: W) -> csv::Result<()> {
    let mut writer = csv::WriterBuilder::new().from_writer(writer);
    writer.write_record(table.column_names())?;
    for row in table.rows() {
        writer.write_record(row.into_iter().map(|cell| match cell {
            CellValue::Text(value) => value.as_str(),
            CellValue::Missing => "",
        }))?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_table(table: &Table, path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    write_table_to(table, BufWriter::new(file))
        .with_context(|| format!("write {}", path.display()))
}

/// Writes every output into `dir`, creating it if needed.
pub fn write_outputs(outputs: &[CleanedOutput], dir: &Path) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
    let mut written = Vec::with_capacity(outputs.len());
    for output in outputs {
        let path = dir.join(&output.file_name);
        write_table(&output.table, &path)?;
        info!(path = %path.display(), rows = output.table.height(), "wrote output");
        written.push(path);
    }
    Ok(written)
}

/// Writes the per-file reports (date counters and diagnostics) as JSON.
pub fn write_diagnostics_json(files: &[FileReport], path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, files)
        .with_context(|| format!("write {}", path.display()))?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_cells_are_empty_fields() {
        let text = |value: &str| CellValue::Text(value.to_string());
        let table = Table::from_columns(vec![
            ("Alarm time", vec![text("2024/05/07 10:00:00"), CellValue::Missing]),
            ("Name", vec![text("a, b"), text("x")]),
        ])
        .unwrap();
        let mut buffer = Vec::new();
        write_table_to(&table, &mut buffer).unwrap();

        insta::assert_snapshot!(String::from_utf8(buffer).unwrap(), @r#"
        Alarm time,Name
        2024/05/07 10:00:00,"a, b"
        ,x
        "#);
    }

    #[test]
    fn header_only_table() {
        let table = Table::from_columns(vec![("A", Vec::new()), ("B", Vec::new())]).unwrap();
        let mut buffer = Vec::new();
        write_table_to(&table, &mut buffer).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), "A,B\n");
    }
}
