#![deny(unsafe_code)]

use std::collections::BTreeSet;

use crate::cell::CellValue;
use crate::error::{ModelError, Result};

/// A named column of cleaned cells.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Column {
    pub name: String,
    pub values: Vec<CellValue>,
}

/// Cleaned table: ordered, uniquely-named columns of equal length.
///
/// The constructors and mutators enforce both invariants, which is why the
/// fields are private.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Table {
    columns: Vec<Column>,
    height: usize,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty-width table that still records a row count.
    pub fn with_height(height: usize) -> Self {
        Self {
            columns: Vec::new(),
            height,
        }
    }

    pub fn from_columns<I, S>(columns: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, Vec<CellValue>)>,
        S: Into<String>,
    {
        let mut table = Self::new();
        for (name, values) in columns {
            table.push_column(name, values)?;
        }
        Ok(table)
    }

    pub fn push_column(&mut self, name: impl Into<String>, values: Vec<CellValue>) -> Result<()> {
        let name = name.into();
        if self.columns.iter().any(|column| column.name == name) {
            return Err(ModelError::DuplicateColumn { name });
        }
        if self.columns.is_empty() && self.height == 0 {
            self.height = values.len();
        }
        if values.len() != self.height {
            return Err(ModelError::ColumnLengthMismatch {
                name,
                expected: self.height,
                found: values.len(),
            });
        }
        self.columns.push(Column { name, values });
        Ok(())
    }

    /// Replaces the values of an existing column, keeping its position.
    pub fn replace_column(&mut self, name: &str, values: Vec<CellValue>) -> Result<()> {
        if values.len() != self.height {
            return Err(ModelError::ColumnLengthMismatch {
                name: name.to_string(),
                expected: self.height,
                found: values.len(),
            });
        }
        if let Some(column) = self.columns.iter_mut().find(|column| column.name == name) {
            column.values = values;
        }
        Ok(())
    }

    pub fn drop_column(&mut self, name: &str) -> Option<Column> {
        let idx = self.columns.iter().position(|column| column.name == name)?;
        Some(self.columns.remove(idx))
    }

    pub fn column(&self, name: &str) -> Option<&[CellValue]> {
        self.columns
            .iter()
            .find(|column| column.name == name)
            .map(|column| column.values.as_slice())
    }

    pub fn column_mut(&mut self, name: &str) -> Option<&mut [CellValue]> {
        self.columns
            .iter_mut()
            .find(|column| column.name == name)
            .map(|column| column.values.as_mut_slice())
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|column| column.name == name)
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns
            .iter()
            .map(|column| column.name.as_str())
            .collect()
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.height == 0
    }

    /// Cells of one row, in column order.
    pub fn row(&self, idx: usize) -> Option<Vec<&CellValue>> {
        if idx >= self.height {
            return None;
        }
        Some(self.columns.iter().map(|column| &column.values[idx]).collect())
    }

    pub fn rows(&self) -> impl Iterator<Item = Vec<&CellValue>> + '_ {
        (0..self.height).map(|idx| {
            self.columns
                .iter()
                .map(|column| &column.values[idx])
                .collect()
        })
    }

    /// True when no two columns share a name. Always holds for tables built
    /// through the public API; exposed for tests and debug assertions.
    pub fn has_unique_names(&self) -> bool {
        let mut seen = BTreeSet::new();
        self.columns.iter().all(|column| seen.insert(&column.name))
    }
}
