use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    /// The grid does not contain the rows its layout requires.
    #[error("malformed table: expected at least {required} rows, found {rows}")]
    MalformedTable { rows: usize, required: usize },

    #[error("duplicate column name: {name}")]
    DuplicateColumn { name: String },

    #[error("column '{name}' has {found} values, expected {expected}")]
    ColumnLengthMismatch {
        name: String,
        expected: usize,
        found: usize,
    },

    #[error("expected month must be between 0 and 12, got {value}")]
    InvalidExpectedMonth { value: u32 },
}

pub type Result<T> = std::result::Result<T, ModelError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ModelError::MalformedTable {
            rows: 1,
            required: 2,
        };
        assert_eq!(
            err.to_string(),
            "malformed table: expected at least 2 rows, found 1"
        );
    }
}
