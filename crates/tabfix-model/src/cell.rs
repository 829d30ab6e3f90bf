#![deny(unsafe_code)]

use chrono::NaiveDateTime;

/// Output layout for every resolved timestamp.
pub const CANONICAL_TIMESTAMP_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

/// A single cleaned cell. `Missing` is distinct from an empty string.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum CellValue {
    Text(String),
    Missing,
}

impl CellValue {
    /// Builds a cell from raw text, mapping blank input to `Missing`.
    pub fn from_text(raw: &str) -> Self {
        if raw.trim().is_empty() {
            Self::Missing
        } else {
            Self::Text(raw.to_string())
        }
    }

    pub fn timestamp(value: NaiveDateTime) -> Self {
        Self::Text(value.format(CANONICAL_TIMESTAMP_FORMAT).to_string())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value),
            Self::Missing => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }
}

impl From<Option<String>> for CellValue {
    fn from(value: Option<String>) -> Self {
        value.map_or(Self::Missing, Self::Text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn blank_text_is_missing() {
        assert_eq!(CellValue::from_text(""), CellValue::Missing);
        assert_eq!(CellValue::from_text("   "), CellValue::Missing);
        assert_eq!(CellValue::from_text("x"), CellValue::Text("x".to_string()));
    }

    #[test]
    fn timestamp_uses_canonical_layout() {
        let value = NaiveDate::from_ymd_opt(2024, 5, 7)
            .unwrap()
            .and_hms_opt(9, 3, 0)
            .unwrap();
        assert_eq!(
            CellValue::timestamp(value).as_text(),
            Some("2024/05/07 09:03:00")
        );
    }
}
