//! Header reconciliation for two-row-header device exports.
//!
//! Row 0 of a device export is decorative (merged title cells), row 1 holds
//! the real column names. Exports repeat column names freely, and some tools
//! have already suffixed the repeats with `.1`, `.2`, ... by the time we see
//! them, so names are deduplicated on their base name.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;

use regex::Regex;
use tabfix_model::{CellValue, ModelError, RawGrid, Table};
use tracing::debug;

use crate::datetime::{DateOrder, clean_date_text, parse_generic};
use crate::error::Result;

static DOT_SUFFIX_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.\d+$").expect("Invalid dot suffix regex"));

/// Header with any trailing `.<digits>` removed.
pub fn base_name(header: &str) -> &str {
    match DOT_SUFFIX_REGEX.find(header) {
        Some(m) => &header[..m.start()],
        None => header,
    }
}

/// Whether a column is reformatted as a timestamp.
pub fn is_time_column(name: &str) -> bool {
    name.to_lowercase().contains("time")
}

/// Renames headers so every name is unique.
///
/// Base names seen once keep the bare base name. Repeated base names become
/// `<base>_0`, `<base>_1`, ... from left to right. A generated name that still
/// collides with an earlier final name gets a further `_<n>` suffix.
pub fn deduplicate_headers<S: AsRef<str>>(headers: &[S]) -> Vec<String> {
    let bases: Vec<&str> = headers.iter().map(|h| base_name(h.as_ref())).collect();

    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for base in &bases {
        *counts.entry(*base).or_default() += 1;
    }

    let mut next_index: BTreeMap<&str, usize> = BTreeMap::new();
    let candidates: Vec<String> = bases
        .iter()
        .map(|&base| {
            if counts[base] > 1 {
                let idx = next_index.entry(base).or_default();
                let name = format!("{base}_{idx}");
                *idx += 1;
                name
            } else {
                base.to_string()
            }
        })
        .collect();

    let mut taken: BTreeSet<String> = BTreeSet::new();
    candidates
        .into_iter()
        .map(|candidate| {
            let name = if taken.contains(&candidate) {
                (1..)
                    .map(|n| format!("{candidate}_{n}"))
                    .find(|name| !taken.contains(name))
                    .unwrap_or_default()
            } else {
                candidate
            };
            taken.insert(name.clone());
            name
        })
        .collect()
}

/// Builds a clean device table from a raw two-row-header grid.
pub fn reconcile<S: AsRef<str>>(raw: &RawGrid, drop_phrases: &[S]) -> Result<Table> {
    if raw.len() < 2 {
        return Err(ModelError::MalformedTable {
            rows: raw.len(),
            required: 2,
        }
        .into());
    }

    let width = raw.rows.get(1).map_or(0, Vec::len);
    let headers: Vec<String> = (0..width)
        .map(|col| raw.cell(1, col).to_text().trim().to_string())
        .collect();

    let kept: Vec<usize> = (0..width)
        .filter(|&col| {
            let header = &headers[col];
            let drop = drop_phrases
                .iter()
                .any(|phrase| header.contains(phrase.as_ref()));
            if drop {
                debug!(column = %header, "dropping column by phrase");
            }
            !drop
        })
        .collect();

    let kept_headers: Vec<&str> = kept.iter().map(|&col| headers[col].as_str()).collect();
    let names = deduplicate_headers(kept_headers.as_slice());

    let mut table = Table::with_height(raw.len() - 2);
    for (name, &col) in names.into_iter().zip(&kept) {
        let time_column = is_time_column(&name);
        let values = (2..raw.len())
            .map(|row| {
                let text = raw.cell(row, col).to_text();
                if time_column {
                    reformat_time(&text)
                } else {
                    CellValue::from_text(&text)
                }
            })
            .collect();
        table.push_column(name, values)?;
    }
    Ok(table)
}

/// Generic month-first parse into canonical form; failures become missing.
fn reformat_time(raw: &str) -> CellValue {
    let cleaned = clean_date_text(raw);
    match parse_generic(&cleaned, DateOrder::MonthFirst) {
        Some(value) => CellValue::timestamp(value),
        None => CellValue::Missing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_name_strips_numeric_dot_suffix() {
        assert_eq!(base_name("A.3"), "A");
        assert_eq!(base_name("Temp.12"), "Temp");
        assert_eq!(base_name("v1.2.10"), "v1.2");
        assert_eq!(base_name("A.b"), "A.b");
        assert_eq!(base_name("A."), "A.");
    }

    #[test]
    fn dedup_renames_repeated_bases() {
        assert_eq!(
            deduplicate_headers(&["A", "A", "B", "A.3"]),
            vec!["A_0", "A_1", "B", "A_2"]
        );
    }

    #[test]
    fn dedup_strips_suffix_of_single_bases() {
        assert_eq!(deduplicate_headers(&["A.1", "B"]), vec!["A", "B"]);
    }

    #[test]
    fn dedup_resolves_generated_collisions() {
        assert_eq!(
            deduplicate_headers(&["A", "A", "A_0"]),
            vec!["A_0", "A_1", "A_0_1"]
        );
    }

    #[test]
    fn dedup_is_idempotent() {
        let once = deduplicate_headers(&["A", "A", "B", "A.3", "C.1"]);
        let twice = deduplicate_headers(once.as_slice());
        assert_eq!(once, twice);
    }

    #[test]
    fn time_columns_are_case_insensitive() {
        assert!(is_time_column("Start Time"));
        assert!(is_time_column("TIMESTAMP"));
        assert!(!is_time_column("Duration"));
    }
}
