use tabfix_model::{CellValue, ExpectedMonth, ProcessingMode, Table};

#[test]
fn table_serializes_with_tagged_cells() {
    let table = Table::from_columns(vec![(
        "Alarm time",
        vec![
            CellValue::Text("2024/05/07 10:00:00".to_string()),
            CellValue::Missing,
        ],
    )])
    .expect("build table");
    let json = serde_json::to_string(&table).expect("serialize table");
    assert!(json.contains(r#"{"kind":"Missing"}"#));
    let round: Table = serde_json::from_str(&json).expect("deserialize table");
    assert_eq!(round, table);
}

#[test]
fn expected_month_rejects_out_of_range_on_deserialize() {
    let ok: ExpectedMonth = serde_json::from_str("7").expect("valid month");
    assert_eq!(ok.get(), 7);
    assert!(serde_json::from_str::<ExpectedMonth>("13").is_err());
}

#[test]
fn mode_uses_snake_case() {
    let json = serde_json::to_string(&ProcessingMode::Alarm).expect("serialize mode");
    assert_eq!(json, r#""alarm""#);
}
