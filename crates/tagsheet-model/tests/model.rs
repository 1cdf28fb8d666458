//! Tests for tagsheet-model types.

use tagsheet_model::{CellValue, ColumnRole, NormalizationContext, RawTable, TagNote};

#[test]
fn table_pads_ragged_rows() {
    let table = RawTable::new(
        None,
        vec![
            vec![CellValue::from("12345")],
            vec![
                CellValue::from("67890"),
                CellValue::from("http://a.com"),
                CellValue::from("extra"),
            ],
        ],
    );
    assert_eq!(table.width(), 3);
    assert!(table.rows().iter().all(|row| row.len() == 3));
    assert_eq!(table.cell(0, 2), Some(&CellValue::Missing));
}

#[test]
fn from_rows_splits_header() {
    let rows = vec![
        vec![CellValue::from("Placement ID"), CellValue::from("VAST Tag")],
        vec![CellValue::from("12345"), CellValue::from("http://a.com")],
    ];
    let table = RawTable::from_rows(rows.clone(), true);
    assert_eq!(table.header_label(0), Some("Placement ID"));
    assert_eq!(table.height(), 1);

    let headerless = RawTable::from_rows(rows, false);
    assert!(!headerless.has_header());
    assert_eq!(headerless.height(), 2);
}

#[test]
fn header_is_padded_to_table_width() {
    let table = RawTable::new(
        Some(vec!["Placement ID".to_string()]),
        vec![vec![CellValue::from("12345"), CellValue::from("http://a.com")]],
    );
    assert_eq!(table.header_label(1), Some(""));
}

#[test]
fn accessors_expose_the_padded_shape() {
    let table = RawTable::from_rows(
        vec![
            vec![CellValue::from("Placement ID"), CellValue::from("Tag")],
            vec![CellValue::from("12345")],
            vec![
                CellValue::from("67890"),
                CellValue::from("http://a.com"),
                CellValue::from("extra"),
            ],
        ],
        true,
    );
    assert_eq!(
        table.header(),
        Some(&["Placement ID".to_string(), "Tag".to_string(), String::new()][..])
    );
    assert_eq!(table.rows().len(), table.height());
    for row in table.rows() {
        assert_eq!(row.len(), table.width());
    }
    assert_eq!(table.rows()[0][1], CellValue::Missing);
}

#[test]
fn cells_stringify_like_a_sheet() {
    assert_eq!(CellValue::Number(54321.0).to_string(), "54321");
    assert_eq!(CellValue::Number(0.25).to_string(), "0.25");
    assert_eq!(CellValue::Bool(true).to_string(), "true");
    assert_eq!(CellValue::Missing.to_string(), "");
    assert_eq!(CellValue::from("   "), CellValue::Missing);
}

#[test]
fn column_iterates_top_to_bottom() {
    let table = RawTable::new(
        None,
        vec![
            vec![CellValue::from("a"), CellValue::from("b")],
            vec![CellValue::from("c"), CellValue::from("d")],
        ],
    );
    let values: Vec<String> = table.column(1).map(ToString::to_string).collect();
    assert_eq!(values, vec!["b", "d"]);
}

#[test]
fn role_labels() {
    assert_eq!(ColumnRole::PlacementId.to_string(), "placement ID");
    assert_eq!(ColumnRole::Tag.to_string(), "tag");
}

#[test]
fn every_note_has_distinct_text() {
    let mut texts: Vec<&str> = TagNote::ALL.iter().map(TagNote::as_str).collect();
    texts.sort_unstable();
    texts.dedup();
    assert_eq!(texts.len(), TagNote::ALL.len());
}

#[test]
fn context_deserializes_with_defaults() {
    let ctx: NormalizationContext = serde_json::from_str("{}").expect("deserialize context");
    assert!(!ctx.apply_kids_compliance);
    let on = NormalizationContext::new().with_kids_compliance(true);
    assert!(on.apply_kids_compliance);
}
