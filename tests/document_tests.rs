use form_builder::document::io::{
    export_document, fingerprint, import_document, read_document, read_or_empty, write_document,
};
use form_builder::editor::error::EditorError;
use form_builder::factory::element_factory::ElementFactory;
use form_builder::model::attributes::{FieldKind, OptionLayout};
use form_builder::model::element::{ElementId, ElementList};
use form_builder::tree::navigator::find_by_id;

use crate::common::builders::{ids, leaf, forest, sample_forest};

mod common;

fn temp_path(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("form-builder-{}-{}", std::process::id(), name))
}

// ============================================================================
// Import validation
// ============================================================================

#[test]
fn import_rejects_object_root() {
    let mut factory = ElementFactory::new();
    let result = import_document(r#"{ "type": "text" }"#, &mut factory);

    match result {
        Err(EditorError::DocumentShape(message)) => assert!(message.contains("an object"), "{}", message),
        other => panic!("Expected DocumentShape error, got {:?}", other),
    }
    assert_eq!(factory.peek_next(), 1);
}

#[test]
fn import_rejects_invalid_json() {
    let mut factory = ElementFactory::new();
    let result = import_document("[{ not json", &mut factory);

    assert!(matches!(result, Err(EditorError::JsonParse { .. })));
}

#[test]
fn import_accepts_numeric_ids_and_reserves_past_them() {
    let text = r#"[
        { "id": 1700000000000, "type": "text", "name": "Stamp" },
        { "id": "3", "type": "email", "name": "Mail" }
    ]"#;
    let mut factory = ElementFactory::new();
    let forest = import_document(text, &mut factory).expect("import");

    assert_eq!(ids(&forest), vec!["1700000000000", "3"]);
    assert_eq!(factory.peek_next(), 1_700_000_000_001);
}

#[test]
fn import_normalizes_row_columns() {
    let text = r#"[
        { "id": "r", "type": "threeColumnRow", "name": "", "columns": [[{ "id": "a", "type": "text", "name": "A" }]] },
        { "id": "s", "type": "twoColumnRow", "name": "", "columns": [null, [], [], []] },
        { "id": "t", "type": "fourColumnRow", "name": "" }
    ]"#;
    let mut factory = ElementFactory::new();
    let forest = import_document(text, &mut factory).expect("import");

    let counts: Vec<usize> = forest
        .iter()
        .map(|n| n.row().map(|r| r.columns.len()).unwrap_or(0))
        .collect();
    assert_eq!(counts, vec![3, 2, 4]);
    assert!(find_by_id(&forest, &ElementId::from("a")).is_some());
}

#[test]
fn import_gives_fresh_ids_to_duplicates() {
    let text = r#"[
        { "id": "1", "type": "text", "name": "A" },
        { "id": "1", "type": "text", "name": "B" },
        { "type": "text", "name": "C" }
    ]"#;
    let mut factory = ElementFactory::new();
    let forest = import_document(text, &mut factory).expect("import");

    assert_eq!(ids(&forest), vec!["1", "2", "3"]);
}

#[test]
fn import_overlays_attributes_on_defaults() {
    let text = r#"[{ "id": "1", "type": "number", "name": "Qty", "min": "0", "step": 5 }]"#;
    let mut factory = ElementFactory::new();
    let forest = import_document(text, &mut factory).expect("import");

    match forest.get(0).and_then(|n| n.field()) {
        Some(FieldKind::Number(number)) => {
            assert_eq!(number.min, Some(0.0));
            assert_eq!(number.max, None);
            assert_eq!(number.step, 5.0);
        }
        other => panic!("Expected number field, got {:?}", other),
    }
}

#[test]
fn import_keeps_unknown_types() {
    let text = r#"[{ "id": "1", "type": "captcha", "name": "Robot check", "difficulty": 3 }]"#;
    let mut factory = ElementFactory::new();
    let forest = import_document(text, &mut factory).expect("import");

    assert_eq!(forest.get(0).map(|n| n.type_tag()), Some("captcha"));
}

#[test]
fn import_reads_layout_spellings_in_fixed_order() {
    let text = r#"[
        { "id": "1", "type": "radio", "name": "Both", "layout": "horizontal", "radioLayout": "vertical" },
        { "id": "2", "type": "radio", "name": "Radio only", "radioLayout": "horizontal" },
        { "id": "3", "type": "checkbox", "name": "Checkbox only", "checkboxLayout": "horizontal" }
    ]"#;
    let mut factory = ElementFactory::new();
    let forest = import_document(text, &mut factory).expect("mixed layout keys import");

    let layouts: Vec<Option<OptionLayout>> = forest
        .iter()
        .map(|n| match n.field() {
            Some(FieldKind::Radio(group)) => Some(group.layout),
            Some(FieldKind::Checkbox(group)) => Some(group.layout),
            _ => None,
        })
        .collect();
    assert_eq!(
        layouts,
        vec![
            Some(OptionLayout::Horizontal),
            Some(OptionLayout::Horizontal),
            Some(OptionLayout::Horizontal),
        ]
    );
}

// ============================================================================
// Export
// ============================================================================

#[test]
fn export_then_import_reproduces_forest() {
    let original = sample_forest();
    let text = export_document(&original).expect("export");

    let mut factory = ElementFactory::new();
    let imported = import_document(&text, &mut factory).expect("import");

    assert_eq!(imported, original);
}

#[test]
fn export_writes_type_and_columns() {
    let text = export_document(&sample_forest()).expect("export");
    let json: serde_json::Value = serde_json::from_str(&text).expect("valid json");

    assert_eq!(json[0]["type"], "text");
    assert_eq!(json[0]["id"], "1");
    assert_eq!(json[1]["type"], "threeColumnRow");
    assert_eq!(json[1]["columns"].as_array().map(Vec::len), Some(3));
    assert!(json[0].get("columns").is_none(), "Leaves carry no columns");
    assert!(text.contains("\n  {"), "Two-space indentation");
}

#[test]
fn export_writes_integral_numbers_as_integers() {
    let mut factory = ElementFactory::new();
    let forest: ElementList = ["textarea", "rating", "button"]
        .into_iter()
        .map(|tag| factory.create(tag))
        .collect();
    let text = export_document(&forest).expect("export");
    let json: serde_json::Value = serde_json::from_str(&text).expect("valid json");

    assert_eq!(json[0]["rows"], serde_json::json!(4));
    assert_eq!(json[1]["max"], serde_json::json!(5));
    assert_eq!(json[1]["precision"], serde_json::json!(0.5));
    assert!(json[2]["borderRadius"].is_i64());
    assert!(!text.contains("4.0"), "{}", text);
}

// ============================================================================
// Files and fingerprints
// ============================================================================

#[test]
fn write_and_read_document_file() {
    let path = temp_path("roundtrip.json");
    let original = sample_forest();

    write_document(&path, &original).expect("write");
    let mut factory = ElementFactory::new();
    let read = read_document(&path, &mut factory).expect("read");
    let _ = std::fs::remove_file(&path);

    assert_eq!(read, original);
}

#[test]
fn missing_file_reads_as_empty_form() {
    let path = temp_path("does-not-exist.json");
    let mut factory = ElementFactory::new();

    let forest = read_or_empty(&path, &mut factory).expect("empty");
    assert!(forest.is_empty());
}

#[test]
fn read_missing_file_is_io_error() {
    let path = temp_path("also-missing.json");
    let mut factory = ElementFactory::new();

    assert!(matches!(read_document(&path, &mut factory), Err(EditorError::Io { .. })));
}

#[test]
fn fingerprint_tracks_content() {
    let a = sample_forest();
    let b = sample_forest();
    let c = forest(vec![leaf("1", "text", "Other")]);

    assert_eq!(fingerprint(&a), fingerprint(&b));
    assert_ne!(fingerprint(&a), fingerprint(&c));
    assert_eq!(fingerprint(&ElementList::new()).len(), 40);
}
