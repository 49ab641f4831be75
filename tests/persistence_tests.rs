use form_builder::editor::error::EditorError;
use form_builder::model::field::Field;
use form_builder::persistence::forms::{
    default_copy_name, delete_form, display_name, duplicate_form, rename_form, require_id, summary_line,
};
use form_builder::persistence::http::{error_message, HttpFormStore, DEFAULT_API_URL};
use form_builder::persistence::memory::MemoryFormStore;
use form_builder::persistence::model::{Created, Envelope, FormDocument, FormPayload, FormUpdate};
use form_builder::persistence::store::FormStore;
use reqwest::StatusCode;

fn document(id: &str, name: &str, fields: usize, created_at: Option<&str>) -> FormDocument {
    FormDocument {
        id: id.to_string(),
        name: name.to_string(),
        fields: (0..fields).map(|i| Field::new("text", format!("Field {}", i + 1))).collect(),
        created_at: created_at.map(str::to_string),
    }
}

// ============================================================================
// Wire records
// ============================================================================

#[test]
fn form_document_accepts_numeric_underscore_id() {
    let json = r#"{ "_id": 42, "name": "Survey", "fields": [{ "type": "rating", "label": "Stars", "max": 10 }], "createdAt": "2024-05-01T10:30:00Z" }"#;
    let form: FormDocument = serde_json::from_str(json).expect("parse");

    assert_eq!(form.id, "42");
    assert_eq!(form.fields[0].attributes.max, Some(10.0));
    assert_eq!(form.created_at.as_deref(), Some("2024-05-01T10:30:00Z"));
}

#[test]
fn form_document_accepts_both_id_spellings() {
    let both: FormDocument =
        serde_json::from_str(r#"{ "_id": "abc", "id": "abc", "name": "x", "fields": [] }"#).expect("both ids");
    assert_eq!(both.id, "abc");

    let differing: FormDocument =
        serde_json::from_str(r#"{ "id": "primary", "_id": "mongo" }"#).expect("differing ids");
    assert_eq!(differing.id, "primary");

    let blank: FormDocument = serde_json::from_str(r#"{ "id": "", "_id": 7 }"#).expect("blank id");
    assert_eq!(blank.id, "7");

    assert!(serde_json::from_str::<FormDocument>(r#"{ "name": "no id" }"#).is_err());
}

#[test]
fn listing_with_both_id_spellings_keeps_every_record() {
    let envelope: Envelope<Vec<FormDocument>> = serde_json::from_str(
        r#"{ "data": [{ "_id": "a", "id": "a", "name": "A" }, { "_id": "b", "name": "B" }] }"#,
    )
    .expect("parse");
    let ids: Vec<String> = envelope.data.expect("data").into_iter().map(|f| f.id).collect();

    assert_eq!(ids, vec!["a", "b"]);
}

#[test]
fn created_accepts_both_id_spellings() {
    let created: Created = serde_json::from_str(r#"{ "id": 12, "_id": "12" }"#).expect("created");
    assert_eq!(created.id, "12");
}

#[test]
fn envelope_unwraps_data() {
    let envelope: Envelope<Vec<FormDocument>> =
        serde_json::from_str(r#"{ "data": [{ "id": "a1", "name": "A" }] }"#).expect("parse");
    let forms = envelope.data.expect("data");

    assert_eq!(forms.len(), 1);
    assert!(forms[0].fields.is_empty());
}

#[test]
fn update_body_omits_absent_members() {
    let json = serde_json::to_value(FormUpdate::rename("New")).expect("serialize");
    assert_eq!(json, serde_json::json!({ "name": "New" }));
}

// ============================================================================
// Memory store
// ============================================================================

#[test]
fn memory_store_crud() {
    let store = MemoryFormStore::new();
    let created = store
        .create(&FormPayload {
            name: "Contact".to_string(),
            fields: vec![Field::new("email", "Email")],
        })
        .expect("create");

    assert_eq!(store.list().expect("list").len(), 1);
    let fetched = store.get(&created.id).expect("get");
    assert_eq!(fetched.name, "Contact");
    let created_at = fetched.created_at.as_deref().expect("creation time");
    assert!(chrono::DateTime::parse_from_rfc3339(created_at).is_ok(), "{}", created_at);

    store.update(&created.id, &FormUpdate::rename("Contact v2")).expect("update");
    let fetched = store.get(&created.id).expect("get");
    assert_eq!(fetched.name, "Contact v2");
    assert_eq!(fetched.fields.len(), 1, "Fields untouched by a rename");

    store.delete(&created.id).expect("delete");
    assert!(store.is_empty());
    assert!(matches!(store.get(&created.id), Err(EditorError::Api { status: 404, .. })));
}

#[test]
fn memory_store_continues_after_seeded_ids() {
    let store = MemoryFormStore::with_forms(vec![document("7", "Seed", 0, None)]);
    let created = store
        .create(&FormPayload {
            name: "Next".to_string(),
            fields: vec![],
        })
        .expect("create");

    assert_eq!(created.id, "8");
}

// ============================================================================
// Saved-forms management
// ============================================================================

#[test]
fn duplicate_uses_copy_name_by_default() {
    let store = MemoryFormStore::with_forms(vec![document("1", "Signup", 3, None)]);
    let copy = duplicate_form(&store, "1", None).expect("duplicate");

    let copied = store.get(&copy.id).expect("copy");
    assert_eq!(copied.name, "Signup copy");
    assert_eq!(copied.fields.len(), 3);
    assert_eq!(store.len(), 2);
}

#[test]
fn duplicate_with_explicit_name() {
    let store = MemoryFormStore::with_forms(vec![document("1", "Signup", 1, None)]);
    let copy = duplicate_form(&store, "1", Some("  Signup B ")).expect("duplicate");

    assert_eq!(store.get(&copy.id).expect("copy").name, "Signup B");
    assert!(duplicate_form(&store, "1", Some("   ")).is_err());
}

#[test]
fn copy_name_of_unnamed_form() {
    assert_eq!(default_copy_name(""), "Form copy");
    assert_eq!(default_copy_name("Quiz"), "Quiz copy");
}

#[test]
fn rename_trims_and_rejects_blank() {
    let store = MemoryFormStore::with_forms(vec![document("1", "Old", 0, None)]);

    rename_form(&store, "1", "  New  ").expect("rename");
    assert_eq!(store.get("1").expect("form").name, "New");
    assert!(matches!(rename_form(&store, "1", " "), Err(EditorError::Validation(_))));
}

#[test]
fn blank_ids_are_rejected_before_the_store() {
    let store = MemoryFormStore::with_forms(vec![document("1", "Keep", 0, None)]);

    assert!(require_id("  ").is_err());
    assert_eq!(require_id(" 5 ").expect("id"), "5");
    assert!(matches!(delete_form(&store, ""), Err(EditorError::Validation(_))));
    assert_eq!(store.len(), 1);
}

#[test]
fn summary_line_formats_count_and_date() {
    assert_eq!(summary_line(&document("1", "A", 0, None)), "0 fields");
    assert_eq!(
        summary_line(&document("1", "A", 2, Some("2024-05-01T10:30:00Z"))),
        "2 field(s) \u{2022} 2024-05-01 10:30"
    );
    assert_eq!(
        summary_line(&document("1", "A", 1, Some("yesterday"))),
        "1 field(s) \u{2022} yesterday"
    );
}

#[test]
fn display_name_falls_back_for_unnamed_forms() {
    assert_eq!(display_name(&document("1", " ", 0, None)), "Untitled form");
    assert_eq!(display_name(&document("1", "Quiz", 0, None)), "Quiz");
}

// ============================================================================
// HTTP store
// ============================================================================

#[test]
fn error_message_prefers_service_message() {
    assert_eq!(
        error_message(StatusCode::BAD_REQUEST, r#"{ "message": "Name is required" }"#),
        "Name is required"
    );
    assert_eq!(error_message(StatusCode::NOT_FOUND, "<html>"), "Not Found");
    assert_eq!(error_message(StatusCode::INTERNAL_SERVER_ERROR, r#"{ "message": "" }"#), "Internal Server Error");
}

#[test]
fn http_store_trims_trailing_slash() {
    let store = HttpFormStore::new("http://forms.local:8080/");
    assert_eq!(store.base_url(), "http://forms.local:8080");
    assert_eq!(DEFAULT_API_URL, "http://localhost:3000");
}

#[test]
fn http_store_rejects_blank_id_without_request() {
    let store = HttpFormStore::new("http://127.0.0.1:9");
    assert!(matches!(store.get(" "), Err(EditorError::Validation(_))));
}
