use chrono::DateTime;

use crate::editor::error::EditorError;

use super::model::{Created, FormPayload, FormSummary, FormUpdate};
use super::store::FormStore;

// ============================================================================
// Saved-forms management
// ============================================================================

/// Rejects empty or blank form ids before any request is made.
pub fn require_id(id: &str) -> Result<&str, EditorError> {
    let trimmed = id.trim();
    if trimmed.is_empty() {
        return Err(EditorError::Validation("Form id is required".to_string()));
    }
    Ok(trimmed)
}

/// Suggested name for a copy: `"<name> copy"`, or `"Form copy"` when the
/// source is unnamed.
pub fn default_copy_name(name: &str) -> String {
    let base = if name.trim().is_empty() { "Form" } else { name };
    format!("{} copy", base)
}

/// Store a copy of form `id` under `name` (or the default copy name).
pub fn duplicate_form(store: &dyn FormStore, id: &str, name: Option<&str>) -> Result<Created, EditorError> {
    let source = store.get(require_id(id)?)?;

    let name = match name.map(str::trim) {
        Some(n) if !n.is_empty() => n.to_string(),
        Some(_) => return Err(EditorError::Validation("Form name cannot be empty".to_string())),
        None => default_copy_name(&source.name),
    };

    store.create(&FormPayload {
        name,
        fields: source.fields,
    })
}

/// Rename a saved form. The name is trimmed and must not be empty.
pub fn rename_form(store: &dyn FormStore, id: &str, name: &str) -> Result<Created, EditorError> {
    let id = require_id(id)?;
    let name = name.trim();
    if name.is_empty() {
        return Err(EditorError::Validation("Form name cannot be empty".to_string()));
    }
    store.update(id, &FormUpdate::rename(name))
}

pub fn delete_form(store: &dyn FormStore, id: &str) -> Result<(), EditorError> {
    store.delete(require_id(id)?)
}

/// Secondary line of a listing entry: `"3 field(s) • 2024-05-01 10:30"`.
pub fn summary_line(form: &FormSummary) -> String {
    let count = if form.fields.is_empty() {
        "0 fields".to_string()
    } else {
        format!("{} field(s)", form.fields.len())
    };

    match form.created_at.as_deref().map(str::trim) {
        Some(created) if !created.is_empty() => format!("{} \u{2022} {}", count, display_timestamp(created)),
        _ => count,
    }
}

fn display_timestamp(created: &str) -> String {
    match DateTime::parse_from_rfc3339(created) {
        Ok(t) => t.format("%Y-%m-%d %H:%M").to_string(),
        Err(_) => created.to_string(),
    }
}

/// Listing heading for a form without a name.
pub fn display_name(form: &FormSummary) -> &str {
    if form.name.trim().is_empty() {
        "Untitled form"
    } else {
        &form.name
    }
}
