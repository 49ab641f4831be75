use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::editor::error::EditorError;
use crate::factory::element_factory::ElementFactory;
use crate::model::element::ElementList;
use crate::tree::normalize::{ensure_unique_ids, normalize_forest};

// ============================================================================
// Export
// ============================================================================

/// Pretty-printed JSON array of nodes (2-space indent).
pub fn export_document(forest: &ElementList) -> Result<String, EditorError> {
    serde_json::to_string_pretty(forest).map_err(|source| EditorError::JsonSerialize {
        context: "form document".to_string(),
        source,
    })
}

// ============================================================================
// Import
// ============================================================================

/// Parse a document and bring it back under the tree invariants.
///
/// The root must be an array; anything else is rejected with
/// `DocumentShape`. Row columns are padded or truncated to their fixed
/// count, id-less and duplicate nodes receive fresh ids, and the factory is
/// moved past every imported numeric id.
pub fn import_document(text: &str, factory: &mut ElementFactory) -> Result<ElementList, EditorError> {
    let value: Value = serde_json::from_str(text).map_err(|source| EditorError::JsonParse {
        context: "form document".to_string(),
        source,
    })?;

    if !value.is_array() {
        return Err(EditorError::DocumentShape(format!(
            "expected an array of elements, found {}",
            json_kind(&value)
        )));
    }

    let forest: ElementList = serde_json::from_value(value).map_err(|source| EditorError::JsonParse {
        context: "form elements".to_string(),
        source,
    })?;

    factory.reserve_past(&forest);
    let forest = normalize_forest(&forest);
    Ok(ensure_unique_ids(&forest, factory))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// ============================================================================
// Files
// ============================================================================

/// Whole file as text; failures name the path.
pub fn read_text(path: &Path) -> Result<String, EditorError> {
    fs::read_to_string(path).map_err(|source| EditorError::Io {
        path: path.to_path_buf(),
        source,
    })
}

pub fn write_text(path: &Path, text: &str) -> Result<(), EditorError> {
    fs::write(path, text).map_err(|source| EditorError::Io {
        path: path.to_path_buf(),
        source,
    })
}

pub fn read_document(path: &Path, factory: &mut ElementFactory) -> Result<ElementList, EditorError> {
    let text = read_text(path)?;
    import_document(&text, factory)
}

pub fn write_document(path: &Path, forest: &ElementList) -> Result<(), EditorError> {
    let text = export_document(forest)?;
    write_text(path, &(text + "\n"))
}

/// Reads a document when the file exists; a missing file is an empty form.
pub fn read_or_empty(path: &Path, factory: &mut ElementFactory) -> Result<ElementList, EditorError> {
    if path.exists() {
        read_document(path, factory)
    } else {
        Ok(ElementList::new())
    }
}

// ============================================================================
// Fingerprint
// ============================================================================

/// SHA-1 of the exported document, used to tell whether the form changed
/// since it was last saved or loaded.
pub fn fingerprint(forest: &ElementList) -> String {
    use sha1::{Digest, Sha1};

    let text = export_document(forest).unwrap_or_default();
    let mut hasher = Sha1::new();
    hasher.update(text.as_bytes());
    format!("{:x}", hasher.finalize())
}
