use serde_json::{Map, Value};

use crate::model::attributes::{CheckboxOption, FieldKind};
use crate::model::date_format::DateFormat;
use crate::model::element::{Content, FormElement};
use crate::model::wire::AttributeBag;

use super::error::EditorError;

// ============================================================================
// Option lists (radio, select)
// ============================================================================

fn options_error(element: &FormElement) -> EditorError {
    EditorError::Property {
        key: "options".to_string(),
        reason: format!("'{}' elements have no option list", element.type_tag()),
    }
}

fn checkbox_error(element: &FormElement) -> EditorError {
    EditorError::Property {
        key: "checkboxOptions".to_string(),
        reason: format!("'{}' elements have no checkbox options", element.type_tag()),
    }
}

fn index_error(key: &str, index: usize, len: usize) -> EditorError {
    EditorError::Property {
        key: key.to_string(),
        reason: format!("index {} is out of range ({} options)", index, len),
    }
}

/// Label given to an appended option: `Option <n>` where n is the new length.
pub fn next_option_label(len: usize) -> String {
    format!("Option {}", len + 1)
}

pub fn change_option(element: &FormElement, index: usize, value: &str) -> Result<FormElement, EditorError> {
    let mut updated = element.clone();
    let options = updated
        .field_mut()
        .and_then(FieldKind::options_mut)
        .ok_or_else(|| options_error(element))?;
    let len = options.len();
    let slot = options.get_mut(index).ok_or_else(|| index_error("options", index, len))?;
    *slot = value.to_string();
    Ok(updated)
}

pub fn add_option(element: &FormElement) -> Result<FormElement, EditorError> {
    let mut updated = element.clone();
    let options = updated
        .field_mut()
        .and_then(FieldKind::options_mut)
        .ok_or_else(|| options_error(element))?;
    let label = next_option_label(options.len());
    options.push(label);
    Ok(updated)
}

pub fn delete_option(element: &FormElement, index: usize) -> Result<FormElement, EditorError> {
    let mut updated = element.clone();
    let options = updated
        .field_mut()
        .and_then(FieldKind::options_mut)
        .ok_or_else(|| options_error(element))?;
    if index >= options.len() {
        return Err(index_error("options", index, options.len()));
    }
    options.remove(index);
    Ok(updated)
}

// ============================================================================
// Checkbox options
// ============================================================================

/// A change to one checkbox entry.
#[derive(Debug, Clone, PartialEq)]
pub enum CheckboxEdit {
    Label(String),
    Checked(bool),
}

pub fn change_checkbox_option(
    element: &FormElement,
    index: usize,
    edit: CheckboxEdit,
) -> Result<FormElement, EditorError> {
    let mut updated = element.clone();
    let options = updated
        .field_mut()
        .and_then(FieldKind::checkbox_options_mut)
        .ok_or_else(|| checkbox_error(element))?;
    let len = options.len();
    let option = options
        .get_mut(index)
        .ok_or_else(|| index_error("checkboxOptions", index, len))?;
    match edit {
        CheckboxEdit::Label(label) => option.label = label,
        CheckboxEdit::Checked(checked) => option.checked = checked,
    }
    Ok(updated)
}

pub fn add_checkbox_option(element: &FormElement) -> Result<FormElement, EditorError> {
    let mut updated = element.clone();
    let options = updated
        .field_mut()
        .and_then(FieldKind::checkbox_options_mut)
        .ok_or_else(|| checkbox_error(element))?;
    let label = next_option_label(options.len());
    options.push(CheckboxOption::new(label, false));
    Ok(updated)
}

pub fn delete_checkbox_option(element: &FormElement, index: usize) -> Result<FormElement, EditorError> {
    let mut updated = element.clone();
    let options = updated
        .field_mut()
        .and_then(FieldKind::checkbox_options_mut)
        .ok_or_else(|| checkbox_error(element))?;
    if index >= options.len() {
        return Err(index_error("checkboxOptions", index, options.len()));
    }
    options.remove(index);
    Ok(updated)
}

// ============================================================================
// Generic property edits
// ============================================================================

/// Attribute keys meaningful for each leaf type, in wire spelling.
pub fn attribute_keys(kind: &FieldKind) -> &'static [&'static str] {
    match kind {
        FieldKind::Text(_) | FieldKind::Email(_) => &["placeholder"],
        FieldKind::Textarea(_) => &["placeholder", "rows"],
        FieldKind::Number(_) => &["placeholder", "min", "max", "step"],
        FieldKind::Phone(_) => &["placeholder", "pattern"],
        FieldKind::Checkbox(_) => &["checkboxOptions", "layout"],
        FieldKind::Radio(_) => &["options", "layout"],
        FieldKind::Select(_) => &["options"],
        FieldKind::Date(_) => &["defaultDate", "minDate", "maxDate", "dateFormat"],
        FieldKind::Rating(_) => &["max", "precision", "defaultValue"],
        FieldKind::Slider(_) => &["min", "max", "step", "defaultValue"],
        FieldKind::Toggle(_) => &["onLabel", "offLabel", "checked"],
        FieldKind::File(_) => &["accept", "multiple"],
        FieldKind::Divider(_) | FieldKind::Other(_) => &[],
        FieldKind::Button(_) => &[
            "variant",
            "color",
            "size",
            "disabled",
            "fullWidth",
            "typeAttr",
            "href",
            "target",
            "startIcon",
            "endIcon",
            "borderRadius",
            "disableElevation",
            "loading",
        ],
    }
}

fn canonical_key(key: &str) -> &str {
    match key {
        "radioLayout" | "checkboxLayout" => "layout",
        other => other,
    }
}

fn property_error(key: &str, reason: impl Into<String>) -> EditorError {
    EditorError::Property {
        key: key.to_string(),
        reason: reason.into(),
    }
}

/// Set one property of a node from a JSON value.
///
/// `name` applies to every node; `label` sets the dedicated label of
/// buttons and dividers and the name of everything else. Other keys are
/// checked against the node's type and re-read through the typed attribute
/// model. `id`, `type` and `columns` are structural and cannot be edited.
pub fn apply_property(element: &FormElement, key: &str, value: &Value) -> Result<FormElement, EditorError> {
    match key {
        "id" | "type" | "columns" => {
            return Err(property_error(key, "structural properties cannot be edited"));
        }
        "name" => {
            let name = value
                .as_str()
                .ok_or_else(|| property_error(key, "expected a string"))?;
            let mut updated = element.clone();
            updated.name = name.to_string();
            return Ok(updated);
        }
        _ => {}
    }

    let Content::Field(kind) = &element.content else {
        return Err(property_error(key, "layout rows only have a name"));
    };

    if key == "label" {
        let label = value
            .as_str()
            .ok_or_else(|| property_error(key, "expected a string"))?;
        let mut updated = element.clone();
        if kind.dedicated_label().is_some() {
            if let Some(kind) = updated.field_mut() {
                kind.set_dedicated_label(label.to_string());
            }
        } else {
            updated.name = label.to_string();
        }
        return Ok(updated);
    }

    let canonical = canonical_key(key);
    if !attribute_keys(kind).iter().any(|k| *k == canonical) {
        return Err(property_error(
            key,
            format!("not a property of '{}' elements", kind.type_tag()),
        ));
    }

    let mut updated_kind = kind.clone();
    if value.is_null() {
        clear_optional(&mut updated_kind, canonical).map_err(|reason| property_error(key, reason))?;
    } else {
        let bag = read_bag(canonical, value).map_err(|reason| property_error(key, reason))?;
        validate_dates(&bag).map_err(|reason| property_error(key, reason))?;
        updated_kind.overlay(&bag);
    }

    let mut updated = element.clone();
    updated.content = Content::Field(updated_kind);
    Ok(updated)
}

/// Parse `{ key: value }` as an attribute bag, insisting the value landed.
fn read_bag(key: &str, value: &Value) -> Result<AttributeBag, String> {
    let mut object = Map::new();
    object.insert(key.to_string(), value.clone());

    let bag: AttributeBag = serde_json::from_value(Value::Object(object)).map_err(|e| e.to_string())?;
    if bag == AttributeBag::default() {
        return Err(format!("invalid value {}", value));
    }
    Ok(bag)
}

/// Only the open bounds of a number input may be unset.
fn clear_optional(kind: &mut FieldKind, key: &str) -> Result<(), String> {
    match (kind, key) {
        (FieldKind::Number(number), "min") => number.min = None,
        (FieldKind::Number(number), "max") => number.max = None,
        _ => return Err("value cannot be null".to_string()),
    }
    Ok(())
}

fn validate_dates(bag: &AttributeBag) -> Result<(), String> {
    for date in [&bag.default_date, &bag.min_date, &bag.max_date].into_iter().flatten() {
        if !date.is_empty() && DateFormat::Iso.to_display(date).is_none() {
            return Err(format!("'{}' is not a YYYY-MM-DD date", date));
        }
    }
    Ok(())
}
