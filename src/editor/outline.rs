use crate::codegen::renderers::fallback_label;
use crate::model::element::{Content, ElementList, FormElement};
use crate::model::field::Field;

/// Plain-text preview of a tree, one `label (type)` line per node.
///
/// Row slots are listed as `column N` headings, indented under their row.
pub fn outline(forest: &ElementList) -> String {
    if forest.is_empty() {
        return "No fields.\n".to_string();
    }
    let mut out = String::new();
    outline_list(forest, 0, &mut out);
    out
}

fn outline_list(list: &ElementList, depth: usize, out: &mut String) {
    for element in list {
        outline_element(element, depth, out);
    }
}

fn outline_element(element: &FormElement, depth: usize, out: &mut String) {
    let indent = "  ".repeat(depth);
    match &element.content {
        Content::Row(row) => {
            let caption = non_empty(element.caption()).unwrap_or("Row");
            out.push_str(&format!("{}{} ({})\n", indent, caption, element.type_tag()));
            for (index, slot) in row.columns.iter().enumerate() {
                out.push_str(&format!("{}  column {}\n", indent, index + 1));
                if slot.is_empty() {
                    out.push_str(&format!("{}    (empty)\n", indent));
                } else {
                    outline_list(slot, depth + 2, out);
                }
            }
        }
        Content::Field(kind) => {
            let caption = non_empty(element.caption())
                .or_else(|| non_empty(fallback_label(kind)))
                .unwrap_or("Field");
            out.push_str(&format!("{}{} ({})\n", indent, caption, element.type_tag()));
        }
    }
}

/// Preview of a saved form's flat field list.
pub fn outline_fields(fields: &[Field]) -> String {
    if fields.is_empty() {
        return "No fields.\n".to_string();
    }
    fields
        .iter()
        .map(|field| {
            let label = non_empty(&field.label).unwrap_or("Field");
            format!("{} ({})\n", label, field.field_type)
        })
        .collect()
}

fn non_empty(text: &str) -> Option<&str> {
    if text.trim().is_empty() { None } else { Some(text) }
}
