use crate::factory::defaults::default_content;
use crate::factory::element_factory::ElementFactory;
use crate::model::element::{Content, ElementList, ElementType, FormElement};
use crate::model::field::Field;
use crate::tree::navigator::walk;

// ============================================================================
// Tree -> fields
// ============================================================================

/// Project the forest to the flat field list used for persistence.
///
/// Layout rows vanish: their children are emitted column by column, each
/// slot in order, recursing into nested rows. The result cannot be turned
/// back into the same tree; `unflatten` never rebuilds rows.
pub fn flatten(forest: &ElementList) -> Vec<Field> {
    let mut fields = Vec::new();
    walk(forest, &mut |node, _depth| {
        if let Some(field) = field_from_element(node) {
            fields.push(field);
        }
    });
    fields
}

/// Flat record of a single leaf. Rows have no flat representation.
pub fn field_from_element(element: &FormElement) -> Option<Field> {
    let Content::Field(kind) = &element.content else {
        return None;
    };
    Some(Field::new(kind.type_tag(), element.caption()).with_attributes(kind.to_bag()))
}

// ============================================================================
// Fields -> tree
// ============================================================================

/// Rebuild a flat forest from persisted fields.
///
/// Each field starts from the factory defaults of its type, then every
/// attribute the field carries overrides the default. Fields tagged as a
/// layout row are skipped.
pub fn unflatten(fields: &[Field], factory: &mut ElementFactory) -> ElementList {
    fields
        .iter()
        .filter_map(|field| element_from_field(field, factory))
        .collect()
}

pub fn element_from_field(field: &Field, factory: &mut ElementFactory) -> Option<FormElement> {
    let element_type = ElementType::parse(&field.field_type);
    let Content::Field(mut kind) = default_content(&element_type) else {
        return None;
    };

    kind.overlay(&field.attributes);
    if kind.dedicated_label().is_some() {
        kind.set_dedicated_label(field.label.clone());
    }

    Some(FormElement {
        id: factory.next_id(),
        name: field.label.clone(),
        content: Content::Field(kind),
    })
}
