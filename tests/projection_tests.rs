use form_builder::factory::element_factory::ElementFactory;
use form_builder::model::attributes::{CheckboxOption, FieldKind};
use form_builder::model::field::Field;
use form_builder::model::wire::AttributeBag;
use form_builder::projection::flatten::{field_from_element, flatten, unflatten};
use form_builder::tree::navigator::walk;

use crate::common::builders::{forest, leaf, row, sample_forest};
use form_builder::model::element::RowLayout;

mod common;

// ============================================================================
// flatten
// ============================================================================

#[test]
fn flatten_emits_leaves_column_major() {
    let fields = flatten(&sample_forest());
    let labels: Vec<&str> = fields.iter().map(|f| f.label.as_str()).collect();

    assert_eq!(labels, vec!["Full Name", "City", "Age", "Country", "Email"]);
    assert!(fields.iter().all(|f| !f.field_type.ends_with("Row")));
}

#[test]
fn flatten_recurses_into_nested_rows() {
    let f = forest(vec![row(
        "outer",
        RowLayout::TwoColumns,
        vec![
            vec![row(
                "inner",
                RowLayout::TwoColumns,
                vec![vec![leaf("a", "text", "A")], vec![leaf("b", "text", "B")]],
            )],
            vec![leaf("c", "text", "C")],
        ],
    )]);

    let labels: Vec<String> = flatten(&f).into_iter().map(|f| f.label).collect();
    assert_eq!(labels, vec!["A", "B", "C"]);
}

#[test]
fn flatten_uses_dedicated_label_for_buttons() {
    let button = leaf("1", "button", "internal-name");
    let field = field_from_element(&button).expect("leaf field");

    assert_eq!(field.field_type, "button");
    assert_eq!(field.label, "Button", "Default button label wins over name");
    assert_eq!(field.attributes.variant.as_deref(), Some("contained"));
}

#[test]
fn flatten_skips_rows_themselves() {
    let empty_row = row("r", RowLayout::TwoColumns, vec![vec![], vec![]]);
    assert!(field_from_element(&empty_row).is_none());
    assert!(flatten(&forest(vec![empty_row])).is_empty());
}

#[test]
fn flatten_field_serializes_camel_case_attributes() {
    let fields = flatten(&forest(vec![leaf("1", "checkbox", "Toppings")]));
    let json = serde_json::to_value(&fields).expect("serialize");

    assert_eq!(json[0]["type"], "checkbox");
    assert_eq!(json[0]["label"], "Toppings");
    assert_eq!(json[0]["checkboxOptions"][0]["label"], "Option 1");
    assert_eq!(json[0]["layout"], "vertical");
    assert!(json[0].get("id").is_none(), "Fields carry no id");
}

// ============================================================================
// unflatten
// ============================================================================

#[test]
fn unflatten_overlays_values_on_defaults() {
    let mut attributes = AttributeBag::default();
    attributes.checkbox_options = Some(vec![CheckboxOption::new("Yes", true)]);
    let fields = vec![Field::new("checkbox", "Agree").with_attributes(attributes)];

    let mut factory = ElementFactory::new();
    let rebuilt = unflatten(&fields, &mut factory);
    let node = rebuilt.get(0).expect("node");

    assert_eq!(node.name, "Agree");
    match node.field() {
        Some(FieldKind::Checkbox(group)) => {
            assert_eq!(group.options, vec![CheckboxOption::new("Yes", true)]);
        }
        other => panic!("Expected checkbox, got {:?}", other),
    }
}

#[test]
fn unflatten_fills_missing_values_from_defaults() {
    let fields: Vec<Field> = serde_json::from_str(r#"[{ "type": "slider", "label": "Volume", "max": "11" }]"#)
        .expect("parse fields");

    let mut factory = ElementFactory::new();
    let rebuilt = unflatten(&fields, &mut factory);

    match rebuilt.get(0).and_then(|n| n.field()) {
        Some(FieldKind::Slider(slider)) => {
            assert_eq!(slider.max, 11.0, "Numeric text is accepted");
            assert_eq!(slider.min, 0.0);
            assert_eq!(slider.step, 1.0);
        }
        other => panic!("Expected slider, got {:?}", other),
    }
}

#[test]
fn unflatten_skips_row_fields() {
    let fields = vec![Field::new("twoColumnRow", "Layout"), Field::new("text", "Name")];
    let mut factory = ElementFactory::new();

    let rebuilt = unflatten(&fields, &mut factory);
    assert_eq!(rebuilt.len(), 1);
    assert_eq!(rebuilt.get(0).map(|n| n.type_tag()), Some("text"));
}

#[test]
fn unflatten_allocates_fresh_ids() {
    let fields = vec![Field::new("text", "A"), Field::new("text", "B")];
    let mut factory = ElementFactory::starting_at(40);

    let rebuilt = unflatten(&fields, &mut factory);
    let ids: Vec<String> = rebuilt.iter().map(|n| n.id.to_string()).collect();
    assert_eq!(ids, vec!["40", "41"]);
}

// ============================================================================
// Round trip through persistence (lossy by contract)
// ============================================================================

#[test]
fn round_trip_drops_rows_and_keeps_leaves_in_order() {
    let original = sample_forest();
    let mut factory = ElementFactory::new();

    let rebuilt = unflatten(&flatten(&original), &mut factory);

    let mut any_row = false;
    walk(&rebuilt, &mut |node, depth| {
        any_row |= node.is_row();
        assert_eq!(depth, 0, "Rebuilt forest is flat");
    });
    assert!(!any_row, "Rows do not survive a save/load cycle");

    let mut original_leaves = Vec::new();
    walk(&original, &mut |node, _| {
        if !node.is_row() {
            original_leaves.push((node.type_tag().to_string(), node.name.clone()));
        }
    });
    let rebuilt_leaves: Vec<(String, String)> = rebuilt
        .iter()
        .map(|n| (n.type_tag().to_string(), n.name.clone()))
        .collect();
    assert_eq!(rebuilt_leaves, original_leaves);
}

#[test]
fn round_trip_preserves_leaf_attributes() {
    let original = forest(vec![leaf("1", "rating", "Stars"), leaf("2", "toggle", "Notify")]);
    let mut factory = ElementFactory::new();

    let rebuilt = unflatten(&flatten(&original), &mut factory);

    let contents = |list: &form_builder::model::element::ElementList| -> Vec<FieldKind> {
        list.iter().filter_map(|n| n.field().cloned()).collect()
    };
    assert_eq!(contents(&rebuilt), contents(&original));
}
