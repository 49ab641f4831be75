use form_builder::editor::session::EditorSession;
use form_builder::factory::element_factory::{ElementFactory, MAX_RESERVED_ID};
use form_builder::model::attributes::FieldKind;
use form_builder::model::element::{Content, ElementId, ElementList, ElementType, RowLayout};
use form_builder::tree::drop_resolver::{column_descriptor, resolve_drop, DropOutcome, DropTarget, ROOT_CANVAS};

use crate::common::builders::{forest, leaf, row, sample_forest};

mod common;

// ============================================================================
// Element factory
// ============================================================================

#[test]
fn factory_ids_are_unique_and_increasing() {
    let mut factory = ElementFactory::new();
    let ids: Vec<String> = (0..50).map(|_| factory.create("text").id.to_string()).collect();

    let mut unique = ids.clone();
    unique.dedup();
    assert_eq!(unique.len(), 50);
    assert_eq!(ids.first().map(String::as_str), Some("1"));
    assert_eq!(ids.last().map(String::as_str), Some("50"));
}

#[test]
fn factory_ignores_ids_too_large_to_reserve() {
    let mut factory = ElementFactory::new();
    let imported = forest(vec![
        leaf("18446744073709551615", "text", "Huge"),
        leaf("7", "text", "Small"),
    ]);

    factory.reserve_past(&imported);
    assert_eq!(factory.peek_next(), 8);

    factory.reserve_past(&forest(vec![leaf(&MAX_RESERVED_ID.to_string(), "text", "Edge")]));
    assert_eq!(factory.peek_next(), MAX_RESERVED_ID + 1);
}

#[test]
fn drop_after_importing_max_id_gets_fresh_id() {
    let mut session = EditorSession::new();
    session
        .import_json(r#"[{ "id": "18446744073709551615", "type": "text", "name": "Huge" }]"#)
        .expect("import");

    let id = match session.drop_element("text", ROOT_CANVAS) {
        DropOutcome::Inserted { id, .. } => id,
        other => panic!("Expected insertion, got {:?}", other),
    };

    assert_eq!(id, ElementId::from("1"));
    assert_eq!(session.forest().len(), 2);
    assert_ne!(session.forest().get(0).map(|n| n.id.clone()), Some(id));
}

#[test]
fn factory_rows_get_fixed_column_counts() {
    let mut factory = ElementFactory::new();

    for (tag, count) in [("twoColumnRow", 2), ("threeColumnRow", 3), ("fourColumnRow", 4)] {
        let node = factory.create(tag);
        let row = node.row().expect("row content");
        assert_eq!(row.columns.len(), count, "{}", tag);
        assert!(row.columns.iter().all(ElementList::is_empty));
    }
}

#[test]
fn factory_unknown_tag_yields_bare_node() {
    let mut factory = ElementFactory::new();
    let node = factory.create("signature-pad");

    assert_eq!(node.type_tag(), "signature-pad");
    assert_eq!(node.name, "");
    assert_eq!(node.content, Content::Field(FieldKind::Other("signature-pad".to_string())));
    assert_eq!(node.element_type(), ElementType::Other("signature-pad".to_string()));
}

#[test]
fn factory_defaults_match_palette() {
    let mut factory = ElementFactory::new();

    for tag in ElementType::PALETTE {
        let node = factory.create(tag);
        assert_eq!(node.type_tag(), tag);
        assert!(!node.id.is_empty());
    }

    let select = factory.create("select");
    assert_eq!(
        select.field().and_then(FieldKind::options).map(<[String]>::len),
        Some(2),
        "Option lists start with two placeholders"
    );
}

#[test]
fn factory_reserve_past_skips_imported_ids() {
    let mut factory = ElementFactory::new();
    factory.reserve_past(&sample_forest());

    assert_eq!(factory.peek_next(), 7);
    assert_eq!(factory.create("text").id, ElementId::from("7"));
}

#[test]
fn factory_reserve_past_ignores_text_ids() {
    let mut factory = ElementFactory::starting_at(3);
    factory.reserve_past(&forest(vec![leaf("abc-9", "text", ""), leaf("2", "text", "")]));

    assert_eq!(factory.peek_next(), 3);
}

// ============================================================================
// Drop descriptors
// ============================================================================

#[test]
fn parse_canvas_and_column_descriptors() {
    assert_eq!(DropTarget::parse(ROOT_CANVAS), Some(DropTarget::Canvas));
    assert_eq!(
        DropTarget::parse("5-column-1"),
        Some(DropTarget::Column {
            row_id: ElementId::from("5"),
            column: 1
        })
    );
}

#[test]
fn parse_splits_at_last_separator() {
    assert_eq!(
        DropTarget::parse("a-column-b-column-2"),
        Some(DropTarget::Column {
            row_id: ElementId::from("a-column-b"),
            column: 2
        })
    );
}

#[test]
fn parse_rejects_malformed_descriptors() {
    for descriptor in ["", "canvas", "5-column-", "5-column-x", "5-column--1", "-column-1", "5-column-1.5"] {
        assert_eq!(DropTarget::parse(descriptor), None, "{:?}", descriptor);
    }
}

#[test]
fn descriptor_is_inverse_of_parse() {
    let target = DropTarget::Column {
        row_id: ElementId::from("17"),
        column: 3,
    };
    assert_eq!(target.descriptor(), "17-column-3");
    assert_eq!(column_descriptor(&ElementId::from("17"), 3), "17-column-3");
    assert_eq!(DropTarget::parse(&target.descriptor()), Some(target));
}

// ============================================================================
// Drop resolution
// ============================================================================

#[test]
fn drop_on_canvas_appends_to_forest() {
    let f = sample_forest();
    let mut factory = ElementFactory::starting_at(7);

    let outcome = resolve_drop(&f, "email", ROOT_CANVAS, &mut factory);
    let DropOutcome::Inserted { forest, id } = outcome else {
        panic!("Expected insertion, got {:?}", outcome);
    };

    assert_eq!(id, ElementId::from("7"));
    assert_eq!(forest.len(), f.len() + 1);
    assert_eq!(forest.get(3).map(|n| n.type_tag()), Some("email"));
    assert_eq!(f.len(), 3, "Input forest is untouched");
}

#[test]
fn drop_into_column_of_three_column_row() {
    let f = forest(vec![row(
        "5",
        RowLayout::ThreeColumns,
        vec![vec![leaf("1", "text", "Left")], vec![], vec![leaf("2", "text", "Right")]],
    )]);
    let mut factory = ElementFactory::starting_at(10);

    let outcome = resolve_drop(&f, "text", "5-column-1", &mut factory);
    let DropOutcome::Inserted { forest, id } = outcome else {
        panic!("Expected insertion, got {:?}", outcome);
    };

    let before = f.get(0).and_then(|n| n.row().cloned()).expect("row");
    let after = forest.get(0).and_then(|n| n.row().cloned()).expect("row");

    assert_eq!(after.columns[1].len(), 1);
    assert_eq!(after.columns[1].get(0).map(|n| n.id.clone()), Some(id));
    assert_eq!(after.columns[1].get(0).map(|n| n.type_tag()), Some("text"));
    assert!(ElementList::ptr_eq(&before.columns[0], &after.columns[0]));
    assert!(ElementList::ptr_eq(&before.columns[2], &after.columns[2]));
}

#[test]
fn drop_normalizes_short_row_before_inserting() {
    let f = forest(vec![row("r", RowLayout::FourColumns, vec![vec![]])]);
    let mut factory = ElementFactory::new();

    let outcome = resolve_drop(&f, "date", "r-column-3", &mut factory);
    let DropOutcome::Inserted { forest, .. } = outcome else {
        panic!("Expected insertion, got {:?}", outcome);
    };

    let row = forest.get(0).and_then(|n| n.row().cloned()).expect("row");
    assert_eq!(row.columns.len(), 4);
    assert_eq!(row.columns[3].len(), 1);
}

#[test]
fn drop_on_missing_row_is_rejected_without_allocating() {
    let f = sample_forest();
    let mut factory = ElementFactory::starting_at(7);

    let outcome = resolve_drop(&f, "text", "42-column-0", &mut factory);

    assert_eq!(outcome, DropOutcome::RowNotFound(ElementId::from("42")));
    assert_eq!(factory.peek_next(), 7);
}

#[test]
fn drop_only_targets_top_level_rows() {
    let f = forest(vec![row(
        "outer",
        RowLayout::TwoColumns,
        vec![vec![row("inner", RowLayout::TwoColumns, vec![vec![], vec![]])], vec![]],
    )]);
    let mut factory = ElementFactory::new();

    let outcome = resolve_drop(&f, "text", "inner-column-0", &mut factory);
    assert_eq!(outcome, DropOutcome::RowNotFound(ElementId::from("inner")));
}

#[test]
fn drop_on_leaf_id_is_rejected() {
    let f = sample_forest();
    let mut factory = ElementFactory::new();

    let outcome = resolve_drop(&f, "text", "1-column-0", &mut factory);
    assert_eq!(outcome, DropOutcome::RowNotFound(ElementId::from("1")));
}

#[test]
fn drop_with_malformed_target_is_rejected() {
    let f = sample_forest();
    let mut factory = ElementFactory::starting_at(7);

    let outcome = resolve_drop(&f, "text", "5-column-abc", &mut factory);

    assert_eq!(outcome, DropOutcome::MalformedTarget("5-column-abc".to_string()));
    assert!(outcome.describe().contains("malformed"));
    assert_eq!(factory.peek_next(), 7);
}

#[test]
fn drop_past_last_column_is_rejected() {
    let f = sample_forest();
    let mut factory = ElementFactory::starting_at(7);

    let outcome = resolve_drop(&f, "text", "5-column-3", &mut factory);

    assert_eq!(
        outcome,
        DropOutcome::ColumnOutOfRange {
            row_id: ElementId::from("5"),
            column: 3,
            columns: 3
        }
    );
    assert_eq!(outcome.inserted_id(), None);
    assert_eq!(factory.peek_next(), 7);
}
