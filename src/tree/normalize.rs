use std::collections::HashSet;
use std::sync::Arc;

use crate::factory::element_factory::ElementFactory;
use crate::model::element::{Content, ElementId, ElementList, FormElement, Row};

// ============================================================================
// Column normalization
// ============================================================================

/// Copy of `row` whose column count equals its layout's fixed count.
/// Missing slots become empty; surplus slots are dropped.
pub fn normalize_columns(row: &Row) -> Row {
    Row::with_columns(row.layout, row.columns.clone())
}

/// Normalize every row in the forest, recursively.
///
/// Already-normalized subtrees are shared, and a forest with nothing to fix
/// comes back pointer-identical, so applying this twice equals applying it once.
pub fn normalize_forest(forest: &ElementList) -> ElementList {
    normalize_list(forest).unwrap_or_else(|| forest.clone())
}

fn normalize_list(list: &ElementList) -> Option<ElementList> {
    let mut changed = false;
    let nodes: Vec<Arc<FormElement>> = list
        .iter()
        .map(|node| match normalize_node(node) {
            Some(fixed) => {
                changed = true;
                Arc::new(fixed)
            }
            None => Arc::clone(node),
        })
        .collect();
    changed.then(|| ElementList::from_nodes(nodes))
}

fn normalize_node(node: &FormElement) -> Option<FormElement> {
    let Content::Row(row) = &node.content else {
        return None;
    };

    let mut changed = !row.is_normalized();
    let columns: Vec<ElementList> = normalize_columns(row)
        .columns
        .iter()
        .map(|slot| match normalize_list(slot) {
            Some(fixed) => {
                changed = true;
                fixed
            }
            None => slot.clone(),
        })
        .collect();

    changed.then(|| FormElement {
        id: node.id.clone(),
        name: node.name.clone(),
        content: Content::Row(Row {
            layout: row.layout,
            columns,
        }),
    })
}

// ============================================================================
// Id uniqueness
// ============================================================================

/// Give a fresh factory id to every node whose id is empty or already used
/// earlier in search order. Returns the input unchanged when all ids are
/// unique.
pub fn ensure_unique_ids(forest: &ElementList, factory: &mut ElementFactory) -> ElementList {
    let mut seen = HashSet::new();
    reassign_list(forest, &mut seen, factory).unwrap_or_else(|| forest.clone())
}

fn reassign_list(
    list: &ElementList,
    seen: &mut HashSet<ElementId>,
    factory: &mut ElementFactory,
) -> Option<ElementList> {
    let mut changed = false;
    let mut nodes = Vec::with_capacity(list.len());

    for node in list {
        let fresh_id = if node.id.is_empty() || seen.contains(&node.id) {
            Some(factory.next_id())
        } else {
            None
        };
        seen.insert(fresh_id.clone().unwrap_or_else(|| node.id.clone()));

        let new_columns = match &node.content {
            Content::Row(row) => {
                let mut slots_changed = false;
                let columns: Vec<ElementList> = row
                    .columns
                    .iter()
                    .map(|slot| match reassign_list(slot, seen, factory) {
                        Some(fixed) => {
                            slots_changed = true;
                            fixed
                        }
                        None => slot.clone(),
                    })
                    .collect();
                slots_changed.then(|| Row {
                    layout: row.layout,
                    columns,
                })
            }
            Content::Field(_) => None,
        };

        if fresh_id.is_none() && new_columns.is_none() {
            nodes.push(Arc::clone(node));
            continue;
        }

        changed = true;
        let mut rebuilt = FormElement::clone(node);
        if let Some(id) = fresh_id {
            rebuilt.id = id;
        }
        if let Some(row) = new_columns {
            rebuilt.content = Content::Row(row);
        }
        nodes.push(Arc::new(rebuilt));
    }

    changed.then(|| ElementList::from_nodes(nodes))
}
