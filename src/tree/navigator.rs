use std::sync::Arc;

use crate::model::element::{Content, ElementId, ElementList, FormElement, Row};

// ============================================================================
// Search
// ============================================================================

/// Depth-first search: forest order, then slot order inside each row.
///
/// Returns the first match. Ids are unique under the tree invariants; if two
/// nodes do share an id, the one visited first in this order wins.
pub fn find_by_id<'a>(forest: &'a ElementList, id: &ElementId) -> Option<&'a Arc<FormElement>> {
    if id.is_empty() {
        return None;
    }
    find_in(forest, id)
}

fn find_in<'a>(list: &'a ElementList, id: &ElementId) -> Option<&'a Arc<FormElement>> {
    for node in list {
        if node.id == *id {
            return Some(node);
        }
        if let Content::Row(row) = &node.content {
            for slot in &row.columns {
                if let Some(found) = find_in(slot, id) {
                    return Some(found);
                }
            }
        }
    }
    None
}

pub fn contains(forest: &ElementList, id: &ElementId) -> bool {
    find_by_id(forest, id).is_some()
}

/// Visit every node in search order with its nesting depth (0 = top level).
pub fn walk<F>(forest: &ElementList, visit: &mut F)
where
    F: FnMut(&FormElement, usize),
{
    walk_at(forest, 0, visit);
}

fn walk_at<F>(list: &ElementList, depth: usize, visit: &mut F)
where
    F: FnMut(&FormElement, usize),
{
    for node in list {
        visit(node.as_ref(), depth);
        if let Content::Row(row) = &node.content {
            for slot in &row.columns {
                walk_at(slot, depth + 1, visit);
            }
        }
    }
}

// ============================================================================
// Structural updates (path copying)
// ============================================================================

enum Edit<F> {
    Replace(F),
    Remove,
}

/// Replace the node with `id` by `updater(node)`.
///
/// Only the path from the root to that node is rebuilt; every other subtree
/// is shared with the input. When `id` is absent the input forest itself is
/// returned, so `ElementList::ptr_eq(&input, &output)` detects "no change".
pub fn update_by_id<F>(forest: &ElementList, id: &ElementId, updater: F) -> ElementList
where
    F: FnOnce(&FormElement) -> FormElement,
{
    apply(forest, id, Edit::Replace(updater))
}

/// Delete the node with `id` from whichever slot or top-level list holds it.
///
/// The containing row is kept even when this empties one of its slots, and
/// its column count never changes.
pub fn remove_by_id(forest: &ElementList, id: &ElementId) -> ElementList {
    apply::<fn(&FormElement) -> FormElement>(forest, id, Edit::Remove)
}

fn apply<F>(forest: &ElementList, id: &ElementId, edit: Edit<F>) -> ElementList
where
    F: FnOnce(&FormElement) -> FormElement,
{
    if id.is_empty() {
        return forest.clone();
    }
    let mut pending = Some(edit);
    edit_list(forest, id, &mut pending).unwrap_or_else(|| forest.clone())
}

/// Returns the rebuilt list when the edit landed somewhere inside it.
fn edit_list<F>(list: &ElementList, id: &ElementId, pending: &mut Option<Edit<F>>) -> Option<ElementList>
where
    F: FnOnce(&FormElement) -> FormElement,
{
    for (index, node) in list.iter().enumerate() {
        if node.id == *id {
            let mut nodes = list.to_nodes();
            match pending.take()? {
                Edit::Replace(updater) => nodes[index] = Arc::new(updater(node.as_ref())),
                Edit::Remove => {
                    nodes.remove(index);
                }
            }
            return Some(ElementList::from_nodes(nodes));
        }

        if let Content::Row(row) = &node.content {
            for (column, slot) in row.columns.iter().enumerate() {
                if let Some(new_slot) = edit_list(slot, id, pending) {
                    let mut nodes = list.to_nodes();
                    nodes[index] = Arc::new(with_slot(node, row, column, new_slot));
                    return Some(ElementList::from_nodes(nodes));
                }
            }
        }
    }
    None
}

/// Copy of a row node with one slot swapped; the other slots are shared.
pub(crate) fn with_slot(node: &FormElement, row: &Row, column: usize, slot: ElementList) -> FormElement {
    let mut columns = row.columns.clone();
    columns[column] = slot;
    FormElement {
        id: node.id.clone(),
        name: node.name.clone(),
        content: Content::Row(Row {
            layout: row.layout,
            columns,
        }),
    }
}
