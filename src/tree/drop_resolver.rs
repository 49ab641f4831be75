use std::sync::Arc;

use crate::factory::element_factory::ElementFactory;
use crate::model::element::{Content, ElementId, ElementList};

use super::navigator::with_slot;
use super::normalize::normalize_columns;

/// Drop descriptor of the top-level canvas.
pub const ROOT_CANVAS: &str = "form-canvas";

const COLUMN_SEPARATOR: &str = "-column-";

// ============================================================================
// Drop descriptors
// ============================================================================

/// Where a drag gesture released its payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropTarget {
    /// Append to the end of the top-level forest.
    Canvas,
    /// Append to one slot of a top-level row.
    Column { row_id: ElementId, column: usize },
}

impl DropTarget {
    /// Parse `form-canvas` or `<rowId>-column-<index>`.
    ///
    /// The row id may itself contain dashes or look numeric; the split is
    /// made at the last separator. The index must be plain decimal digits:
    /// anything else is rejected rather than read as column 0.
    pub fn parse(descriptor: &str) -> Option<Self> {
        if descriptor == ROOT_CANVAS {
            return Some(DropTarget::Canvas);
        }

        let (row_id, index) = descriptor.rsplit_once(COLUMN_SEPARATOR)?;
        if row_id.trim().is_empty() || index.is_empty() || !index.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }

        Some(DropTarget::Column {
            row_id: ElementId::from(row_id),
            column: index.parse().ok()?,
        })
    }

    /// Descriptor text, the inverse of `parse`.
    pub fn descriptor(&self) -> String {
        match self {
            DropTarget::Canvas => ROOT_CANVAS.to_string(),
            DropTarget::Column { row_id, column } => column_descriptor(row_id, *column),
        }
    }
}

/// Descriptor a drop surface uses for one slot of a row.
pub fn column_descriptor(row_id: &ElementId, column: usize) -> String {
    format!("{}{}{}", row_id, COLUMN_SEPARATOR, column)
}

// ============================================================================
// Resolution
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum DropOutcome {
    /// A node was created and placed; `id` is the new node's id.
    Inserted { forest: ElementList, id: ElementId },

    /// The descriptor is neither the canvas marker nor a column descriptor.
    MalformedTarget(String),

    /// No top-level row carries this id.
    RowNotFound(ElementId),

    /// The row exists but has no slot at this index.
    ColumnOutOfRange {
        row_id: ElementId,
        column: usize,
        columns: usize,
    },
}

impl DropOutcome {
    pub fn inserted_id(&self) -> Option<&ElementId> {
        match self {
            DropOutcome::Inserted { id, .. } => Some(id),
            _ => None,
        }
    }

    /// User-facing reason for a rejected drop.
    pub fn describe(&self) -> String {
        match self {
            DropOutcome::Inserted { id, .. } => format!("inserted element {}", id),
            DropOutcome::MalformedTarget(target) => format!("malformed drop target '{}'", target),
            DropOutcome::RowNotFound(row_id) => format!("no row with id '{}'", row_id),
            DropOutcome::ColumnOutOfRange { row_id, column, columns } => format!(
                "row '{}' has {} columns, cannot drop into column {}",
                row_id, columns, column
            ),
        }
    }
}

/// Create a node of type `source` and place it at `target`.
///
/// Every rejection leaves the forest untouched and allocates no id.
pub fn resolve_drop(
    forest: &ElementList,
    source: &str,
    target: &str,
    factory: &mut ElementFactory,
) -> DropOutcome {
    match DropTarget::parse(target) {
        None => DropOutcome::MalformedTarget(target.to_string()),
        Some(DropTarget::Canvas) => {
            let element = factory.create(source);
            let id = element.id.clone();
            DropOutcome::Inserted {
                forest: forest.pushed(element),
                id,
            }
        }
        Some(DropTarget::Column { row_id, column }) => drop_into_column(forest, source, row_id, column, factory),
    }
}

fn drop_into_column(
    forest: &ElementList,
    source: &str,
    row_id: ElementId,
    column: usize,
    factory: &mut ElementFactory,
) -> DropOutcome {
    let Some((index, node)) = forest.iter().enumerate().find(|(_, node)| node.id == row_id) else {
        return DropOutcome::RowNotFound(row_id);
    };
    let Content::Row(stored) = &node.content else {
        return DropOutcome::RowNotFound(row_id);
    };

    let row = normalize_columns(stored);
    if column >= row.columns.len() {
        return DropOutcome::ColumnOutOfRange {
            row_id,
            column,
            columns: row.columns.len(),
        };
    }

    let element = factory.create(source);
    let id = element.id.clone();
    let slot = row.columns[column].pushed(element);

    let mut nodes = forest.to_nodes();
    nodes[index] = Arc::new(with_slot(node, &row, column, slot));

    DropOutcome::Inserted {
        forest: ElementList::from_nodes(nodes),
        id,
    }
}
