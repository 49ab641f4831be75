use crate::model::element::{ElementId, ElementList, ElementType, FormElement};

use super::defaults::default_content;

/// Largest id `reserve_past` will step over. Ids above it are treated as
/// opaque text, which keeps the counter far away from overflow.
pub const MAX_RESERVED_ID: u64 = 9_007_199_254_740_991;

/// Creates fully-defaulted nodes and owns id allocation.
///
/// Ids come from a monotonically increasing counter, so two nodes created
/// back to back can never share an id. After importing a document, call
/// `reserve_past` so new ids do not collide with imported numeric ones.
#[derive(Debug, Clone)]
pub struct ElementFactory {
    next_id: u64,
}

impl ElementFactory {
    pub fn new() -> Self {
        Self { next_id: 1 }
    }

    pub fn starting_at(next_id: u64) -> Self {
        Self {
            next_id: next_id.max(1),
        }
    }

    /// The id the next `create` call will receive.
    pub fn peek_next(&self) -> u64 {
        self.next_id
    }

    pub fn next_id(&mut self) -> ElementId {
        let id = self.next_id;
        self.next_id = self.next_id.saturating_add(1);
        ElementId::from(id)
    }

    /// New node for a type tag. Unknown tags yield a bare node; never fails.
    pub fn create(&mut self, tag: &str) -> FormElement {
        self.create_type(&ElementType::parse(tag))
    }

    pub fn create_type(&mut self, element_type: &ElementType) -> FormElement {
        FormElement {
            id: self.next_id(),
            name: String::new(),
            content: default_content(element_type),
        }
    }

    /// Move the counter past every numeric id up to `MAX_RESERVED_ID`
    /// found anywhere in `forest`.
    pub fn reserve_past(&mut self, forest: &ElementList) {
        if let Some(max) = max_numeric_id(forest) {
            self.next_id = self.next_id.max(max + 1);
        }
    }
}

impl Default for ElementFactory {
    fn default() -> Self {
        Self::new()
    }
}

fn max_numeric_id(list: &ElementList) -> Option<u64> {
    list.iter()
        .flat_map(|node| {
            let nested = node
                .row()
                .into_iter()
                .flat_map(|row| row.columns.iter())
                .filter_map(max_numeric_id);
            node.id
                .as_number()
                .filter(|id| *id <= MAX_RESERVED_ID)
                .into_iter()
                .chain(nested)
        })
        .max()
}
