use serde::{Deserialize, Serialize};

use super::wire::AttributeBag;

/// Flattened, persistence-facing record of a leaf node.
///
/// Carries the type tag, the caption and the type-appropriate attributes.
/// No id, no columns: layout structure does not survive flattening.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    #[serde(rename = "type")]
    pub field_type: String,

    #[serde(default)]
    pub label: String,

    #[serde(flatten)]
    pub attributes: AttributeBag,
}

impl Field {
    pub fn new(field_type: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            field_type: field_type.into(),
            label: label.into(),
            attributes: AttributeBag::default(),
        }
    }

    pub fn with_attributes(mut self, attributes: AttributeBag) -> Self {
        self.attributes = attributes;
        self
    }
}
