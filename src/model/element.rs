use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::attributes::FieldKind;

// ============================================================================
// Identifiers
// ============================================================================

/// Stable identifier of a tree node.
///
/// Ids allocated by the `ElementFactory` are decimal counters, but imported
/// documents may carry any text. Numeric ids in JSON are accepted and kept as
/// their decimal text so that drop descriptors like `"5-column-1"` resolve.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct ElementId(String);

impl ElementId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Numeric value of the id, when it is a plain decimal counter.
    pub fn as_number(&self) -> Option<u64> {
        if self.0.is_empty() || !self.0.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        self.0.parse().ok()
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ElementId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ElementId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<u64> for ElementId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

impl Serialize for ElementId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ElementId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        super::wire::text_or_number(deserializer).map(Self)
    }
}

// ============================================================================
// Type vocabulary
// ============================================================================

/// Multi-column layout row variants. Each implies a fixed column count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowLayout {
    TwoColumns,
    ThreeColumns,
    FourColumns,
}

impl RowLayout {
    pub fn column_count(self) -> usize {
        match self {
            RowLayout::TwoColumns => 2,
            RowLayout::ThreeColumns => 3,
            RowLayout::FourColumns => 4,
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            RowLayout::TwoColumns => "twoColumnRow",
            RowLayout::ThreeColumns => "threeColumnRow",
            RowLayout::FourColumns => "fourColumnRow",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "twoColumnRow" => Some(RowLayout::TwoColumns),
            "threeColumnRow" => Some(RowLayout::ThreeColumns),
            "fourColumnRow" => Some(RowLayout::FourColumns),
            _ => None,
        }
    }
}

/// The closed vocabulary of palette items, plus a catch-all for unknown tags.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ElementType {
    Text,
    Textarea,
    Number,
    Email,
    Phone,
    Checkbox,
    Radio,
    Select,
    Date,
    Rating,
    Slider,
    Toggle,
    File,
    Divider,
    Button,
    Row(RowLayout),
    Other(String),
}

impl ElementType {
    /// Every tag the palette offers, in palette order.
    pub const PALETTE: [&'static str; 18] = [
        "text",
        "textarea",
        "number",
        "email",
        "phone",
        "checkbox",
        "radio",
        "select",
        "date",
        "rating",
        "slider",
        "toggle",
        "file",
        "divider",
        "button",
        "twoColumnRow",
        "threeColumnRow",
        "fourColumnRow",
    ];

    /// Parse a tag. Never fails: unknown tags become `Other`.
    pub fn parse(tag: &str) -> Self {
        match tag {
            "text" => ElementType::Text,
            "textarea" => ElementType::Textarea,
            "number" => ElementType::Number,
            "email" => ElementType::Email,
            "phone" => ElementType::Phone,
            "checkbox" => ElementType::Checkbox,
            "radio" => ElementType::Radio,
            "select" => ElementType::Select,
            "date" => ElementType::Date,
            "rating" => ElementType::Rating,
            "slider" => ElementType::Slider,
            "toggle" => ElementType::Toggle,
            "file" => ElementType::File,
            "divider" => ElementType::Divider,
            "button" => ElementType::Button,
            other => match RowLayout::from_tag(other) {
                Some(layout) => ElementType::Row(layout),
                None => ElementType::Other(other.to_string()),
            },
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ElementType::Text => "text",
            ElementType::Textarea => "textarea",
            ElementType::Number => "number",
            ElementType::Email => "email",
            ElementType::Phone => "phone",
            ElementType::Checkbox => "checkbox",
            ElementType::Radio => "radio",
            ElementType::Select => "select",
            ElementType::Date => "date",
            ElementType::Rating => "rating",
            ElementType::Slider => "slider",
            ElementType::Toggle => "toggle",
            ElementType::File => "file",
            ElementType::Divider => "divider",
            ElementType::Button => "button",
            ElementType::Row(layout) => layout.tag(),
            ElementType::Other(tag) => tag,
        }
    }

    pub fn row_layout(&self) -> Option<RowLayout> {
        match self {
            ElementType::Row(layout) => Some(*layout),
            _ => None,
        }
    }

    pub fn is_row(&self) -> bool {
        self.row_layout().is_some()
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Tree nodes
// ============================================================================

/// One node of the form-definition tree.
///
/// The type-specific attributes live in `content`: either a leaf `FieldKind`
/// or a layout `Row`. A leaf can never carry columns.
#[derive(Debug, Clone, PartialEq)]
pub struct FormElement {
    pub id: ElementId,
    pub name: String,
    pub content: Content,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Content {
    Field(FieldKind),
    Row(Row),
}

/// A layout row: a fixed number of slots, each an ordered list of nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub layout: RowLayout,
    pub columns: Vec<ElementList>,
}

impl Row {
    /// A row with every slot empty.
    pub fn empty(layout: RowLayout) -> Self {
        Self {
            layout,
            columns: vec![ElementList::new(); layout.column_count()],
        }
    }

    /// Build a row, padding missing slots with empty lists and dropping
    /// surplus ones so that `columns.len() == layout.column_count()`.
    pub fn with_columns(layout: RowLayout, mut columns: Vec<ElementList>) -> Self {
        columns.resize_with(layout.column_count(), ElementList::new);
        Self { layout, columns }
    }

    pub fn is_normalized(&self) -> bool {
        self.columns.len() == self.layout.column_count()
    }
}

impl FormElement {
    pub fn new(id: impl Into<ElementId>, name: impl Into<String>, content: Content) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            content,
        }
    }

    pub fn element_type(&self) -> ElementType {
        ElementType::parse(self.type_tag())
    }

    pub fn type_tag(&self) -> &str {
        match &self.content {
            Content::Field(kind) => kind.type_tag(),
            Content::Row(row) => row.layout.tag(),
        }
    }

    pub fn field(&self) -> Option<&FieldKind> {
        match &self.content {
            Content::Field(kind) => Some(kind),
            Content::Row(_) => None,
        }
    }

    pub fn field_mut(&mut self) -> Option<&mut FieldKind> {
        match &mut self.content {
            Content::Field(kind) => Some(kind),
            Content::Row(_) => None,
        }
    }

    pub fn row(&self) -> Option<&Row> {
        match &self.content {
            Content::Row(row) => Some(row),
            Content::Field(_) => None,
        }
    }

    pub fn is_row(&self) -> bool {
        self.row().is_some()
    }

    /// Caption shown for the node: the dedicated label attribute (buttons,
    /// dividers) when set, otherwise `name`.
    pub fn caption(&self) -> &str {
        match self.field().and_then(FieldKind::dedicated_label) {
            Some(label) if !label.is_empty() => label,
            _ => &self.name,
        }
    }
}

// ============================================================================
// Shared node sequences
// ============================================================================

/// An ordered, immutable sequence of nodes: the forest root or a row slot.
///
/// Cloning is cheap. Nodes are reference counted so that tree updates copy
/// only the path to the changed node; `ptr_eq` tells whether two lists are
/// the very same allocation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementList(Arc<Vec<Arc<FormElement>>>);

/// The top-level sequence of a form.
pub type Forest = ElementList;

/// One column of a layout row.
pub type Slot = ElementList;

impl ElementList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_elements(elements: Vec<FormElement>) -> Self {
        Self(Arc::new(elements.into_iter().map(Arc::new).collect()))
    }

    pub fn from_nodes(nodes: Vec<Arc<FormElement>>) -> Self {
        Self(Arc::new(nodes))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Arc<FormElement>> {
        self.0.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Arc<FormElement>> {
        self.0.iter()
    }

    pub fn nodes(&self) -> &[Arc<FormElement>] {
        &self.0
    }

    /// Copy of the node handles, for building a modified sibling list.
    pub fn to_nodes(&self) -> Vec<Arc<FormElement>> {
        self.0.as_ref().clone()
    }

    /// A new list with `element` appended; `self` is left untouched.
    pub fn pushed(&self, element: FormElement) -> Self {
        let mut nodes = self.to_nodes();
        nodes.push(Arc::new(element));
        Self::from_nodes(nodes)
    }

    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Arc::ptr_eq(&a.0, &b.0)
    }
}

impl<'a> IntoIterator for &'a ElementList {
    type Item = &'a Arc<FormElement>;
    type IntoIter = std::slice::Iter<'a, Arc<FormElement>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<FormElement> for ElementList {
    fn from_iter<I: IntoIterator<Item = FormElement>>(iter: I) -> Self {
        Self::from_elements(iter.into_iter().collect())
    }
}

impl Serialize for ElementList {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.iter().map(|node| node.as_ref()))
    }
}

impl<'de> Deserialize<'de> for ElementList {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<FormElement>::deserialize(deserializer).map(Self::from_elements)
    }
}
