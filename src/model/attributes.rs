use serde::{Deserialize, Serialize};

use super::date_format::DateFormat;

// ============================================================================
// Shared attribute pieces
// ============================================================================

/// One entry of a checkbox group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckboxOption {
    #[serde(default)]
    pub label: String,

    #[serde(default)]
    pub checked: bool,
}

impl CheckboxOption {
    pub fn new(label: impl Into<String>, checked: bool) -> Self {
        Self {
            label: label.into(),
            checked,
        }
    }
}

/// Arrangement of a radio or checkbox group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OptionLayout {
    #[default]
    Vertical,
    Horizontal,
}

impl OptionLayout {
    /// Unknown values fall back to vertical.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "horizontal" | "row" => OptionLayout::Horizontal,
            _ => OptionLayout::Vertical,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OptionLayout::Vertical => "vertical",
            OptionLayout::Horizontal => "horizontal",
        }
    }
}

// ============================================================================
// Per-type attribute records
// ============================================================================

/// `text` and `email` inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct TextInput {
    pub placeholder: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextArea {
    pub placeholder: String,
    pub rows: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NumberInput {
    pub placeholder: String,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub step: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PhoneInput {
    pub placeholder: String,
    /// Validation regex, empty when unconstrained.
    pub pattern: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CheckboxGroup {
    pub options: Vec<CheckboxOption>,
    pub layout: OptionLayout,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RadioGroup {
    pub options: Vec<String>,
    pub layout: OptionLayout,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectInput {
    pub options: Vec<String>,
}

/// Date picker. Dates are stored as ISO `YYYY-MM-DD` text (empty = unset);
/// `format` only affects how generated code displays them.
#[derive(Debug, Clone, PartialEq)]
pub struct DateInput {
    pub default_date: String,
    pub min_date: String,
    pub max_date: String,
    pub format: DateFormat,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RatingInput {
    pub max: f64,
    pub precision: f64,
    pub default_value: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SliderInput {
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub default_value: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ToggleInput {
    pub on_label: String,
    pub off_label: String,
    pub checked: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FileInput {
    pub accept: String,
    pub multiple: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DividerLine {
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ButtonAttrs {
    pub label: String,
    pub variant: String,
    pub color: String,
    pub size: String,
    pub disabled: bool,
    pub full_width: bool,
    /// HTML `type` attribute: button, submit or reset.
    pub type_attr: String,
    pub href: String,
    pub target: String,
    /// Icon tag (`none`, `save`, `send`, `add`, `delete`, `check`).
    pub start_icon: String,
    pub end_icon: String,
    /// Corner radius in pixels.
    pub border_radius: f64,
    pub disable_elevation: bool,
    pub loading: bool,
}

// ============================================================================
// Tagged union of leaf attributes
// ============================================================================

/// Type-specific attributes of a leaf node. The variant is the node's type.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    Text(TextInput),
    Textarea(TextArea),
    Number(NumberInput),
    Email(TextInput),
    Phone(PhoneInput),
    Checkbox(CheckboxGroup),
    Radio(RadioGroup),
    Select(SelectInput),
    Date(DateInput),
    Rating(RatingInput),
    Slider(SliderInput),
    Toggle(ToggleInput),
    File(FileInput),
    Divider(DividerLine),
    Button(ButtonAttrs),
    /// Unrecognized tag, preserved verbatim. Carries no attributes.
    Other(String),
}

impl FieldKind {
    pub fn type_tag(&self) -> &str {
        match self {
            FieldKind::Text(_) => "text",
            FieldKind::Textarea(_) => "textarea",
            FieldKind::Number(_) => "number",
            FieldKind::Email(_) => "email",
            FieldKind::Phone(_) => "phone",
            FieldKind::Checkbox(_) => "checkbox",
            FieldKind::Radio(_) => "radio",
            FieldKind::Select(_) => "select",
            FieldKind::Date(_) => "date",
            FieldKind::Rating(_) => "rating",
            FieldKind::Slider(_) => "slider",
            FieldKind::Toggle(_) => "toggle",
            FieldKind::File(_) => "file",
            FieldKind::Divider(_) => "divider",
            FieldKind::Button(_) => "button",
            FieldKind::Other(tag) => tag,
        }
    }

    /// Types that carry their own `label` attribute besides `name`.
    pub fn dedicated_label(&self) -> Option<&str> {
        match self {
            FieldKind::Button(button) => Some(&button.label),
            FieldKind::Divider(divider) => Some(&divider.label),
            _ => None,
        }
    }

    /// Set the dedicated label. No-op for types without one.
    pub fn set_dedicated_label(&mut self, label: String) {
        match self {
            FieldKind::Button(button) => button.label = label,
            FieldKind::Divider(divider) => divider.label = label,
            _ => {}
        }
    }

    /// Plain string options of radio and select fields.
    pub fn options(&self) -> Option<&[String]> {
        match self {
            FieldKind::Radio(radio) => Some(&radio.options),
            FieldKind::Select(select) => Some(&select.options),
            _ => None,
        }
    }

    pub fn options_mut(&mut self) -> Option<&mut Vec<String>> {
        match self {
            FieldKind::Radio(radio) => Some(&mut radio.options),
            FieldKind::Select(select) => Some(&mut select.options),
            _ => None,
        }
    }

    pub fn checkbox_options_mut(&mut self) -> Option<&mut Vec<CheckboxOption>> {
        match self {
            FieldKind::Checkbox(group) => Some(&mut group.options),
            _ => None,
        }
    }
}
