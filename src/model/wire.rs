use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::factory::defaults::default_content;

use super::attributes::{
    ButtonAttrs, CheckboxGroup, CheckboxOption, DateInput, DividerLine, FieldKind, FileInput,
    NumberInput, OptionLayout, PhoneInput, RadioGroup, RatingInput, SelectInput, SliderInput,
    TextArea, TextInput, ToggleInput,
};
use super::date_format::DateFormat;
use super::element::{Content, ElementId, ElementList, ElementType, FormElement, Row};

// ============================================================================
// Attribute bag (text representation of FieldKind)
// ============================================================================

/// Loosely-typed attribute vocabulary shared by exported documents and
/// persisted fields. Every key is optional; absent keys mean "use the default
/// for this type". Numbers are accepted as JSON numbers or numeric strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeBag {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,

    #[serde(
        default,
        deserialize_with = "lenient_number",
        serialize_with = "compact_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub rows: Option<f64>,

    #[serde(
        default,
        deserialize_with = "lenient_number",
        serialize_with = "compact_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub min: Option<f64>,

    #[serde(
        default,
        deserialize_with = "lenient_number",
        serialize_with = "compact_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub max: Option<f64>,

    #[serde(
        default,
        deserialize_with = "lenient_number",
        serialize_with = "compact_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub step: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checkbox_options: Option<Vec<CheckboxOption>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<String>,

    /// Type-specific spellings of `layout`, read when `layout` is absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radio_layout: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checkbox_layout: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_date: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_date: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_date: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_format: Option<String>,

    #[serde(
        default,
        deserialize_with = "lenient_number",
        serialize_with = "compact_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub precision: Option<f64>,

    #[serde(
        default,
        deserialize_with = "lenient_number",
        serialize_with = "compact_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub default_value: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_label: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub off_label: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checked: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accept: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multiple: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disabled: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_width: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_attr: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_icon: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_icon: Option<String>,

    #[serde(
        default,
        deserialize_with = "lenient_number",
        serialize_with = "compact_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub border_radius: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disable_elevation: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loading: Option<bool>,
}

fn set<T: Clone>(target: &mut T, value: &Option<T>) {
    if let Some(v) = value {
        *target = v.clone();
    }
}

impl FieldKind {
    /// Text representation of the attributes. The dedicated label of
    /// buttons and dividers is not part of the bag; it travels as `label`.
    pub fn to_bag(&self) -> AttributeBag {
        let mut bag = AttributeBag::default();
        match self {
            FieldKind::Text(input) | FieldKind::Email(input) => {
                bag.placeholder = Some(input.placeholder.clone());
            }
            FieldKind::Textarea(area) => {
                bag.placeholder = Some(area.placeholder.clone());
                bag.rows = Some(f64::from(area.rows));
            }
            FieldKind::Number(number) => {
                bag.placeholder = Some(number.placeholder.clone());
                bag.min = number.min;
                bag.max = number.max;
                bag.step = Some(number.step);
            }
            FieldKind::Phone(phone) => {
                bag.placeholder = Some(phone.placeholder.clone());
                bag.pattern = Some(phone.pattern.clone());
            }
            FieldKind::Checkbox(group) => {
                bag.checkbox_options = Some(group.options.clone());
                bag.layout = Some(group.layout.as_str().to_string());
            }
            FieldKind::Radio(group) => {
                bag.options = Some(group.options.clone());
                bag.layout = Some(group.layout.as_str().to_string());
            }
            FieldKind::Select(select) => {
                bag.options = Some(select.options.clone());
            }
            FieldKind::Date(date) => {
                bag.default_date = Some(date.default_date.clone());
                bag.min_date = Some(date.min_date.clone());
                bag.max_date = Some(date.max_date.clone());
                bag.date_format = Some(date.format.as_str().to_string());
            }
            FieldKind::Rating(rating) => {
                bag.max = Some(rating.max);
                bag.precision = Some(rating.precision);
                bag.default_value = Some(rating.default_value);
            }
            FieldKind::Slider(slider) => {
                bag.min = Some(slider.min);
                bag.max = Some(slider.max);
                bag.step = Some(slider.step);
                bag.default_value = Some(slider.default_value);
            }
            FieldKind::Toggle(toggle) => {
                bag.on_label = Some(toggle.on_label.clone());
                bag.off_label = Some(toggle.off_label.clone());
                bag.checked = Some(toggle.checked);
            }
            FieldKind::File(file) => {
                bag.accept = Some(file.accept.clone());
                bag.multiple = Some(file.multiple);
            }
            FieldKind::Divider(_) | FieldKind::Other(_) => {}
            FieldKind::Button(button) => {
                bag.variant = Some(button.variant.clone());
                bag.color = Some(button.color.clone());
                bag.size = Some(button.size.clone());
                bag.disabled = Some(button.disabled);
                bag.full_width = Some(button.full_width);
                bag.type_attr = Some(button.type_attr.clone());
                bag.href = Some(button.href.clone());
                bag.target = Some(button.target.clone());
                bag.start_icon = Some(button.start_icon.clone());
                bag.end_icon = Some(button.end_icon.clone());
                bag.border_radius = Some(button.border_radius);
                bag.disable_elevation = Some(button.disable_elevation);
                bag.loading = Some(button.loading);
            }
        }
        bag
    }

    /// Overwrite every attribute the bag carries; keys irrelevant to this
    /// type are ignored and absent keys keep their current value.
    pub fn overlay(&mut self, bag: &AttributeBag) {
        match self {
            FieldKind::Text(TextInput { placeholder }) | FieldKind::Email(TextInput { placeholder }) => {
                set(placeholder, &bag.placeholder);
            }
            FieldKind::Textarea(TextArea { placeholder, rows }) => {
                set(placeholder, &bag.placeholder);
                if let Some(value) = bag.rows {
                    *rows = value.max(1.0) as u32;
                }
            }
            FieldKind::Number(NumberInput { placeholder, min, max, step }) => {
                set(placeholder, &bag.placeholder);
                if bag.min.is_some() {
                    *min = bag.min;
                }
                if bag.max.is_some() {
                    *max = bag.max;
                }
                set(step, &bag.step);
            }
            FieldKind::Phone(PhoneInput { placeholder, pattern }) => {
                set(placeholder, &bag.placeholder);
                set(pattern, &bag.pattern);
            }
            FieldKind::Checkbox(CheckboxGroup { options, layout }) => {
                set(options, &bag.checkbox_options);
                if let Some(value) = bag.layout.as_ref().or(bag.checkbox_layout.as_ref()) {
                    *layout = OptionLayout::parse(value);
                }
            }
            FieldKind::Radio(RadioGroup { options, layout }) => {
                set(options, &bag.options);
                if let Some(value) = bag.layout.as_ref().or(bag.radio_layout.as_ref()) {
                    *layout = OptionLayout::parse(value);
                }
            }
            FieldKind::Select(SelectInput { options }) => {
                set(options, &bag.options);
            }
            FieldKind::Date(DateInput { default_date, min_date, max_date, format }) => {
                set(default_date, &bag.default_date);
                set(min_date, &bag.min_date);
                set(max_date, &bag.max_date);
                if let Some(value) = &bag.date_format {
                    *format = DateFormat::parse(value);
                }
            }
            FieldKind::Rating(RatingInput { max, precision, default_value }) => {
                set(max, &bag.max);
                set(precision, &bag.precision);
                set(default_value, &bag.default_value);
            }
            FieldKind::Slider(SliderInput { min, max, step, default_value }) => {
                set(min, &bag.min);
                set(max, &bag.max);
                set(step, &bag.step);
                set(default_value, &bag.default_value);
            }
            FieldKind::Toggle(ToggleInput { on_label, off_label, checked }) => {
                set(on_label, &bag.on_label);
                set(off_label, &bag.off_label);
                set(checked, &bag.checked);
            }
            FieldKind::File(FileInput { accept, multiple }) => {
                set(accept, &bag.accept);
                set(multiple, &bag.multiple);
            }
            FieldKind::Divider(DividerLine { .. }) | FieldKind::Other(_) => {}
            FieldKind::Button(button) => overlay_button(button, bag),
        }
    }
}

fn overlay_button(button: &mut ButtonAttrs, bag: &AttributeBag) {
    set(&mut button.variant, &bag.variant);
    set(&mut button.color, &bag.color);
    set(&mut button.size, &bag.size);
    set(&mut button.disabled, &bag.disabled);
    set(&mut button.full_width, &bag.full_width);
    set(&mut button.type_attr, &bag.type_attr);
    set(&mut button.href, &bag.href);
    set(&mut button.target, &bag.target);
    set(&mut button.start_icon, &bag.start_icon);
    set(&mut button.end_icon, &bag.end_icon);
    set(&mut button.border_radius, &bag.border_radius);
    set(&mut button.disable_elevation, &bag.disable_elevation);
    set(&mut button.loading, &bag.loading);
}

// ============================================================================
// FormElement (de)serialization
// ============================================================================

/// Exported node as read from text. Rows may arrive with missing, null or
/// surplus columns; they are normalized on conversion.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawElement {
    #[serde(default)]
    id: Option<ElementId>,

    #[serde(rename = "type", default)]
    element_type: String,

    #[serde(default)]
    name: Option<String>,

    #[serde(default)]
    label: Option<String>,

    #[serde(default)]
    columns: Option<Vec<Option<Vec<RawElement>>>>,

    #[serde(flatten)]
    attributes: AttributeBag,
}

impl From<RawElement> for FormElement {
    fn from(raw: RawElement) -> Self {
        let element_type = ElementType::parse(&raw.element_type);
        let content = match default_content(&element_type) {
            Content::Row(row) => {
                let columns = raw
                    .columns
                    .unwrap_or_default()
                    .into_iter()
                    .map(|slot| {
                        slot.unwrap_or_default()
                            .into_iter()
                            .map(FormElement::from)
                            .collect::<ElementList>()
                    })
                    .collect();
                Content::Row(Row::with_columns(row.layout, columns))
            }
            Content::Field(mut kind) => {
                kind.overlay(&raw.attributes);
                if let Some(label) = raw.label {
                    kind.set_dedicated_label(label);
                }
                Content::Field(kind)
            }
        };

        FormElement {
            id: raw.id.unwrap_or_default(),
            name: raw.name.unwrap_or_default(),
            content,
        }
    }
}

impl<'de> Deserialize<'de> for FormElement {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        RawElement::deserialize(deserializer).map(FormElement::from)
    }
}

/// Borrowed view used when writing a node out.
#[derive(Serialize)]
struct ElementView<'a> {
    id: &'a ElementId,

    #[serde(rename = "type")]
    element_type: &'a str,

    name: &'a str,

    #[serde(skip_serializing_if = "Option::is_none")]
    label: Option<&'a str>,

    #[serde(skip_serializing_if = "Option::is_none")]
    columns: Option<&'a [ElementList]>,

    #[serde(flatten)]
    attributes: AttributeBag,
}

impl Serialize for FormElement {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let (label, columns, attributes) = match &self.content {
            Content::Field(kind) => (kind.dedicated_label(), None, kind.to_bag()),
            Content::Row(row) => (None, Some(row.columns.as_slice()), AttributeBag::default()),
        };
        ElementView {
            id: &self.id,
            element_type: self.type_tag(),
            name: &self.name,
            label,
            columns,
            attributes,
        }
        .serialize(serializer)
    }
}

// ============================================================================
// Lenient scalar helpers
// ============================================================================

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Unsigned(u64),
    Signed(i64),
    Float(f64),
    Text(String),
}

/// Accept a number or numeric text; empty text and null become `None`.
fn lenient_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    Ok(match Option::<Scalar>::deserialize(deserializer)? {
        Some(Scalar::Unsigned(n)) => Some(n as f64),
        Some(Scalar::Signed(n)) => Some(n as f64),
        Some(Scalar::Float(n)) => Some(n),
        Some(Scalar::Text(text)) => text.trim().parse::<f64>().ok(),
        None => None,
    })
}

/// Write integral values as JSON integers (`4`, not `4.0`).
fn compact_number<S: Serializer>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error> {
    match value {
        Some(n) if n.fract() == 0.0 && n.abs() < 1e15 => serializer.serialize_i64(*n as i64),
        Some(n) => serializer.serialize_f64(*n),
        None => serializer.serialize_none(),
    }
}

/// Accept text or a number, yielding text. Integral floats lose their
/// fractional part (`1700000000000.0` becomes `"1700000000000"`).
pub(crate) fn text_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Scalar::deserialize(deserializer)? {
        Scalar::Unsigned(n) => n.to_string(),
        Scalar::Signed(n) => n.to_string(),
        Scalar::Float(n) if n.fract() == 0.0 && n.abs() < 1e15 => format!("{}", n as i64),
        Scalar::Float(n) => n.to_string(),
        Scalar::Text(text) => text,
    })
}
