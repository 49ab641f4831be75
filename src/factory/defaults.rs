use crate::model::attributes::{
    ButtonAttrs, CheckboxGroup, CheckboxOption, DateInput, DividerLine, FieldKind, FileInput,
    NumberInput, OptionLayout, PhoneInput, RadioGroup, RatingInput, SelectInput, SliderInput,
    TextArea, TextInput, ToggleInput,
};
use crate::model::date_format::DateFormat;
use crate::model::element::{Content, ElementType, Row};

// ============================================================================
// Per-type defaults
// ============================================================================

/// Fully-defaulted content for a type tag. Layout rows get empty slots;
/// unknown tags get an attribute-less `FieldKind::Other`.
pub fn default_content(element_type: &ElementType) -> Content {
    match element_type {
        ElementType::Row(layout) => Content::Row(Row::empty(*layout)),
        other => Content::Field(default_field_kind(other)),
    }
}

fn default_field_kind(element_type: &ElementType) -> FieldKind {
    match element_type {
        ElementType::Text => FieldKind::Text(TextInput {
            placeholder: "Enter text".to_string(),
        }),
        ElementType::Textarea => FieldKind::Textarea(TextArea {
            placeholder: "Enter text".to_string(),
            rows: 4,
        }),
        ElementType::Number => FieldKind::Number(NumberInput {
            placeholder: String::new(),
            min: None,
            max: None,
            step: 1.0,
        }),
        ElementType::Email => FieldKind::Email(TextInput {
            placeholder: "name@example.com".to_string(),
        }),
        ElementType::Phone => FieldKind::Phone(PhoneInput {
            placeholder: String::new(),
            pattern: String::new(),
        }),
        ElementType::Checkbox => FieldKind::Checkbox(CheckboxGroup {
            options: vec![
                CheckboxOption::new("Option 1", false),
                CheckboxOption::new("Option 2", false),
            ],
            layout: OptionLayout::Vertical,
        }),
        ElementType::Radio => FieldKind::Radio(RadioGroup {
            options: placeholder_options(),
            layout: OptionLayout::Vertical,
        }),
        ElementType::Select => FieldKind::Select(SelectInput {
            options: placeholder_options(),
        }),
        ElementType::Date => FieldKind::Date(DateInput {
            default_date: String::new(),
            min_date: String::new(),
            max_date: String::new(),
            format: DateFormat::Iso,
        }),
        ElementType::Rating => FieldKind::Rating(RatingInput {
            max: 5.0,
            precision: 0.5,
            default_value: 0.0,
        }),
        ElementType::Slider => FieldKind::Slider(SliderInput {
            min: 0.0,
            max: 100.0,
            step: 1.0,
            default_value: 0.0,
        }),
        ElementType::Toggle => FieldKind::Toggle(ToggleInput {
            on_label: "On".to_string(),
            off_label: "Off".to_string(),
            checked: false,
        }),
        ElementType::File => FieldKind::File(FileInput {
            accept: String::new(),
            multiple: false,
        }),
        ElementType::Divider => FieldKind::Divider(DividerLine {
            label: String::new(),
        }),
        ElementType::Button => FieldKind::Button(default_button()),
        ElementType::Row(layout) => FieldKind::Other(layout.tag().to_string()),
        ElementType::Other(tag) => FieldKind::Other(tag.clone()),
    }
}

fn placeholder_options() -> Vec<String> {
    vec!["Option 1".to_string(), "Option 2".to_string()]
}

fn default_button() -> ButtonAttrs {
    ButtonAttrs {
        label: "Button".to_string(),
        variant: "contained".to_string(),
        color: "primary".to_string(),
        size: "medium".to_string(),
        disabled: false,
        full_width: false,
        type_attr: "button".to_string(),
        href: String::new(),
        target: "_self".to_string(),
        start_icon: "none".to_string(),
        end_icon: "none".to_string(),
        border_radius: 8.0,
        disable_elevation: false,
        loading: false,
    }
}
