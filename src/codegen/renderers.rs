use crate::model::attributes::{
    ButtonAttrs, CheckboxGroup, DateInput, FieldKind, FileInput, NumberInput, OptionLayout,
    PhoneInput, RadioGroup, RatingInput, SelectInput, SliderInput, ToggleInput,
};
use crate::model::date_format::DateFormat;
use crate::model::element::{Content, ElementList, FormElement, Row};

use super::escape::{comment_text, js_number, js_string, jsx_attr, jsx_text};
use super::imports::ImportSet;

const GRID_COLUMNS: usize = 12;

// ============================================================================
// Emitter
// ============================================================================

/// Accumulates indented JSX lines and the symbols they reference.
#[derive(Debug, Default)]
pub struct Emitter {
    out: String,
    imports: ImportSet,
}

impl Emitter {
    pub fn new() -> Self {
        Self::default()
    }

    fn line(&mut self, depth: usize, text: impl AsRef<str>) {
        for _ in 0..depth {
            self.out.push_str("  ");
        }
        self.out.push_str(text.as_ref());
        self.out.push('\n');
    }

    /// `{/* text */}` on its own line.
    pub fn comment(&mut self, depth: usize, text: &str) {
        self.line(depth, format!("{{/* {} */}}", comment_text(text)));
    }

    fn material(&mut self, symbol: &'static str) {
        self.imports.use_material(symbol);
    }

    pub fn body(&self) -> &str {
        &self.out
    }

    pub fn imports(&self) -> &ImportSet {
        &self.imports
    }

    pub fn into_parts(self) -> (String, ImportSet) {
        (self.out, self.imports)
    }
}

// ============================================================================
// Dispatch
// ============================================================================

pub fn render_forest(forest: &ElementList, emitter: &mut Emitter, depth: usize) {
    for element in forest {
        render_element(element, emitter, depth);
    }
}

pub fn render_element(element: &FormElement, emitter: &mut Emitter, depth: usize) {
    match &element.content {
        Content::Row(row) => render_row(row, emitter, depth),
        Content::Field(kind) => render_field(element, kind, emitter, depth),
    }
}

fn render_field(element: &FormElement, kind: &FieldKind, emitter: &mut Emitter, depth: usize) {
    let label = caption_or(element, fallback_label(kind));
    match kind {
        FieldKind::Text(input) => {
            emitter.material("TextField");
            emitter.line(
                depth,
                format!(
                    "<TextField {} {} fullWidth />",
                    jsx_attr("label", &label),
                    jsx_attr("placeholder", &input.placeholder)
                ),
            );
        }
        FieldKind::Textarea(area) => {
            emitter.material("TextField");
            emitter.line(
                depth,
                format!(
                    "<TextField {} {} multiline rows={{{}}} fullWidth />",
                    jsx_attr("label", &label),
                    jsx_attr("placeholder", &area.placeholder),
                    area.rows
                ),
            );
        }
        FieldKind::Number(number) => render_number(&label, number, emitter, depth),
        FieldKind::Email(input) => {
            emitter.material("TextField");
            emitter.line(
                depth,
                format!(
                    "<TextField {} type=\"email\" {} fullWidth />",
                    jsx_attr("label", &label),
                    jsx_attr("placeholder", &input.placeholder)
                ),
            );
        }
        FieldKind::Phone(phone) => render_phone(&label, phone, emitter, depth),
        FieldKind::Checkbox(group) => render_checkbox(&label, group, emitter, depth),
        FieldKind::Radio(group) => render_radio(element, &label, group, emitter, depth),
        FieldKind::Select(select) => render_select(&label, select, emitter, depth),
        FieldKind::Date(date) => render_date(&label, date, emitter, depth),
        FieldKind::Rating(rating) => render_rating(element, &label, rating, emitter, depth),
        FieldKind::Slider(slider) => render_slider(&label, slider, emitter, depth),
        FieldKind::Toggle(toggle) => render_toggle(&label, toggle, emitter, depth),
        FieldKind::File(file) => render_file(&label, file, emitter, depth),
        FieldKind::Divider(_) => {
            emitter.material("Divider");
            if label.is_empty() {
                emitter.line(depth, "<Divider />");
            } else {
                emitter.line(depth, format!("<Divider>{}</Divider>", jsx_text(&label)));
            }
        }
        FieldKind::Button(button) => render_button(&label, button, emitter, depth),
        FieldKind::Other(tag) => {
            emitter.comment(depth, &format!("Unsupported field type: {}", tag));
        }
    }
}

/// Caption used when the node's own caption is empty.
pub fn fallback_label(kind: &FieldKind) -> &'static str {
    match kind {
        FieldKind::Text(_) => "Text Field",
        FieldKind::Textarea(_) => "Text Area",
        FieldKind::Number(_) => "Number",
        FieldKind::Email(_) => "Email",
        FieldKind::Phone(_) => "Phone",
        FieldKind::Checkbox(_) => "Checkbox",
        FieldKind::Radio(_) => "Radio Button",
        FieldKind::Select(_) => "Dropdown",
        FieldKind::Date(_) => "Date Picker",
        FieldKind::Rating(_) => "Rating",
        FieldKind::Slider(_) => "Slider",
        FieldKind::Toggle(_) => "Toggle",
        FieldKind::File(_) => "Upload File",
        FieldKind::Divider(_) => "",
        FieldKind::Button(_) => "Button",
        FieldKind::Other(_) => "Field",
    }
}

fn caption_or(element: &FormElement, fallback: &str) -> String {
    let caption = element.caption();
    if caption.trim().is_empty() {
        fallback.to_string()
    } else {
        caption.to_string()
    }
}

// ============================================================================
// Layout rows
// ============================================================================

fn render_row(row: &Row, emitter: &mut Emitter, depth: usize) {
    emitter.material("Grid");
    let span = GRID_COLUMNS / row.columns.len().max(1);

    emitter.line(depth, "<Grid container spacing={2}>");
    for slot in &row.columns {
        emitter.line(depth + 1, format!("<Grid item xs={{12}} md={{{}}}>", span));
        if slot.is_empty() {
            emitter.comment(depth + 2, "Empty column");
        } else {
            render_forest(slot, emitter, depth + 2);
        }
        emitter.line(depth + 1, "</Grid>");
    }
    emitter.line(depth, "</Grid>");
}

// ============================================================================
// Leaf renderers
// ============================================================================

/// `{{ key: value, ... }}` or `None` when there are no entries.
fn object_prop(name: &str, entries: &[(&str, String)]) -> Option<String> {
    if entries.is_empty() {
        return None;
    }
    let body: Vec<String> = entries.iter().map(|(k, v)| format!("{}: {}", k, v)).collect();
    Some(format!("{}={{{{ {} }}}}", name, body.join(", ")))
}

fn join_attrs(attrs: Vec<String>) -> String {
    attrs.into_iter().filter(|a| !a.is_empty()).collect::<Vec<_>>().join(" ")
}

fn render_number(label: &str, number: &NumberInput, emitter: &mut Emitter, depth: usize) {
    emitter.material("TextField");

    let mut limits = Vec::new();
    if let Some(min) = number.min {
        limits.push(("min", js_number(min)));
    }
    if let Some(max) = number.max {
        limits.push(("max", js_number(max)));
    }
    limits.push(("step", js_number(number.step)));

    let attrs = join_attrs(vec![
        jsx_attr("label", label),
        "type=\"number\"".to_string(),
        jsx_attr("placeholder", &number.placeholder),
        object_prop("inputProps", &limits).unwrap_or_default(),
        "fullWidth".to_string(),
    ]);
    emitter.line(depth, format!("<TextField {} />", attrs));
}

fn render_phone(label: &str, phone: &PhoneInput, emitter: &mut Emitter, depth: usize) {
    emitter.material("TextField");

    let mut props = Vec::new();
    if !phone.pattern.is_empty() {
        props.push(("pattern", js_string(&phone.pattern)));
    }

    let attrs = join_attrs(vec![
        jsx_attr("label", label),
        "type=\"tel\"".to_string(),
        jsx_attr("placeholder", &phone.placeholder),
        object_prop("inputProps", &props).unwrap_or_default(),
        "fullWidth".to_string(),
    ]);
    emitter.line(depth, format!("<TextField {} />", attrs));
}

fn render_checkbox(label: &str, group: &CheckboxGroup, emitter: &mut Emitter, depth: usize) {
    for symbol in ["FormControl", "FormLabel", "FormGroup", "FormControlLabel", "Checkbox"] {
        emitter.material(symbol);
    }

    emitter.line(depth, "<FormControl component=\"fieldset\">");
    emitter.line(depth + 1, format!("<FormLabel component=\"legend\">{}</FormLabel>", jsx_text(label)));
    emitter.line(depth + 1, group_open("FormGroup", group.layout, None));
    for option in &group.options {
        let control = if option.checked {
            "<Checkbox defaultChecked />"
        } else {
            "<Checkbox />"
        };
        emitter.line(
            depth + 2,
            format!("<FormControlLabel control={{{}}} {} />", control, jsx_attr("label", &option.label)),
        );
    }
    emitter.line(depth + 1, "</FormGroup>");
    emitter.line(depth, "</FormControl>");
}

fn render_radio(element: &FormElement, label: &str, group: &RadioGroup, emitter: &mut Emitter, depth: usize) {
    for symbol in ["FormControl", "FormLabel", "RadioGroup", "FormControlLabel", "Radio"] {
        emitter.material(symbol);
    }

    let name = format!("radio-{}", element.id);
    emitter.line(depth, "<FormControl component=\"fieldset\">");
    emitter.line(depth + 1, format!("<FormLabel component=\"legend\">{}</FormLabel>", jsx_text(label)));
    emitter.line(depth + 1, group_open("RadioGroup", group.layout, Some(&name)));
    for option in &group.options {
        emitter.line(
            depth + 2,
            format!(
                "<FormControlLabel {} control={{<Radio />}} {} />",
                jsx_attr("value", option),
                jsx_attr("label", option)
            ),
        );
    }
    emitter.line(depth + 1, "</RadioGroup>");
    emitter.line(depth, "</FormControl>");
}

fn group_open(tag: &str, layout: OptionLayout, name: Option<&str>) -> String {
    let mut attrs = Vec::new();
    if layout == OptionLayout::Horizontal {
        attrs.push("row".to_string());
    }
    if let Some(name) = name {
        attrs.push(jsx_attr("name", name));
    }
    if attrs.is_empty() {
        format!("<{}>", tag)
    } else {
        format!("<{} {}>", tag, attrs.join(" "))
    }
}

fn render_select(label: &str, select: &SelectInput, emitter: &mut Emitter, depth: usize) {
    for symbol in ["FormControl", "InputLabel", "Select", "MenuItem"] {
        emitter.material(symbol);
    }

    emitter.line(depth, "<FormControl fullWidth>");
    emitter.line(depth + 1, format!("<InputLabel>{}</InputLabel>", jsx_text(label)));
    emitter.line(depth + 1, format!("<Select {} defaultValue=\"\">", jsx_attr("label", label)));
    for option in &select.options {
        emitter.line(
            depth + 2,
            format!("<MenuItem {}>{}</MenuItem>", jsx_attr("value", option), jsx_text(option)),
        );
    }
    emitter.line(depth + 1, "</Select>");
    emitter.line(depth, "</FormControl>");
}

fn render_date(label: &str, date: &DateInput, emitter: &mut Emitter, depth: usize) {
    emitter.material("TextField");
    let display = date.format;

    let default_value = display
        .to_display(&date.default_date)
        .map(|value| jsx_attr("defaultValue", &value))
        .unwrap_or_default();
    let min = display.to_display(&date.min_date);
    let max = display.to_display(&date.max_date);

    let attrs = if display == DateFormat::Iso {
        let mut bounds = Vec::new();
        if let Some(min) = &min {
            bounds.push(("min", js_string(min)));
        }
        if let Some(max) = &max {
            bounds.push(("max", js_string(max)));
        }
        join_attrs(vec![
            jsx_attr("label", label),
            "type=\"date\"".to_string(),
            default_value,
            "InputLabelProps={{ shrink: true }}".to_string(),
            object_prop("inputProps", &bounds).unwrap_or_default(),
            "fullWidth".to_string(),
        ])
    } else {
        let helper = match (&min, &max) {
            (Some(min), Some(max)) => format!("{}, from {} to {}", display.as_str(), min, max),
            (Some(min), None) => format!("{}, from {}", display.as_str(), min),
            (None, Some(max)) => format!("{}, until {}", display.as_str(), max),
            (None, None) => display.as_str().to_string(),
        };
        join_attrs(vec![
            jsx_attr("label", label),
            jsx_attr("placeholder", display.as_str()),
            default_value,
            object_prop("inputProps", &[("pattern", js_string(display.pattern()))]).unwrap_or_default(),
            jsx_attr("helperText", &helper),
            "fullWidth".to_string(),
        ])
    };
    emitter.line(depth, format!("<TextField {} />", attrs));
}

fn render_rating(element: &FormElement, label: &str, rating: &RatingInput, emitter: &mut Emitter, depth: usize) {
    for symbol in ["Typography", "Rating"] {
        emitter.material(symbol);
    }

    emitter.line(depth, "<Box>");
    emitter.line(depth + 1, format!("<Typography component=\"legend\">{}</Typography>", jsx_text(label)));
    emitter.line(
        depth + 1,
        format!(
            "<Rating {} max={{{}}} precision={{{}}} defaultValue={{{}}} />",
            jsx_attr("name", &format!("rating-{}", element.id)),
            js_number(rating.max),
            js_number(rating.precision),
            js_number(rating.default_value)
        ),
    );
    emitter.line(depth, "</Box>");
}

fn render_slider(label: &str, slider: &SliderInput, emitter: &mut Emitter, depth: usize) {
    for symbol in ["Typography", "Slider"] {
        emitter.material(symbol);
    }

    emitter.line(depth, "<Box>");
    emitter.line(depth + 1, format!("<Typography gutterBottom>{}</Typography>", jsx_text(label)));
    emitter.line(
        depth + 1,
        format!(
            "<Slider min={{{}}} max={{{}}} step={{{}}} defaultValue={{{}}} valueLabelDisplay=\"auto\" />",
            js_number(slider.min),
            js_number(slider.max),
            js_number(slider.step),
            js_number(slider.default_value)
        ),
    );
    emitter.line(depth, "</Box>");
}

fn render_toggle(label: &str, toggle: &ToggleInput, emitter: &mut Emitter, depth: usize) {
    for symbol in ["FormLabel", "Typography", "Switch"] {
        emitter.material(symbol);
    }

    let switch = if toggle.checked {
        "<Switch defaultChecked />"
    } else {
        "<Switch />"
    };

    emitter.line(depth, "<Box>");
    emitter.line(depth + 1, format!("<FormLabel>{}</FormLabel>", jsx_text(label)));
    emitter.line(depth + 1, "<Box sx={{ display: 'flex', alignItems: 'center' }}>");
    emitter.line(depth + 2, format!("<Typography>{}</Typography>", jsx_text(&toggle.off_label)));
    emitter.line(depth + 2, switch);
    emitter.line(depth + 2, format!("<Typography>{}</Typography>", jsx_text(&toggle.on_label)));
    emitter.line(depth + 1, "</Box>");
    emitter.line(depth, "</Box>");
}

fn render_file(label: &str, file: &FileInput, emitter: &mut Emitter, depth: usize) {
    emitter.material("Button");

    let mut input = vec!["hidden".to_string(), "type=\"file\"".to_string()];
    if !file.accept.is_empty() {
        input.push(jsx_attr("accept", &file.accept));
    }
    if file.multiple {
        input.push("multiple".to_string());
    }

    emitter.line(depth, "<Button variant=\"outlined\" component=\"label\">");
    emitter.line(depth + 1, jsx_text(label));
    emitter.line(depth + 1, format!("<input {} />", input.join(" ")));
    emitter.line(depth, "</Button>");
}

/// Icon component for an icon tag; `None` for `none` and unknown tags.
pub fn icon_symbol(tag: &str) -> Option<&'static str> {
    match tag {
        "save" => Some("SaveIcon"),
        "send" => Some("SendIcon"),
        "add" => Some("AddIcon"),
        "delete" => Some("DeleteIcon"),
        "check" => Some("CheckIcon"),
        _ => None,
    }
}

fn render_button(label: &str, button: &ButtonAttrs, emitter: &mut Emitter, depth: usize) {
    emitter.material("Button");

    let mut attrs = vec![
        jsx_attr("variant", &button.variant),
        jsx_attr("color", &button.color),
        jsx_attr("size", &button.size),
        jsx_attr("type", &button.type_attr),
    ];
    if button.disabled || button.loading {
        attrs.push("disabled".to_string());
    }
    if button.full_width {
        attrs.push("fullWidth".to_string());
    }
    if button.disable_elevation {
        attrs.push("disableElevation".to_string());
    }
    if !button.href.is_empty() {
        attrs.push(jsx_attr("href", &button.href));
        attrs.push(jsx_attr("target", &button.target));
    }

    if button.loading {
        emitter.material("CircularProgress");
        attrs.push("startIcon={<CircularProgress size={16} color=\"inherit\" />}".to_string());
    } else {
        if let Some(icon) = icon_symbol(&button.start_icon) {
            emitter.imports.use_icon(icon);
            attrs.push(format!("startIcon={{<{} />}}", icon));
        }
        if let Some(icon) = icon_symbol(&button.end_icon) {
            emitter.imports.use_icon(icon);
            attrs.push(format!("endIcon={{<{} />}}", icon));
        }
    }

    attrs.push(format!(
        "sx={{{{ borderRadius: {} }}}}",
        js_string(&format!("{}px", js_number(button.border_radius)))
    ));

    emitter.line(depth, format!("<Button {}>", attrs.join(" ")));
    emitter.line(depth + 1, jsx_text(label));
    emitter.line(depth, "</Button>");
}
