// ============================================================================
// Escaping user text for generated JavaScript / JSX
// ============================================================================

/// Double-quoted JavaScript string literal, quotes included.
pub fn js_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '<' => out.push_str("\\u003c"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Characters that cannot appear verbatim inside a JSX attribute string or
/// a JSX text child.
fn needs_expression(s: &str) -> bool {
    s.chars()
        .any(|c| matches!(c, '"' | '\\' | '{' | '}' | '<' | '>' | '&') || c.is_control())
}

/// `name="value"`, or `name={"value"}` when the value would break out of a
/// plain attribute string.
pub fn jsx_attr(name: &str, value: &str) -> String {
    if needs_expression(value) {
        format!("{}={{{}}}", name, js_string(value))
    } else {
        format!("{}=\"{}\"", name, value)
    }
}

/// Text placed between JSX tags.
pub fn jsx_text(s: &str) -> String {
    if needs_expression(s) || s.trim() != s {
        format!("{{{}}}", js_string(s))
    } else {
        s.to_string()
    }
}

/// Text safe to embed in a `/* ... */` comment on a single line.
pub fn comment_text(s: &str) -> String {
    s.replace("*/", "* /").replace(['\n', '\r'], " ")
}

/// Number literal. Integral values drop the fractional part; non-finite
/// values become `0`.
pub fn js_number(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}
