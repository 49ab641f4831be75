const FALLBACK_NAME: &str = "GeneratedForm";

/// PascalCase component identifier derived from a form name.
///
/// Punctuation is dropped, whitespace-separated words are capitalized and
/// joined. An empty result falls back to `GeneratedForm`; a result that does
/// not start with a letter is prefixed with `Form`.
pub fn component_name(form_name: &str) -> String {
    let cleaned: String = form_name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace())
        .collect();

    let name: String = cleaned.split_whitespace().map(capitalize).collect();

    match name.chars().next() {
        None => FALLBACK_NAME.to_string(),
        Some(first) if first.is_ascii_alphabetic() => name,
        Some(_) => format!("Form{}", name),
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}
