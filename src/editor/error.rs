use std::fmt;
use std::path::PathBuf;

#[derive(Debug)]
pub enum EditorError {
    /// Imported document root is not an array of nodes
    DocumentShape(String),

    /// JSON parsing failed (document text, field list, HTTP body)
    JsonParse { context: String, source: serde_json::Error },

    /// JSON serialization failed
    JsonSerialize { context: String, source: serde_json::Error },

    /// Reading or writing a local file failed
    Io { path: PathBuf, source: std::io::Error },

    /// The persistence service could not be reached
    Http { context: String, source: reqwest::Error },

    /// The persistence service answered with a failure status
    Api { status: u16, message: String },

    /// User input rejected before any state change
    Validation(String),

    /// A property edit was rejected
    Property { key: String, reason: String },

    /// In-process store failure (poisoned lock, missing record)
    Store(String),
}

impl fmt::Display for EditorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditorError::DocumentShape(msg) => {
                write!(f, "Invalid document: {}", msg)
            }
            EditorError::JsonParse { context, source } => {
                write!(f, "JSON parse error ({}): {}", context, source)
            }
            EditorError::JsonSerialize { context, source } => {
                write!(f, "JSON serialize error ({}): {}", context, source)
            }
            EditorError::Io { path, source } => {
                write!(f, "I/O error on {}: {}", path.display(), source)
            }
            EditorError::Http { context, source } => {
                write!(f, "Request failed ({}): {}", context, source)
            }
            EditorError::Api { status, message } => {
                write!(f, "Server returned {}: {}", status, message)
            }
            EditorError::Validation(msg) => {
                write!(f, "Invalid input: {}", msg)
            }
            EditorError::Property { key, reason } => {
                write!(f, "Cannot set '{}': {}", key, reason)
            }
            EditorError::Store(msg) => {
                write!(f, "Store error: {}", msg)
            }
        }
    }
}

impl std::error::Error for EditorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EditorError::JsonParse { source, .. } => Some(source),
            EditorError::JsonSerialize { source, .. } => Some(source),
            EditorError::Io { source, .. } => Some(source),
            EditorError::Http { source, .. } => Some(source),
            _ => None,
        }
    }
}
