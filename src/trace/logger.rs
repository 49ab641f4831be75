use std::{fs::OpenOptions, io::Write, sync::Mutex};

use crate::trace::trace::EditEvent;

/// Appends `EditEvent`s to a JSONL file. A logger whose file could not be
/// opened, or one built with `disabled`, drops every event.
pub struct EditLogger {
    file: Option<Mutex<std::fs::File>>,
}

impl EditLogger {
    pub fn new(path: &str) -> Self {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path);

        match file {
            Ok(f) => Self {
                file: Some(Mutex::new(f)),
            },
            Err(e) => {
                eprintln!("Warning: could not open edit journal '{}': {}", path, e);
                Self { file: None }
            }
        }
    }

    pub fn disabled() -> Self {
        Self { file: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.file.is_some()
    }

    /// Append one event as a JSON line. Failures are reported on stderr
    /// and never interrupt editing.
    pub fn log(&self, event: &EditEvent) {
        let Some(file) = &self.file else {
            return;
        };

        let line = match serde_json::to_string(event) {
            Ok(line) => line,
            Err(e) => {
                eprintln!("Warning: failed to serialize edit event: {}", e);
                return;
            }
        };

        match file.lock() {
            Ok(mut file) => {
                if let Err(e) = writeln!(file, "{}", line) {
                    eprintln!("Warning: failed to write edit event: {}", e);
                }
            }
            Err(e) => eprintln!("Warning: edit journal lock poisoned: {}", e),
        }
    }
}

impl Default for EditLogger {
    fn default() -> Self {
        Self::disabled()
    }
}

impl std::fmt::Debug for EditLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditLogger")
            .field("enabled", &self.is_enabled())
            .finish()
    }
}
