use std::sync::Mutex;

use chrono::Utc;

use crate::editor::error::EditorError;

use super::model::{Created, FormDocument, FormPayload, FormSummary, FormUpdate};
use super::store::FormStore;

// ============================================================================
// In-process form store
// ============================================================================

/// `FormStore` held in memory. Used by tests and offline runs.
#[derive(Debug, Default)]
pub struct MemoryFormStore {
    state: Mutex<MemoryState>,
}

#[derive(Debug, Default)]
struct MemoryState {
    next_id: u64,
    forms: Vec<FormDocument>,
}

impl MemoryFormStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-filled with `forms`, in listing order.
    pub fn with_forms(forms: Vec<FormDocument>) -> Self {
        let next_id = forms
            .iter()
            .filter_map(|f| f.id.parse::<u64>().ok())
            .max()
            .unwrap_or(0);
        Self {
            state: Mutex::new(MemoryState { next_id, forms }),
        }
    }

    pub fn len(&self) -> usize {
        self.lock().map(|state| state.forms.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, MemoryState>, EditorError> {
        self.state
            .lock()
            .map_err(|e| EditorError::Store(format!("form store lock poisoned: {}", e)))
    }
}

fn not_found(id: &str) -> EditorError {
    EditorError::Api {
        status: 404,
        message: format!("Form '{}' not found", id),
    }
}

impl FormStore for MemoryFormStore {
    fn list(&self) -> Result<Vec<FormSummary>, EditorError> {
        Ok(self.lock()?.forms.clone())
    }

    fn get(&self, id: &str) -> Result<FormDocument, EditorError> {
        self.lock()?
            .forms
            .iter()
            .find(|f| f.id == id)
            .cloned()
            .ok_or_else(|| not_found(id))
    }

    fn create(&self, payload: &FormPayload) -> Result<Created, EditorError> {
        let mut state = self.lock()?;
        state.next_id += 1;
        let id = state.next_id.to_string();
        state.forms.push(FormDocument {
            id: id.clone(),
            name: payload.name.clone(),
            fields: payload.fields.clone(),
            created_at: Some(Utc::now().to_rfc3339()),
        });
        Ok(Created { id })
    }

    fn update(&self, id: &str, update: &FormUpdate) -> Result<Created, EditorError> {
        let mut state = self.lock()?;
        let form = state
            .forms
            .iter_mut()
            .find(|f| f.id == id)
            .ok_or_else(|| not_found(id))?;
        if let Some(name) = &update.name {
            form.name = name.clone();
        }
        if let Some(fields) = &update.fields {
            form.fields = fields.clone();
        }
        Ok(Created { id: id.to_string() })
    }

    fn delete(&self, id: &str) -> Result<(), EditorError> {
        let mut state = self.lock()?;
        let before = state.forms.len();
        state.forms.retain(|f| f.id != id);
        if state.forms.len() == before {
            return Err(not_found(id));
        }
        Ok(())
    }
}
