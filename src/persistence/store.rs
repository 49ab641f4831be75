use crate::editor::error::EditorError;

use super::model::{Created, FormDocument, FormPayload, FormSummary, FormUpdate};

/// Request/response boundary to the saved-forms service.
///
/// Calls are blocking, never retried, and the last write wins. Only the
/// flattened field representation crosses this boundary.
pub trait FormStore {
    fn list(&self) -> Result<Vec<FormSummary>, EditorError>;

    fn get(&self, id: &str) -> Result<FormDocument, EditorError>;

    fn create(&self, payload: &FormPayload) -> Result<Created, EditorError>;

    fn update(&self, id: &str, update: &FormUpdate) -> Result<Created, EditorError>;

    fn delete(&self, id: &str) -> Result<(), EditorError>;
}
