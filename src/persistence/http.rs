use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use crate::editor::error::EditorError;

use super::forms::require_id;
use super::model::{Created, Envelope, ErrorBody, FormDocument, FormPayload, FormSummary, FormUpdate};
use super::store::FormStore;

/// Default service address when neither config nor environment names one.
pub const DEFAULT_API_URL: &str = "http://localhost:3000";

const FORMS_PATH: &str = "/api/forms";

// ============================================================================
// HTTP-backed form store
// ============================================================================

/// `FormStore` speaking JSON to the saved-forms service.
///
/// Routes: `GET/POST /api/forms`, `GET/PUT/DELETE /api/forms/{id}`.
pub struct HttpFormStore {
    base_url: String,
    client: Client,
}

impl HttpFormStore {
    pub fn new(base_url: &str) -> Self {
        Self::with_timeout(base_url, None)
    }

    pub fn with_timeout(base_url: &str, timeout: Option<Duration>) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|e| {
                eprintln!("Warning: could not configure HTTP client: {}", e);
                Client::new()
            });
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self) -> String {
        format!("{}{}", self.base_url, FORMS_PATH)
    }

    fn form_url(&self, id: &str) -> String {
        format!("{}{}/{}", self.base_url, FORMS_PATH, id)
    }

    /// Send a request and return the raw body of a successful response.
    fn send(&self, request: RequestBuilder, context: &str) -> Result<String, EditorError> {
        let response = request.send().map_err(|source| EditorError::Http {
            context: context.to_string(),
            source,
        })?;

        let status = response.status();
        let body = response.text().map_err(|source| EditorError::Http {
            context: context.to_string(),
            source,
        })?;

        if !status.is_success() {
            return Err(EditorError::Api {
                status: status.as_u16(),
                message: error_message(status, &body),
            });
        }
        Ok(body)
    }

    fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder, context: &str) -> Result<Option<T>, EditorError> {
        let body = self.send(request, context)?;
        let envelope: Envelope<T> = serde_json::from_str(&body).map_err(|source| EditorError::JsonParse {
            context: context.to_string(),
            source,
        })?;
        Ok(envelope.data)
    }
}

/// The service's `message` when the body carries one, else the status text.
pub fn error_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.trim().is_empty())
        .or_else(|| status.canonical_reason().map(str::to_string))
        .unwrap_or_else(|| "Request failed".to_string())
}

impl FormStore for HttpFormStore {
    fn list(&self) -> Result<Vec<FormSummary>, EditorError> {
        let forms = self.send_json(self.client.get(self.collection_url()), "list forms")?;
        Ok(forms.unwrap_or_default())
    }

    fn get(&self, id: &str) -> Result<FormDocument, EditorError> {
        require_id(id)?;
        self.send_json(self.client.get(self.form_url(id)), "get form")?
            .ok_or_else(|| EditorError::Store(format!("form '{}' has no data", id)))
    }

    fn create(&self, payload: &FormPayload) -> Result<Created, EditorError> {
        let request = self.client.post(self.collection_url()).json(payload);
        self.send_json(request, "create form")?
            .ok_or_else(|| EditorError::Store("create returned no id".to_string()))
    }

    fn update(&self, id: &str, update: &FormUpdate) -> Result<Created, EditorError> {
        require_id(id)?;
        let request = self.client.put(self.form_url(id)).json(update);
        let created: Option<Created> = self.send_json(request, "update form")?;
        Ok(created.unwrap_or_else(|| Created { id: id.to_string() }))
    }

    fn delete(&self, id: &str) -> Result<(), EditorError> {
        require_id(id)?;
        self.send(self.client.delete(self.form_url(id)), "delete form")?;
        Ok(())
    }
}
