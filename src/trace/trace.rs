use serde::Serialize;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::model::element::ElementId;

/// One line of the edit journal.
#[derive(Debug, Clone, Serialize)]
pub struct EditEvent {
    pub timestamp_ms: u128,
    pub step: u64,

    pub operation: String,

    pub element_id: Option<String>,
    pub element_type: Option<String>,
    pub target: Option<String>,

    pub outcome: Option<String>,
    pub element_count: Option<usize>,
    pub detail: Option<String>,
}

impl EditEvent {
    pub fn now(step: u64, operation: impl ToString) -> Self {
        Self {
            timestamp_ms: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis())
                .unwrap_or(0),
            step,
            operation: operation.to_string(),
            element_id: None,
            element_type: None,
            target: None,
            outcome: None,
            element_count: None,
            detail: None,
        }
    }

    pub fn with_element(mut self, id: &ElementId) -> Self {
        self.element_id = Some(id.to_string());
        self
    }

    pub fn with_type(mut self, element_type: impl ToString) -> Self {
        self.element_type = Some(element_type.to_string());
        self
    }

    pub fn with_target(mut self, target: impl ToString) -> Self {
        self.target = Some(target.to_string());
        self
    }

    pub fn with_outcome(mut self, outcome: impl ToString) -> Self {
        self.outcome = Some(outcome.to_string());
        self
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.element_count = Some(count);
        self
    }

    pub fn with_detail(mut self, detail: impl ToString) -> Self {
        self.detail = Some(detail.to_string());
        self
    }
}
