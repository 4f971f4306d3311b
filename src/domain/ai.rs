//! AI question/answer types matching the parser service's `/ask_ai/` schema.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Request body for the question-answering endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct AskRequest {
    pub question: String,
    /// The stored parse result's payload; the service answers from this
    /// context only.
    pub document_data: Value,
}

/// Response body from the question-answering endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct AskResponse {
    pub answer: String,
}

/// One question/answer round-trip scoped to the currently stored result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AiExchange {
    pub question: String,
    pub answer: Option<String>,
    pub pending: bool,
    pub error: Option<String>,
}

impl AiExchange {
    /// A freshly dispatched question with no settlement yet.
    pub fn pending(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: None,
            pending: true,
            error: None,
        }
    }
}
