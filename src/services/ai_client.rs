//! HTTP client for the question-answering endpoint.

use anyhow::{Context, Result};
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, error, instrument};

use crate::domain::{AskRequest, AskResponse};

const ASK_PATH: &str = "/ask_ai/";

/// Client for follow-up questions about a parsed document.
#[derive(Clone)]
pub struct AiClient {
    client: Client,
    base_url: String,
}

impl AiClient {
    /// Create a new AI query client.
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Ask one question about a stored result's payload.
    ///
    /// The failure channel is a display string carrying the literal `Error: `
    /// prefix, followed by the service's `detail` when one was returned and
    /// the transport error text otherwise.
    #[instrument(skip(self, document_data))]
    pub async fn ask(&self, question: &str, document_data: Value) -> Result<String, String> {
        let url = format!("{}{}", self.base_url, ASK_PATH);
        let body = AskRequest {
            question: question.to_string(),
            document_data,
        };

        debug!(url = %url, "AI query request");

        let response = match self.client.post(&url).json(&body).send().await {
            Ok(response) => response,
            Err(e) => {
                error!(error = %e, "AI query request failed");
                return Err(format!("Error: {e}"));
            }
        };

        let status = response.status();

        if status.is_success() {
            match response.json::<AskResponse>().await {
                Ok(parsed) => Ok(parsed.answer),
                Err(e) => {
                    error!(error = %e, "Failed to parse AI response");
                    Err(format!("Error: {e}"))
                }
            }
        } else {
            let detail = response
                .json::<Value>()
                .await
                .ok()
                .and_then(|b| b.get("detail").cloned());

            let message = match detail {
                Some(Value::String(detail)) => detail,
                Some(other) => other.to_string(),
                None => format!("Request failed with status code {}", status.as_u16()),
            };

            error!(status = %status, message = %message, "AI query error");
            Err(format!("Error: {message}"))
        }
    }
}
