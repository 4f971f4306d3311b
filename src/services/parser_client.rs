//! HTTP client for the document-extraction endpoints.

use anyhow::{Context, Result};
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, error, instrument, warn};

use crate::domain::{FileUpload, ParseResult};
use crate::error::ErrorModel;
use crate::routing::Endpoint;

/// Client for the parser service's upload endpoints.
#[derive(Clone)]
pub struct ParserClient {
    client: Client,
    base_url: String,
    wake_timeout: Duration,
}

impl ParserClient {
    /// Create a new parser service client.
    ///
    /// The client carries no global timeout: extraction can legitimately take
    /// minutes and the parse request has no client-enforced deadline. Only
    /// the wake-up probe is bounded.
    pub fn new(base_url: &str, wake_timeout_seconds: u64) -> Result<Self> {
        let client = Client::builder()
            .build()
            .context("Failed to create HTTP client")?;

        tracing::info!(base_url = base_url, "Parser client initialized");

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            wake_timeout: Duration::from_secs(wake_timeout_seconds),
        })
    }

    /// Upload one document to the routed endpoint as a multipart body with a
    /// single `file` field.
    #[instrument(skip(self, endpoint, file), fields(file_name = %file.name))]
    pub async fn parse_document(
        &self,
        endpoint: &Endpoint,
        file: &FileUpload,
    ) -> Result<ParseResult, ErrorModel> {
        let url = format!("{}{}", self.base_url, endpoint.request_path());

        let part = Part::bytes(file.bytes.clone())
            .file_name(file.name.clone())
            .mime_str(&file.content_type)
            .map_err(|e| {
                error!(error = %e, "Invalid content type for upload");
                ErrorModel::from_transport(&e)
            })?;
        let form = Form::new().part("file", part);

        debug!(url = %url, "Parser service request");

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "Parser service request failed");
                ErrorModel::from_transport(&e)
            })?;

        let status = response.status();

        if status.is_success() {
            response.json::<ParseResult>().await.map_err(|e| {
                error!(error = %e, "Failed to parse service response");
                ErrorModel::from_transport(&e)
            })
        } else {
            let body = response.json::<Value>().await.ok();
            let err = ErrorModel::from_response(status, body);
            warn!(status = %status, message = %err.message, "Parser service error");
            Err(err)
        }
    }

    /// Best-effort liveness probe against the service root. The hosted
    /// backend cold-starts, so this is fired once at startup to warm it.
    /// Failures are logged and swallowed.
    pub async fn wake(&self) {
        let url = format!("{}/", self.base_url);

        match self
            .client
            .get(&url)
            .timeout(self.wake_timeout)
            .send()
            .await
        {
            Ok(response) => debug!(status = %response.status(), "Server wake-up call made"),
            Err(e) => debug!(error = %e, "Server wake-up call made"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FloorPlanParser, GanttFormat, ParserConfig};
    use crate::error::ErrorKind;
    use crate::routing::route;
    use httpmock::{Method::GET, Method::POST, MockServer};
    use serde_json::json;

    fn client(base_url: &str) -> ParserClient {
        ParserClient::new(base_url, 1).expect("client")
    }

    fn pdf(name: &str) -> FileUpload {
        FileUpload::new(name, b"%PDF-1.4 test".to_vec(), "application/pdf")
    }

    #[tokio::test]
    async fn parse_document_posts_multipart_to_routed_path() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/gantt_parser/tabular")
                    .body_contains("plan.pdf");
                then.status(200).json_body(json!({
                    "input_format": "application/pdf",
                    "is_extraction_succesful": true,
                    "confident_value": null,
                    "extraction_method": "tabular",
                    "result": { "tasks": [] }
                }));
            })
            .await;

        let endpoint = route(&ParserConfig::GanttChart(GanttFormat::Tabular));
        let result = client(&server.base_url())
            .parse_document(&endpoint, &pdf("plan.pdf"))
            .await
            .expect("parse result");

        mock.assert_async().await;
        assert_eq!(result.extraction_method, "tabular");
        assert_eq!(result.confidence_value, None);
    }

    #[tokio::test]
    async fn error_response_is_normalized() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/drawing_parser/rooms-deterministic/");
                then.status(400).json_body(json!({ "detail": "File must be a PDF" }));
            })
            .await;

        let endpoint = route(&ParserConfig::FloorPlan(FloorPlanParser::RoomsDeterministic));
        let err = client(&server.base_url())
            .parse_document(&endpoint, &pdf("plan.pdf"))
            .await
            .expect_err("service error");

        assert_eq!(err.kind, ErrorKind::Service);
        assert_eq!(err.message, "File must be a PDF");
    }

    #[tokio::test]
    async fn transport_failure_yields_transport_error() {
        // Nothing listens here.
        let endpoint = route(&ParserConfig::BillOfQuantities);
        let err = client("http://127.0.0.1:1")
            .parse_document(&endpoint, &pdf("boq.pdf"))
            .await
            .expect_err("transport error");

        assert_eq!(err.kind, ErrorKind::Transport);
        assert!(!err.message.is_empty());
    }

    #[tokio::test]
    async fn wake_swallows_failures() {
        // Must not panic even with no server present.
        client("http://127.0.0.1:1").wake().await;

        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/");
                then.status(200);
            })
            .await;
        client(&server.base_url()).wake().await;
        mock.assert_async().await;
    }
}
