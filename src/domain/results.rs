//! Parse result model matching the parser service's response schema.
//!
//! Field names mirror the service's Pydantic model byte-for-byte, including
//! the misspelled `is_extraction_succesful` and `confident_value` keys.
//! Those spellings are the live wire contract; do not correct them here.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Normalized success payload returned by all three parsing endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParseResult {
    /// MIME type of the uploaded file as seen by the service.
    pub input_format: String,
    #[serde(rename = "is_extraction_succesful")]
    pub is_extraction_successful: bool,
    /// AI confidence score in [0, 1]; absent for deterministic extraction.
    #[serde(rename = "confident_value")]
    pub confidence_value: Option<f64>,
    pub extraction_method: String,
    /// Extracted data; shape depends on the document category.
    #[serde(rename = "result")]
    pub payload: Value,
}

impl ParseResult {
    /// Confidence rendered as a percentage with one decimal, e.g. `87.3%`.
    pub fn confidence_percent(&self) -> Option<String> {
        self.confidence_value
            .map(|value| format!("{:.1}%", value * 100.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserializes_wire_field_names() {
        let result: ParseResult = serde_json::from_value(json!({
            "input_format": "application/pdf",
            "is_extraction_succesful": true,
            "confident_value": 0.873,
            "extraction_method": "hybrid",
            "result": { "project_id": "P-101" }
        }))
        .expect("wire shape");

        assert!(result.is_extraction_successful);
        assert_eq!(result.extraction_method, "hybrid");
        assert_eq!(result.payload["project_id"], "P-101");
    }

    #[test]
    fn confidence_renders_with_one_decimal() {
        let result: ParseResult = serde_json::from_value(json!({
            "input_format": "image/png",
            "is_extraction_succesful": true,
            "confident_value": 0.873,
            "extraction_method": "rooms-ai",
            "result": {}
        }))
        .expect("wire shape");

        assert_eq!(result.confidence_percent().as_deref(), Some("87.3%"));
    }

    #[test]
    fn confidence_absent_renders_nothing() {
        let result: ParseResult = serde_json::from_value(json!({
            "input_format": "application/pdf",
            "is_extraction_succesful": true,
            "confident_value": null,
            "extraction_method": "visual",
            "result": []
        }))
        .expect("wire shape");

        assert_eq!(result.confidence_percent(), None);
    }
}
