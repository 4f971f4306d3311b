//! Unified error handling
//!
//! Normalizes the heterogeneous failure shapes of the parser service
//! (structured validation lists, plain-string details, transport failures)
//! into one displayable model.

use reqwest::StatusCode;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Message shown when a response carries no usable detail.
pub const FALLBACK_MESSAGE: &str = "Error processing file";

/// Prefix for joined per-field validation messages.
pub const VALIDATION_PREFIX: &str = "Validation error: ";

/// Message for a submission attempted without a file.
pub const NO_FILE_MESSAGE: &str = "Please select a file first";

/// Failure taxonomy. Classification is deterministic and ordered:
/// transport first, then string detail, then list detail, then anything else.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    UserInput,
    Validation,
    Service,
    Transport,
    Unclassified,
}

/// One per-field failure from a structured validation response.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FieldError {
    pub field: String,
    pub msg: String,
}

impl FieldError {
    /// Extract a field error from one element of a `detail` list.
    /// FastAPI puts the field path under `loc` and the text under `msg`.
    fn from_value(value: &Value) -> Self {
        let msg = value
            .get("msg")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        let field = value
            .get("loc")
            .and_then(Value::as_array)
            .and_then(|loc| loc.last())
            .and_then(Value::as_str)
            .or_else(|| value.get("field").and_then(Value::as_str))
            .unwrap_or_default()
            .to_string();
        Self { field, msg }
    }
}

/// Structured payload carried alongside the display message, when the
/// service returned more than a plain string.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum ErrorDetail {
    Fields(Vec<FieldError>),
    Opaque(Value),
}

/// The one user-facing error model. `message` is always displayable;
/// `detail` is optional expandable structure.
#[derive(Debug, Clone, Error, Serialize, PartialEq)]
#[error("{message}")]
pub struct ErrorModel {
    pub kind: ErrorKind,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<ErrorDetail>,
}

impl ErrorModel {
    /// Precondition failure: a submission was attempted with no file chosen.
    pub fn no_file_selected() -> Self {
        Self {
            kind: ErrorKind::UserInput,
            message: NO_FILE_MESSAGE.to_string(),
            detail: None,
        }
    }

    /// No response was received at all (DNS, connection reset, timeout).
    pub fn from_transport(err: &reqwest::Error) -> Self {
        let rendered = err.to_string();
        let message = if rendered.is_empty() {
            FALLBACK_MESSAGE.to_string()
        } else {
            rendered
        };
        Self {
            kind: ErrorKind::Transport,
            message,
            detail: None,
        }
    }

    /// A response was received with a non-success status. Classifies on the
    /// shape of the body's `detail` field.
    pub fn from_response(status: StatusCode, body: Option<Value>) -> Self {
        match body.as_ref().and_then(|b| b.get("detail")) {
            Some(Value::String(detail)) => Self {
                kind: ErrorKind::Service,
                message: detail.clone(),
                detail: None,
            },
            Some(Value::Array(items)) => {
                let fields: Vec<FieldError> = items.iter().map(FieldError::from_value).collect();
                let joined = fields
                    .iter()
                    .map(|f| f.msg.as_str())
                    .collect::<Vec<_>>()
                    .join(", ");
                Self {
                    kind: ErrorKind::Validation,
                    message: format!("{VALIDATION_PREFIX}{joined}"),
                    detail: Some(ErrorDetail::Fields(fields)),
                }
            }
            Some(other) => Self {
                kind: ErrorKind::Unclassified,
                message: FALLBACK_MESSAGE.to_string(),
                detail: Some(ErrorDetail::Opaque(other.clone())),
            },
            None => Self {
                kind: ErrorKind::Unclassified,
                message: format!("Request failed with status code {}", status.as_u16()),
                detail: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn string_detail_passes_through_verbatim() {
        let err = ErrorModel::from_response(
            StatusCode::BAD_REQUEST,
            Some(json!({ "detail": "bad pdf" })),
        );
        assert_eq!(err.message, "bad pdf");
        assert_eq!(err.kind, ErrorKind::Service);
        assert!(err.detail.is_none());
    }

    #[test]
    fn validation_list_joins_msg_fields() {
        let body = json!({
            "detail": [
                { "loc": ["body", "file"], "msg": "a", "type": "value_error" },
                { "loc": ["body", "file"], "msg": "b", "type": "value_error" }
            ]
        });
        let err = ErrorModel::from_response(StatusCode::UNPROCESSABLE_ENTITY, Some(body));
        assert_eq!(err.message, "Validation error: a, b");
        assert_eq!(err.kind, ErrorKind::Validation);
        match err.detail {
            Some(ErrorDetail::Fields(fields)) => {
                assert_eq!(fields.len(), 2);
                assert_eq!(fields[0].field, "file");
                assert_eq!(fields[0].msg, "a");
            }
            other => panic!("expected field list, got {other:?}"),
        }
    }

    #[test]
    fn unrecognized_detail_shape_falls_back() {
        let err = ErrorModel::from_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            Some(json!({ "detail": { "code": 7 } })),
        );
        assert_eq!(err.message, "Error processing file");
        assert_eq!(err.kind, ErrorKind::Unclassified);
        assert_eq!(
            err.detail,
            Some(ErrorDetail::Opaque(json!({ "code": 7 })))
        );
    }

    #[test]
    fn missing_detail_reports_status() {
        let err = ErrorModel::from_response(StatusCode::BAD_GATEWAY, Some(json!({})));
        assert_eq!(err.message, "Request failed with status code 502");

        let err = ErrorModel::from_response(StatusCode::INTERNAL_SERVER_ERROR, None);
        assert_eq!(err.message, "Request failed with status code 500");
    }

    #[test]
    fn no_file_message_is_exact() {
        assert_eq!(
            ErrorModel::no_file_selected().message,
            "Please select a file first"
        );
    }
}
