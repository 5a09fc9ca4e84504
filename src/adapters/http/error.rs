//! Error body shared by every endpoint, and the status mapping for
//! `DocumentError`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::domain::document::DocumentError;
use crate::domain::foundation::ErrorCode;

/// JSON error body: `{ "code": ..., "message": ... }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationFailed, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unauthorized, message)
    }
}

/// HTTP status for a document failure.
pub fn status_for(error: &DocumentError) -> StatusCode {
    match error {
        DocumentError::InvalidDocumentKind(_)
        | DocumentError::ValidationFailed { .. }
        | DocumentError::EmptyContent(_)
        | DocumentError::FormatMismatch { .. } => StatusCode::BAD_REQUEST,
        DocumentError::NotFound { .. } => StatusCode::NOT_FOUND,
        DocumentError::UpstreamGeneration(_) => StatusCode::BAD_GATEWAY,
        DocumentError::Infrastructure(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Renders a `DocumentError` as an error response.
///
/// Infrastructure details are logged, not returned.
pub fn handle_document_error(error: DocumentError) -> Response {
    let status = status_for(&error);
    let message = match &error {
        DocumentError::Infrastructure(detail) => {
            tracing::error!(error = %detail, "Request failed on infrastructure error");
            "Internal server error".to_string()
        }
        DocumentError::UpstreamGeneration(detail) => {
            tracing::error!(error = %detail, "Content generation failed");
            error.message()
        }
        _ => error.message(),
    };

    (status, Json(ErrorResponse::new(error.code(), message))).into_response()
}

/// Parses an identifier from a path segment or body field.
pub fn parse_id<T: FromStr>(raw: &str, what: &str) -> Result<T, Response> {
    raw.parse::<T>().map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request(format!("Invalid {} ID", what))),
        )
            .into_response()
    })
}
