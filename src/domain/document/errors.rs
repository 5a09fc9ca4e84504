//! Errors raised by document operations.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, SectionId, ValidationError};

use super::DocumentKind;

/// Failure of a document project operation.
///
/// Every variant maps onto exactly one [`ErrorCode`]; the HTTP layer maps
/// codes to status codes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
    #[error("Invalid document type: {0}")]
    InvalidDocumentKind(String),

    /// Missing entity, or one owned by someone else.
    #[error("{resource} not found")]
    NotFound { resource: &'static str },

    #[error("Section {0} has no content to refine")]
    EmptyContent(SectionId),

    #[error("Cannot export a {actual} project as {requested}")]
    FormatMismatch {
        requested: DocumentKind,
        actual: DocumentKind,
    },

    #[error("Content generation failed: {0}")]
    UpstreamGeneration(String),

    #[error("Invalid {field}: {message}")]
    ValidationFailed { field: String, message: String },

    #[error("Internal error: {0}")]
    Infrastructure(String),
}

impl DocumentError {
    pub fn project_not_found() -> Self {
        DocumentError::NotFound { resource: "Project" }
    }

    pub fn section_not_found() -> Self {
        DocumentError::NotFound { resource: "Section" }
    }

    pub fn refinement_not_found() -> Self {
        DocumentError::NotFound {
            resource: "Refinement",
        }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        DocumentError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        DocumentError::Infrastructure(message.into())
    }

    /// Returns the error code for this failure.
    pub fn code(&self) -> ErrorCode {
        match self {
            DocumentError::InvalidDocumentKind(_) => ErrorCode::InvalidDocumentKind,
            DocumentError::NotFound { resource } => match *resource {
                "Section" => ErrorCode::SectionNotFound,
                "Refinement" => ErrorCode::RefinementNotFound,
                _ => ErrorCode::ProjectNotFound,
            },
            DocumentError::EmptyContent(_) => ErrorCode::EmptyContent,
            DocumentError::FormatMismatch { .. } => ErrorCode::FormatMismatch,
            DocumentError::UpstreamGeneration(_) => ErrorCode::UpstreamGenerationFailed,
            DocumentError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            DocumentError::Infrastructure(_) => ErrorCode::InternalError,
        }
    }

    /// Returns the client-facing message.
    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl From<ValidationError> for DocumentError {
    fn from(err: ValidationError) -> Self {
        DocumentError::ValidationFailed {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}

impl From<DomainError> for DocumentError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ProjectNotFound => DocumentError::project_not_found(),
            ErrorCode::SectionNotFound => DocumentError::section_not_found(),
            ErrorCode::RefinementNotFound => DocumentError::refinement_not_found(),
            ErrorCode::ValidationFailed => DocumentError::validation(
                err.details.get("field").cloned().unwrap_or_default(),
                err.message,
            ),
            ErrorCode::InvalidDocumentKind => DocumentError::InvalidDocumentKind(err.message),
            _ => DocumentError::Infrastructure(err.message),
        }
    }
}
