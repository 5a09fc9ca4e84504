//! Document Exporter Port - Office Open XML rendering interface.
//!
//! Each exporter renders one format. An exporter is handed a project and
//! its sections and must refuse a project of the other document kind
//! rather than convert it.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::document::{DocumentError, DocumentKind, Project, Section};

/// Port for rendering a project into a downloadable file.
///
/// # Contract
///
/// Implementations must:
/// - Reject projects whose kind doesn't match `format()` with `FormatMismatch`
/// - Emit sections in ascending `order_index`, regardless of input order
/// - Produce the complete package in memory
pub trait DocumentExporter: Send + Sync {
    /// The single format this exporter produces.
    fn format(&self) -> ExportFormat;

    /// Render `project` with its `sections`.
    fn export(&self, project: &Project, sections: &[Section])
        -> Result<ExportedDocument, ExportError>;
}

/// Export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// WordprocessingML package.
    Docx,
    /// PresentationML package.
    Pptx,
}

impl ExportFormat {
    /// The format a project of `kind` exports to.
    pub fn for_kind(kind: DocumentKind) -> Self {
        match kind {
            DocumentKind::Docx => ExportFormat::Docx,
            DocumentKind::Pptx => ExportFormat::Pptx,
        }
    }

    /// The document kind this format renders.
    pub fn kind(&self) -> DocumentKind {
        match self {
            ExportFormat::Docx => DocumentKind::Docx,
            ExportFormat::Pptx => DocumentKind::Pptx,
        }
    }

    /// Get the MIME content type for this format.
    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            ExportFormat::Pptx => {
                "application/vnd.openxmlformats-officedocument.presentationml.presentation"
            }
        }
    }

    /// Get the file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Docx => "docx",
            ExportFormat::Pptx => "pptx",
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

/// Parses the lowercase extension exactly, like `DocumentKind`.
impl std::str::FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "docx" => Ok(ExportFormat::Docx),
            "pptx" => Ok(ExportFormat::Pptx),
            _ => Err(ExportError::UnsupportedFormat(s.to_string())),
        }
    }
}

/// Exported document with content and metadata.
#[derive(Debug, Clone)]
pub struct ExportedDocument {
    /// The package bytes.
    pub content: Vec<u8>,
    /// The MIME content type.
    pub content_type: String,
    /// Suggested filename for download.
    pub filename: String,
    /// The format that was used.
    pub format: ExportFormat,
}

impl ExportedDocument {
    /// Create a new exported document named `<base_filename>.<ext>`.
    pub fn new(content: Vec<u8>, format: ExportFormat, base_filename: &str) -> Self {
        Self {
            content,
            content_type: format.content_type().to_string(),
            filename: format!("{}.{}", base_filename, format.extension()),
            format,
        }
    }
}

/// Errors that can occur during document export.
#[derive(Debug, Clone, Error)]
pub enum ExportError {
    /// Unknown format requested.
    #[error("Unsupported export format: {0}")]
    UnsupportedFormat(String),

    /// The project's document kind doesn't match the requested format.
    #[error("Cannot export a {actual} project as {requested}")]
    FormatMismatch {
        requested: ExportFormat,
        actual: DocumentKind,
    },

    /// Writing the zip package failed.
    #[error("Packaging failed: {0}")]
    Packaging(String),
}

impl ExportError {
    pub fn packaging(reason: impl Into<String>) -> Self {
        Self::Packaging(reason.into())
    }
}

impl From<ExportError> for DocumentError {
    fn from(err: ExportError) -> Self {
        match err {
            ExportError::UnsupportedFormat(format) => DocumentError::validation(
                "format",
                format!("Unsupported export format: {}", format),
            ),
            ExportError::FormatMismatch { requested, actual } => DocumentError::FormatMismatch {
                requested: requested.kind(),
                actual,
            },
            ExportError::Packaging(reason) => DocumentError::Infrastructure(reason),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_format_content_types_are_correct() {
        assert_eq!(
            ExportFormat::Docx.content_type(),
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        );
        assert_eq!(
            ExportFormat::Pptx.content_type(),
            "application/vnd.openxmlformats-officedocument.presentationml.presentation"
        );
    }

    #[test]
    fn export_format_parses_lowercase_extensions_only() {
        assert_eq!("docx".parse::<ExportFormat>().unwrap(), ExportFormat::Docx);
        assert_eq!("pptx".parse::<ExportFormat>().unwrap(), ExportFormat::Pptx);
        for input in ["pdf", "PPTX", "Docx", " docx"] {
            assert!(
                matches!(input.parse::<ExportFormat>(), Err(ExportError::UnsupportedFormat(_))),
                "{input:?} should be rejected"
            );
        }
    }

    #[test]
    fn export_format_and_document_kind_accept_the_same_strings() {
        for input in ["docx", "pptx", "DOCX", "Pptx", "xlsx", ""] {
            assert_eq!(
                input.parse::<ExportFormat>().is_ok(),
                input.parse::<DocumentKind>().is_ok(),
                "disagreement on {input:?}"
            );
        }
    }

    #[test]
    fn export_format_round_trips_through_kind() {
        for kind in [DocumentKind::Docx, DocumentKind::Pptx] {
            assert_eq!(ExportFormat::for_kind(kind).kind(), kind);
        }
    }

    #[test]
    fn exported_document_names_file_after_title() {
        let doc = ExportedDocument::new(vec![1, 2], ExportFormat::Pptx, "Launch Plan");
        assert_eq!(doc.filename, "Launch Plan.pptx");
        assert_eq!(doc.content_type, ExportFormat::Pptx.content_type());
    }

    #[test]
    fn format_mismatch_converts_to_document_error() {
        let err: DocumentError = ExportError::FormatMismatch {
            requested: ExportFormat::Pptx,
            actual: DocumentKind::Docx,
        }
        .into();
        assert_eq!(
            err,
            DocumentError::FormatMismatch {
                requested: DocumentKind::Pptx,
                actual: DocumentKind::Docx,
            }
        );
    }

    #[test]
    fn unsupported_format_converts_to_validation_failure() {
        let err: DocumentError = ExportError::UnsupportedFormat("pdf".into()).into();
        assert!(matches!(err, DocumentError::ValidationFailed { ref field, .. } if field == "format"));
    }

    #[test]
    fn document_exporter_is_object_safe() {
        fn _accepts_dyn(_exporter: &dyn DocumentExporter) {}
    }
}
