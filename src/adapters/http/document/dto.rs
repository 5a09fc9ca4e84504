//! HTTP DTOs for outline suggestion, generation and export.

use serde::{Deserialize, Serialize};

use crate::application::handlers::SuggestOutlineResult;
use crate::domain::document::DocumentKind;

#[derive(Debug, Clone, Deserialize)]
pub struct TemplateRequest {
    pub document_type: String,
    pub main_topic: String,
}

/// Suggested titles under `outline` (docx) or `slides` (pptx).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TemplateResponse {
    pub outline: Option<Vec<String>>,
    pub slides: Option<Vec<String>>,
}

impl From<SuggestOutlineResult> for TemplateResponse {
    fn from(result: SuggestOutlineResult) -> Self {
        match result.kind {
            DocumentKind::Docx => Self {
                outline: Some(result.titles),
                slides: None,
            },
            DocumentKind::Pptx => Self {
                outline: None,
                slides: Some(result.titles),
            },
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct GenerateRequest {
    pub project_id: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExportParams {
    /// "docx" or "pptx"; defaults to the project's kind
    #[serde(default)]
    pub format: Option<String>,
}

/// `Content-Disposition` value for downloading `filename`.
///
/// The plain `filename` parameter is reduced to printable ASCII; the
/// `filename*` parameter carries the exact UTF-8 name.
pub fn attachment_disposition(filename: &str) -> String {
    let fallback: String = filename
        .chars()
        .map(|c| match c {
            '"' | '\\' => '_',
            c if c.is_ascii_graphic() || c == ' ' => c,
            _ => '_',
        })
        .collect();

    let mut encoded = String::with_capacity(filename.len() * 3);
    for byte in filename.bytes() {
        if byte.is_ascii_alphanumeric() || b"-._~".contains(&byte) {
            encoded.push(byte as char);
        } else {
            encoded.push_str(&format!("%{:02X}", byte));
        }
    }

    format!(
        "attachment; filename=\"{}\"; filename*=UTF-8''{}",
        fallback, encoded
    )
}
