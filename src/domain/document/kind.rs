//! Document and section kind enums.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::DocumentError;

/// The two supported output variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    /// Long-form Word document.
    Docx,
    /// PowerPoint slide deck.
    Pptx,
}

impl DocumentKind {
    /// Wire and storage representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentKind::Docx => "docx",
            DocumentKind::Pptx => "pptx",
        }
    }

    /// Kind tag given to sections of a project of this kind.
    pub fn section_kind(&self) -> SectionKind {
        match self {
            DocumentKind::Docx => SectionKind::Section,
            DocumentKind::Pptx => SectionKind::Slide,
        }
    }

    /// Human label used in project-facing messages.
    pub fn display_name(&self) -> &'static str {
        match self {
            DocumentKind::Docx => "Word document",
            DocumentKind::Pptx => "PowerPoint document",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DocumentKind {
    type Err = DocumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "docx" => Ok(DocumentKind::Docx),
            "pptx" => Ok(DocumentKind::Pptx),
            other => Err(DocumentError::InvalidDocumentKind(other.to_string())),
        }
    }
}

/// Kind tag on a section, mirroring its project's document kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    Section,
    Slide,
}

impl SectionKind {
    /// Storage representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionKind::Section => "section",
            SectionKind::Slide => "slide",
        }
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SectionKind {
    type Err = DocumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "section" => Ok(SectionKind::Section),
            "slide" => Ok(SectionKind::Slide),
            other => Err(DocumentError::infrastructure(format!(
                "Invalid section type: {}",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_kind_parses_known_values() {
        assert_eq!("docx".parse::<DocumentKind>().unwrap(), DocumentKind::Docx);
        assert_eq!("pptx".parse::<DocumentKind>().unwrap(), DocumentKind::Pptx);
    }

    #[test]
    fn document_kind_rejects_unknown_values() {
        let err = "pdf".parse::<DocumentKind>().unwrap_err();
        assert!(matches!(err, DocumentError::InvalidDocumentKind(ref k) if k == "pdf"));

        // Matching is exact, as stored values are always lowercase.
        assert!("DOCX".parse::<DocumentKind>().is_err());
    }

    #[test]
    fn document_kind_maps_to_section_kind() {
        assert_eq!(DocumentKind::Docx.section_kind(), SectionKind::Section);
        assert_eq!(DocumentKind::Pptx.section_kind(), SectionKind::Slide);
    }

    #[test]
    fn kinds_serialize_lowercase() {
        assert_eq!(serde_json::to_string(&DocumentKind::Pptx).unwrap(), "\"pptx\"");
        assert_eq!(serde_json::to_string(&SectionKind::Slide).unwrap(), "\"slide\"");
    }

    #[test]
    fn section_kind_parses_storage_values() {
        assert_eq!("section".parse::<SectionKind>().unwrap(), SectionKind::Section);
        assert!("chapter".parse::<SectionKind>().is_err());
    }
}
