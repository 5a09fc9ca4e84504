//! Outline - the ordered titles a project declares.

use serde::{Deserialize, Serialize};

use super::{DocumentError, DocumentKind};

/// Ordered section or slide titles, tagged by document kind.
///
/// The variant *is* the document kind, so a project can never pair slide
/// titles with a long-form document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "titles", rename_all = "snake_case")]
pub enum Outline {
    /// Section headings of a long-form document.
    LongForm(Vec<String>),
    /// Slide titles of a slide deck.
    SlideDeck(Vec<String>),
}

impl Outline {
    /// Builds an outline of the given kind.
    pub fn new(kind: DocumentKind, titles: Vec<String>) -> Self {
        match kind {
            DocumentKind::Docx => Outline::LongForm(titles),
            DocumentKind::Pptx => Outline::SlideDeck(titles),
        }
    }

    /// Selects the title list matching `kind` from the two optional lists
    /// clients send (`outline` for docx, `slides` for pptx).
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if the matching list is missing or empty
    pub fn from_lists(
        kind: DocumentKind,
        outline: Option<Vec<String>>,
        slides: Option<Vec<String>>,
    ) -> Result<Self, DocumentError> {
        let titles = match kind {
            DocumentKind::Docx => outline,
            DocumentKind::Pptx => slides,
        }
        .unwrap_or_default();

        if titles.is_empty() {
            return Err(DocumentError::validation(
                kind_field(kind),
                "At least one section/slide is required.",
            ));
        }
        Ok(Self::new(kind, titles))
    }

    /// Returns the document kind this outline belongs to.
    pub fn kind(&self) -> DocumentKind {
        match self {
            Outline::LongForm(_) => DocumentKind::Docx,
            Outline::SlideDeck(_) => DocumentKind::Pptx,
        }
    }

    /// Returns the ordered titles.
    pub fn titles(&self) -> &[String] {
        match self {
            Outline::LongForm(titles) | Outline::SlideDeck(titles) => titles,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.titles().is_empty()
    }

    /// The titles as the `outline` list, present only for long-form documents.
    pub fn long_form_titles(&self) -> Option<&[String]> {
        match self {
            Outline::LongForm(titles) => Some(titles),
            Outline::SlideDeck(_) => None,
        }
    }

    /// The titles as the `slides` list, present only for slide decks.
    pub fn slide_titles(&self) -> Option<&[String]> {
        match self {
            Outline::SlideDeck(titles) => Some(titles),
            Outline::LongForm(_) => None,
        }
    }
}

/// Request field that carries the titles for `kind`.
pub(crate) fn kind_field(kind: DocumentKind) -> &'static str {
    match kind {
        DocumentKind::Docx => "outline",
        DocumentKind::Pptx => "slides",
    }
}
