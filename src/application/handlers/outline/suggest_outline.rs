//! SuggestOutlineHandler - asks the model for section or slide titles.

use std::str::FromStr;

use tracing::info;

use crate::application::ContentGenerator;
use crate::domain::document::{DocumentError, DocumentKind};
use crate::domain::foundation::UserId;

/// Query for a suggested outline. Nothing is persisted.
#[derive(Debug, Clone)]
pub struct SuggestOutlineQuery {
    pub user_id: UserId,
    pub document_type: String,
    pub main_topic: String,
}

/// Suggested titles for the requested kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestOutlineResult {
    pub kind: DocumentKind,
    pub titles: Vec<String>,
}

pub struct SuggestOutlineHandler {
    generator: ContentGenerator,
}

impl SuggestOutlineHandler {
    pub fn new(generator: ContentGenerator) -> Self {
        Self { generator }
    }

    pub async fn handle(
        &self,
        query: SuggestOutlineQuery,
    ) -> Result<SuggestOutlineResult, DocumentError> {
        let kind = DocumentKind::from_str(&query.document_type)?;
        let titles = self
            .generator
            .suggest_outline(kind, &query.main_topic, &query.user_id)
            .await?;

        info!(kind = %kind, titles = titles.len(), "Outline suggested");
        Ok(SuggestOutlineResult { kind, titles })
    }
}
