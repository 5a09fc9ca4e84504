//! HTTP DTOs for refinement endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::document::Refinement;

#[derive(Debug, Clone, Deserialize)]
pub struct RefinementRequest {
    pub section_id: String,
    pub prompt: String,
}

/// Feedback is stored verbatim; "like" and "dislike" are the values the
/// client sends.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedbackRequest {
    pub refinement_id: String,
    #[serde(default)]
    pub feedback: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefinementResponse {
    pub id: String,
    pub project_id: String,
    pub section_id: String,
    pub prompt: String,
    pub original_content: String,
    pub refined_content: String,
    pub user_feedback: Option<String>,
    pub user_comment: Option<String>,
    pub created_at: String,
}

impl From<&Refinement> for RefinementResponse {
    fn from(refinement: &Refinement) -> Self {
        Self {
            id: refinement.id().to_string(),
            project_id: refinement.project_id().to_string(),
            section_id: refinement.section_id().to_string(),
            prompt: refinement.prompt().to_string(),
            original_content: refinement.original_content().to_string(),
            refined_content: refinement.refined_content().to_string(),
            user_feedback: refinement.user_feedback().map(str::to_string),
            user_comment: refinement.user_comment().map(str::to_string),
            created_at: refinement.created_at().to_rfc3339(),
        }
    }
}
