//! Refinement - audit record of one AI edit of a section.

use crate::domain::foundation::{ProjectId, RefinementId, SectionId, Timestamp};
use serde::{Deserialize, Serialize};

use super::DocumentError;

/// Conventional positive feedback value.
pub const FEEDBACK_LIKE: &str = "like";

/// Conventional negative feedback value.
pub const FEEDBACK_DISLIKE: &str = "dislike";

/// Immutable record of a section edit, except for the feedback fields.
///
/// Feedback is opaque text; the two constants above are what clients
/// conventionally send.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Refinement {
    id: RefinementId,
    project_id: ProjectId,
    section_id: SectionId,
    prompt: String,
    original_content: String,
    refined_content: String,
    user_feedback: Option<String>,
    user_comment: Option<String>,
    created_at: Timestamp,
}

impl Refinement {
    /// Records an edit of `section_id` from `original_content` to `refined_content`.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if the instruction is blank
    pub fn new(
        project_id: ProjectId,
        section_id: SectionId,
        prompt: String,
        original_content: String,
        refined_content: String,
    ) -> Result<Self, DocumentError> {
        if prompt.trim().is_empty() {
            return Err(DocumentError::validation(
                "prompt",
                "Refinement instruction cannot be empty",
            ));
        }

        Ok(Self {
            id: RefinementId::new(),
            project_id,
            section_id,
            prompt,
            original_content,
            refined_content,
            user_feedback: None,
            user_comment: None,
            created_at: Timestamp::now(),
        })
    }

    /// Reconstitute a refinement from persistence.
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: RefinementId,
        project_id: ProjectId,
        section_id: SectionId,
        prompt: String,
        original_content: String,
        refined_content: String,
        user_feedback: Option<String>,
        user_comment: Option<String>,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            project_id,
            section_id,
            prompt,
            original_content,
            refined_content,
            user_feedback,
            user_comment,
            created_at,
        }
    }

    pub fn id(&self) -> &RefinementId {
        &self.id
    }

    pub fn project_id(&self) -> &ProjectId {
        &self.project_id
    }

    pub fn section_id(&self) -> &SectionId {
        &self.section_id
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn original_content(&self) -> &str {
        &self.original_content
    }

    pub fn refined_content(&self) -> &str {
        &self.refined_content
    }

    pub fn user_feedback(&self) -> Option<&str> {
        self.user_feedback.as_deref()
    }

    pub fn user_comment(&self) -> Option<&str> {
        self.user_comment.as_deref()
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    /// Overwrites both feedback fields; `None` clears a field.
    pub fn record_feedback(&mut self, feedback: Option<String>, comment: Option<String>) {
        self.user_feedback = feedback;
        self.user_comment = comment;
    }
}
