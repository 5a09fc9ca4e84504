//! RefineSectionHandler - rewrites a section from a natural-language request.
//!
//! The audit row and the section's new content are written together; a
//! failure leaves both untouched. Concurrent refinements of one section
//! resolve last-writer-wins.

use std::sync::Arc;

use tracing::{error, info};

use crate::application::content_generator::SectionPrompt;
use crate::application::{AccessGate, ContentGenerator};
use crate::domain::document::{DocumentError, Refinement, Section};
use crate::domain::foundation::{SectionId, UserId};
use crate::ports::RefinementRepository;

/// Command to refine one section.
#[derive(Debug, Clone)]
pub struct RefineSectionCommand {
    pub section_id: SectionId,
    pub user_id: UserId,
    pub prompt: String,
}

/// Result of a successful refinement.
#[derive(Debug, Clone)]
pub struct RefineSectionResult {
    pub refinement: Refinement,
    /// The section as stored after the edit.
    pub section: Section,
}

pub struct RefineSectionHandler {
    gate: AccessGate,
    refinements: Arc<dyn RefinementRepository>,
    generator: ContentGenerator,
}

impl RefineSectionHandler {
    pub fn new(
        gate: AccessGate,
        refinements: Arc<dyn RefinementRepository>,
        generator: ContentGenerator,
    ) -> Self {
        Self {
            gate,
            refinements,
            generator,
        }
    }

    pub async fn handle(
        &self,
        cmd: RefineSectionCommand,
    ) -> Result<RefineSectionResult, DocumentError> {
        // 1. Resolve section through its owning project
        let (mut section, project) = self.gate.section_for(&cmd.section_id, &cmd.user_id).await?;

        // 2. There must be something to refine
        let original = match section.content() {
            Some(content) if !content.is_empty() => content.to_string(),
            _ => return Err(DocumentError::EmptyContent(*section.id())),
        };
        if cmd.prompt.trim().is_empty() {
            return Err(DocumentError::validation(
                "prompt",
                "Refinement instruction cannot be empty",
            ));
        }

        // 3. Ask the model for the new text
        let prompt = SectionPrompt {
            kind: project.document_kind(),
            main_topic: project.main_topic(),
            title: section.title(),
        };
        let refined = self
            .generator
            .refine_content(prompt, &original, &cmd.prompt, &cmd.user_id, *project.id())
            .await
            .map_err(|err| {
                error!(section_id = %cmd.section_id, error = %err, "Refinement failed");
                err
            })?;

        // 4. Record audit row and new content atomically
        let refinement = Refinement::new(
            *project.id(),
            *section.id(),
            cmd.prompt,
            original,
            refined.clone(),
        )?;
        section.set_content(refined);
        self.refinements.record(&refinement, &section).await?;

        info!(
            refinement_id = %refinement.id(),
            section_id = %section.id(),
            "Section refined"
        );

        Ok(RefineSectionResult {
            refinement,
            section,
        })
    }
}
