//! FillEmptyContentHandler - drafts text for sections that have none.
//!
//! Sections with non-empty content are never sent to the model. Each
//! drafted section is stored as soon as it is generated, so a failed run
//! can be repeated and only fills what is still empty.

use std::sync::Arc;

use tracing::{error, info};

use crate::application::content_generator::SectionPrompt;
use crate::application::{AccessGate, ContentGenerator};
use crate::domain::document::{DocumentError, Project, Section};
use crate::domain::foundation::{ProjectId, UserId};
use crate::ports::SectionRepository;

/// Command to draft content for every empty section of a project.
#[derive(Debug, Clone)]
pub struct FillEmptyContentCommand {
    pub project_id: ProjectId,
    pub user_id: UserId,
}

#[derive(Clone)]
pub struct FillEmptyContentHandler {
    gate: AccessGate,
    sections: Arc<dyn SectionRepository>,
    generator: ContentGenerator,
}

impl FillEmptyContentHandler {
    pub fn new(
        gate: AccessGate,
        sections: Arc<dyn SectionRepository>,
        generator: ContentGenerator,
    ) -> Self {
        Self {
            gate,
            sections,
            generator,
        }
    }

    pub async fn handle(&self, cmd: FillEmptyContentCommand) -> Result<Vec<Section>, DocumentError> {
        let project = self.gate.project_for(&cmd.project_id, &cmd.user_id).await?;
        self.fill(&project).await
    }

    /// Fills an already authorized project; returns all its sections in order.
    pub(crate) async fn fill(&self, project: &Project) -> Result<Vec<Section>, DocumentError> {
        let mut sections = self.sections.list_by_project(project.id()).await?;
        let mut drafted = 0usize;

        for section in sections.iter_mut().filter(|s| !s.has_content()) {
            let prompt = SectionPrompt {
                kind: project.document_kind(),
                main_topic: project.main_topic(),
                title: section.title(),
            };
            let text = self
                .generator
                .draft_section(prompt, project.user_id(), *project.id())
                .await
                .map_err(|err| {
                    error!(
                        project_id = %project.id(),
                        section_id = %section.id(),
                        error = %err,
                        "Section drafting failed"
                    );
                    err
                })?;

            section.set_content(text);
            self.sections.update_content(section).await?;
            drafted += 1;
        }

        info!(project_id = %project.id(), drafted, "Empty sections filled");
        Ok(sections)
    }
}
