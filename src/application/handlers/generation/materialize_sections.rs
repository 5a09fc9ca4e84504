//! MaterializeSectionsHandler - creates sections from a project's outline.
//!
//! Idempotent: a project that already has sections is returned unchanged.

use std::sync::Arc;

use tracing::info;

use crate::application::AccessGate;
use crate::domain::document::{DocumentError, Project, Section};
use crate::domain::foundation::{ProjectId, UserId};
use crate::ports::SectionRepository;

/// Command to make sure a project has one section per outline title.
#[derive(Debug, Clone)]
pub struct MaterializeSectionsCommand {
    pub project_id: ProjectId,
    pub user_id: UserId,
}

#[derive(Clone)]
pub struct MaterializeSectionsHandler {
    gate: AccessGate,
    sections: Arc<dyn SectionRepository>,
}

impl MaterializeSectionsHandler {
    pub fn new(gate: AccessGate, sections: Arc<dyn SectionRepository>) -> Self {
        Self { gate, sections }
    }

    pub async fn handle(
        &self,
        cmd: MaterializeSectionsCommand,
    ) -> Result<Vec<Section>, DocumentError> {
        let project = self.gate.project_for(&cmd.project_id, &cmd.user_id).await?;
        self.materialize(&project).await
    }

    /// Sections of an already authorized project, ordered by `order_index`.
    pub(crate) async fn materialize(&self, project: &Project) -> Result<Vec<Section>, DocumentError> {
        let existing = self.sections.list_by_project(project.id()).await?;
        if !existing.is_empty() {
            return Ok(existing);
        }

        let drafted = project.draft_sections();
        if drafted.is_empty() {
            return Ok(drafted);
        }
        self.sections.insert_all(&drafted).await?;
        info!(project_id = %project.id(), sections = drafted.len(), "Sections materialized");

        Ok(self.sections.list_by_project(project.id()).await?)
    }
}
