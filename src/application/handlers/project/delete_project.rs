//! DeleteProjectHandler - Command handler for removing a project.

use std::sync::Arc;

use tracing::info;

use crate::application::AccessGate;
use crate::domain::document::DocumentError;
use crate::domain::foundation::{ProjectId, UserId};
use crate::ports::ProjectRepository;

/// Command to delete a project with its sections and refinements.
#[derive(Debug, Clone)]
pub struct DeleteProjectCommand {
    pub project_id: ProjectId,
    pub user_id: UserId,
}

pub struct DeleteProjectHandler {
    gate: AccessGate,
    projects: Arc<dyn ProjectRepository>,
}

impl DeleteProjectHandler {
    pub fn new(gate: AccessGate, projects: Arc<dyn ProjectRepository>) -> Self {
        Self { gate, projects }
    }

    pub async fn handle(&self, cmd: DeleteProjectCommand) -> Result<(), DocumentError> {
        let project = self.gate.project_for(&cmd.project_id, &cmd.user_id).await?;
        self.projects.delete(project.id()).await?;
        info!(project_id = %project.id(), "Project deleted");
        Ok(())
    }
}
