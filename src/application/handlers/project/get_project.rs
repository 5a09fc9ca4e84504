//! GetProjectHandler - Query handler for a single owned project.

use crate::application::AccessGate;
use crate::domain::document::{DocumentError, Project};
use crate::domain::foundation::{ProjectId, UserId};

/// Query for one project.
#[derive(Debug, Clone)]
pub struct GetProjectQuery {
    pub project_id: ProjectId,
    pub user_id: UserId,
}

/// Handler for fetching a project.
pub struct GetProjectHandler {
    gate: AccessGate,
}

impl GetProjectHandler {
    pub fn new(gate: AccessGate) -> Self {
        Self { gate }
    }

    pub async fn handle(&self, query: GetProjectQuery) -> Result<Project, DocumentError> {
        self.gate.project_for(&query.project_id, &query.user_id).await
    }
}
