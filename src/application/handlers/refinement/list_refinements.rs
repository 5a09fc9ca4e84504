//! ListRefinementsHandler - refinement history of one project.

use std::sync::Arc;

use crate::application::AccessGate;
use crate::domain::document::{DocumentError, Refinement};
use crate::domain::foundation::{ProjectId, UserId};
use crate::ports::RefinementRepository;

/// Query for a project's refinements, newest first.
#[derive(Debug, Clone)]
pub struct ListRefinementsQuery {
    pub project_id: ProjectId,
    pub user_id: UserId,
}

pub struct ListRefinementsHandler {
    gate: AccessGate,
    refinements: Arc<dyn RefinementRepository>,
}

impl ListRefinementsHandler {
    pub fn new(gate: AccessGate, refinements: Arc<dyn RefinementRepository>) -> Self {
        Self { gate, refinements }
    }

    pub async fn handle(&self, query: ListRefinementsQuery) -> Result<Vec<Refinement>, DocumentError> {
        let project = self.gate.project_for(&query.project_id, &query.user_id).await?;
        Ok(self.refinements.list_by_project(project.id()).await?)
    }
}
