//! ListSectionsHandler - Query handler for a project's sections.

use std::sync::Arc;

use crate::application::AccessGate;
use crate::domain::document::{DocumentError, Section};
use crate::domain::foundation::{ProjectId, UserId};
use crate::ports::SectionRepository;

/// Query for the sections of one project, ordered by `order_index`.
#[derive(Debug, Clone)]
pub struct ListSectionsQuery {
    pub project_id: ProjectId,
    pub user_id: UserId,
}

pub struct ListSectionsHandler {
    gate: AccessGate,
    sections: Arc<dyn SectionRepository>,
}

impl ListSectionsHandler {
    pub fn new(gate: AccessGate, sections: Arc<dyn SectionRepository>) -> Self {
        Self { gate, sections }
    }

    pub async fn handle(&self, query: ListSectionsQuery) -> Result<Vec<Section>, DocumentError> {
        let project = self.gate.project_for(&query.project_id, &query.user_id).await?;
        Ok(self.sections.list_by_project(project.id()).await?)
    }
}
