//! ListProjectsHandler - Query handler for a user's projects.

use std::sync::Arc;

use crate::domain::document::{DocumentError, Project};
use crate::domain::foundation::UserId;
use crate::ports::ProjectRepository;

/// Query to list a user's projects, newest first.
#[derive(Debug, Clone)]
pub struct ListProjectsQuery {
    pub user_id: UserId,
}

pub struct ListProjectsHandler {
    projects: Arc<dyn ProjectRepository>,
}

impl ListProjectsHandler {
    pub fn new(projects: Arc<dyn ProjectRepository>) -> Self {
        Self { projects }
    }

    pub async fn handle(&self, query: ListProjectsQuery) -> Result<Vec<Project>, DocumentError> {
        Ok(self.projects.find_by_user_id(&query.user_id).await?)
    }
}
