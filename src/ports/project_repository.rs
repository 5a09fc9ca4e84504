//! Project repository port.
//!
//! Stores never check ownership; the application layer's access gate does.

use crate::domain::document::{Project, Section};
use crate::domain::foundation::{DomainError, ProjectId, UserId};
use async_trait::async_trait;

#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Save a new project.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn save(&self, project: &Project) -> Result<(), DomainError>;

    /// Update an existing project.
    ///
    /// # Errors
    ///
    /// - `ProjectNotFound` if the project doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn update(&self, project: &Project) -> Result<(), DomainError>;

    /// Update a project and replace all of its sections in one atomic write.
    ///
    /// Refinements of the removed sections are removed with them. On error
    /// neither the project nor its sections change.
    ///
    /// # Errors
    ///
    /// - `ProjectNotFound` if the project doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn update_with_sections(
        &self,
        project: &Project,
        sections: &[Section],
    ) -> Result<(), DomainError>;

    /// Find a project by its ID.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: &ProjectId) -> Result<Option<Project>, DomainError>;

    /// Find all projects owned by a user, newest first.
    async fn find_by_user_id(&self, user_id: &UserId) -> Result<Vec<Project>, DomainError>;

    /// Delete a project together with its sections and refinements.
    ///
    /// # Errors
    ///
    /// - `ProjectNotFound` if the project doesn't exist
    async fn delete(&self, id: &ProjectId) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn ProjectRepository) {}
    }
}
