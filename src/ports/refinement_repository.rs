//! Refinement repository port.

use crate::domain::document::{Refinement, Section};
use crate::domain::foundation::{DomainError, ProjectId, RefinementId};
use async_trait::async_trait;

#[async_trait]
pub trait RefinementRepository: Send + Sync {
    /// Insert `refinement` and persist `section`'s new content as one unit.
    ///
    /// Either both writes land or neither does.
    ///
    /// # Errors
    ///
    /// - `SectionNotFound` if the section no longer exists
    /// - `DatabaseError` on persistence failure
    async fn record(&self, refinement: &Refinement, section: &Section) -> Result<(), DomainError>;

    /// Find a refinement by its ID.
    async fn find_by_id(&self, id: &RefinementId) -> Result<Option<Refinement>, DomainError>;

    /// Persist the feedback fields of an existing refinement.
    ///
    /// # Errors
    ///
    /// - `RefinementNotFound` if the refinement doesn't exist
    async fn update_feedback(&self, refinement: &Refinement) -> Result<(), DomainError>;

    /// List a project's refinements, newest first.
    async fn list_by_project(&self, project_id: &ProjectId)
        -> Result<Vec<Refinement>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn refinement_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn RefinementRepository) {}
    }
}
