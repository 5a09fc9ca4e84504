//! Section repository port.

use crate::domain::document::Section;
use crate::domain::foundation::{DomainError, ProjectId, SectionId};
use async_trait::async_trait;

/// Persistence for the ordered sections of a project.
///
/// Every list is returned in ascending `order_index`.
#[async_trait]
pub trait SectionRepository: Send + Sync {
    /// Insert new sections.
    async fn insert_all(&self, sections: &[Section]) -> Result<(), DomainError>;

    /// Persist a section's current content.
    ///
    /// # Errors
    ///
    /// - `SectionNotFound` if the section doesn't exist
    async fn update_content(&self, section: &Section) -> Result<(), DomainError>;

    /// Find a section by its ID.
    async fn find_by_id(&self, id: &SectionId) -> Result<Option<Section>, DomainError>;

    /// List a project's sections ordered by `order_index`.
    async fn list_by_project(&self, project_id: &ProjectId) -> Result<Vec<Section>, DomainError>;
}
