//! AccessGate - single ownership check for every user-facing lookup.
//!
//! Entities owned by another user are reported exactly like missing ones,
//! so callers can't probe for the existence of foreign ids.

use std::sync::Arc;

use crate::domain::document::{DocumentError, Project, Refinement, Section};
use crate::domain::foundation::{OwnedByUser, ProjectId, RefinementId, SectionId, UserId};
use crate::ports::{ProjectRepository, RefinementRepository, SectionRepository};

/// Resolves projects, sections and refinements on behalf of a requester.
#[derive(Clone)]
pub struct AccessGate {
    projects: Arc<dyn ProjectRepository>,
    sections: Arc<dyn SectionRepository>,
    refinements: Arc<dyn RefinementRepository>,
}

impl AccessGate {
    pub fn new(
        projects: Arc<dyn ProjectRepository>,
        sections: Arc<dyn SectionRepository>,
        refinements: Arc<dyn RefinementRepository>,
    ) -> Self {
        Self {
            projects,
            sections,
            refinements,
        }
    }

    /// Loads a project owned by `requester`.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the project doesn't exist or belongs to someone else
    pub async fn project_for(
        &self,
        project_id: &ProjectId,
        requester: &UserId,
    ) -> Result<Project, DocumentError> {
        let project = self
            .projects
            .find_by_id(project_id)
            .await?
            .ok_or_else(DocumentError::project_not_found)?;

        if !project.is_owner(requester) {
            return Err(DocumentError::project_not_found());
        }
        Ok(project)
    }

    /// Loads a section together with its owning project.
    ///
    /// # Errors
    ///
    /// - `NotFound` ("Section") if the section is missing, its project is
    ///   missing, or the project belongs to someone else
    pub async fn section_for(
        &self,
        section_id: &SectionId,
        requester: &UserId,
    ) -> Result<(Section, Project), DocumentError> {
        let section = self
            .sections
            .find_by_id(section_id)
            .await?
            .ok_or_else(DocumentError::section_not_found)?;

        let project = self
            .project_for(section.project_id(), requester)
            .await
            .map_err(|_| DocumentError::section_not_found())?;

        Ok((section, project))
    }

    /// Loads a refinement together with its owning project.
    ///
    /// # Errors
    ///
    /// - `NotFound` ("Refinement") under the same rules as `section_for`
    pub async fn refinement_for(
        &self,
        refinement_id: &RefinementId,
        requester: &UserId,
    ) -> Result<(Refinement, Project), DocumentError> {
        let refinement = self
            .refinements
            .find_by_id(refinement_id)
            .await?
            .ok_or_else(DocumentError::refinement_not_found)?;

        let project = self
            .project_for(refinement.project_id(), requester)
            .await
            .map_err(|_| DocumentError::refinement_not_found())?;

        Ok((refinement, project))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryContentStore;
    use crate::domain::document::{DocumentKind, Outline};

    fn user(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    fn gate(store: &InMemoryContentStore) -> AccessGate {
        AccessGate::new(
            Arc::new(store.clone()),
            Arc::new(store.clone()),
            Arc::new(store.clone()),
        )
    }

    async fn seeded(store: &InMemoryContentStore, owner: &str) -> (Project, Vec<Section>) {
        let project = Project::new(
            ProjectId::new(),
            user(owner),
            "Quarterly Report".to_string(),
            "Revenue".to_string(),
            Outline::new(DocumentKind::Docx, vec!["Intro".to_string()]),
        )
        .unwrap();
        let sections = project.draft_sections();
        ProjectRepository::save(store, &project).await.unwrap();
        store.insert_all(&sections).await.unwrap();
        (project, sections)
    }

    #[tokio::test]
    async fn owner_can_load_project() {
        let store = InMemoryContentStore::new();
        let (project, _) = seeded(&store, "alice").await;

        let loaded = gate(&store)
            .project_for(project.id(), &user("alice"))
            .await
            .unwrap();

        assert_eq!(loaded.id(), project.id());
    }

    #[tokio::test]
    async fn foreign_project_looks_missing() {
        let store = InMemoryContentStore::new();
        let (project, _) = seeded(&store, "alice").await;

        let foreign = gate(&store).project_for(project.id(), &user("bob")).await;
        let missing = gate(&store)
            .project_for(&ProjectId::new(), &user("bob"))
            .await;

        assert_eq!(foreign.unwrap_err(), DocumentError::project_not_found());
        assert_eq!(missing.unwrap_err(), DocumentError::project_not_found());
    }

    #[tokio::test]
    async fn section_lookup_returns_owning_project() {
        let store = InMemoryContentStore::new();
        let (project, sections) = seeded(&store, "alice").await;

        let (section, owner) = gate(&store)
            .section_for(sections[0].id(), &user("alice"))
            .await
            .unwrap();

        assert_eq!(section.title(), "Intro");
        assert_eq!(owner.id(), project.id());
    }

    #[tokio::test]
    async fn foreign_section_reports_section_not_found() {
        let store = InMemoryContentStore::new();
        let (_, sections) = seeded(&store, "alice").await;

        let result = gate(&store).section_for(sections[0].id(), &user("bob")).await;

        assert_eq!(result.unwrap_err(), DocumentError::section_not_found());
    }

    #[tokio::test]
    async fn missing_refinement_reports_refinement_not_found() {
        let store = InMemoryContentStore::new();

        let result = gate(&store)
            .refinement_for(&RefinementId::new(), &user("alice"))
            .await;

        assert_eq!(result.unwrap_err(), DocumentError::refinement_not_found());
    }
}
