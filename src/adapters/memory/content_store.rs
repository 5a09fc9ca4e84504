//! In-memory implementation of the three content store ports.
//!
//! One `InMemoryContentStore` backs `ProjectRepository`,
//! `SectionRepository` and `RefinementRepository` at once, so cascades and
//! the refinement + section write happen under a single lock.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::document::{sort_by_order, Project, Refinement, Section};
use crate::domain::foundation::{
    DomainError, ErrorCode, ProjectId, RefinementId, SectionId, UserId,
};
use crate::ports::{ProjectRepository, RefinementRepository, SectionRepository};

#[derive(Debug, Default)]
struct State {
    /// Insertion order.
    projects: Vec<Project>,
    sections: Vec<Section>,
    /// Insertion order; newest last.
    refinements: Vec<Refinement>,
}

/// Thread-safe in-memory content store.
///
/// Cloning shares the underlying state.
///
/// # Example
///
/// ```ignore
/// let store = InMemoryContentStore::new();
/// let projects: Arc<dyn ProjectRepository> = Arc::new(store.clone());
/// let sections: Arc<dyn SectionRepository> = Arc::new(store.clone());
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryContentStore {
    state: Arc<RwLock<State>>,
}

impl InMemoryContentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored refinements across all projects.
    pub async fn refinement_count(&self) -> usize {
        self.state.read().await.refinements.len()
    }

    /// Number of stored sections across all projects.
    pub async fn section_count(&self) -> usize {
        self.state.read().await.sections.len()
    }
}

fn not_found(code: ErrorCode, what: &str, id: impl std::fmt::Display) -> DomainError {
    DomainError::new(code, format!("{} not found: {}", what, id))
}

#[async_trait]
impl ProjectRepository for InMemoryContentStore {
    async fn save(&self, project: &Project) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        if state.projects.iter().any(|p| p.id() == project.id()) {
            return Err(DomainError::database(format!(
                "Duplicate project id: {}",
                project.id()
            )));
        }
        state.projects.push(project.clone());
        Ok(())
    }

    async fn update(&self, project: &Project) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        let slot = state
            .projects
            .iter_mut()
            .find(|p| p.id() == project.id())
            .ok_or_else(|| not_found(ErrorCode::ProjectNotFound, "Project", project.id()))?;
        *slot = project.clone();
        Ok(())
    }

    async fn update_with_sections(
        &self,
        project: &Project,
        sections: &[Section],
    ) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        let slot = state
            .projects
            .iter()
            .position(|p| p.id() == project.id())
            .ok_or_else(|| not_found(ErrorCode::ProjectNotFound, "Project", project.id()))?;
        state.projects[slot] = project.clone();

        let project_id = project.id();
        let removed: Vec<SectionId> = state
            .sections
            .iter()
            .filter(|s| s.project_id() == project_id)
            .map(|s| *s.id())
            .collect();
        state.sections.retain(|s| s.project_id() != project_id);
        state
            .refinements
            .retain(|r| !removed.contains(r.section_id()));
        state.sections.extend_from_slice(sections);
        Ok(())
    }

    async fn find_by_id(&self, id: &ProjectId) -> Result<Option<Project>, DomainError> {
        let state = self.state.read().await;
        Ok(state.projects.iter().find(|p| p.id() == id).cloned())
    }

    async fn find_by_user_id(&self, user_id: &UserId) -> Result<Vec<Project>, DomainError> {
        let state = self.state.read().await;
        Ok(state
            .projects
            .iter()
            .rev()
            .filter(|p| p.user_id() == user_id)
            .cloned()
            .collect())
    }

    async fn delete(&self, id: &ProjectId) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        let before = state.projects.len();
        state.projects.retain(|p| p.id() != id);
        if state.projects.len() == before {
            return Err(not_found(ErrorCode::ProjectNotFound, "Project", id));
        }
        state.sections.retain(|s| s.project_id() != id);
        state.refinements.retain(|r| r.project_id() != id);
        Ok(())
    }
}

#[async_trait]
impl SectionRepository for InMemoryContentStore {
    async fn insert_all(&self, sections: &[Section]) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        state.sections.extend_from_slice(sections);
        Ok(())
    }

    async fn update_content(&self, section: &Section) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        let slot = state
            .sections
            .iter_mut()
            .find(|s| s.id() == section.id())
            .ok_or_else(|| not_found(ErrorCode::SectionNotFound, "Section", section.id()))?;
        *slot = section.clone();
        Ok(())
    }

    async fn find_by_id(&self, id: &SectionId) -> Result<Option<Section>, DomainError> {
        let state = self.state.read().await;
        Ok(state.sections.iter().find(|s| s.id() == id).cloned())
    }

    async fn list_by_project(&self, project_id: &ProjectId) -> Result<Vec<Section>, DomainError> {
        let state = self.state.read().await;
        let mut sections: Vec<Section> = state
            .sections
            .iter()
            .filter(|s| s.project_id() == project_id)
            .cloned()
            .collect();
        sort_by_order(&mut sections);
        Ok(sections)
    }
}

#[async_trait]
impl RefinementRepository for InMemoryContentStore {
    async fn record(&self, refinement: &Refinement, section: &Section) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        let slot = state
            .sections
            .iter_mut()
            .find(|s| s.id() == section.id())
            .ok_or_else(|| not_found(ErrorCode::SectionNotFound, "Section", section.id()))?;
        *slot = section.clone();
        state.refinements.push(refinement.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &RefinementId) -> Result<Option<Refinement>, DomainError> {
        let state = self.state.read().await;
        Ok(state.refinements.iter().find(|r| r.id() == id).cloned())
    }

    async fn update_feedback(&self, refinement: &Refinement) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        let slot = state
            .refinements
            .iter_mut()
            .find(|r| r.id() == refinement.id())
            .ok_or_else(|| {
                not_found(ErrorCode::RefinementNotFound, "Refinement", refinement.id())
            })?;
        *slot = refinement.clone();
        Ok(())
    }

    async fn list_by_project(
        &self,
        project_id: &ProjectId,
    ) -> Result<Vec<Refinement>, DomainError> {
        let state = self.state.read().await;
        Ok(state
            .refinements
            .iter()
            .rev()
            .filter(|r| r.project_id() == project_id)
            .cloned()
            .collect())
    }
}
