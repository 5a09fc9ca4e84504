//! UpdateProjectHandler - Command handler for editing a project.
//!
//! New titles for the project's own kind resync its sections: every
//! existing section (and its refinement history) is dropped and the new
//! titles are materialized from order 0.

use std::sync::Arc;

use tracing::info;

use crate::application::AccessGate;
use crate::domain::document::{DocumentError, DocumentKind, Project};
use crate::domain::foundation::{ProjectId, UserId};
use crate::ports::ProjectRepository;

/// Command to update a project. Absent fields are left unchanged.
#[derive(Debug, Clone)]
pub struct UpdateProjectCommand {
    pub project_id: ProjectId,
    pub user_id: UserId,
    pub title: Option<String>,
    pub main_topic: Option<String>,
    pub outline: Option<Vec<String>>,
    pub slides: Option<Vec<String>>,
}

/// Result of a successful update.
#[derive(Debug, Clone)]
pub struct UpdateProjectResult {
    pub project: Project,
    /// True when sections were recreated from new titles.
    pub sections_resynced: bool,
}

pub struct UpdateProjectHandler {
    gate: AccessGate,
    projects: Arc<dyn ProjectRepository>,
}

impl UpdateProjectHandler {
    pub fn new(gate: AccessGate, projects: Arc<dyn ProjectRepository>) -> Self {
        Self { gate, projects }
    }

    pub async fn handle(
        &self,
        cmd: UpdateProjectCommand,
    ) -> Result<UpdateProjectResult, DocumentError> {
        // 1. Load with ownership check
        let mut project = self.gate.project_for(&cmd.project_id, &cmd.user_id).await?;

        // 2. Apply changes; the list for the other kind is ignored
        if let Some(title) = cmd.title {
            project.rename(title)?;
        }
        if let Some(main_topic) = cmd.main_topic {
            project.set_main_topic(main_topic);
        }
        let new_titles = match project.document_kind() {
            DocumentKind::Docx => cmd.outline,
            DocumentKind::Pptx => cmd.slides,
        };
        let sections_resynced = new_titles.is_some();
        if let Some(titles) = new_titles {
            project.replace_titles(titles)?;
        }

        // 3. Persist; a resync is one write with the project row
        if sections_resynced {
            self.projects
                .update_with_sections(&project, &project.draft_sections())
                .await?;
        } else {
            self.projects.update(&project).await?;
        }

        info!(project_id = %project.id(), sections_resynced, "Project updated");

        Ok(UpdateProjectResult {
            project,
            sections_resynced,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryContentStore;
    use crate::application::handlers::test_support::{gate, seed_with_sections, titles, user};
    use crate::domain::document::Section;
    use crate::domain::foundation::DomainError;
    use crate::ports::SectionRepository;
    use async_trait::async_trait;

    fn handler(store: &InMemoryContentStore) -> UpdateProjectHandler {
        UpdateProjectHandler::new(gate(store), Arc::new(store.clone()))
    }

    /// Delegates to the in-memory store but fails every combined write.
    struct FailingResyncStore(InMemoryContentStore);

    #[async_trait]
    impl ProjectRepository for FailingResyncStore {
        async fn save(&self, project: &Project) -> Result<(), DomainError> {
            ProjectRepository::save(&self.0, project).await
        }

        async fn update(&self, project: &Project) -> Result<(), DomainError> {
            ProjectRepository::update(&self.0, project).await
        }

        async fn update_with_sections(
            &self,
            _project: &Project,
            _sections: &[Section],
        ) -> Result<(), DomainError> {
            Err(DomainError::database("connection reset"))
        }

        async fn find_by_id(&self, id: &ProjectId) -> Result<Option<Project>, DomainError> {
            ProjectRepository::find_by_id(&self.0, id).await
        }

        async fn find_by_user_id(&self, user_id: &UserId) -> Result<Vec<Project>, DomainError> {
            ProjectRepository::find_by_user_id(&self.0, user_id).await
        }

        async fn delete(&self, id: &ProjectId) -> Result<(), DomainError> {
            ProjectRepository::delete(&self.0, id).await
        }
    }

    fn command(project_id: ProjectId) -> UpdateProjectCommand {
        UpdateProjectCommand {
            project_id,
            user_id: user("alice"),
            title: None,
            main_topic: None,
            outline: None,
            slides: None,
        }
    }

    #[tokio::test]
    async fn rename_keeps_sections() {
        let store = InMemoryContentStore::new();
        let (project, sections) =
            seed_with_sections(&store, "alice", DocumentKind::Docx, &["Intro", "Results"]).await;
        let mut cmd = command(*project.id());
        cmd.title = Some("Annual Report".to_string());

        let result = handler(&store).handle(cmd).await.unwrap();

        assert_eq!(result.project.title(), "Annual Report");
        assert!(!result.sections_resynced);
        let stored = store.list_by_project(project.id()).await.unwrap();
        assert_eq!(stored[0].id(), sections[0].id());
    }

    #[tokio::test]
    async fn new_titles_resync_sections_from_zero() {
        let store = InMemoryContentStore::new();
        let (project, old) =
            seed_with_sections(&store, "alice", DocumentKind::Docx, &["Intro", "Results"]).await;
        let mut cmd = command(*project.id());
        cmd.outline = Some(titles(&["Summary", "Details", "Outlook"]));

        let result = handler(&store).handle(cmd).await.unwrap();

        assert!(result.sections_resynced);
        let stored = store.list_by_project(project.id()).await.unwrap();
        let names: Vec<_> = stored.iter().map(|s| s.title()).collect();
        assert_eq!(names, vec!["Summary", "Details", "Outlook"]);
        let orders: Vec<_> = stored.iter().map(|s| s.order_index()).collect();
        assert_eq!(orders, vec![0, 1, 2]);
        assert!(stored.iter().all(|s| s.id() != old[0].id()));
    }

    #[tokio::test]
    async fn titles_for_other_kind_are_ignored() {
        let store = InMemoryContentStore::new();
        let (project, _) =
            seed_with_sections(&store, "alice", DocumentKind::Docx, &["Intro"]).await;
        let mut cmd = command(*project.id());
        cmd.slides = Some(titles(&["Cover"]));

        let result = handler(&store).handle(cmd).await.unwrap();

        assert!(!result.sections_resynced);
        assert_eq!(result.project.outline().titles(), ["Intro".to_string()]);
    }

    #[tokio::test]
    async fn empty_titles_are_rejected_without_changes() {
        let store = InMemoryContentStore::new();
        let (project, _) =
            seed_with_sections(&store, "alice", DocumentKind::Docx, &["Intro"]).await;
        let mut cmd = command(*project.id());
        cmd.outline = Some(Vec::new());

        let err = handler(&store).handle(cmd).await.unwrap_err();

        assert!(matches!(err, DocumentError::ValidationFailed { .. }));
        assert_eq!(store.list_by_project(project.id()).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn foreign_project_is_not_found() {
        let store = InMemoryContentStore::new();
        let (project, _) =
            seed_with_sections(&store, "alice", DocumentKind::Docx, &["Intro"]).await;
        let mut cmd = command(*project.id());
        cmd.user_id = user("bob");
        cmd.title = Some("Mine now".to_string());

        let err = handler(&store).handle(cmd).await.unwrap_err();

        assert_eq!(err, DocumentError::project_not_found());
    }

    #[tokio::test]
    async fn failed_resync_leaves_project_and_sections_untouched() {
        let store = InMemoryContentStore::new();
        let (project, old) =
            seed_with_sections(&store, "alice", DocumentKind::Docx, &["Intro", "Results"]).await;
        let handler = UpdateProjectHandler::new(
            gate(&store),
            Arc::new(FailingResyncStore(store.clone())),
        );
        let mut cmd = command(*project.id());
        cmd.title = Some("Annual Report".to_string());
        cmd.outline = Some(titles(&["Summary"]));

        let err = handler.handle(cmd).await.unwrap_err();

        assert!(matches!(err, DocumentError::Infrastructure(_)));
        let stored = ProjectRepository::find_by_id(&store, project.id())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.title(), project.title());
        assert_eq!(stored.outline().titles(), ["Intro".to_string(), "Results".to_string()]);
        let sections = store.list_by_project(project.id()).await.unwrap();
        let ids: Vec<_> = sections.iter().map(|s| *s.id()).collect();
        assert_eq!(ids, vec![*old[0].id(), *old[1].id()]);
    }
}
