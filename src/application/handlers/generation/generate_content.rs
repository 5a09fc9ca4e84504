//! GenerateContentHandler - materializes sections, then fills the empty ones.

use tracing::info;

use crate::application::AccessGate;
use crate::domain::document::{DocumentError, Section};
use crate::domain::foundation::{ProjectId, UserId};

use super::{FillEmptyContentHandler, MaterializeSectionsHandler};

/// Command behind the "generate document" action.
#[derive(Debug, Clone)]
pub struct GenerateContentCommand {
    pub project_id: ProjectId,
    pub user_id: UserId,
}

pub struct GenerateContentHandler {
    gate: AccessGate,
    materialize: MaterializeSectionsHandler,
    fill: FillEmptyContentHandler,
}

impl GenerateContentHandler {
    pub fn new(
        gate: AccessGate,
        materialize: MaterializeSectionsHandler,
        fill: FillEmptyContentHandler,
    ) -> Self {
        Self {
            gate,
            materialize,
            fill,
        }
    }

    pub async fn handle(&self, cmd: GenerateContentCommand) -> Result<Vec<Section>, DocumentError> {
        // 1. Authorize once for both steps
        let project = self.gate.project_for(&cmd.project_id, &cmd.user_id).await?;

        // 2. Ensure sections exist
        self.materialize.materialize(&project).await?;

        // 3. Draft whatever is still empty
        let sections = self.fill.fill(&project).await?;

        info!(project_id = %project.id(), sections = sections.len(), "Content generated");
        Ok(sections)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockAIProvider;
    use crate::adapters::memory::InMemoryContentStore;
    use crate::application::handlers::test_support::{gate, generator, seed_project, user};
    use crate::domain::document::DocumentKind;
    use std::sync::Arc;

    fn handler(store: &InMemoryContentStore, mock: &MockAIProvider) -> GenerateContentHandler {
        let gate = gate(store);
        GenerateContentHandler::new(
            gate.clone(),
            MaterializeSectionsHandler::new(gate.clone(), Arc::new(store.clone())),
            FillEmptyContentHandler::new(gate, Arc::new(store.clone()), generator(mock)),
        )
    }

    #[tokio::test]
    async fn generates_sections_and_content_in_one_call() {
        let store = InMemoryContentStore::new();
        let project = seed_project(&store, "alice", DocumentKind::Docx, &["Intro", "Results"]).await;
        let mock = MockAIProvider::new().with_response("Intro text").with_response("Results text");

        let sections = handler(&store, &mock)
            .handle(GenerateContentCommand {
                project_id: *project.id(),
                user_id: user("alice"),
            })
            .await
            .unwrap();

        let contents: Vec<_> = sections.iter().map(|s| s.content()).collect();
        assert_eq!(contents, vec![Some("Intro text"), Some("Results text")]);
    }

    #[tokio::test]
    async fn running_twice_only_calls_model_once_per_section() {
        let store = InMemoryContentStore::new();
        let project = seed_project(&store, "alice", DocumentKind::Pptx, &["Cover"]).await;
        let mock = MockAIProvider::new();
        let handler = handler(&store, &mock);
        let cmd = GenerateContentCommand {
            project_id: *project.id(),
            user_id: user("alice"),
        };

        handler.handle(cmd.clone()).await.unwrap();
        handler.handle(cmd).await.unwrap();

        assert_eq!(mock.call_count(), 1);
        assert_eq!(store.section_count().await, 1);
    }
}
