//! Shared fixtures for handler tests.

use std::sync::Arc;

use crate::adapters::ai::MockAIProvider;
use crate::adapters::memory::InMemoryContentStore;
use crate::application::{AccessGate, ContentGenerator};
use crate::domain::document::{DocumentKind, Outline, Project, Section};
use crate::domain::foundation::{ProjectId, UserId};
use crate::ports::{ProjectRepository, SectionRepository};

pub fn user(id: &str) -> UserId {
    UserId::new(id).unwrap()
}

pub fn gate(store: &InMemoryContentStore) -> AccessGate {
    AccessGate::new(
        Arc::new(store.clone()),
        Arc::new(store.clone()),
        Arc::new(store.clone()),
    )
}

pub fn generator(mock: &MockAIProvider) -> ContentGenerator {
    ContentGenerator::new(Arc::new(mock.clone()))
}

pub fn titles(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Stores a project without any sections.
pub async fn seed_project(
    store: &InMemoryContentStore,
    owner: &str,
    kind: DocumentKind,
    items: &[&str],
) -> Project {
    let project = Project::new(
        ProjectId::new(),
        user(owner),
        "Quarterly Report".to_string(),
        "Revenue growth".to_string(),
        Outline::new(kind, titles(items)),
    )
    .unwrap();
    ProjectRepository::save(store, &project).await.unwrap();
    project
}

/// Stores a project and its drafted sections.
pub async fn seed_with_sections(
    store: &InMemoryContentStore,
    owner: &str,
    kind: DocumentKind,
    items: &[&str],
) -> (Project, Vec<Section>) {
    let project = seed_project(store, owner, kind, items).await;
    let sections = project.draft_sections();
    store.insert_all(&sections).await.unwrap();
    (project, sections)
}
