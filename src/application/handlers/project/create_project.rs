//! CreateProjectHandler - Command handler for starting a document project.

use std::str::FromStr;
use std::sync::Arc;

use tracing::info;

use crate::domain::document::{DocumentError, DocumentKind, Outline, Project, Section};
use crate::domain::foundation::{ProjectId, UserId};
use crate::ports::{ProjectRepository, SectionRepository};

/// Command to create a project.
///
/// Clients send both title lists; only the one matching `document_type`
/// is used (`outline` for docx, `slides` for pptx).
#[derive(Debug, Clone)]
pub struct CreateProjectCommand {
    pub user_id: UserId,
    pub title: String,
    pub document_type: String,
    pub main_topic: String,
    pub outline: Option<Vec<String>>,
    pub slides: Option<Vec<String>>,
}

/// Result of successful project creation.
#[derive(Debug, Clone)]
pub struct CreateProjectResult {
    pub project: Project,
    pub sections: Vec<Section>,
}

/// Handler for creating projects.
pub struct CreateProjectHandler {
    projects: Arc<dyn ProjectRepository>,
    sections: Arc<dyn SectionRepository>,
}

impl CreateProjectHandler {
    pub fn new(projects: Arc<dyn ProjectRepository>, sections: Arc<dyn SectionRepository>) -> Self {
        Self { projects, sections }
    }

    pub async fn handle(
        &self,
        cmd: CreateProjectCommand,
    ) -> Result<CreateProjectResult, DocumentError> {
        // 1. Resolve the document kind
        let kind = DocumentKind::from_str(&cmd.document_type)?;

        // 2. Pick the title list for that kind
        let outline = Outline::from_lists(kind, cmd.outline, cmd.slides)?;

        // 3. Build the aggregate
        let project = Project::new(
            ProjectId::new(),
            cmd.user_id,
            cmd.title,
            cmd.main_topic,
            outline,
        )?;

        // 4. Persist project, then one section per title
        self.projects.save(&project).await?;
        let sections = project.draft_sections();
        self.sections.insert_all(&sections).await?;

        info!(
            project_id = %project.id(),
            kind = %kind,
            sections = sections.len(),
            "Project created"
        );

        Ok(CreateProjectResult { project, sections })
    }
}
