//! ExportDocumentHandler - renders a project into an Office Open XML file.
//!
//! An explicit format only picks the exporter; it must still match the
//! project's kind. Slide decks are never converted to documents or back.

use std::sync::Arc;

use tracing::{info, warn};

use crate::application::AccessGate;
use crate::domain::document::{DocumentError, Section};
use crate::domain::foundation::{ProjectId, UserId};
use crate::ports::{DocumentExporter, ExportFormat, ExportedDocument, SectionRepository};

/// Query to export a project.
#[derive(Debug, Clone)]
pub struct ExportDocumentQuery {
    pub project_id: ProjectId,
    pub user_id: UserId,
    /// Defaults to the format of the project's kind.
    pub format: Option<ExportFormat>,
}

pub struct ExportDocumentHandler {
    gate: AccessGate,
    sections: Arc<dyn SectionRepository>,
    exporters: Vec<Arc<dyn DocumentExporter>>,
}

impl ExportDocumentHandler {
    pub fn new(
        gate: AccessGate,
        sections: Arc<dyn SectionRepository>,
        exporters: Vec<Arc<dyn DocumentExporter>>,
    ) -> Self {
        Self {
            gate,
            sections,
            exporters,
        }
    }

    pub async fn handle(&self, query: ExportDocumentQuery) -> Result<ExportedDocument, DocumentError> {
        // 1. Load with ownership check
        let project = self.gate.project_for(&query.project_id, &query.user_id).await?;
        let kind = project.document_kind();

        // 2. Resolve and validate the format
        let format = query.format.unwrap_or_else(|| ExportFormat::for_kind(kind));
        if format.kind() != kind {
            warn!(project_id = %project.id(), %format, "Export format does not match project kind");
            return Err(DocumentError::FormatMismatch {
                requested: format.kind(),
                actual: kind,
            });
        }
        let exporter = self
            .exporters
            .iter()
            .find(|e| e.format() == format)
            .ok_or_else(|| {
                DocumentError::infrastructure(format!("No exporter registered for {}", format))
            })?;

        // 3. Render ordered sections
        let sections: Vec<Section> = self.sections.list_by_project(project.id()).await?;
        let document = exporter.export(&project, &sections)?;

        info!(
            project_id = %project.id(),
            %format,
            bytes = document.content.len(),
            "Document exported"
        );
        Ok(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::document::{DocxExporter, PptxExporter};
    use crate::adapters::memory::InMemoryContentStore;
    use crate::application::handlers::test_support::{gate, seed_with_sections, user};
    use crate::domain::document::{DocumentKind, Project};

    fn handler(store: &InMemoryContentStore) -> ExportDocumentHandler {
        ExportDocumentHandler::new(
            gate(store),
            Arc::new(store.clone()),
            vec![Arc::new(DocxExporter::new()), Arc::new(PptxExporter::new())],
        )
    }

    fn query(project: &Project, format: Option<ExportFormat>) -> ExportDocumentQuery {
        ExportDocumentQuery {
            project_id: *project.id(),
            user_id: user("alice"),
            format,
        }
    }

    #[tokio::test]
    async fn defaults_to_project_kind() {
        let store = InMemoryContentStore::new();
        let (project, _) =
            seed_with_sections(&store, "alice", DocumentKind::Pptx, &["Cover"]).await;

        let document = handler(&store).handle(query(&project, None)).await.unwrap();

        assert_eq!(document.format, ExportFormat::Pptx);
        assert_eq!(document.filename, "Quarterly Report.pptx");
        assert!(document.content.starts_with(b"PK"));
    }

    #[tokio::test]
    async fn explicit_matching_format_is_accepted() {
        let store = InMemoryContentStore::new();
        let (project, _) =
            seed_with_sections(&store, "alice", DocumentKind::Docx, &["Intro"]).await;

        let document = handler(&store)
            .handle(query(&project, Some(ExportFormat::Docx)))
            .await
            .unwrap();

        assert_eq!(
            document.content_type,
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        );
    }

    #[tokio::test]
    async fn mismatched_format_is_rejected() {
        let store = InMemoryContentStore::new();
        let (project, _) =
            seed_with_sections(&store, "alice", DocumentKind::Docx, &["Intro"]).await;

        let err = handler(&store)
            .handle(query(&project, Some(ExportFormat::Pptx)))
            .await
            .unwrap_err();

        assert_eq!(
            err,
            DocumentError::FormatMismatch {
                requested: DocumentKind::Pptx,
                actual: DocumentKind::Docx,
            }
        );
    }

    #[tokio::test]
    async fn missing_exporter_is_an_infrastructure_error() {
        let store = InMemoryContentStore::new();
        let (project, _) =
            seed_with_sections(&store, "alice", DocumentKind::Pptx, &["Cover"]).await;
        let handler = ExportDocumentHandler::new(
            gate(&store),
            Arc::new(store.clone()),
            vec![Arc::new(DocxExporter::new())],
        );

        let err = handler.handle(query(&project, None)).await.unwrap_err();

        assert!(matches!(err, DocumentError::Infrastructure(_)));
    }

    #[tokio::test]
    async fn foreign_project_is_not_found() {
        let store = InMemoryContentStore::new();
        let (project, _) =
            seed_with_sections(&store, "alice", DocumentKind::Docx, &["Intro"]).await;
        let mut q = query(&project, None);
        q.user_id = user("bob");

        let err = handler(&store).handle(q).await.unwrap_err();

        assert_eq!(err, DocumentError::project_not_found());
    }
}
