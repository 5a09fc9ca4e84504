//! PostgreSQL implementation of ProjectRepository.
//!
//! The outline is stored in one of two nullable JSONB columns, `outline`
//! for docx projects and `slides` for pptx, selected by `document_type`.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::types::Json;
use sqlx::{PgExecutor, PgPool};

use crate::domain::document::{DocumentKind, Outline, Project, Section};
use crate::domain::foundation::{DomainError, ErrorCode, ProjectId, Timestamp, UserId};
use crate::ports::ProjectRepository;

use super::section_repository::insert_sections;
use super::{column, db_error};

/// PostgreSQL implementation of ProjectRepository.
#[derive(Clone)]
pub struct PostgresProjectRepository {
    pool: PgPool,
}

impl PostgresProjectRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const SELECT_COLUMNS: &str = r#"
    SELECT id, user_id, title, document_type, main_topic, outline, slides,
           created_at, updated_at
    FROM projects
"#;

#[async_trait]
impl ProjectRepository for PostgresProjectRepository {
    async fn save(&self, project: &Project) -> Result<(), DomainError> {
        let outline = project.outline();

        sqlx::query(
            r#"
            INSERT INTO projects (
                id, user_id, title, document_type, main_topic, outline, slides,
                created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(project.id().as_uuid())
        .bind(project.user_id().as_str())
        .bind(project.title())
        .bind(project.document_kind().as_str())
        .bind(project.main_topic())
        .bind(outline.long_form_titles().map(Json))
        .bind(outline.slide_titles().map(Json))
        .bind(project.created_at().as_datetime())
        .bind(project.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(db_error("Failed to insert project"))?;

        Ok(())
    }

    async fn update(&self, project: &Project) -> Result<(), DomainError> {
        update_row(&self.pool, project).await
    }

    async fn update_with_sections(
        &self,
        project: &Project,
        sections: &[Section],
    ) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("Failed to start transaction"))?;

        update_row(&mut *tx, project).await?;

        // Refinements cascade with their sections.
        sqlx::query("DELETE FROM sections WHERE project_id = $1")
            .bind(project.id().as_uuid())
            .execute(&mut *tx)
            .await
            .map_err(db_error("Failed to delete sections"))?;

        insert_sections(&mut tx, sections).await?;

        tx.commit()
            .await
            .map_err(db_error("Failed to commit transaction"))
    }

    async fn find_by_id(&self, id: &ProjectId) -> Result<Option<Project>, DomainError> {
        let row = sqlx::query(&format!("{} WHERE id = $1", SELECT_COLUMNS))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to fetch project"))?;

        row.as_ref().map(row_to_project).transpose()
    }

    async fn find_by_user_id(&self, user_id: &UserId) -> Result<Vec<Project>, DomainError> {
        let rows = sqlx::query(&format!(
            "{} WHERE user_id = $1 ORDER BY created_at DESC",
            SELECT_COLUMNS
        ))
        .bind(user_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to fetch projects by user"))?;

        rows.iter().map(row_to_project).collect()
    }

    async fn delete(&self, id: &ProjectId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to delete project"))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::ProjectNotFound,
                format!("Project not found: {}", id),
            ));
        }

        Ok(())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════

async fn update_row<'e, E>(executor: E, project: &Project) -> Result<(), DomainError>
where
    E: PgExecutor<'e>,
{
    let outline = project.outline();

    let result = sqlx::query(
        r#"
        UPDATE projects SET
            title = $2,
            main_topic = $3,
            outline = $4,
            slides = $5,
            updated_at = $6
        WHERE id = $1
        "#,
    )
    .bind(project.id().as_uuid())
    .bind(project.title())
    .bind(project.main_topic())
    .bind(outline.long_form_titles().map(Json))
    .bind(outline.slide_titles().map(Json))
    .bind(project.updated_at().as_datetime())
    .execute(executor)
    .await
    .map_err(db_error("Failed to update project"))?;

    if result.rows_affected() == 0 {
        return Err(DomainError::new(
            ErrorCode::ProjectNotFound,
            format!("Project not found: {}", project.id()),
        ));
    }

    Ok(())
}

fn row_to_project(row: &PgRow) -> Result<Project, DomainError> {
    let id: uuid::Uuid = column(row, "id")?;
    let user_id: String = column(row, "user_id")?;
    let document_type: String = column(row, "document_type")?;
    let outline: Option<Json<Vec<String>>> = column(row, "outline")?;
    let slides: Option<Json<Vec<String>>> = column(row, "slides")?;
    let created_at: chrono::DateTime<chrono::Utc> = column(row, "created_at")?;
    let updated_at: chrono::DateTime<chrono::Utc> = column(row, "updated_at")?;

    Ok(Project::reconstitute(
        ProjectId::from_uuid(id),
        UserId::new(user_id).map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Invalid user_id: {}", e))
        })?,
        column(row, "title")?,
        column(row, "main_topic")?,
        parse_outline_columns(
            &document_type,
            outline.map(|Json(titles)| titles),
            slides.map(|Json(titles)| titles),
        )?,
        Timestamp::from_datetime(created_at),
        Timestamp::from_datetime(updated_at),
    ))
}

/// Builds the outline from the column matching `document_type`.
///
/// The other column is ignored; a NULL matching column reads as no titles.
fn parse_outline_columns(
    document_type: &str,
    outline: Option<Vec<String>>,
    slides: Option<Vec<String>>,
) -> Result<Outline, DomainError> {
    let kind: DocumentKind = document_type.parse().map_err(|_| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid document_type: {}", document_type),
        )
    })?;
    let titles = match kind {
        DocumentKind::Docx => outline,
        DocumentKind::Pptx => slides,
    };
    Ok(Outline::new(kind, titles.unwrap_or_default()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titles(items: &[&str]) -> Option<Vec<String>> {
        Some(items.iter().map(|t| t.to_string()).collect())
    }

    #[test]
    fn parse_outline_columns_reads_outline_for_docx() {
        let outline = parse_outline_columns("docx", titles(&["Intro", "Results"]), None).unwrap();

        assert_eq!(outline.kind(), DocumentKind::Docx);
        assert_eq!(outline.titles(), ["Intro".to_string(), "Results".to_string()]);
        assert_eq!(outline.slide_titles(), None);
    }

    #[test]
    fn parse_outline_columns_reads_slides_for_pptx() {
        let outline = parse_outline_columns("pptx", None, titles(&["Cover"])).unwrap();

        assert_eq!(outline.kind(), DocumentKind::Pptx);
        assert_eq!(outline.titles(), ["Cover".to_string()]);
    }

    #[test]
    fn parse_outline_columns_ignores_the_other_column() {
        let outline =
            parse_outline_columns("pptx", titles(&["Stray"]), titles(&["Cover"])).unwrap();

        assert_eq!(outline.titles(), ["Cover".to_string()]);
    }

    #[test]
    fn parse_outline_columns_treats_null_as_empty() {
        let outline = parse_outline_columns("docx", None, titles(&["Cover"])).unwrap();

        assert_eq!(outline.kind(), DocumentKind::Docx);
        assert!(outline.is_empty());
    }

    #[test]
    fn parse_outline_columns_rejects_unknown_document_type() {
        let err = parse_outline_columns("xlsx", titles(&["A"]), None).unwrap_err();

        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert!(err.message.contains("xlsx"));
    }
}
