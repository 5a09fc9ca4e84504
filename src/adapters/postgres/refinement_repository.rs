//! PostgreSQL implementation of RefinementRepository.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;

use crate::domain::document::{Refinement, Section};
use crate::domain::foundation::{
    DomainError, ErrorCode, ProjectId, RefinementId, SectionId, Timestamp,
};
use crate::ports::RefinementRepository;

use super::{column, db_error};

/// PostgreSQL implementation of RefinementRepository.
#[derive(Clone)]
pub struct PostgresRefinementRepository {
    pool: PgPool,
}

impl PostgresRefinementRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RefinementRepository for PostgresRefinementRepository {
    async fn record(&self, refinement: &Refinement, section: &Section) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("Failed to start transaction"))?;

        let updated = sqlx::query(
            "UPDATE sections SET content = $2, updated_at = $3 WHERE id = $1",
        )
        .bind(section.id().as_uuid())
        .bind(section.content())
        .bind(section.updated_at().as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(db_error("Failed to update section"))?;

        if updated.rows_affected() == 0 {
            // Dropping the transaction rolls it back.
            return Err(DomainError::new(
                ErrorCode::SectionNotFound,
                format!("Section not found: {}", section.id()),
            ));
        }

        sqlx::query(
            r#"
            INSERT INTO refinements (
                id, project_id, section_id, prompt, original_content, refined_content,
                user_feedback, user_comment, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(refinement.id().as_uuid())
        .bind(refinement.project_id().as_uuid())
        .bind(refinement.section_id().as_uuid())
        .bind(refinement.prompt())
        .bind(refinement.original_content())
        .bind(refinement.refined_content())
        .bind(refinement.user_feedback())
        .bind(refinement.user_comment())
        .bind(refinement.created_at().as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(db_error("Failed to insert refinement"))?;

        tx.commit()
            .await
            .map_err(db_error("Failed to commit transaction"))
    }

    async fn find_by_id(&self, id: &RefinementId) -> Result<Option<Refinement>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, project_id, section_id, prompt, original_content, refined_content,
                   user_feedback, user_comment, created_at
            FROM refinements WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to fetch refinement"))?;

        row.as_ref().map(row_to_refinement).transpose()
    }

    async fn update_feedback(&self, refinement: &Refinement) -> Result<(), DomainError> {
        let result = sqlx::query(
            "UPDATE refinements SET user_feedback = $2, user_comment = $3 WHERE id = $1",
        )
        .bind(refinement.id().as_uuid())
        .bind(refinement.user_feedback())
        .bind(refinement.user_comment())
        .execute(&self.pool)
        .await
        .map_err(db_error("Failed to update refinement feedback"))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::RefinementNotFound,
                format!("Refinement not found: {}", refinement.id()),
            ));
        }
        Ok(())
    }

    async fn list_by_project(
        &self,
        project_id: &ProjectId,
    ) -> Result<Vec<Refinement>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, project_id, section_id, prompt, original_content, refined_content,
                   user_feedback, user_comment, created_at
            FROM refinements WHERE project_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(project_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to fetch refinements"))?;

        rows.iter().map(row_to_refinement).collect()
    }
}

fn row_to_refinement(row: &PgRow) -> Result<Refinement, DomainError> {
    let id: uuid::Uuid = column(row, "id")?;
    let project_id: uuid::Uuid = column(row, "project_id")?;
    let section_id: uuid::Uuid = column(row, "section_id")?;
    let created_at: chrono::DateTime<chrono::Utc> = column(row, "created_at")?;

    Ok(Refinement::reconstitute(
        RefinementId::from_uuid(id),
        ProjectId::from_uuid(project_id),
        SectionId::from_uuid(section_id),
        column(row, "prompt")?,
        column(row, "original_content")?,
        column(row, "refined_content")?,
        column(row, "user_feedback")?,
        column(row, "user_comment")?,
        Timestamp::from_datetime(created_at),
    ))
}
