//! PostgreSQL implementation of SectionRepository.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Postgres, Transaction};

use crate::domain::document::{DocumentError, Section, SectionKind};
use crate::domain::foundation::{DomainError, ErrorCode, ProjectId, SectionId, Timestamp};
use crate::ports::SectionRepository;

use super::{column, db_error, order_index_to_db};

/// PostgreSQL implementation of SectionRepository.
#[derive(Clone)]
pub struct PostgresSectionRepository {
    pool: PgPool,
}

impl PostgresSectionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

pub(super) async fn insert_sections(
    tx: &mut Transaction<'_, Postgres>,
    sections: &[Section],
) -> Result<(), DomainError> {
    for section in sections {
        sqlx::query(
            r#"
            INSERT INTO sections (
                id, project_id, section_type, title, content, order_index,
                created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(section.id().as_uuid())
        .bind(section.project_id().as_uuid())
        .bind(section.kind().as_str())
        .bind(section.title())
        .bind(section.content())
        .bind(order_index_to_db(section.order_index())?)
        .bind(section.created_at().as_datetime())
        .bind(section.updated_at().as_datetime())
        .execute(&mut **tx)
        .await
        .map_err(db_error("Failed to insert section"))?;
    }
    Ok(())
}

#[async_trait]
impl SectionRepository for PostgresSectionRepository {
    async fn insert_all(&self, sections: &[Section]) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("Failed to start transaction"))?;

        insert_sections(&mut tx, sections).await?;

        tx.commit()
            .await
            .map_err(db_error("Failed to commit transaction"))
    }

    async fn update_content(&self, section: &Section) -> Result<(), DomainError> {
        let result = sqlx::query(
            "UPDATE sections SET content = $2, updated_at = $3 WHERE id = $1",
        )
        .bind(section.id().as_uuid())
        .bind(section.content())
        .bind(section.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(db_error("Failed to update section"))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::SectionNotFound,
                format!("Section not found: {}", section.id()),
            ));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: &SectionId) -> Result<Option<Section>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, project_id, section_type, title, content, order_index,
                   created_at, updated_at
            FROM sections WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to fetch section"))?;

        row.as_ref().map(row_to_section).transpose()
    }

    async fn list_by_project(&self, project_id: &ProjectId) -> Result<Vec<Section>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, project_id, section_type, title, content, order_index,
                   created_at, updated_at
            FROM sections WHERE project_id = $1
            ORDER BY order_index
            "#,
        )
        .bind(project_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to fetch sections"))?;

        rows.iter().map(row_to_section).collect()
    }
}

fn row_to_section(row: &PgRow) -> Result<Section, DomainError> {
    let id: uuid::Uuid = column(row, "id")?;
    let project_id: uuid::Uuid = column(row, "project_id")?;
    let section_type: String = column(row, "section_type")?;
    let order_index: i32 = column(row, "order_index")?;
    let created_at: chrono::DateTime<chrono::Utc> = column(row, "created_at")?;
    let updated_at: chrono::DateTime<chrono::Utc> = column(row, "updated_at")?;

    let kind: SectionKind = section_type
        .parse()
        .map_err(|e: DocumentError| DomainError::database(e.to_string()))?;
    let order_index = u32::try_from(order_index).map_err(|_| {
        DomainError::database(format!("Negative order_index: {}", order_index))
    })?;

    Ok(Section::reconstitute(
        SectionId::from_uuid(id),
        ProjectId::from_uuid(project_id),
        kind,
        column(row, "title")?,
        column(row, "content")?,
        order_index,
        Timestamp::from_datetime(created_at),
        Timestamp::from_datetime(updated_at),
    ))
}
