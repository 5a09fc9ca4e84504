//! PostgreSQL adapters - Database implementations for the content store ports.
//!
//! - `PostgresProjectRepository`
//! - `PostgresSectionRepository`
//! - `PostgresRefinementRepository`
//!
//! Schema lives in `migrations/`. Deleting a project cascades to its
//! sections and refinements through foreign keys.

mod project_repository;
mod refinement_repository;
mod section_repository;

pub use project_repository::PostgresProjectRepository;
pub use refinement_repository::PostgresRefinementRepository;
pub use section_repository::PostgresSectionRepository;

use sqlx::postgres::PgRow;
use sqlx::{Decode, Postgres, Row, Type};

use crate::domain::foundation::{DomainError, ErrorCode};

/// Maps a sqlx failure to a `DatabaseError` with context.
fn db_error(context: &'static str) -> impl Fn(sqlx::Error) -> DomainError {
    move |e| DomainError::new(ErrorCode::DatabaseError, format!("{}: {}", context, e))
}

/// Reads one column, reporting decode failures as `DatabaseError`.
fn column<'r, T>(row: &'r PgRow, name: &str) -> Result<T, DomainError>
where
    T: Decode<'r, Postgres> + Type<Postgres>,
{
    row.try_get(name).map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to get {}: {}", name, e),
        )
    })
}

fn order_index_to_db(order_index: u32) -> Result<i32, DomainError> {
    i32::try_from(order_index).map_err(|_| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("order_index out of range: {}", order_index),
        )
    })
}
