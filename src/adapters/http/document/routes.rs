//! HTTP routes for document generation and export.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{export_document, generate_content, suggest_template, DocumentHandlers};

/// Document routes, mounted under `/api/documents`.
pub fn document_routes(handlers: DocumentHandlers) -> Router {
    Router::new()
        .route("/template", post(suggest_template))
        .route("/generate", post(generate_content))
        .route("/:id/export", get(export_document))
        .with_state(handlers)
}
