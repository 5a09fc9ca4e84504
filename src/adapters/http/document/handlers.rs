//! HTTP handlers for outline suggestion, generation and export.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::{handle_document_error, parse_id};
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::project::section_list;
use crate::application::handlers::{
    ExportDocumentHandler, ExportDocumentQuery, GenerateContentCommand, GenerateContentHandler,
    SuggestOutlineHandler, SuggestOutlineQuery,
};
use crate::domain::document::DocumentError;
use crate::domain::foundation::ProjectId;
use crate::ports::ExportFormat;

use super::dto::{
    attachment_disposition, ExportParams, GenerateRequest, TemplateRequest, TemplateResponse,
};

#[derive(Clone)]
pub struct DocumentHandlers {
    pub suggest: Arc<SuggestOutlineHandler>,
    pub generate: Arc<GenerateContentHandler>,
    pub export: Arc<ExportDocumentHandler>,
}

/// POST /api/documents/template - Suggest titles for a topic
pub async fn suggest_template(
    State(handlers): State<DocumentHandlers>,
    RequireAuth(user): RequireAuth,
    Json(req): Json<TemplateRequest>,
) -> Response {
    let query = SuggestOutlineQuery {
        user_id: user.id,
        document_type: req.document_type,
        main_topic: req.main_topic,
    };

    match handlers.suggest.handle(query).await {
        Ok(result) => (StatusCode::OK, Json(TemplateResponse::from(result))).into_response(),
        Err(e) => handle_document_error(e),
    }
}

/// POST /api/documents/generate - Materialize sections and fill empty ones
pub async fn generate_content(
    State(handlers): State<DocumentHandlers>,
    RequireAuth(user): RequireAuth,
    Json(req): Json<GenerateRequest>,
) -> Response {
    let project_id: ProjectId = match parse_id(&req.project_id, "project") {
        Ok(id) => id,
        Err(rejection) => return rejection,
    };

    let cmd = GenerateContentCommand {
        project_id,
        user_id: user.id,
    };

    match handlers.generate.handle(cmd).await {
        Ok(sections) => (StatusCode::OK, Json(section_list(&sections))).into_response(),
        Err(e) => handle_document_error(e),
    }
}

/// GET /api/documents/:id/export?format= - Download the OOXML package
pub async fn export_document(
    State(handlers): State<DocumentHandlers>,
    RequireAuth(user): RequireAuth,
    Path(project_id): Path<String>,
    Query(params): Query<ExportParams>,
) -> Response {
    let project_id: ProjectId = match parse_id(&project_id, "project") {
        Ok(id) => id,
        Err(rejection) => return rejection,
    };
    let format = match params.format.as_deref().map(str::parse::<ExportFormat>) {
        None => None,
        Some(Ok(format)) => Some(format),
        Some(Err(e)) => return handle_document_error(DocumentError::from(e)),
    };

    let query = ExportDocumentQuery {
        project_id,
        user_id: user.id,
        format,
    };

    let document = match handlers.export.handle(query).await {
        Ok(document) => document,
        Err(e) => return handle_document_error(e),
    };

    let disposition = match HeaderValue::from_str(&attachment_disposition(&document.filename)) {
        Ok(value) => value,
        Err(e) => {
            return handle_document_error(DocumentError::infrastructure(format!(
                "Invalid download filename: {}",
                e
            )))
        }
    };
    let content_type = HeaderValue::from_static(document.format.content_type());

    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, content_type),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        document.content,
    )
        .into_response()
}
