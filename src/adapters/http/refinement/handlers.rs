//! HTTP handlers for refinement endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::{handle_document_error, parse_id};
use crate::adapters::http::middleware::RequireAuth;
use crate::application::handlers::refinement::{
    ListRefinementsHandler, ListRefinementsQuery, RefineSectionCommand, RefineSectionHandler,
    SubmitFeedbackCommand, SubmitFeedbackHandler,
};
use crate::domain::foundation::{ProjectId, RefinementId, SectionId};

use super::dto::{FeedbackRequest, RefinementRequest, RefinementResponse};

#[derive(Clone)]
pub struct RefinementHandlers {
    pub refine: Arc<RefineSectionHandler>,
    pub feedback: Arc<SubmitFeedbackHandler>,
    pub list: Arc<ListRefinementsHandler>,
}

/// POST /api/refinement - Rewrite a section from a prompt
pub async fn refine_section(
    State(handlers): State<RefinementHandlers>,
    RequireAuth(user): RequireAuth,
    Json(req): Json<RefinementRequest>,
) -> Response {
    let section_id: SectionId = match parse_id(&req.section_id, "section") {
        Ok(id) => id,
        Err(rejection) => return rejection,
    };

    let cmd = RefineSectionCommand {
        section_id,
        user_id: user.id,
        prompt: req.prompt,
    };

    match handlers.refine.handle(cmd).await {
        Ok(result) => {
            (StatusCode::OK, Json(RefinementResponse::from(&result.refinement))).into_response()
        }
        Err(e) => handle_document_error(e),
    }
}

/// POST /api/refinement/feedback - Record like/dislike and a comment
pub async fn submit_feedback(
    State(handlers): State<RefinementHandlers>,
    RequireAuth(user): RequireAuth,
    Json(req): Json<FeedbackRequest>,
) -> Response {
    let refinement_id: RefinementId = match parse_id(&req.refinement_id, "refinement") {
        Ok(id) => id,
        Err(rejection) => return rejection,
    };

    let cmd = SubmitFeedbackCommand {
        refinement_id,
        user_id: user.id,
        feedback: req.feedback,
        comment: req.comment,
    };

    match handlers.feedback.handle(cmd).await {
        Ok(refinement) => {
            (StatusCode::OK, Json(RefinementResponse::from(&refinement))).into_response()
        }
        Err(e) => handle_document_error(e),
    }
}

/// GET /api/refinement/:project_id - Refinement history, newest first
pub async fn list_refinements(
    State(handlers): State<RefinementHandlers>,
    RequireAuth(user): RequireAuth,
    Path(project_id): Path<String>,
) -> Response {
    let project_id: ProjectId = match parse_id(&project_id, "project") {
        Ok(id) => id,
        Err(rejection) => return rejection,
    };

    let query = ListRefinementsQuery {
        project_id,
        user_id: user.id,
    };

    match handlers.list.handle(query).await {
        Ok(refinements) => {
            let body: Vec<RefinementResponse> =
                refinements.iter().map(RefinementResponse::from).collect();
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => handle_document_error(e),
    }
}
