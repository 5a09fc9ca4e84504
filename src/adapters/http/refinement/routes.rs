//! HTTP routes for refinement endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{list_refinements, refine_section, submit_feedback, RefinementHandlers};

/// Refinement routes, mounted under `/api/refinement`.
pub fn refinement_routes(handlers: RefinementHandlers) -> Router {
    Router::new()
        .route("/", post(refine_section))
        .route("/feedback", post(submit_feedback))
        .route("/:project_id", get(list_refinements))
        .with_state(handlers)
}
