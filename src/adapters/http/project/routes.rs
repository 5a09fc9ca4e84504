//! HTTP routes for project endpoints.

use axum::{routing::get, Router};

use super::handlers::{
    create_project, delete_project, get_project, list_projects, list_sections, update_project,
    ProjectHandlers,
};

/// Project routes, mounted under `/api/projects`.
pub fn project_routes(handlers: ProjectHandlers) -> Router {
    Router::new()
        .route("/", get(list_projects).post(create_project))
        .route(
            "/:id",
            get(get_project).put(update_project).delete(delete_project),
        )
        .route("/:id/sections", get(list_sections))
        .with_state(handlers)
}
