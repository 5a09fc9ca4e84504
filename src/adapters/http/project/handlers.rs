//! HTTP handlers for project endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::{handle_document_error, parse_id};
use crate::adapters::http::middleware::RequireAuth;
use crate::application::handlers::project::{
    CreateProjectCommand, CreateProjectHandler, DeleteProjectCommand, DeleteProjectHandler,
    GetProjectHandler, GetProjectQuery, ListProjectsHandler, ListProjectsQuery,
    ListSectionsHandler, ListSectionsQuery, UpdateProjectCommand, UpdateProjectHandler,
};
use crate::domain::foundation::ProjectId;

use super::dto::{
    section_list, CreateProjectRequest, ProjectResponse, UpdateProjectRequest,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct ProjectHandlers {
    pub create: Arc<CreateProjectHandler>,
    pub get: Arc<GetProjectHandler>,
    pub list: Arc<ListProjectsHandler>,
    pub update: Arc<UpdateProjectHandler>,
    pub delete: Arc<DeleteProjectHandler>,
    pub sections: Arc<ListSectionsHandler>,
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// GET /api/projects - List the caller's projects, newest first
pub async fn list_projects(
    State(handlers): State<ProjectHandlers>,
    RequireAuth(user): RequireAuth,
) -> Response {
    let query = ListProjectsQuery { user_id: user.id };

    match handlers.list.handle(query).await {
        Ok(projects) => {
            let body: Vec<ProjectResponse> = projects.iter().map(ProjectResponse::from).collect();
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => handle_document_error(e),
    }
}

/// POST /api/projects - Create a project and its sections
pub async fn create_project(
    State(handlers): State<ProjectHandlers>,
    RequireAuth(user): RequireAuth,
    Json(req): Json<CreateProjectRequest>,
) -> Response {
    let cmd = CreateProjectCommand {
        user_id: user.id,
        title: req.title,
        document_type: req.document_type,
        main_topic: req.main_topic,
        outline: req.outline,
        slides: req.slides,
    };

    match handlers.create.handle(cmd).await {
        Ok(result) => {
            (StatusCode::CREATED, Json(ProjectResponse::from(&result.project))).into_response()
        }
        Err(e) => handle_document_error(e),
    }
}

/// GET /api/projects/:id
pub async fn get_project(
    State(handlers): State<ProjectHandlers>,
    RequireAuth(user): RequireAuth,
    Path(project_id): Path<String>,
) -> Response {
    let project_id: ProjectId = match parse_id(&project_id, "project") {
        Ok(id) => id,
        Err(rejection) => return rejection,
    };

    let query = GetProjectQuery {
        project_id,
        user_id: user.id,
    };

    match handlers.get.handle(query).await {
        Ok(project) => (StatusCode::OK, Json(ProjectResponse::from(&project))).into_response(),
        Err(e) => handle_document_error(e),
    }
}

/// PUT /api/projects/:id - Partial update; new titles resync sections
pub async fn update_project(
    State(handlers): State<ProjectHandlers>,
    RequireAuth(user): RequireAuth,
    Path(project_id): Path<String>,
    Json(req): Json<UpdateProjectRequest>,
) -> Response {
    let project_id: ProjectId = match parse_id(&project_id, "project") {
        Ok(id) => id,
        Err(rejection) => return rejection,
    };

    let cmd = UpdateProjectCommand {
        project_id,
        user_id: user.id,
        title: req.title,
        main_topic: req.main_topic,
        outline: req.outline,
        slides: req.slides,
    };

    match handlers.update.handle(cmd).await {
        Ok(result) => {
            (StatusCode::OK, Json(ProjectResponse::from(&result.project))).into_response()
        }
        Err(e) => handle_document_error(e),
    }
}

/// DELETE /api/projects/:id
pub async fn delete_project(
    State(handlers): State<ProjectHandlers>,
    RequireAuth(user): RequireAuth,
    Path(project_id): Path<String>,
) -> Response {
    let project_id: ProjectId = match parse_id(&project_id, "project") {
        Ok(id) => id,
        Err(rejection) => return rejection,
    };

    let cmd = DeleteProjectCommand {
        project_id,
        user_id: user.id,
    };

    match handlers.delete.handle(cmd).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => handle_document_error(e),
    }
}

/// GET /api/projects/:id/sections - Sections ordered by `order_index`
pub async fn list_sections(
    State(handlers): State<ProjectHandlers>,
    RequireAuth(user): RequireAuth,
    Path(project_id): Path<String>,
) -> Response {
    let project_id: ProjectId = match parse_id(&project_id, "project") {
        Ok(id) => id,
        Err(rejection) => return rejection,
    };

    let query = ListSectionsQuery {
        project_id,
        user_id: user.id,
    };

    match handlers.sections.handle(query).await {
        Ok(sections) => (StatusCode::OK, Json(section_list(&sections))).into_response(),
        Err(e) => handle_document_error(e),
    }
}
