//! Application router: wires ports into handlers and mounts every route.

use std::sync::Arc;
use std::time::Duration;

use axum::{http::HeaderValue, middleware, routing::get, Json, Router};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::adapters::document::{DocxExporter, PptxExporter};
use crate::application::handlers::{
    CreateProjectHandler, DeleteProjectHandler, ExportDocumentHandler, FillEmptyContentHandler,
    GenerateContentHandler, GetProjectHandler, ListProjectsHandler, ListRefinementsHandler,
    ListSectionsHandler, MaterializeSectionsHandler, RefineSectionHandler, SubmitFeedbackHandler,
    SuggestOutlineHandler, UpdateProjectHandler,
};
use crate::application::{AccessGate, ContentGenerator};
use crate::ports::{
    AIProvider, DocumentExporter, ProjectRepository, RefinementRepository, SectionRepository,
    SessionValidator,
};

use super::document::{document_routes, DocumentHandlers};
use super::middleware::auth_middleware;
use super::project::{project_routes, ProjectHandlers};
use super::refinement::{refinement_routes, RefinementHandlers};

/// Everything the HTTP surface needs from the outside world.
#[derive(Clone)]
pub struct AppDependencies {
    pub projects: Arc<dyn ProjectRepository>,
    pub sections: Arc<dyn SectionRepository>,
    pub refinements: Arc<dyn RefinementRepository>,
    pub ai: Arc<dyn AIProvider>,
    pub validator: Arc<dyn SessionValidator>,
    pub exporters: Vec<Arc<dyn DocumentExporter>>,
}

impl AppDependencies {
    /// Dependencies with the DOCX and PPTX exporters registered.
    pub fn new(
        projects: Arc<dyn ProjectRepository>,
        sections: Arc<dyn SectionRepository>,
        refinements: Arc<dyn RefinementRepository>,
        ai: Arc<dyn AIProvider>,
        validator: Arc<dyn SessionValidator>,
    ) -> Self {
        Self {
            projects,
            sections,
            refinements,
            ai,
            validator,
            exporters: vec![Arc::new(DocxExporter::new()), Arc::new(PptxExporter::new())],
        }
    }
}

/// Cross-cutting HTTP settings.
#[derive(Debug, Clone)]
pub struct RouterOptions {
    pub request_timeout: Duration,
    /// Empty allows any origin.
    pub cors_origins: Vec<String>,
}

impl Default for RouterOptions {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(300),
            cors_origins: Vec::new(),
        }
    }
}

/// Builds the full `/api` router.
pub fn build_router(deps: AppDependencies, options: &RouterOptions) -> Router {
    let gate = AccessGate::new(
        deps.projects.clone(),
        deps.sections.clone(),
        deps.refinements.clone(),
    );
    let generator = ContentGenerator::new(deps.ai.clone());

    let projects = ProjectHandlers {
        create: Arc::new(CreateProjectHandler::new(
            deps.projects.clone(),
            deps.sections.clone(),
        )),
        get: Arc::new(GetProjectHandler::new(gate.clone())),
        list: Arc::new(ListProjectsHandler::new(deps.projects.clone())),
        update: Arc::new(UpdateProjectHandler::new(gate.clone(), deps.projects.clone())),
        delete: Arc::new(DeleteProjectHandler::new(gate.clone(), deps.projects.clone())),
        sections: Arc::new(ListSectionsHandler::new(gate.clone(), deps.sections.clone())),
    };

    let documents = DocumentHandlers {
        suggest: Arc::new(SuggestOutlineHandler::new(generator.clone())),
        generate: Arc::new(GenerateContentHandler::new(
            gate.clone(),
            MaterializeSectionsHandler::new(gate.clone(), deps.sections.clone()),
            FillEmptyContentHandler::new(gate.clone(), deps.sections.clone(), generator.clone()),
        )),
        export: Arc::new(ExportDocumentHandler::new(
            gate.clone(),
            deps.sections.clone(),
            deps.exporters.clone(),
        )),
    };

    let refinements = RefinementHandlers {
        refine: Arc::new(RefineSectionHandler::new(
            gate.clone(),
            deps.refinements.clone(),
            generator,
        )),
        feedback: Arc::new(SubmitFeedbackHandler::new(
            gate.clone(),
            deps.refinements.clone(),
        )),
        list: Arc::new(ListRefinementsHandler::new(gate, deps.refinements.clone())),
    };

    let protected = Router::new()
        .nest("/projects", project_routes(projects))
        .nest("/documents", document_routes(documents))
        .nest("/refinement", refinement_routes(refinements))
        .layer(middleware::from_fn_with_state(
            deps.validator.clone(),
            auth_middleware,
        ));

    Router::new()
        .nest(
            "/api",
            Router::new().route("/health", get(health)).merge(protected),
        )
        .layer(TimeoutLayer::new(options.request_timeout))
        .layer(cors_layer(&options.cors_origins))
        .layer(TraceLayer::new_for_http())
}

/// GET /api/health
async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "healthy" }))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods(Any)
        .allow_headers(Any)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockAIProvider;
    use crate::adapters::auth::MockSessionValidator;
    use crate::adapters::memory::InMemoryContentStore;
    use axum::{body::Body, http::Request, http::StatusCode};
    use tower::ServiceExt;

    fn app() -> Router {
        let store = InMemoryContentStore::new();
        let deps = AppDependencies::new(
            Arc::new(store.clone()),
            Arc::new(store.clone()),
            Arc::new(store),
            Arc::new(MockAIProvider::new()),
            Arc::new(MockSessionValidator::new()),
        );
        build_router(deps, &RouterOptions::default())
    }

    #[tokio::test]
    async fn health_needs_no_token() {
        let response = app()
            .oneshot(Request::get("/api/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn api_routes_need_a_token() {
        let response = app()
            .oneshot(Request::get("/api/projects").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn invalid_cors_origins_are_skipped() {
        // only checks construction doesn't panic
        let _ = cors_layer(&["http://localhost:5173".to_string(), "bad\norigin".to_string()]);
    }
}
