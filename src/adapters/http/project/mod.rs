//! HTTP adapter for project endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    section_list, CreateProjectRequest, ProjectResponse, SectionResponse, UpdateProjectRequest,
};
pub use handlers::ProjectHandlers;
pub use routes::project_routes;
