//! Project command and query handlers.

mod create_project;
mod delete_project;
mod get_project;
mod list_projects;
mod list_sections;
mod update_project;

pub use create_project::{CreateProjectCommand, CreateProjectHandler, CreateProjectResult};
pub use delete_project::{DeleteProjectCommand, DeleteProjectHandler};
pub use get_project::{GetProjectHandler, GetProjectQuery};
pub use list_projects::{ListProjectsHandler, ListProjectsQuery};
pub use list_sections::{ListSectionsHandler, ListSectionsQuery};
pub use update_project::{UpdateProjectCommand, UpdateProjectHandler, UpdateProjectResult};
