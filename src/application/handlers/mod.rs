//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod export;
pub mod generation;
pub mod outline;
pub mod project;
pub mod refinement;

#[cfg(test)]
pub(crate) mod test_support;

pub use export::{ExportDocumentHandler, ExportDocumentQuery};
pub use generation::{
    FillEmptyContentCommand, FillEmptyContentHandler, GenerateContentCommand,
    GenerateContentHandler, MaterializeSectionsCommand, MaterializeSectionsHandler,
};
pub use outline::{SuggestOutlineHandler, SuggestOutlineQuery, SuggestOutlineResult};
pub use project::{
    CreateProjectCommand, CreateProjectHandler, CreateProjectResult, DeleteProjectCommand,
    DeleteProjectHandler, GetProjectHandler, GetProjectQuery, ListProjectsHandler,
    ListProjectsQuery, ListSectionsHandler, ListSectionsQuery, UpdateProjectCommand,
    UpdateProjectHandler, UpdateProjectResult,
};
pub use refinement::{
    ListRefinementsHandler, ListRefinementsQuery, RefineSectionCommand, RefineSectionHandler,
    RefineSectionResult, SubmitFeedbackCommand, SubmitFeedbackHandler,
};
