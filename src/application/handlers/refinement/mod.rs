//! Refinement command and query handlers.

mod list_refinements;
mod refine_section;
mod submit_feedback;

pub use list_refinements::{ListRefinementsHandler, ListRefinementsQuery};
pub use refine_section::{RefineSectionCommand, RefineSectionHandler, RefineSectionResult};
pub use submit_feedback::{SubmitFeedbackCommand, SubmitFeedbackHandler};
