//! HTTP adapter for refinement endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{FeedbackRequest, RefinementRequest, RefinementResponse};
pub use handlers::RefinementHandlers;
pub use routes::refinement_routes;
