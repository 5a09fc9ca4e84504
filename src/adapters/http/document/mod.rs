//! HTTP adapter for outline suggestion, content generation and export.

mod dto;
mod handlers;
mod routes;

pub use dto::{attachment_disposition, ExportParams, GenerateRequest, TemplateRequest, TemplateResponse};
pub use handlers::DocumentHandlers;
pub use routes::document_routes;
