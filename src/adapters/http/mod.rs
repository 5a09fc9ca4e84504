//! HTTP adapters - REST API implementations.
//!
//! Each area has its own `dto` / `handlers` / `routes` module; `router`
//! mounts them under `/api` behind the bearer token middleware.

pub mod document;
pub mod error;
pub mod middleware;
pub mod project;
pub mod refinement;
mod router;

pub use error::{handle_document_error, ErrorResponse};
pub use router::{build_router, AppDependencies, RouterOptions};
