//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Ownership checks live in [`AccessGate`]; prompt construction lives in
//! [`ContentGenerator`].

mod access_gate;
pub mod content_generator;
pub mod handlers;

pub use access_gate::AccessGate;
pub use content_generator::{parse_outline, ContentGenerator, SectionPrompt};
pub use handlers::*;
