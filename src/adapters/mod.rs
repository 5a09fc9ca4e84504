//! Adapters - Implementations of port interfaces.
//!
//! - `ai` - OpenAI chat completions and a scripted mock
//! - `auth` - JWT bearer token validation
//! - `document` - DOCX / PPTX exporters
//! - `http` - axum REST API
//! - `memory` - in-process content store
//! - `postgres` - sqlx content store

pub mod ai;
pub mod auth;
pub mod document;
pub mod http;
pub mod memory;
pub mod postgres;
