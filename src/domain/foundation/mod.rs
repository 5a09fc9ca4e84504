//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers, timestamps, authentication types and error types
//! that form the vocabulary of the DocForge domain.

mod auth;
mod errors;
mod ids;
mod ownership;
mod timestamp;

pub use auth::{AuthError, AuthenticatedUser};
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{ProjectId, RefinementId, SectionId, UserId};
pub use ownership::OwnedByUser;
pub use timestamp::Timestamp;
