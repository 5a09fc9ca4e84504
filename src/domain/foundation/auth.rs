//! Identity of the caller behind a validated bearer token.

use super::UserId;
use thiserror::Error;

/// Caller identity; `id` is the token subject.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub id: UserId,
    pub email: Option<String>,
}

impl AuthenticatedUser {
    pub fn new(id: UserId, email: Option<String>) -> Self {
        Self { id, email }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// Malformed token, bad signature, wrong issuer or missing subject.
    #[error("Could not validate credentials")]
    InvalidToken,

    #[error("Token expired")]
    TokenExpired,

    /// The validator itself can't do its job (e.g. no signing secret).
    #[error("Auth service unavailable: {0}")]
    ServiceUnavailable(String),
}
