//! Bearer token configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use super::error::ValidationError;
use super::server::Environment;

/// Shortest HS256 secret accepted in production.
pub const MIN_PRODUCTION_SECRET_LEN: usize = 32;

/// JWT (HS256) validation settings
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Shared signing secret of the token issuer
    pub jwt_secret: Secret<String>,

    /// Expected `iss` claim, if the issuer sets one
    pub jwt_issuer: Option<String>,

    /// Clock skew tolerated on `exp`
    #[serde(default = "default_leeway")]
    pub leeway_secs: u64,
}

impl AuthConfig {
    pub fn validate(&self, environment: Environment) -> Result<(), ValidationError> {
        let secret = self.jwt_secret.expose_secret();
        if secret.is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__JWT_SECRET"));
        }
        if environment == Environment::Production && secret.len() < MIN_PRODUCTION_SECRET_LEN {
            return Err(ValidationError::JwtSecretTooShort(MIN_PRODUCTION_SECRET_LEN));
        }
        Ok(())
    }
}

fn default_leeway() -> u64 {
    30
}
