//! HS256 JWT session validator.
//!
//! Tokens are signed by the identity service with a shared secret and carry
//! the user id in `sub`. `exp` is mandatory; `iss` is checked when an
//! issuer is configured.

use async_trait::async_trait;
use jsonwebtoken::{decode, errors::ErrorKind, Algorithm, DecodingKey, Validation};
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use crate::domain::foundation::{AuthError, AuthenticatedUser, UserId};
use crate::ports::SessionValidator;

/// Configuration for the JWT validator.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    secret: Secret<String>,
    /// Expected `iss` claim; unchecked when `None`.
    pub issuer: Option<String>,
    /// Clock skew tolerance in seconds.
    pub leeway_secs: u64,
}

impl JwtConfig {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: Secret::new(secret.into()),
            issuer: None,
            leeway_secs: 30,
        }
    }

    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = Some(issuer.into());
        self
    }

    pub fn with_leeway(mut self, leeway_secs: u64) -> Self {
        self.leeway_secs = leeway_secs;
        self
    }
}

#[derive(Debug, Deserialize)]
struct Claims {
    sub: String,
    #[serde(default)]
    email: Option<String>,
}

/// Validates HS256-signed bearer tokens.
pub struct JwtSessionValidator {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtSessionValidator {
    pub fn new(config: JwtConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = config.leeway_secs;
        validation.validate_exp = true;

        match &config.issuer {
            Some(issuer) => {
                validation.set_issuer(&[issuer]);
                validation.set_required_spec_claims(&["exp", "sub", "iss"]);
            }
            None => validation.set_required_spec_claims(&["exp", "sub"]),
        }

        Self {
            decoding_key: DecodingKey::from_secret(config.secret.expose_secret().as_bytes()),
            validation,
        }
    }
}

#[async_trait]
impl SessionValidator for JwtSessionValidator {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => {
                    tracing::debug!("Token expired");
                    AuthError::TokenExpired
                }
                ErrorKind::InvalidIssuer => {
                    tracing::warn!("Invalid issuer in token");
                    AuthError::InvalidToken
                }
                _ => {
                    tracing::warn!("Token validation failed: {}", e);
                    AuthError::InvalidToken
                }
            }
        })?;

        let user_id = UserId::new(data.claims.sub.as_str()).map_err(|_| {
            tracing::warn!("Token carries an empty subject");
            AuthError::InvalidToken
        })?;

        Ok(AuthenticatedUser::new(user_id, data.claims.email))
    }
}

impl std::fmt::Debug for JwtSessionValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtSessionValidator")
            .field("issuer", &self.validation.iss)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde::Serialize;

    const SECRET: &str = "test-secret";

    #[derive(Serialize)]
    struct TestClaims<'a> {
        sub: &'a str,
        exp: i64,
        #[serde(skip_serializing_if = "Option::is_none")]
        iss: Option<&'a str>,
        #[serde(skip_serializing_if = "Option::is_none")]
        email: Option<&'a str>,
    }

    fn token(claims: &TestClaims<'_>, secret: &str) -> String {
        encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn in_one_hour() -> i64 {
        chrono::Utc::now().timestamp() + 3600
    }

    #[tokio::test]
    async fn accepts_valid_token() {
        let validator = JwtSessionValidator::new(JwtConfig::new(SECRET));
        let raw = token(
            &TestClaims {
                sub: "42",
                exp: in_one_hour(),
                iss: None,
                email: Some("a@example.com"),
            },
            SECRET,
        );

        let user = validator.validate(&raw).await.unwrap();

        assert_eq!(user.id.as_str(), "42");
        assert_eq!(user.email.as_deref(), Some("a@example.com"));
    }

    #[tokio::test]
    async fn rejects_wrong_signature() {
        let validator = JwtSessionValidator::new(JwtConfig::new(SECRET));
        let raw = token(
            &TestClaims {
                sub: "42",
                exp: in_one_hour(),
                iss: None,
                email: None,
            },
            "other-secret",
        );

        assert_eq!(validator.validate(&raw).await.unwrap_err(), AuthError::InvalidToken);
    }

    #[tokio::test]
    async fn rejects_expired_token() {
        let validator = JwtSessionValidator::new(JwtConfig::new(SECRET).with_leeway(0));
        let raw = token(
            &TestClaims {
                sub: "42",
                exp: chrono::Utc::now().timestamp() - 600,
                iss: None,
                email: None,
            },
            SECRET,
        );

        assert_eq!(validator.validate(&raw).await.unwrap_err(), AuthError::TokenExpired);
    }

    #[tokio::test]
    async fn checks_issuer_when_configured() {
        let validator =
            JwtSessionValidator::new(JwtConfig::new(SECRET).with_issuer("https://id.example.com"));

        let wrong = token(
            &TestClaims {
                sub: "42",
                exp: in_one_hour(),
                iss: Some("https://evil.example.com"),
                email: None,
            },
            SECRET,
        );
        let right = token(
            &TestClaims {
                sub: "42",
                exp: in_one_hour(),
                iss: Some("https://id.example.com"),
                email: None,
            },
            SECRET,
        );

        assert!(validator.validate(&wrong).await.is_err());
        assert!(validator.validate(&right).await.is_ok());
    }

    #[tokio::test]
    async fn rejects_empty_subject() {
        let validator = JwtSessionValidator::new(JwtConfig::new(SECRET));
        let raw = token(
            &TestClaims {
                sub: "",
                exp: in_one_hour(),
                iss: None,
                email: None,
            },
            SECRET,
        );

        assert_eq!(validator.validate(&raw).await.unwrap_err(), AuthError::InvalidToken);
    }

    #[tokio::test]
    async fn rejects_garbage() {
        let validator = JwtSessionValidator::new(JwtConfig::new(SECRET));
        assert!(validator.validate("not-a-jwt").await.is_err());
    }
}
