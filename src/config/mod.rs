//! Application configuration module
//!
//! Configuration is read from environment variables (and a `.env` file in
//! development) with the `DOCFORGE` prefix; nested values are separated by
//! a double underscore.
//!
//! | Variable | Field |
//! |---|---|
//! | `DOCFORGE__SERVER__PORT` | `server.port` |
//! | `DOCFORGE__DATABASE__URL` | `database.url` |
//! | `DOCFORGE__AUTH__JWT_SECRET` | `auth.jwt_secret` |
//! | `DOCFORGE__AI__OPENAI_API_KEY` | `ai.openai_api_key` |
//!
//! # Example
//!
//! ```no_run
//! use docforge::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod ai;
mod auth;
mod database;
mod error;
mod server;

pub use ai::AiConfig;
pub use auth::{AuthConfig, MIN_PRODUCTION_SECRET_LEN};
pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    pub database: DatabaseConfig,

    pub auth: AuthConfig,

    pub ai: AiConfig,
}

impl AppConfig {
    /// Load configuration from the environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a required variable is missing or a value
    /// can't be parsed into its field type.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("DOCFORGE")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Semantic validation of every section.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.database.validate()?;
        self.auth.validate(self.server.environment)?;
        self.ai.validate()?;
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::env;
    use std::sync::Mutex;

    // env vars are process-global
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: &[&str] = &[
        "DOCFORGE__DATABASE__URL",
        "DOCFORGE__AUTH__JWT_SECRET",
        "DOCFORGE__AI__OPENAI_API_KEY",
        "DOCFORGE__AI__MODEL",
        "DOCFORGE__SERVER__PORT",
        "DOCFORGE__SERVER__ENVIRONMENT",
    ];

    fn set_minimal_env() {
        env::set_var("DOCFORGE__DATABASE__URL", "postgresql://test@localhost/docforge");
        env::set_var("DOCFORGE__AUTH__JWT_SECRET", "dev-secret");
        env::set_var("DOCFORGE__AI__OPENAI_API_KEY", "sk-test");
    }

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn loads_minimal_environment_with_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.database.url, "postgresql://test@localhost/docforge");
        assert_eq!(config.auth.jwt_secret.expose_secret(), "dev-secret");
        assert_eq!(config.ai.model, "gpt-4o-mini");
        assert_eq!(config.server.port, 8000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn nested_overrides_are_applied() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("DOCFORGE__SERVER__PORT", "3000");
        env::set_var("DOCFORGE__AI__MODEL", "gpt-4o");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.ai.model, "gpt-4o");
    }

    #[test]
    fn production_requires_long_jwt_secret() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("DOCFORGE__SERVER__ENVIRONMENT", "production");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.is_production());
        assert_eq!(
            config.validate(),
            Err(ValidationError::JwtSecretTooShort(MIN_PRODUCTION_SECRET_LEN))
        );
    }

    #[test]
    fn missing_database_url_fails_to_load() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var("DOCFORGE__AUTH__JWT_SECRET", "dev-secret");
        env::set_var("DOCFORGE__AI__OPENAI_API_KEY", "sk-test");
        let result = AppConfig::load();
        clear_env();

        assert!(matches!(result, Err(ConfigError::LoadError(_))));
    }
}
