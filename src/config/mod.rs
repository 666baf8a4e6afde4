//! Application configuration module
//!
//! Configuration is read from environment variables with the `AUDIT_TRAINER`
//! prefix; nested values are separated by double underscores. A `.env` file is
//! honoured in development.
//!
//! # Example
//!
//! ```no_run
//! use audit_trainer::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod ai;
mod auth;
mod database;
mod error;
mod server;
mod training;

pub use ai::AiConfig;
pub use auth::{AuthConfig, MIN_JWT_SECRET_LEN};
pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use server::{Environment, ServerConfig};
pub use training::TrainingConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Only `auth` is mandatory; every other section has working defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// Database configuration; sessions stay in memory without a URL
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Bearer token validation
    pub auth: AuthConfig,

    /// Generative service configuration
    #[serde(default)]
    pub ai: AiConfig,

    /// Session limits and token budgets
    #[serde(default)]
    pub training: TrainingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Environment Variable Format
    ///
    /// - `AUDIT_TRAINER__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `AUDIT_TRAINER__DATABASE__URL=...` -> `database.url = ...`
    /// - `AUDIT_TRAINER__TRAINING__MAX_AUDITOR_MESSAGES=50`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Required environment variables are missing
    /// - Values cannot be parsed into expected types
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("AUDIT_TRAINER")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for the first section that fails.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.database.validate()?;
        self.auth.validate()?;
        self.ai.validate(&self.server.environment)?;
        self.training.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
