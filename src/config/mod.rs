//! Application configuration module
//!
//! Type-safe configuration loaded from environment variables using the
//! `config` and `dotenvy` crates. Variables use the `SMARTSCALE` prefix and
//! `__` between nesting levels.
//!
//! # Example
//!
//! ```no_run
//! use smartscale::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod auth;
mod database;
mod error;
mod server;
mod subscription;

pub use auth::{AuthConfig, AuthProvider};
pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use server::{Environment, ServerConfig};
pub use subscription::{StoreKind, SubscriptionConfig};

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    /// Required when `subscription.store = postgres`
    pub database: Option<DatabaseConfig>,

    #[serde(default)]
    pub auth: AuthConfig,

    #[serde(default)]
    pub subscription: SubscriptionConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with the `SMARTSCALE` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    ///
    /// - `SMARTSCALE__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `SMARTSCALE__SUBSCRIPTION__STORE=postgres` -> `subscription.store = postgres`
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("SMARTSCALE")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.auth.validate(&self.server.environment)?;
        self.subscription.validate(&self.server.environment)?;

        match (&self.database, self.subscription.uses_postgres()) {
            (Some(database), _) => database.validate()?,
            (None, true) => {
                return Err(ValidationError::MissingRequired("SMARTSCALE__DATABASE__URL"))
            }
            (None, false) => {}
        }
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
