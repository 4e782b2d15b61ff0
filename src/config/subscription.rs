//! Subscription storage configuration

use serde::Deserialize;

use super::error::ValidationError;
use super::server::Environment;

/// Where subscription records live.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    Postgres,
    /// Process-local map; records are lost on restart.
    #[default]
    Memory,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubscriptionConfig {
    #[serde(default)]
    pub store: StoreKind,

    /// Retry on an in-memory store when Postgres is unreachable.
    #[serde(default)]
    pub fallback_to_memory: bool,
}

impl SubscriptionConfig {
    pub fn uses_postgres(&self) -> bool {
        self.store == StoreKind::Postgres
    }

    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if *environment == Environment::Production && self.store == StoreKind::Memory {
            return Err(ValidationError::MemoryStoreInProduction);
        }
        Ok(())
    }
}
