//! Person service configuration.

use std::env;
use std::str::FromStr;

use common::DatabaseConfig;

/// Where person records live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageBackend {
    /// Relational store through SeaORM
    #[default]
    Database,
    /// Process memory; lost on restart
    Memory,
}

impl FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "database" | "db" => Ok(StorageBackend::Database),
            "memory" | "in-memory" => Ok(StorageBackend::Memory),
            other => Err(format!(
                "unknown storage backend '{}', expected 'database' or 'memory'",
                other
            )),
        }
    }
}

/// Person service configuration.
#[derive(Debug, Clone, Default)]
pub struct PersonServiceConfig {
    /// Storage backend selection
    pub storage: StorageBackend,
    /// Database settings, used by the database backend
    pub database: DatabaseConfig,
}

impl PersonServiceConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let storage = match env::var("STORAGE_BACKEND") {
            Ok(value) => value.parse().unwrap_or_else(|e| {
                tracing::warn!("{}; falling back to database", e);
                StorageBackend::Database
            }),
            Err(_) => StorageBackend::Database,
        };

        Self {
            storage,
            database: DatabaseConfig::from_env(),
        }
    }
}
