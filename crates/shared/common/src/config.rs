//! Shared configuration structures.

use std::env;

use serde::{Deserialize, Serialize};

/// Default database URL (SQLite file in the working directory)
pub const DEFAULT_DATABASE_URL: &str = "sqlite://reliefconnect.db?mode=rwc";

/// Google's public signing keys for Firebase ID tokens
pub const DEFAULT_FIREBASE_JWKS_URL: &str =
    "https://www.googleapis.com/service_accounts/v1/jwk/securetoken@system.gserviceaccount.com";

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Host address to bind
    pub host: String,
    /// Port to listen on
    pub port: u16,
}

impl ServerConfig {
    /// Load from `SERVER_HOST` / `SERVER_PORT`.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: env::var("SERVER_HOST").unwrap_or(defaults.host),
            port: env::var("SERVER_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
        }
    }

    /// Get the full server address.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

/// Database configuration.
#[derive(Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("url", &"[REDACTED]")
            .field("max_connections", &self.max_connections)
            .field("min_connections", &self.min_connections)
            .finish()
    }
}

impl DatabaseConfig {
    /// Load from `DATABASE_URL`, `DATABASE_MAX_CONNECTIONS`, `DATABASE_MIN_CONNECTIONS`.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            url: env::var("DATABASE_URL").unwrap_or(defaults.url),
            max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_connections),
            min_connections: env::var("DATABASE_MIN_CONNECTIONS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.min_connections),
        }
    }

    /// In-memory SQLite on a single connection, so every query sees the same database.
    pub fn sqlite_in_memory() -> Self {
        Self {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            min_connections: 1,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_DATABASE_URL.to_string(),
            max_connections: 10,
            min_connections: 1,
        }
    }
}

/// External identity provider (Firebase) configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IdentityConfig {
    /// Firebase project id; token verification is disabled when unset
    pub project_id: Option<String>,
    /// JWK set used to check token signatures
    pub jwks_url: String,
    /// Timeout for calls to the provider in milliseconds
    pub timeout_ms: u64,
}

impl IdentityConfig {
    /// Load from `FIREBASE_PROJECT_ID`, `FIREBASE_JWKS_URL`, `IDENTITY_TIMEOUT_MS`.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            project_id: env::var("FIREBASE_PROJECT_ID")
                .ok()
                .filter(|p| !p.trim().is_empty()),
            jwks_url: env::var("FIREBASE_JWKS_URL").unwrap_or(defaults.jwks_url),
            timeout_ms: env::var("IDENTITY_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.timeout_ms),
        }
    }
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            project_id: None,
            jwks_url: DEFAULT_FIREBASE_JWKS_URL.to_string(),
            timeout_ms: 5000,
        }
    }
}
