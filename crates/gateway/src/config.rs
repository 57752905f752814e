//! Gateway configuration.

use std::env;

use common::{IdentityConfig, ServerConfig};
use person_service_lib::config::PersonServiceConfig;

/// Gateway configuration.
#[derive(Debug, Clone, Default)]
pub struct GatewayConfig {
    /// Listen address
    pub server: ServerConfig,
    /// Firebase token verification
    pub identity: IdentityConfig,
    /// Person storage selection and database settings
    pub service: PersonServiceConfig,
    /// Reject unknown roles on create instead of coercing them to donor
    pub strict_roles: bool,
}

impl GatewayConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            server: ServerConfig::from_env(),
            identity: IdentityConfig::from_env(),
            service: PersonServiceConfig::from_env(),
            strict_roles: env::var("STRICT_ROLES")
                .ok()
                .map(|v| parse_flag(&v))
                .unwrap_or(false),
        }
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_values() {
        assert!(parse_flag("true"));
        assert!(parse_flag(" ON "));
        assert!(parse_flag("1"));
        assert!(!parse_flag("false"));
        assert!(!parse_flag(""));
    }
}
