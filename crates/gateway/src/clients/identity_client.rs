//! Client for the external identity provider (Firebase Authentication).
//!
//! Verification is a pass-through: a raw ID token goes in, the provider's
//! decoded claims come out unchanged. Nothing is cached between calls.

use std::time::Duration;

use async_trait::async_trait;
use jsonwebtoken::{decode, decode_header, jwk::JwkSet, Algorithm, DecodingKey, Validation};
use reqwest::Client;
use tracing::debug;

use common::{AppError, AppResult, IdentityConfig};

/// Decoded token claims, kept opaque.
pub type Claims = serde_json::Map<String, serde_json::Value>;

/// Issuer prefix for Firebase ID tokens; the project id follows.
const FIREBASE_ISSUER_PREFIX: &str = "https://securetoken.google.com/";

/// Verifies identity tokens against an external provider.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Verify an ID token and return its claims.
    async fn verify_id_token(&self, id_token: &str) -> AppResult<Claims>;
}

/// Firebase ID token verifier.
///
/// Built once at startup and shared through application state.
pub struct FirebaseIdentityClient {
    http: Client,
    project_id: String,
    jwks_url: String,
}

impl FirebaseIdentityClient {
    /// Create the client for `project_id`.
    pub fn new(project_id: impl Into<String>, config: &IdentityConfig) -> AppResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| AppError::internal(format!("identity client: {}", e)))?;

        Ok(Self {
            http,
            project_id: project_id.into(),
            jwks_url: config.jwks_url.clone(),
        })
    }

    /// Fetch the provider's current signing keys.
    async fn signing_keys(&self) -> AppResult<JwkSet> {
        debug!("Fetching signing keys from {}", self.jwks_url);

        let response = self
            .http
            .get(&self.jwks_url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| AppError::token(format!("identity provider unreachable: {}", e)))?;

        response
            .json::<JwkSet>()
            .await
            .map_err(|e| AppError::token(format!("identity provider sent invalid keys: {}", e)))
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_audience(&[&self.project_id]);
        validation.set_issuer(&[format!("{}{}", FIREBASE_ISSUER_PREFIX, self.project_id)]);
        validation.set_required_spec_claims(&["exp", "iat", "aud", "iss", "sub"]);
        validation
    }
}

#[async_trait]
impl IdentityProvider for FirebaseIdentityClient {
    async fn verify_id_token(&self, id_token: &str) -> AppResult<Claims> {
        if id_token.trim().is_empty() {
            return Err(AppError::token("id_token must be provided"));
        }

        let header = decode_header(id_token)?;
        let kid = header
            .kid
            .ok_or_else(|| AppError::token("token header has no key id"))?;

        let keys = self.signing_keys().await?;
        let jwk = keys
            .find(&kid)
            .ok_or_else(|| AppError::token("token was signed with an unknown key"))?;
        let key = DecodingKey::from_jwk(jwk)?;

        let data = decode::<Claims>(id_token, &key, &self.validation())?;
        Ok(data.claims)
    }
}

/// Stand-in used when no Firebase project is configured; rejects every token.
pub struct DisabledIdentityProvider;

#[async_trait]
impl IdentityProvider for DisabledIdentityProvider {
    async fn verify_id_token(&self, _id_token: &str) -> AppResult<Claims> {
        Err(AppError::token("identity provider is not configured"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> FirebaseIdentityClient {
        let config = IdentityConfig {
            project_id: Some("relief-test".to_string()),
            // Nothing listens here; reaching the network is itself a failure
            jwks_url: "http://127.0.0.1:9/keys".to_string(),
            timeout_ms: 200,
        };
        FirebaseIdentityClient::new("relief-test", &config).unwrap()
    }

    #[tokio::test]
    async fn empty_token_is_rejected() {
        let result = client().verify_id_token("  ").await;
        assert!(matches!(result, Err(AppError::TokenVerification(_))));
    }

    #[tokio::test]
    async fn malformed_token_is_rejected_without_network() {
        let result = client().verify_id_token("not-a-jwt").await;
        assert!(matches!(result, Err(AppError::Jwt(_))));
    }

    #[tokio::test]
    async fn unreachable_provider_is_a_token_failure() {
        // Header: {"alg":"RS256","kid":"k1","typ":"JWT"}
        let token = "eyJhbGciOiJSUzI1NiIsImtpZCI6ImsxIiwidHlwIjoiSldUIn0.e30.c2ln";
        let err = client().verify_id_token(token).await.unwrap_err();
        assert_eq!(err.status(), axum::http::StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn disabled_provider_rejects_everything() {
        let result = DisabledIdentityProvider.verify_id_token("anything").await;
        assert!(matches!(result, Err(AppError::TokenVerification(_))));
    }

    #[test]
    fn validation_pins_project() {
        let validation = client().validation();
        assert!(validation
            .iss
            .as_ref()
            .unwrap()
            .contains("https://securetoken.google.com/relief-test"));
        assert!(validation.aud.as_ref().unwrap().contains("relief-test"));
    }
}
