//! Identity token verification handler.

use axum::{extract::State, response::Json, routing::post, Router};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use common::AppResult;

use crate::clients::Claims;
use crate::extractors::ValidatedJson;
use crate::state::AppState;

/// Token verification request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct VerifyTokenRequest {
    /// ID token issued by the identity provider
    #[validate(length(min = 1, message = "id_token cannot be empty"))]
    pub id_token: String,
}

/// Create token routes
pub fn token_routes() -> Router<AppState> {
    Router::new().route("/", post(verify_token))
}

/// Verify an identity token and return its claims unchanged
#[utoipa::path(
    post,
    path = "/verify-token",
    tag = "Identity",
    request_body = VerifyTokenRequest,
    responses(
        (status = 200, description = "Decoded token claims as a JSON object"),
        (status = 400, description = "Missing token"),
        (status = 401, description = "Token invalid, expired or unverifiable")
    )
)]
pub async fn verify_token(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<VerifyTokenRequest>,
) -> AppResult<Json<Claims>> {
    let claims = state.identity.verify_id_token(&payload.id_token).await?;
    Ok(Json(claims))
}
