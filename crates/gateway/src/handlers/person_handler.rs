//! Person directory handlers.

use axum::{
    extract::{Path, State},
    response::Json,
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use common::{AppError, AppResult};
use domain::{Person, PersonResponse, Role, RoleCounts, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};

use crate::extractors::{ValidatedJson, ValidatedQuery};
use crate::state::AppState;

/// Person registration request with validation
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreatePersonRequest {
    /// Identity-provider user id
    #[validate(length(min = 1, message = "uid cannot be empty"))]
    #[schema(example = "u1")]
    pub uid: String,
    /// Display name
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    #[schema(example = "Alice")]
    pub name: String,
    /// Email address
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "a@x.com")]
    pub email: String,
    /// donor, vendor or victim; defaults to donor
    #[schema(example = "donor")]
    pub role: Option<String>,
}

/// Partial update; the role cannot be changed
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdatePersonRequest {
    /// New display name
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    #[schema(example = "Alice B")]
    pub name: Option<String>,
    /// New email address
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "alice@new.org")]
    pub email: Option<String>,
}

/// Listing filter. `role` cannot be combined with `skip`/`limit`.
#[derive(Debug, Default, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListPersonsQuery {
    /// Only people with this role
    pub role: Option<String>,
    /// Rows to skip
    pub skip: Option<u64>,
    /// Page size, at most 100
    #[validate(range(min = 1, message = "limit must be at least 1"))]
    pub limit: Option<u64>,
}

/// Delete confirmation
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeleteResponse {
    #[schema(example = "deleted")]
    pub detail: String,
}

/// Create person routes.
///
/// Everything below `/users/` is a uid, so aggregate views live elsewhere.
pub fn person_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_persons).post(create_person))
        .route(
            "/:uid",
            get(get_person).put(update_person).delete(delete_person),
        )
}

/// Resolve the requested role for a new person.
///
/// Absent means donor. Unknown values are coerced to donor unless `strict`.
fn resolve_role(raw: Option<&str>, strict: bool) -> AppResult<Role> {
    let Some(raw) = raw else {
        return Ok(Role::Donor);
    };

    match raw.parse::<Role>() {
        Ok(role) => Ok(role),
        Err(e) if strict => Err(e.into()),
        Err(_) => {
            tracing::warn!(role = %raw, "Unknown role, registering as donor");
            Ok(Role::Donor)
        }
    }
}

/// Register a person
#[utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    request_body = CreatePersonRequest,
    responses(
        (status = 200, description = "Person registered", body = PersonResponse),
        (status = 400, description = "Validation error"),
        (status = 409, description = "uid or email already registered")
    )
)]
pub async fn create_person(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreatePersonRequest>,
) -> AppResult<Json<PersonResponse>> {
    let role = resolve_role(payload.role.as_deref(), state.strict_roles)?;
    let person = Person::new(payload.uid, payload.name, payload.email, role);

    let created = state.person_service.create_person(person).await?;
    Ok(Json(created))
}

/// List people
#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    params(ListPersonsQuery),
    responses(
        (status = 200, description = "People in storage order", body = Vec<PersonResponse>),
        (status = 400, description = "Invalid query")
    )
)]
pub async fn list_persons(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<ListPersonsQuery>,
) -> AppResult<Json<Vec<PersonResponse>>> {
    let paginated = query.skip.is_some() || query.limit.is_some();

    let people = match query.role.as_deref() {
        Some(_) if paginated => {
            return Err(AppError::bad_request(
                "role cannot be combined with skip or limit",
            ))
        }
        Some(raw) => {
            let role = raw.parse::<Role>()?;
            state.person_service.list_persons(Some(role)).await?
        }
        None if paginated => {
            let skip = query.skip.unwrap_or(0);
            let limit = query
                .limit
                .unwrap_or(DEFAULT_PAGE_LIMIT)
                .min(MAX_PAGE_LIMIT);
            state
                .person_service
                .list_persons_paginated(skip, limit)
                .await?
        }
        None => state.person_service.list_persons(None).await?,
    };

    Ok(Json(people))
}

/// Number of people per role, served at `/counts`
#[utoipa::path(
    get,
    path = "/counts",
    tag = "Users",
    responses(
        (status = 200, description = "Counts for every role, zeros included", body = RoleCounts)
    )
)]
pub async fn count_persons(State(state): State<AppState>) -> AppResult<Json<RoleCounts>> {
    let counts = state.person_service.count_by_role().await?;
    Ok(Json(counts))
}

/// Get person by uid
#[utoipa::path(
    get,
    path = "/users/{uid}",
    tag = "Users",
    params(
        ("uid" = String, Path, description = "Person uid")
    ),
    responses(
        (status = 200, description = "Person record", body = PersonResponse),
        (status = 404, description = "Person not found")
    )
)]
pub async fn get_person(
    State(state): State<AppState>,
    Path(uid): Path<String>,
) -> AppResult<Json<PersonResponse>> {
    let person = state.person_service.get_person(&uid).await?;
    Ok(Json(person))
}

/// Update name and/or email
#[utoipa::path(
    put,
    path = "/users/{uid}",
    tag = "Users",
    params(
        ("uid" = String, Path, description = "Person uid")
    ),
    request_body = UpdatePersonRequest,
    responses(
        (status = 200, description = "Person updated", body = PersonResponse),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Person not found"),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn update_person(
    State(state): State<AppState>,
    Path(uid): Path<String>,
    ValidatedJson(payload): ValidatedJson<UpdatePersonRequest>,
) -> AppResult<Json<PersonResponse>> {
    let person = state
        .person_service
        .update_person(&uid, payload.name, payload.email)
        .await?;
    Ok(Json(person))
}

/// Delete person
#[utoipa::path(
    delete,
    path = "/users/{uid}",
    tag = "Users",
    params(
        ("uid" = String, Path, description = "Person uid")
    ),
    responses(
        (status = 200, description = "Person deleted", body = DeleteResponse),
        (status = 404, description = "Person not found")
    )
)]
pub async fn delete_person(
    State(state): State<AppState>,
    Path(uid): Path<String>,
) -> AppResult<Json<DeleteResponse>> {
    if !state.person_service.delete_person(&uid).await? {
        return Err(AppError::NotFound);
    }

    Ok(Json(DeleteResponse {
        detail: "deleted".to_string(),
    }))
}
