//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::handlers::health_handler::{HealthResponse, StorageHealth};
use crate::handlers::person_handler::{CreatePersonRequest, DeleteResponse, UpdatePersonRequest};
use crate::handlers::token_handler::VerifyTokenRequest;
use domain::{PersonResponse, Role, RoleCounts};

/// API documentation struct.
#[derive(OpenApi)]
#[openapi(
    info(title = "ReliefConnect API", description = "People directory for donors, vendors and victims"),
    paths(
        crate::handlers::token_handler::verify_token,
        crate::handlers::person_handler::create_person,
        crate::handlers::person_handler::list_persons,
        crate::handlers::person_handler::count_persons,
        crate::handlers::person_handler::get_person,
        crate::handlers::person_handler::update_person,
        crate::handlers::person_handler::delete_person,
        crate::handlers::health_handler::health_check,
    ),
    components(
        schemas(
            VerifyTokenRequest,
            CreatePersonRequest,
            UpdatePersonRequest,
            DeleteResponse,
            PersonResponse,
            Role,
            RoleCounts,
            HealthResponse,
            StorageHealth,
        )
    ),
    tags(
        (name = "Identity", description = "Identity token verification"),
        (name = "Users", description = "Person directory endpoints"),
        (name = "Health", description = "Service health"),
    )
)]
pub struct ApiDoc;
