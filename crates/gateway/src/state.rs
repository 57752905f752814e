//! Application state for dependency injection.

use std::sync::Arc;

use person_service_lib::infra::Database;
use person_service_lib::{PersonService, Storage};

use crate::clients::IdentityProvider;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub person_service: Arc<dyn PersonService>,
    pub identity: Arc<dyn IdentityProvider>,
    /// Pool behind the person store, absent for the in-memory backend
    pub database: Option<Database>,
    /// Reject unknown roles instead of registering them as donors
    pub strict_roles: bool,
}

impl AppState {
    /// Create new app state over opened storage.
    pub fn new(storage: &Storage, identity: Arc<dyn IdentityProvider>, strict_roles: bool) -> Self {
        Self {
            person_service: storage.service(),
            identity,
            database: storage.database.clone(),
            strict_roles,
        }
    }
}
