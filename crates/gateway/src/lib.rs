//! ReliefConnect HTTP gateway.
//!
//! Serves the person directory and the identity token check over HTTP,
//! embedding the person service directly.

pub mod clients;
pub mod config;
pub mod extractors;
pub mod handlers;
pub mod openapi;
pub mod routes;
pub mod shutdown;
pub mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{info, warn};

use person_service_lib::{open_storage, seed_sample_people, SeedOutcome};

use crate::clients::{DisabledIdentityProvider, FirebaseIdentityClient, IdentityProvider};
use crate::config::GatewayConfig;
use crate::routes::create_router;
use crate::shutdown::shutdown_signal;
use crate::state::AppState;

/// Build the identity provider once for the whole process.
pub fn identity_provider(
    config: &GatewayConfig,
) -> Result<Arc<dyn IdentityProvider>, Box<dyn std::error::Error>> {
    match config.identity.project_id.as_deref() {
        Some(project_id) => {
            info!(project_id, "Verifying identity tokens with Firebase");
            let client = FirebaseIdentityClient::new(project_id, &config.identity)?;
            Ok(Arc::new(client))
        }
        None => {
            warn!("FIREBASE_PROJECT_ID is not set; every token will be rejected");
            Ok(Arc::new(DisabledIdentityProvider))
        }
    }
}

/// Run the HTTP server until a shutdown signal arrives.
pub async fn run_server(config: GatewayConfig) -> Result<(), Box<dyn std::error::Error>> {
    let storage = open_storage(&config.service).await?;
    let identity = identity_provider(&config)?;

    let state = AppState::new(&storage, identity, config.strict_roles);
    let app = create_router(state);

    let addr: SocketAddr = config.server.addr().parse()?;
    info!("ReliefConnect listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // The router and its state are gone by now; release the pool
    storage.close().await?;
    info!("Shutdown complete");

    Ok(())
}

/// Insert the sample people into an empty directory.
pub async fn seed(config: GatewayConfig) -> Result<SeedOutcome, Box<dyn std::error::Error>> {
    let storage = open_storage(&config.service).await?;
    let outcome = seed_sample_people(storage.repository.as_ref()).await?;
    storage.close().await?;
    Ok(outcome)
}

/// Create the schema and exit.
pub async fn init_db(config: GatewayConfig) -> Result<(), Box<dyn std::error::Error>> {
    person_service_lib::init_db(&config.service).await?;
    Ok(())
}
