//! Person Service Library
//!
//! Persistence and business rules for the ReliefConnect people directory.
//! The HTTP gateway embeds this crate directly.

pub mod config;
pub mod infra;
pub mod repository;
pub mod service;

use std::sync::Arc;

use sea_orm::DbErr;
use tracing::info;

use crate::config::{PersonServiceConfig, StorageBackend};
use crate::infra::Database;
use crate::repository::{InMemoryPersonStore, PersonRepository, PersonStore};

pub use crate::infra::{seed_sample_people, SeedOutcome};
pub use crate::service::{PersonManager, PersonService};

/// Repository chosen from configuration, plus the pool backing it if any.
#[derive(Clone)]
pub struct Storage {
    pub repository: Arc<dyn PersonRepository>,
    pub database: Option<Database>,
}

impl Storage {
    /// Storage held in process memory.
    pub fn in_memory() -> Self {
        Self {
            repository: Arc::new(InMemoryPersonStore::new()),
            database: None,
        }
    }

    /// Build the service layer over this storage.
    pub fn service(&self) -> Arc<dyn PersonService> {
        Arc::new(PersonManager::new(self.repository.clone()))
    }

    /// Release the connection pool, if there is one.
    pub async fn close(self) -> Result<(), DbErr> {
        match self.database {
            Some(db) => db.close().await,
            None => Ok(()),
        }
    }
}

/// Open the configured storage backend, creating the schema when needed.
pub async fn open_storage(config: &PersonServiceConfig) -> Result<Storage, DbErr> {
    match config.storage {
        StorageBackend::Memory => {
            info!("Using in-memory person storage");
            Ok(Storage::in_memory())
        }
        StorageBackend::Database => {
            let db = Database::connect(&config.database).await?;
            Ok(Storage {
                repository: Arc::new(PersonStore::new(db.get_connection())),
                database: Some(db),
            })
        }
    }
}

/// Create the schema without serving (for CLI commands).
pub async fn init_db(config: &PersonServiceConfig) -> Result<(), DbErr> {
    let db = Database::connect_without_schema(&config.database).await?;
    db.ensure_schema().await?;
    info!("Schema ready");
    db.close().await
}
