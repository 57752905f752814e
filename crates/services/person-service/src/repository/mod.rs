//! Repository layer for data access.

pub mod entities;
mod memory_repository;
mod person_repository;

pub use memory_repository::InMemoryPersonStore;
pub use person_repository::{PersonRepository, PersonStore, PERSON_CONFLICT};

#[cfg(any(test, feature = "test-utils"))]
pub use person_repository::MockPersonRepository;
