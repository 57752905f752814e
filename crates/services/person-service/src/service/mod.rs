//! Application services.

mod person_service;

pub use person_service::{PersonManager, PersonService};
