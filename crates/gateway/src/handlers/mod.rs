//! HTTP handlers.

pub mod health_handler;
pub mod person_handler;
pub mod token_handler;

pub use health_handler::{health_routes, index};
pub use person_handler::{count_persons, person_routes};
pub use token_handler::token_routes;
