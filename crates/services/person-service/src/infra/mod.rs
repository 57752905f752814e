//! Infrastructure layer - database and sample data.

mod db;
mod seed;

pub use db::Database;
pub use seed::{seed_sample_people, SeedOutcome};
