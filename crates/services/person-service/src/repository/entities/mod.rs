//! SeaORM entities.

pub mod person;
