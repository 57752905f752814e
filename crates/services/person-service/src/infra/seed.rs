//! Sample people for local development.

use common::AppResult;
use domain::{Person, Role};

use crate::repository::PersonRepository;

const SAMPLE_PEOPLE: &[(&str, &str, &str, Role)] = &[
    ("donor1", "Alice Johnson", "alice@example.com", Role::Donor),
    ("donor2", "Bob Smith", "bob@example.com", Role::Donor),
    ("vendor1", "Charlie's Supplies", "charlie@supplies.com", Role::Vendor),
    ("vendor2", "Diana's Goods", "diana@goods.com", Role::Vendor),
    ("victim1", "Eve Brown", "eve@example.com", Role::Victim),
    ("victim2", "Frank Wilson", "frank@example.com", Role::Victim),
];

/// Result of a seeding run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// The directory already had people; nothing was written
    Skipped { existing: u64 },
    Inserted(usize),
}

/// Insert the sample people, but only into an empty directory.
pub async fn seed_sample_people(repo: &dyn PersonRepository) -> AppResult<SeedOutcome> {
    let existing = repo.list_paginated(0, 1).await?;
    if !existing.is_empty() {
        let existing = repo.list(None).await?.len() as u64;
        tracing::info!("Directory already populated ({} people), skipping seed", existing);
        return Ok(SeedOutcome::Skipped { existing });
    }

    let people = SAMPLE_PEOPLE
        .iter()
        .map(|(uid, name, email, role)| Person::new(*uid, *name, *email, *role))
        .collect();
    let inserted = repo.add_all(people).await?;

    tracing::info!("Seeded {} sample people", inserted);
    Ok(SeedOutcome::Inserted(inserted))
}
