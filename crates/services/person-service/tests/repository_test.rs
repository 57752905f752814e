//! Repository contract tests.
//!
//! Every check runs against both the SQLite-backed store and the in-memory
//! store, so the two implementations cannot drift apart.

use std::sync::Arc;

use common::{AppError, DatabaseConfig};
use domain::{Person, Role};
use person_service_lib::infra::Database;
use person_service_lib::{seed_sample_people, SeedOutcome};
use person_service_lib::repository::{InMemoryPersonStore, PersonRepository, PersonStore};

async fn sqlite_repo() -> Arc<dyn PersonRepository> {
    let db = Database::connect(&DatabaseConfig::sqlite_in_memory())
        .await
        .expect("in-memory sqlite");
    Arc::new(PersonStore::new(db.get_connection()))
}

async fn memory_repo() -> Arc<dyn PersonRepository> {
    Arc::new(InMemoryPersonStore::new())
}

fn alice() -> Person {
    Person::new("u1", "Alice", "a@x.com", Role::Donor)
}

// =============================================================================
// Contract checks
// =============================================================================

async fn create_then_get_round_trip(repo: Arc<dyn PersonRepository>) {
    for (uid, role) in [("d", Role::Donor), ("s", Role::Vendor), ("v", Role::Victim)] {
        let email = format!("{uid}@x.com");
        let created = repo
            .add(Person::new(uid, "Someone", email.as_str(), role))
            .await
            .unwrap();
        assert_eq!(created.created_at(), created.updated_at());

        let fetched = repo.get(uid).await.unwrap().expect("person stored");
        assert_eq!(fetched.uid(), uid);
        assert_eq!(fetched.name(), "Someone");
        assert_eq!(fetched.email(), email);
        assert_eq!(fetched.role(), role);
    }
}

async fn duplicate_uid_conflicts(repo: Arc<dyn PersonRepository>) {
    repo.add(alice()).await.unwrap();

    let result = repo
        .add(Person::new("u1", "Other", "other@x.com", Role::Vendor))
        .await;
    assert!(matches!(result, Err(AppError::Conflict(_))));

    // The original row is untouched
    let stored = repo.get("u1").await.unwrap().unwrap();
    assert_eq!(stored.email(), "a@x.com");
}

async fn duplicate_email_conflicts(repo: Arc<dyn PersonRepository>) {
    repo.add(alice()).await.unwrap();

    let result = repo
        .add(Person::new("u2", "Other", "a@x.com", Role::Victim))
        .await;
    assert!(matches!(result, Err(AppError::Conflict(_))));
    assert!(repo.get("u2").await.unwrap().is_none());
}

async fn add_all_is_all_or_nothing(repo: Arc<dyn PersonRepository>) {
    repo.add(alice()).await.unwrap();

    let batch = vec![
        Person::new("u2", "Bob", "b@x.com", Role::Vendor),
        Person::new("u3", "Carol", "a@x.com", Role::Victim),
    ];
    let result = repo.add_all(batch).await;
    assert!(matches!(result, Err(AppError::Conflict(_))));
    assert!(repo.get("u2").await.unwrap().is_none());
    assert_eq!(repo.list(None).await.unwrap().len(), 1);

    let batch = vec![
        Person::new("u2", "Bob", "b@x.com", Role::Vendor),
        Person::new("u3", "Carol", "c@x.com", Role::Victim),
    ];
    assert_eq!(repo.add_all(batch).await.unwrap(), 2);
    assert_eq!(repo.list(None).await.unwrap().len(), 3);
}

async fn add_all_rejects_duplicates_within_batch(repo: Arc<dyn PersonRepository>) {
    let batch = vec![
        Person::new("u1", "Alice", "a@x.com", Role::Donor),
        Person::new("u1", "Alice Again", "other@x.com", Role::Donor),
    ];
    let result = repo.add_all(batch).await;
    assert!(matches!(result, Err(AppError::Conflict(_))));
    assert!(repo.list(None).await.unwrap().is_empty());
}

async fn get_by_email_finds_person(repo: Arc<dyn PersonRepository>) {
    repo.add(alice()).await.unwrap();

    let found = repo.get_by_email("a@x.com").await.unwrap().unwrap();
    assert_eq!(found.uid(), "u1");
    assert!(repo.get_by_email("nobody@x.com").await.unwrap().is_none());
}

async fn missing_uid_is_absent(repo: Arc<dyn PersonRepository>) {
    assert!(repo.get("ghost").await.unwrap().is_none());
    assert!(repo
        .update("ghost", Some("Name".to_string()), None)
        .await
        .unwrap()
        .is_none());
    assert!(!repo.delete("ghost").await.unwrap());
}

async fn name_only_update_keeps_email(repo: Arc<dyn PersonRepository>) {
    let created = repo.add(alice()).await.unwrap();

    let updated = repo
        .update("u1", Some("Alice B".to_string()), None)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.name(), "Alice B");
    assert_eq!(updated.email(), "a@x.com");
    assert_eq!(updated.role(), Role::Donor);
    assert_eq!(updated.created_at(), created.created_at());
    assert!(updated.updated_at() >= created.updated_at());
}

async fn email_only_update_keeps_name(repo: Arc<dyn PersonRepository>) {
    repo.add(alice()).await.unwrap();

    let updated = repo
        .update("u1", None, Some("alice@new.org".to_string()))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.name(), "Alice");
    assert_eq!(updated.email(), "alice@new.org");

    let reloaded = repo.get_by_email("alice@new.org").await.unwrap().unwrap();
    assert_eq!(reloaded.uid(), "u1");
    assert!(repo.get_by_email("a@x.com").await.unwrap().is_none());
}

async fn update_to_taken_email_conflicts(repo: Arc<dyn PersonRepository>) {
    repo.add(alice()).await.unwrap();
    repo.add(Person::new("u2", "Bob", "b@x.com", Role::Vendor))
        .await
        .unwrap();

    let result = repo.update("u2", None, Some("a@x.com".to_string())).await;
    assert!(matches!(result, Err(AppError::Conflict(_))));

    let bob = repo.get("u2").await.unwrap().unwrap();
    assert_eq!(bob.email(), "b@x.com");
}

async fn update_to_own_email_is_allowed(repo: Arc<dyn PersonRepository>) {
    repo.add(alice()).await.unwrap();

    let updated = repo
        .update("u1", Some("Alice".to_string()), Some("a@x.com".to_string()))
        .await
        .unwrap();
    assert!(updated.is_some());
}

async fn delete_twice(repo: Arc<dyn PersonRepository>) {
    repo.add(alice()).await.unwrap();

    assert!(repo.delete("u1").await.unwrap());
    assert!(!repo.delete("u1").await.unwrap());
    assert!(repo.get("u1").await.unwrap().is_none());
}

async fn deleted_uid_and_email_can_be_reused(repo: Arc<dyn PersonRepository>) {
    repo.add(alice()).await.unwrap();
    repo.delete("u1").await.unwrap();

    let again = repo
        .add(Person::new("u1", "Alice Again", "a@x.com", Role::Victim))
        .await
        .unwrap();
    assert_eq!(again.role(), Role::Victim);
}

async fn list_filters_by_role(repo: Arc<dyn PersonRepository>) {
    repo.add(alice()).await.unwrap();
    repo.add(Person::new("u2", "Vera", "v@x.com", Role::Vendor))
        .await
        .unwrap();

    let vendors = repo.list(Some(Role::Vendor)).await.unwrap();
    assert_eq!(vendors.len(), 1);
    assert_eq!(vendors[0].uid(), "u2");

    assert!(repo.list(Some(Role::Victim)).await.unwrap().is_empty());
    assert_eq!(repo.list(None).await.unwrap().len(), 2);
}

async fn list_paginated_windows(repo: Arc<dyn PersonRepository>) {
    for i in 1..=5 {
        repo.add(Person::new(
            format!("u{i}"),
            format!("Person {i}"),
            format!("p{i}@x.com"),
            Role::Donor,
        ))
        .await
        .unwrap();
    }

    let uids = |people: Vec<Person>| -> Vec<String> {
        people.iter().map(|p| p.uid().to_string()).collect()
    };

    assert_eq!(
        uids(repo.list_paginated(0, 2).await.unwrap()),
        vec!["u1", "u2"]
    );
    assert_eq!(
        uids(repo.list_paginated(2, 2).await.unwrap()),
        vec!["u3", "u4"]
    );
    assert_eq!(uids(repo.list_paginated(4, 10).await.unwrap()), vec!["u5"]);
    assert!(repo.list_paginated(10, 10).await.unwrap().is_empty());
}

// =============================================================================
// Test generation
// =============================================================================

macro_rules! contract_tests {
    ($backend:ident, $factory:ident, [$($check:ident),* $(,)?]) => {
        mod $backend {
            use super::*;

            $(
                #[tokio::test]
                async fn $check() {
                    super::$check($factory().await).await;
                }
            )*
        }
    };
}

contract_tests!(
    sqlite,
    sqlite_repo,
    [
        create_then_get_round_trip,
        duplicate_uid_conflicts,
        duplicate_email_conflicts,
        add_all_is_all_or_nothing,
        add_all_rejects_duplicates_within_batch,
        get_by_email_finds_person,
        missing_uid_is_absent,
        name_only_update_keeps_email,
        email_only_update_keeps_name,
        update_to_taken_email_conflicts,
        update_to_own_email_is_allowed,
        delete_twice,
        deleted_uid_and_email_can_be_reused,
        list_filters_by_role,
        list_paginated_windows,
    ]
);

contract_tests!(
    memory,
    memory_repo,
    [
        create_then_get_round_trip,
        duplicate_uid_conflicts,
        duplicate_email_conflicts,
        add_all_is_all_or_nothing,
        add_all_rejects_duplicates_within_batch,
        get_by_email_finds_person,
        missing_uid_is_absent,
        name_only_update_keeps_email,
        email_only_update_keeps_name,
        update_to_taken_email_conflicts,
        update_to_own_email_is_allowed,
        delete_twice,
        deleted_uid_and_email_can_be_reused,
        list_filters_by_role,
        list_paginated_windows,
    ]
);

#[tokio::test]
async fn concurrent_inserts_with_same_uid_admit_one() {
    let repo = sqlite_repo().await;

    let first = {
        let repo = repo.clone();
        tokio::spawn(async move {
            repo.add(Person::new("race", "A", "a@race.com", Role::Donor))
                .await
        })
    };
    let second = {
        let repo = repo.clone();
        tokio::spawn(async move {
            repo.add(Person::new("race", "B", "b@race.com", Role::Vendor))
                .await
        })
    };

    let results = [first.await.unwrap(), second.await.unwrap()];
    let ok = results.iter().filter(|r| r.is_ok()).count();
    let conflicts = results
        .iter()
        .filter(|r| matches!(r, Err(AppError::Conflict(_))))
        .count();
    assert_eq!((ok, conflicts), (1, 1));
}

#[tokio::test]
async fn schema_bootstrap_is_idempotent() {
    let db = Database::connect(&DatabaseConfig::sqlite_in_memory())
        .await
        .unwrap();
    db.ensure_schema().await.unwrap();
    db.ping().await.unwrap();
}

#[tokio::test]
async fn seeding_sqlite_store_inserts_every_sample() {
    let repo = sqlite_repo().await;

    let outcome = seed_sample_people(repo.as_ref()).await.unwrap();
    assert_eq!(outcome, SeedOutcome::Inserted(6));
    assert_eq!(repo.list(None).await.unwrap().len(), 6);

    let again = seed_sample_people(repo.as_ref()).await.unwrap();
    assert_eq!(again, SeedOutcome::Skipped { existing: 6 });
}
