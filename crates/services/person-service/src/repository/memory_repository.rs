//! In-memory PersonRepository for tests and storage-less runs.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::person_repository::{PersonRepository, PERSON_CONFLICT};
use common::{AppError, AppResult};
use domain::{Person, Role};

/// Keeps people in insertion order behind a lock.
///
/// Uniqueness of uid and email is checked under the write lock, so two
/// racing inserts cannot both succeed.
#[derive(Default)]
pub struct InMemoryPersonStore {
    people: RwLock<Vec<Person>>,
}

impl InMemoryPersonStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PersonRepository for InMemoryPersonStore {
    async fn add(&self, person: Person) -> AppResult<Person> {
        let mut people = self.people.write().await;

        let taken = people
            .iter()
            .any(|p| p.uid() == person.uid() || p.email() == person.email());
        if taken {
            return Err(AppError::conflict(PERSON_CONFLICT));
        }

        let now = Utc::now();
        let stored = Person::from_stored(
            person.uid().to_owned(),
            person.name().to_owned(),
            person.email().to_owned(),
            person.role(),
            now,
            now,
        );
        people.push(stored.clone());
        Ok(stored)
    }

    async fn add_all(&self, batch: Vec<Person>) -> AppResult<usize> {
        let mut people = self.people.write().await;

        for (i, person) in batch.iter().enumerate() {
            let taken = people
                .iter()
                .chain(&batch[..i])
                .any(|p| p.uid() == person.uid() || p.email() == person.email());
            if taken {
                return Err(AppError::conflict(PERSON_CONFLICT));
            }
        }

        let now = Utc::now();
        let count = batch.len();
        people.extend(batch.into_iter().map(|person| {
            Person::from_stored(
                person.uid().to_owned(),
                person.name().to_owned(),
                person.email().to_owned(),
                person.role(),
                now,
                now,
            )
        }));
        Ok(count)
    }

    async fn get(&self, uid: &str) -> AppResult<Option<Person>> {
        let people = self.people.read().await;
        Ok(people.iter().find(|p| p.uid() == uid).cloned())
    }

    async fn get_by_email(&self, email: &str) -> AppResult<Option<Person>> {
        let people = self.people.read().await;
        Ok(people.iter().find(|p| p.email() == email).cloned())
    }

    async fn update(
        &self,
        uid: &str,
        name: Option<String>,
        email: Option<String>,
    ) -> AppResult<Option<Person>> {
        let mut people = self.people.write().await;

        let Some(index) = people.iter().position(|p| p.uid() == uid) else {
            return Ok(None);
        };

        if let Some(email) = email.as_deref() {
            let taken = people.iter().any(|p| p.uid() != uid && p.email() == email);
            if taken {
                return Err(AppError::conflict(PERSON_CONFLICT));
            }
        }

        // Work on a copy so a rejected name leaves the stored row untouched
        let mut person = people[index].clone();
        if let Some(name) = name {
            person.set_name(name)?;
        }
        let now = Utc::now();
        let person = match email {
            Some(email) => person.with_email(email, now),
            None => person.touched(now),
        };

        people[index] = person.clone();
        Ok(Some(person))
    }

    async fn delete(&self, uid: &str) -> AppResult<bool> {
        let mut people = self.people.write().await;
        let before = people.len();
        people.retain(|p| p.uid() != uid);
        Ok(people.len() < before)
    }

    async fn list(&self, role: Option<Role>) -> AppResult<Vec<Person>> {
        let people = self.people.read().await;
        Ok(people
            .iter()
            .filter(|p| role.map_or(true, |r| p.role() == r))
            .cloned()
            .collect())
    }

    async fn list_paginated(&self, skip: u64, limit: u64) -> AppResult<Vec<Person>> {
        let people = self.people.read().await;
        Ok(people
            .iter()
            .skip(usize::try_from(skip).unwrap_or(usize::MAX))
            .take(usize::try_from(limit).unwrap_or(usize::MAX))
            .cloned()
            .collect())
    }
}
