//! Person service - validation and output shaping over the repository.

use async_trait::async_trait;
use std::sync::Arc;

use common::{AppError, AppResult, OptionExt};
use domain::{is_valid_role, Person, PersonResponse, Role, RoleCounts};

use crate::repository::PersonRepository;

/// Person service trait for dependency injection.
#[async_trait]
pub trait PersonService: Send + Sync {
    /// Register a person; the role is fixed from here on
    async fn create_person(&self, person: Person) -> AppResult<PersonResponse>;

    /// Get person by uid
    async fn get_person(&self, uid: &str) -> AppResult<PersonResponse>;

    /// Get person by email
    async fn get_person_by_email(&self, email: &str) -> AppResult<PersonResponse>;

    /// Partially update name and/or email
    async fn update_person(
        &self,
        uid: &str,
        name: Option<String>,
        email: Option<String>,
    ) -> AppResult<PersonResponse>;

    /// Delete person, reporting whether it existed
    async fn delete_person(&self, uid: &str) -> AppResult<bool>;

    /// List people, optionally filtered by role
    async fn list_persons(&self, role: Option<Role>) -> AppResult<Vec<PersonResponse>>;

    /// List a window of people
    async fn list_persons_paginated(&self, skip: u64, limit: u64)
        -> AppResult<Vec<PersonResponse>>;

    async fn list_donors(&self) -> AppResult<Vec<PersonResponse>> {
        self.list_persons(Some(Role::Donor)).await
    }

    async fn list_vendors(&self) -> AppResult<Vec<PersonResponse>> {
        self.list_persons(Some(Role::Vendor)).await
    }

    async fn list_victims(&self) -> AppResult<Vec<PersonResponse>> {
        self.list_persons(Some(Role::Victim)).await
    }

    /// Number of people per role, zero counts included
    async fn count_by_role(&self) -> AppResult<RoleCounts>;
}

/// Concrete implementation of PersonService using repository.
pub struct PersonManager {
    repo: Arc<dyn PersonRepository>,
}

impl PersonManager {
    /// Create new person service instance with repository
    pub fn new(repo: Arc<dyn PersonRepository>) -> Self {
        Self { repo }
    }
}

fn shape(people: Vec<Person>) -> Vec<PersonResponse> {
    people.into_iter().map(PersonResponse::from).collect()
}

#[async_trait]
impl PersonService for PersonManager {
    async fn create_person(&self, person: Person) -> AppResult<PersonResponse> {
        // Redundant with the Role enum, kept for records built outside the factory
        if !is_valid_role(person.role().as_str()) {
            return Err(AppError::validation("Invalid role"));
        }
        if person.name().trim().is_empty() {
            return Err(AppError::validation("Name cannot be empty"));
        }

        let created = self.repo.add(person).await?;
        tracing::info!(uid = %created.uid(), role = %created.role(), "Person registered");
        Ok(PersonResponse::from(created))
    }

    async fn get_person(&self, uid: &str) -> AppResult<PersonResponse> {
        self.repo
            .get(uid)
            .await?
            .map(PersonResponse::from)
            .ok_or_not_found()
    }

    async fn get_person_by_email(&self, email: &str) -> AppResult<PersonResponse> {
        self.repo
            .get_by_email(email)
            .await?
            .map(PersonResponse::from)
            .ok_or_not_found()
    }

    async fn update_person(
        &self,
        uid: &str,
        name: Option<String>,
        email: Option<String>,
    ) -> AppResult<PersonResponse> {
        if let Some(name) = name.as_deref() {
            if name.trim().is_empty() {
                return Err(AppError::validation("Name cannot be empty"));
            }
        }

        self.repo
            .update(uid, name, email)
            .await?
            .map(PersonResponse::from)
            .ok_or_not_found()
    }

    async fn delete_person(&self, uid: &str) -> AppResult<bool> {
        let found = self.repo.delete(uid).await?;
        if found {
            tracing::info!(uid = %uid, "Person deleted");
        }
        Ok(found)
    }

    async fn list_persons(&self, role: Option<Role>) -> AppResult<Vec<PersonResponse>> {
        Ok(shape(self.repo.list(role).await?))
    }

    async fn list_persons_paginated(
        &self,
        skip: u64,
        limit: u64,
    ) -> AppResult<Vec<PersonResponse>> {
        Ok(shape(self.repo.list_paginated(skip, limit).await?))
    }

    async fn count_by_role(&self) -> AppResult<RoleCounts> {
        let people = self.repo.list(None).await?;
        Ok(people.iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{InMemoryPersonStore, MockPersonRepository};
    use mockall::predicate::eq;

    fn sample(uid: &str, role: Role) -> Person {
        Person::new(uid, "Test Person", format!("{uid}@example.com"), role)
    }

    fn manager(repo: MockPersonRepository) -> PersonManager {
        PersonManager::new(Arc::new(repo))
    }

    #[tokio::test]
    async fn get_person_success() {
        let mut repo = MockPersonRepository::new();
        repo.expect_get()
            .with(eq("u1"))
            .returning(|uid| Ok(Some(sample(uid, Role::Vendor))));

        let person = manager(repo).get_person("u1").await.unwrap();
        assert_eq!(person.uid, "u1");
        assert_eq!(person.role, Role::Vendor);
    }

    #[tokio::test]
    async fn get_person_not_found() {
        let mut repo = MockPersonRepository::new();
        repo.expect_get().returning(|_| Ok(None));

        let result = manager(repo).get_person("missing").await;
        assert!(matches!(result, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn get_person_by_email_not_found() {
        let mut repo = MockPersonRepository::new();
        repo.expect_get_by_email().returning(|_| Ok(None));

        let result = manager(repo).get_person_by_email("nobody@x.com").await;
        assert!(matches!(result, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn update_rejects_blank_name_before_repository() {
        let mut repo = MockPersonRepository::new();
        repo.expect_update().never();

        let result = manager(repo)
            .update_person("u1", Some("   ".to_string()), None)
            .await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn update_missing_person_is_not_found() {
        let mut repo = MockPersonRepository::new();
        repo.expect_update().returning(|_, _, _| Ok(None));

        let result = manager(repo)
            .update_person("missing", Some("Bob".to_string()), None)
            .await;
        assert!(matches!(result, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn create_rejects_blank_name() {
        let mut repo = MockPersonRepository::new();
        repo.expect_add().never();

        let result = manager(repo)
            .create_person(Person::new("u1", " ", "a@x.com", Role::Donor))
            .await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn create_propagates_conflict() {
        let mut repo = MockPersonRepository::new();
        repo.expect_add()
            .returning(|_| Err(AppError::conflict("Person with this uid or email")));

        let result = manager(repo)
            .create_person(sample("u1", Role::Donor))
            .await;
        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn delete_passes_found_flag_through() {
        let mut repo = MockPersonRepository::new();
        repo.expect_delete().with(eq("u1")).times(1).returning(|_| Ok(true));
        repo.expect_delete().with(eq("u2")).times(1).returning(|_| Ok(false));

        let service = manager(repo);
        assert!(service.delete_person("u1").await.unwrap());
        assert!(!service.delete_person("u2").await.unwrap());
    }

    #[tokio::test]
    async fn role_wrappers_filter_by_role() {
        let mut repo = MockPersonRepository::new();
        repo.expect_list()
            .with(eq(Some(Role::Victim)))
            .returning(|_| Ok(vec![sample("v1", Role::Victim)]));

        let victims = manager(repo).list_victims().await.unwrap();
        assert_eq!(victims.len(), 1);
        assert_eq!(victims[0].role, Role::Victim);
    }

    #[tokio::test]
    async fn count_by_role_includes_empty_roles() {
        let service = PersonManager::new(Arc::new(InMemoryPersonStore::new()));
        service.create_person(sample("d1", Role::Donor)).await.unwrap();
        service.create_person(sample("d2", Role::Donor)).await.unwrap();
        service.create_person(sample("s1", Role::Vendor)).await.unwrap();

        let counts = service.count_by_role().await.unwrap();
        assert_eq!(
            counts,
            RoleCounts {
                donor: 2,
                vendor: 1,
                victim: 0
            }
        );
    }

    #[tokio::test]
    async fn list_donors_and_vendors() {
        let service = PersonManager::new(Arc::new(InMemoryPersonStore::new()));
        service.create_person(sample("d1", Role::Donor)).await.unwrap();
        service.create_person(sample("s1", Role::Vendor)).await.unwrap();

        let donors = service.list_donors().await.unwrap();
        let vendors = service.list_vendors().await.unwrap();
        assert_eq!(donors.len(), 1);
        assert_eq!(donors[0].uid, "d1");
        assert_eq!(vendors.len(), 1);
        assert_eq!(vendors[0].uid, "s1");
    }
}
