//! Person repository contract and its SeaORM implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, Select, Set, SqlErr, TransactionTrait,
};

use super::entities::person::{self, ActiveModel, Entity as PersonEntity};
use common::{AppError, AppResult};
use domain::{Person, Role};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Conflict subject reported when a uid or email is already taken
pub const PERSON_CONFLICT: &str = "Person with this uid or email";

/// Person repository trait for dependency injection.
///
/// Lookups return `None` for missing records instead of an error. Every
/// method other than `add_all` touches a single row.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait PersonRepository: Send + Sync {
    /// Insert a new person; `Conflict` if the uid or email is taken
    async fn add(&self, person: Person) -> AppResult<Person>;

    /// Insert several people in one transaction; nothing is stored on failure
    async fn add_all(&self, people: Vec<Person>) -> AppResult<usize>;

    /// Find person by uid
    async fn get(&self, uid: &str) -> AppResult<Option<Person>>;

    /// Find person by email address
    async fn get_by_email(&self, email: &str) -> AppResult<Option<Person>>;

    /// Overwrite the supplied fields; `None` if the uid is unknown
    async fn update(
        &self,
        uid: &str,
        name: Option<String>,
        email: Option<String>,
    ) -> AppResult<Option<Person>>;

    /// Remove a person, reporting whether a row existed
    async fn delete(&self, uid: &str) -> AppResult<bool>;

    /// List everyone, optionally restricted to one role
    async fn list(&self, role: Option<Role>) -> AppResult<Vec<Person>>;

    /// List a window of everyone
    async fn list_paginated(&self, skip: u64, limit: u64) -> AppResult<Vec<Person>>;
}

/// Translate unique-constraint violations into a domain conflict.
fn map_write_err(err: DbErr) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => {
            tracing::debug!("Unique constraint violated: {}", detail);
            AppError::conflict(PERSON_CONFLICT)
        }
        _ => AppError::from(err),
    }
}

/// Rows in storage order: creation time, then uid for ties.
fn ordered(select: Select<PersonEntity>) -> Select<PersonEntity> {
    select
        .order_by_asc(person::Column::CreatedAt)
        .order_by_asc(person::Column::Uid)
}

/// Row for a person that is not stored yet; both timestamps are `now`.
fn new_row(person: &Person, now: DateTime<Utc>) -> ActiveModel {
    ActiveModel {
        uid: Set(person.uid().to_owned()),
        name: Set(person.name().to_owned()),
        email: Set(person.email().to_owned()),
        role: Set(person.role().to_string()),
        created_at: Set(now),
        updated_at: Set(now),
    }
}

/// Durable implementation of PersonRepository
pub struct PersonStore {
    db: DatabaseConnection,
}

impl PersonStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PersonRepository for PersonStore {
    async fn add(&self, person: Person) -> AppResult<Person> {
        let model = new_row(&person, Utc::now())
            .insert(&self.db)
            .await
            .map_err(map_write_err)?;
        tracing::debug!(uid = %model.uid, role = %model.role, "Person added");
        Ok(Person::from(model))
    }

    async fn add_all(&self, people: Vec<Person>) -> AppResult<usize> {
        // Dropping the transaction on any early return rolls it back
        let txn = self.db.begin().await?;
        let now = Utc::now();

        for person in &people {
            new_row(person, now)
                .insert(&txn)
                .await
                .map_err(map_write_err)?;
        }

        txn.commit().await?;
        tracing::debug!(count = people.len(), "People added");
        Ok(people.len())
    }

    async fn get(&self, uid: &str) -> AppResult<Option<Person>> {
        let result = PersonEntity::find_by_id(uid.to_owned())
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Person::from))
    }

    async fn get_by_email(&self, email: &str) -> AppResult<Option<Person>> {
        let result = PersonEntity::find()
            .filter(person::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Person::from))
    }

    async fn update(
        &self,
        uid: &str,
        name: Option<String>,
        email: Option<String>,
    ) -> AppResult<Option<Person>> {
        // Dropping the transaction on any early return rolls it back
        let txn = self.db.begin().await?;

        let Some(model) = PersonEntity::find_by_id(uid.to_owned()).one(&txn).await? else {
            return Ok(None);
        };

        let mut active: ActiveModel = model.into();
        if let Some(name) = name {
            active.name = Set(name);
        }
        if let Some(email) = email {
            active.email = Set(email);
        }
        active.updated_at = Set(Utc::now());

        let model = active.update(&txn).await.map_err(map_write_err)?;
        txn.commit().await?;

        tracing::debug!(uid = %model.uid, "Person updated");
        Ok(Some(Person::from(model)))
    }

    async fn delete(&self, uid: &str) -> AppResult<bool> {
        let result = PersonEntity::delete_by_id(uid.to_owned())
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.rows_affected > 0)
    }

    async fn list(&self, role: Option<Role>) -> AppResult<Vec<Person>> {
        let mut select = PersonEntity::find();
        if let Some(role) = role {
            select = select.filter(person::Column::Role.eq(role.as_str()));
        }

        let models = ordered(select)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Person::from).collect())
    }

    async fn list_paginated(&self, skip: u64, limit: u64) -> AppResult<Vec<Person>> {
        let models = ordered(PersonEntity::find())
            .offset(skip)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Person::from).collect())
    }
}
