//! Person domain entity and its role tag.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{ROLE_DONOR, ROLE_VENDOR, ROLE_VICTIM};
use crate::error::{DomainError, DomainResult};

/// Role a person is registered with. Fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Donor,
    Vendor,
    Victim,
}

impl Role {
    /// Every role, in display order.
    pub const ALL: [Role; 3] = [Role::Donor, Role::Vendor, Role::Victim];

    /// Wire and storage representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Donor => ROLE_DONOR,
            Role::Vendor => ROLE_VENDOR,
            Role::Victim => ROLE_VICTIM,
        }
    }
}

/// Strict parse: case-insensitive, unknown values are a validation error.
impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            ROLE_DONOR => Ok(Role::Donor),
            ROLE_VENDOR => Ok(Role::Vendor),
            ROLE_VICTIM => Ok(Role::Victim),
            _ => Err(DomainError::validation(format!(
                "Invalid role '{}'. Must be one of: donor, vendor, victim",
                s
            ))),
        }
    }
}

/// Lenient factory used at ingestion: unknown values fall back to donor.
impl From<&str> for Role {
    fn from(s: &str) -> Self {
        s.parse().unwrap_or(Role::Donor)
    }
}

impl From<String> for Role {
    fn from(s: String) -> Self {
        Role::from(s.as_str())
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.as_str().to_string()
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A registered person.
///
/// `uid`, `email` and `role` are read-only once constructed; only the name
/// has a setter. Timestamps are assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    uid: String,
    name: String,
    email: String,
    role: Role,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Person {
    /// Create a person that has not been persisted yet.
    pub fn new(
        uid: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
        role: Role,
    ) -> Self {
        let now = Utc::now();
        Self {
            uid: uid.into(),
            name: name.into(),
            email: email.into(),
            role,
            created_at: now,
            updated_at: now,
        }
    }

    /// Rebuild a person from stored values.
    pub fn from_stored(
        uid: String,
        name: String,
        email: String,
        role: Role,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            uid,
            name,
            email,
            role,
            created_at,
            updated_at,
        }
    }

    pub fn uid(&self) -> &str {
        &self.uid
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Rename the person. Empty names are rejected.
    pub fn set_name(&mut self, name: impl Into<String>) -> DomainResult<()> {
        let name = name.into();
        if name.is_empty() {
            return Err(DomainError::validation("Name cannot be empty"));
        }
        self.name = name;
        Ok(())
    }

    /// Copy with a new email address and modification time.
    ///
    /// Only storage backends apply email changes; callers go through the
    /// repository update path.
    pub fn with_email(self, email: impl Into<String>, updated_at: DateTime<Utc>) -> Self {
        Self {
            email: email.into(),
            updated_at,
            ..self
        }
    }

    /// Copy with a new modification time.
    pub fn touched(self, updated_at: DateTime<Utc>) -> Self {
        Self { updated_at, ..self }
    }
}

/// Person response (safe to return to client)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct PersonResponse {
    /// Identity-provider user id
    #[cfg_attr(feature = "openapi", schema(example = "u1"))]
    pub uid: String,
    /// Display name
    #[cfg_attr(feature = "openapi", schema(example = "Alice"))]
    pub name: String,
    /// Email address
    #[cfg_attr(feature = "openapi", schema(example = "a@x.com"))]
    pub email: String,
    /// Registered role
    pub role: Role,
}

impl From<Person> for PersonResponse {
    fn from(person: Person) -> Self {
        Self {
            uid: person.uid,
            name: person.name,
            email: person.email,
            role: person.role,
        }
    }
}

impl From<&Person> for PersonResponse {
    fn from(person: &Person) -> Self {
        Self {
            uid: person.uid.clone(),
            name: person.name.clone(),
            email: person.email.clone(),
            role: person.role,
        }
    }
}

/// Number of people registered under each role.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct RoleCounts {
    pub donor: u64,
    pub vendor: u64,
    pub victim: u64,
}

impl RoleCounts {
    /// Record one more person with `role`
    pub fn increment(&mut self, role: Role) {
        match role {
            Role::Donor => self.donor += 1,
            Role::Vendor => self.vendor += 1,
            Role::Victim => self.victim += 1,
        }
    }
}

impl<'a> FromIterator<&'a Person> for RoleCounts {
    fn from_iter<I: IntoIterator<Item = &'a Person>>(iter: I) -> Self {
        let mut counts = RoleCounts::default();
        for person in iter {
            counts.increment(person.role());
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_factory_is_case_insensitive() {
        assert_eq!(Role::from("VENDOR"), Role::Vendor);
        assert_eq!(Role::from("Victim"), Role::Victim);
        assert_eq!(Role::from("donor"), Role::Donor);
    }

    #[test]
    fn role_factory_defaults_to_donor() {
        assert_eq!(Role::from("admin"), Role::Donor);
        assert_eq!(Role::from(""), Role::Donor);
    }

    #[test]
    fn strict_parse_rejects_unknown_roles() {
        assert_eq!("vendor".parse::<Role>(), Ok(Role::Vendor));
        let err = "admin".parse::<Role>().unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Victim).unwrap(), "\"victim\"");
        assert_eq!(Role::Vendor.to_string(), "vendor");
        assert_eq!(String::from(Role::Donor), "donor");
    }

    #[test]
    fn set_name_rejects_empty() {
        let mut person = Person::new("u1", "Alice", "a@x.com", Role::Donor);
        assert!(person.set_name("").is_err());
        assert_eq!(person.name(), "Alice");

        person.set_name("Alice B").unwrap();
        assert_eq!(person.name(), "Alice B");
    }

    #[test]
    fn with_email_keeps_identity() {
        let person = Person::new("u1", "Alice", "a@x.com", Role::Vendor);
        let created = person.created_at();
        let later = created + chrono::Duration::seconds(5);

        let moved = person.with_email("b@x.com", later);
        assert_eq!(moved.uid(), "u1");
        assert_eq!(moved.email(), "b@x.com");
        assert_eq!(moved.role(), Role::Vendor);
        assert_eq!(moved.created_at(), created);
        assert_eq!(moved.updated_at(), later);
    }

    #[test]
    fn response_exposes_only_public_fields() {
        let person = Person::new("u1", "Alice", "a@x.com", Role::Donor);
        let json = serde_json::to_value(PersonResponse::from(&person)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"uid": "u1", "name": "Alice", "email": "a@x.com", "role": "donor"})
        );
    }

    #[test]
    fn role_counts_include_zero_roles() {
        let people = vec![
            Person::new("d1", "A", "a@x.com", Role::Donor),
            Person::new("d2", "B", "b@x.com", Role::Donor),
            Person::new("v1", "C", "c@x.com", Role::Vendor),
        ];
        let counts: RoleCounts = people.iter().collect();
        assert_eq!(
            counts,
            RoleCounts {
                donor: 2,
                vendor: 1,
                victim: 0
            }
        );
    }
}
