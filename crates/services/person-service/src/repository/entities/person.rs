//! Person database entity for SeaORM.

use sea_orm::entity::prelude::*;

use domain::{Person, Role};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "persons")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub uid: String,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    /// donor, vendor or victim
    #[sea_orm(indexed)]
    pub role: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity
impl From<Model> for Person {
    fn from(model: Model) -> Self {
        Person::from_stored(
            model.uid,
            model.name,
            model.email,
            Role::from(model.role.as_str()),
            model.created_at,
            model.updated_at,
        )
    }
}
