use super::calculation;
use sea_orm::entity::prelude::*;

/// Represents a registered user of the system.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub username: String,
    pub email: Option<String>,
    /// Salted one-way verifier of the password. The raw password is never stored.
    pub password_hash: String,
    /// The single live bearer token, replaced on every successful login.
    #[sea_orm(unique)]
    pub token: Option<String>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    // A user can own multiple calculations.
    #[sea_orm(has_many = "super::calculation::Entity")]
    Calculation,
}

impl Related<calculation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Calculation.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
