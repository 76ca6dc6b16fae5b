use super::user;
use sea_orm::entity::prelude::*;

/// The arithmetic operation a calculation was computed with.
/// Stored by its name, so the column stays readable from plain SQL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum OperationKind {
    #[sea_orm(string_value = "Add")]
    Add,
    #[sea_orm(string_value = "Sub")]
    Sub,
    #[sea_orm(string_value = "Multiply")]
    Multiply,
    #[sea_orm(string_value = "Divide")]
    Divide,
}

impl OperationKind {
    /// Wire and storage name of the operation.
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::Add => "Add",
            OperationKind::Sub => "Sub",
            OperationKind::Multiply => "Multiply",
            OperationKind::Divide => "Divide",
        }
    }
}

impl std::fmt::Display for OperationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single computed operation together with its operands.
///
/// `result` always holds the output of applying `op_type` to `(a, b)`;
/// rows are rewritten as a whole whenever operands or operation change.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "calculations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub a: f64,
    pub b: f64,
    pub op_type: OperationKind,
    pub result: f64,
    /// The owning user. `None` only for rows created before ownership existed.
    pub user_id: Option<i32>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "user::Entity",
        from = "Column::UserId",
        to = "user::Column::Id",
        on_delete = "SetNull"
    )]
    User,
}

impl Related<user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
