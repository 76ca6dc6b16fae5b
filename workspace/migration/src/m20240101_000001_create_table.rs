use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create users table
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(pk_auto(Users::Id))
                    .col(string(Users::Username).unique_key())
                    .col(string_null(Users::Email))
                    .col(string(Users::PasswordHash))
                    .col(string_null(Users::Token).unique_key())
                    .col(timestamp_with_time_zone(Users::CreatedAt).default(Expr::current_timestamp()))
                    .to_owned(),
            )
            .await?;

        // Create calculations table. Ownership is optional so rows written
        // before authentication existed remain valid.
        manager
            .create_table(
                Table::create()
                    .table(Calculations::Table)
                    .if_not_exists()
                    .col(pk_auto(Calculations::Id))
                    .col(double(Calculations::A))
                    .col(double(Calculations::B))
                    .col(string_len(Calculations::OpType, 20))
                    .col(double(Calculations::Result))
                    .col(integer_null(Calculations::UserId))
                    .col(timestamp_with_time_zone(Calculations::CreatedAt).default(Expr::current_timestamp()))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_calculation_user")
                            .from(Calculations::Table, Calculations::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Calculations::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Username,
    Email,
    PasswordHash,
    Token,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Calculations {
    Table,
    Id,
    A,
    B,
    OpType,
    Result,
    UserId,
    CreatedAt,
}
