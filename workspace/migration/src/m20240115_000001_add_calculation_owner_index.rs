use sea_orm_migration::prelude::*;

const INDEX_NAME: &str = "idx_calculations_user_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Every calculation read is filtered by owner.
        manager
            .create_index(
                Index::create()
                    .name(INDEX_NAME)
                    .table(Alias::new("calculations"))
                    .col(Alias::new("user_id"))
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(INDEX_NAME)
                    .table(Alias::new("calculations"))
                    .to_owned(),
            )
            .await
    }
}
