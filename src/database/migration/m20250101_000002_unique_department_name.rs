// Unique department names. The seed loader relies on this to make a second,
// concurrent first-run seed fail instead of inserting the starter data twice.
use super::m20250101_000001_create_tables::Departments;
use sea_orm_migration::prelude::*;

const INDEX_NAME: &str = "idx_departments_name_unique";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .name(INDEX_NAME)
                    .table(Departments::Table)
                    .col(Departments::Name)
                    .unique()
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
                    .table(Departments::Table)
                    .to_owned(),
            )
            .await
    }
}
