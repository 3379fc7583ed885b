use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(LearnyboxMemberCategory::Table)
                    .if_not_exists()
                    .col(pk_auto(LearnyboxMemberCategory::Id))
                    .col(string_uniq(LearnyboxMemberCategory::Name))
                    .col(timestamp(LearnyboxMemberCategory::CreatedAt))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .table(LearnyboxMemberCategory::Table)
                    .to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
pub enum LearnyboxMemberCategory {
    Table,
    Id,
    Name,
    CreatedAt,
}
