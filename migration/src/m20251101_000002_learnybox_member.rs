use sea_orm_migration::{prelude::*, schema::*};

use crate::m20251101_000001_learnybox_member_category::LearnyboxMemberCategory;

static IDX_MEMBER_REGISTRATION_STATUS: &str = "idx-learnybox_member-registration_status";
static FK_MEMBER_CATEGORY_ID: &str = "fk-learnybox_member-category_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(LearnyboxMember::Table)
                    .if_not_exists()
                    .col(pk_auto(LearnyboxMember::Id))
                    .col(big_integer_uniq(LearnyboxMember::ExternalId))
                    .col(string_uniq(LearnyboxMember::Email))
                    .col(string_uniq(LearnyboxMember::EmailHash))
                    .col(string(LearnyboxMember::DisplayName))
                    .col(integer_null(LearnyboxMember::CategoryId))
                    .col(double_null(LearnyboxMember::Latitude))
                    .col(double_null(LearnyboxMember::Longitude))
                    .col(text_null(LearnyboxMember::Address))
                    .col(text_null(LearnyboxMember::Description))
                    .col(string_len(LearnyboxMember::RegistrationStatus, 16))
                    .col(timestamp(LearnyboxMember::CreatedAt))
                    .col(timestamp(LearnyboxMember::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_MEMBER_REGISTRATION_STATUS)
                    .table(LearnyboxMember::Table)
                    .col(LearnyboxMember::RegistrationStatus)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_MEMBER_CATEGORY_ID)
                    .from_tbl(LearnyboxMember::Table)
                    .from_col(LearnyboxMember::CategoryId)
                    .to_tbl(LearnyboxMemberCategory::Table)
                    .to_col(LearnyboxMemberCategory::Id)
                    .on_delete(ForeignKeyAction::SetNull)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_MEMBER_CATEGORY_ID)
                    .table(LearnyboxMember::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_MEMBER_REGISTRATION_STATUS)
                    .table(LearnyboxMember::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(LearnyboxMember::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum LearnyboxMember {
    Table,
    Id,
    ExternalId,
    Email,
    EmailHash,
    DisplayName,
    CategoryId,
    Latitude,
    Longitude,
    Address,
    Description,
    RegistrationStatus,
    CreatedAt,
    UpdatedAt,
}
