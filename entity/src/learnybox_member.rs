use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Only published members are shown on the public map.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "snake_case")]
pub enum RegistrationStatus {
    #[sea_orm(string_value = "draft")]
    Draft,
    #[sea_orm(string_value = "published")]
    Published,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "learnybox_member")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub external_id: i64,
    #[sea_orm(unique)]
    pub email: String,
    #[sea_orm(unique)]
    pub email_hash: String,
    pub display_name: String,
    pub category_id: Option<i32>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    #[sea_orm(column_type = "Text", nullable)]
    pub address: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub registration_status: RegistrationStatus,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::learnybox_member_category::Entity",
        from = "Column::CategoryId",
        to = "super::learnybox_member_category::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    LearnyboxMemberCategory,
}

impl Related<super::learnybox_member_category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LearnyboxMemberCategory.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
