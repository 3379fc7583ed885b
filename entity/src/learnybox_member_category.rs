use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "learnybox_member_category")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::learnybox_member::Entity")]
    LearnyboxMember,
}

impl Related<super::learnybox_member::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LearnyboxMember.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
