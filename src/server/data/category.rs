//! Category persistence.
//!
//! Categories are administered outside the members map, straight in the database. The map only
//! reads them, and [`CategoryRepository::delete`] is the removal every administration path
//! must go through so members are detached first.

use migration::Expr;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DbErr, DeleteResult, EntityTrait, QueryFilter, QueryOrder,
};

pub struct CategoryRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> CategoryRepository<'a, C> {
    /// Creates a new instance of [`CategoryRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Gets every category ordered by name
    pub async fn get_all(&self) -> Result<Vec<entity::learnybox_member_category::Model>, DbErr> {
        entity::prelude::LearnyboxMemberCategory::find()
            .order_by_asc(entity::learnybox_member_category::Column::Name)
            .all(self.db)
            .await
    }

    /// Deletes a category after detaching its members
    ///
    /// Members of the category are kept and become uncategorized.
    ///
    /// # Notes
    /// - If you need transactional behavior, pass a transaction as the connection
    pub async fn delete(&self, category_id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::LearnyboxMember::update_many()
            .col_expr(
                entity::learnybox_member::Column::CategoryId,
                Expr::value(Option::<i32>::None),
            )
            .filter(entity::learnybox_member::Column::CategoryId.eq(category_id))
            .exec(self.db)
            .await?;

        entity::prelude::LearnyboxMemberCategory::delete_by_id(category_id)
            .exec(self.db)
            .await
    }
}
