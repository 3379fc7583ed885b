use sea_orm::DatabaseConnection;

use crate::{
    model::member::{CategoryDto, MapMemberDto, MembersMapDto},
    server::{
        data::{category::CategoryRepository, member::MemberRepository},
        error::Error,
        util::{email::identifier_hash, html::nl2br},
    },
};

/// Service building the public map payload.
pub struct MembersMapService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> MembersMapService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Gets the categories and every published member with coordinates.
    ///
    /// # Arguments
    /// - `current_member` - Email or email hash of the member viewing the map, whose entry is
    ///   flagged. Only the local database is consulted.
    pub async fn get_members_map(
        &self,
        current_member: Option<&str>,
    ) -> Result<MembersMapDto, Error> {
        let current_hash = current_member
            .map(str::trim)
            .filter(|identifier| !identifier.is_empty())
            .map(identifier_hash);

        let categories = CategoryRepository::new(self.db).get_all().await?;
        let members = MemberRepository::new(self.db).get_published().await?;

        let members = members
            .into_iter()
            .filter_map(|member| {
                let (Some(latitude), Some(longitude)) = (member.latitude, member.longitude) else {
                    return None;
                };

                Some(MapMemberDto {
                    is_current_member: current_hash.as_deref() == Some(member.email_hash.as_str()),
                    name: member.display_name,
                    category_id: member.category_id,
                    latitude,
                    longitude,
                    description: nl2br(member.description.as_deref().unwrap_or_default()),
                })
            })
            .collect();

        Ok(MembersMapDto {
            categories: categories
                .into_iter()
                .map(|category| CategoryDto {
                    id: category.id,
                    name: category.name,
                })
                .collect(),
            members,
        })
    }
}
