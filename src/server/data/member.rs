use chrono::Utc;
use entity::learnybox_member::RegistrationStatus;
use learnybox::member::MemberProfile;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder,
};

use crate::server::{
    model::registration::ValidRegistration,
    util::email::{hash_email, normalize_email},
};

pub struct MemberRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> MemberRepository<'a, C> {
    /// Creates a new instance of [`MemberRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn find_by_email_hash(
        &self,
        email_hash: &str,
    ) -> Result<Option<entity::learnybox_member::Model>, DbErr> {
        entity::prelude::LearnyboxMember::find()
            .filter(entity::learnybox_member::Column::EmailHash.eq(email_hash))
            .one(self.db)
            .await
    }

    pub async fn find_by_external_id(
        &self,
        external_id: i64,
    ) -> Result<Option<entity::learnybox_member::Model>, DbErr> {
        entity::prelude::LearnyboxMember::find()
            .filter(entity::learnybox_member::Column::ExternalId.eq(external_id))
            .one(self.db)
            .await
    }

    /// Inserts or updates the member matching the LearnyBox user ID of `profile`
    ///
    /// New members start as drafts. Email and email hash always follow LearnyBox, while the
    /// display name and address are only refreshed until the member publishes its own values.
    ///
    /// # Arguments
    /// - `profile`: Full LearnyBox user record
    ///
    /// # Returns
    /// Returns a result containing:
    /// - [`entity::learnybox_member::Model`]: The inserted or updated member
    /// - [`DbErr`]: If a database-related error occurs, such as the email already belonging
    ///   to another member
    pub async fn upsert_from_profile(
        &self,
        profile: MemberProfile,
    ) -> Result<entity::learnybox_member::Model, DbErr> {
        let email = normalize_email(&profile.email);
        let email_hash = hash_email(&email);
        let address = profile.address();
        let now = Utc::now().naive_utc();

        let Some(member) = self.find_by_external_id(profile.user_id).await? else {
            let member = entity::learnybox_member::ActiveModel {
                external_id: ActiveValue::Set(profile.user_id),
                email: ActiveValue::Set(email),
                email_hash: ActiveValue::Set(email_hash),
                display_name: ActiveValue::Set(profile.display_name),
                category_id: ActiveValue::Set(None),
                latitude: ActiveValue::Set(None),
                longitude: ActiveValue::Set(None),
                address: ActiveValue::Set(address),
                description: ActiveValue::Set(None),
                registration_status: ActiveValue::Set(RegistrationStatus::Draft),
                created_at: ActiveValue::Set(now),
                updated_at: ActiveValue::Set(now),
                ..Default::default()
            };

            return member.insert(self.db).await;
        };

        let is_draft = member.registration_status == RegistrationStatus::Draft;

        let mut member_am = member.into_active_model();
        member_am.email = ActiveValue::Set(email);
        member_am.email_hash = ActiveValue::Set(email_hash);
        if is_draft {
            member_am.display_name = ActiveValue::Set(profile.display_name);
            member_am.address = ActiveValue::Set(address);
        }
        member_am.updated_at = ActiveValue::Set(now);

        member_am.update(self.db).await
    }

    /// Stores validated registration values and publishes the member
    ///
    /// The category is left untouched, see [`MemberRepository::set_category`].
    ///
    /// # Returns
    /// Returns a result containing:
    /// - `Option<`[`entity::learnybox_member::Model`]`>`: Some if the update succeeded or None
    ///   if the member does not exist
    /// - [`DbErr`]: If a database-related error occurs
    pub async fn apply_registration(
        &self,
        member_id: i32,
        registration: &ValidRegistration,
    ) -> Result<Option<entity::learnybox_member::Model>, DbErr> {
        let Some(member) = entity::prelude::LearnyboxMember::find_by_id(member_id)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut member_am = member.into_active_model();
        member_am.display_name = ActiveValue::Set(registration.display_name.clone());
        member_am.latitude = ActiveValue::Set(Some(registration.coordinates.latitude));
        member_am.longitude = ActiveValue::Set(Some(registration.coordinates.longitude));
        member_am.address = ActiveValue::Set(registration.address.clone());
        member_am.description = ActiveValue::Set(Some(registration.description.clone()));
        member_am.registration_status = ActiveValue::Set(RegistrationStatus::Published);
        member_am.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        Ok(Some(member_am.update(self.db).await?))
    }

    /// Moves a member to another category, or out of any with `None`
    ///
    /// # Notes
    /// - Category IDs must exist in the learnybox_member_category table due to foreign key
    ///   constraint
    pub async fn set_category(
        &self,
        member_id: i32,
        category_id: Option<i32>,
    ) -> Result<Option<entity::learnybox_member::Model>, DbErr> {
        let Some(member) = entity::prelude::LearnyboxMember::find_by_id(member_id)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut member_am = member.into_active_model();
        member_am.category_id = ActiveValue::Set(category_id);
        member_am.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        Ok(Some(member_am.update(self.db).await?))
    }

    /// Gets the published members which have coordinates, ordered by display name
    pub async fn get_published(&self) -> Result<Vec<entity::learnybox_member::Model>, DbErr> {
        entity::prelude::LearnyboxMember::find()
            .filter(
                entity::learnybox_member::Column::RegistrationStatus
                    .eq(RegistrationStatus::Published),
            )
            .filter(entity::learnybox_member::Column::Latitude.is_not_null())
            .filter(entity::learnybox_member::Column::Longitude.is_not_null())
            .order_by_asc(entity::learnybox_member::Column::DisplayName)
            .all(self.db)
            .await
    }
}
