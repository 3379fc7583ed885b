use chrono::Utc;
use entity::learnybox_member::RegistrationStatus;
use sea_orm::{ActiveValue, EntityTrait};
use sha2::{Digest, Sha256};

use crate::{error::TestError, TestContext};

/// Coordinates given to published members, central Paris.
pub const MOCK_LATITUDE: f64 = 48.8566;
pub const MOCK_LONGITUDE: f64 = 2.3522;

/// SHA-256 hex digest of the normalized email, as stored in `email_hash`.
pub fn email_hash(email: &str) -> String {
    hex::encode(Sha256::digest(email.trim().to_lowercase().as_bytes()))
}

impl TestContext {
    pub fn member<'a>(&'a mut self) -> MemberFixtures<'a> {
        MemberFixtures { setup: self }
    }
}

pub struct MemberFixtures<'a> {
    setup: &'a mut TestContext,
}

impl<'a> MemberFixtures<'a> {
    pub async fn insert_mock_category(
        &self,
        name: &str,
    ) -> Result<entity::learnybox_member_category::Model, TestError> {
        Ok(entity::prelude::LearnyboxMemberCategory::insert(
            entity::learnybox_member_category::ActiveModel {
                name: ActiveValue::Set(name.to_string()),
                created_at: ActiveValue::Set(Utc::now().naive_utc()),
                ..Default::default()
            },
        )
        .exec_with_returning(&self.setup.db)
        .await?)
    }

    /// Inserts a draft member named `Member {external_id}` without coordinates.
    pub async fn insert_mock_member(
        &self,
        external_id: i64,
        email: &str,
    ) -> Result<entity::learnybox_member::Model, TestError> {
        self.insert_member(
            external_id,
            email,
            RegistrationStatus::Draft,
            None,
            None,
        )
        .await
    }

    /// Inserts a published member located at [`MOCK_LATITUDE`], [`MOCK_LONGITUDE`].
    pub async fn insert_published_member(
        &self,
        external_id: i64,
        email: &str,
        category_id: Option<i32>,
    ) -> Result<entity::learnybox_member::Model, TestError> {
        self.insert_member(
            external_id,
            email,
            RegistrationStatus::Published,
            category_id,
            Some((MOCK_LATITUDE, MOCK_LONGITUDE)),
        )
        .await
    }

    async fn insert_member(
        &self,
        external_id: i64,
        email: &str,
        registration_status: RegistrationStatus,
        category_id: Option<i32>,
        coordinates: Option<(f64, f64)>,
    ) -> Result<entity::learnybox_member::Model, TestError> {
        let published = registration_status == RegistrationStatus::Published;

        Ok(
            entity::prelude::LearnyboxMember::insert(entity::learnybox_member::ActiveModel {
                external_id: ActiveValue::Set(external_id),
                email: ActiveValue::Set(email.to_string()),
                email_hash: ActiveValue::Set(email_hash(email)),
                display_name: ActiveValue::Set(format!("Member {external_id}")),
                category_id: ActiveValue::Set(category_id),
                latitude: ActiveValue::Set(coordinates.map(|(lat, _)| lat)),
                longitude: ActiveValue::Set(coordinates.map(|(_, lng)| lng)),
                address: ActiveValue::Set(None),
                description: ActiveValue::Set(published.then(|| "Hello\nworld".to_string())),
                registration_status: ActiveValue::Set(registration_status),
                created_at: ActiveValue::Set(Utc::now().naive_utc()),
                updated_at: ActiveValue::Set(Utc::now().naive_utc()),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }
}
