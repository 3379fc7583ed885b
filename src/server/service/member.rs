//! Resolution of LearnyBox members into local members.
//!
//! A member is identified by email the first time it reaches the map. Unknown emails are
//! looked up in the member list of the configured training, and the matching user record is
//! stored locally as a draft so later requests never leave the database.

use dioxus_logger::tracing;
use futures::TryStreamExt;
use sea_orm::DatabaseConnection;

use crate::server::{
    data::member::MemberRepository,
    error::Error,
    model::db::MemberModel,
    util::email::{hash_email, identifier_hash, is_email, normalize_email},
};

/// Service synchronizing members between LearnyBox and the local database.
pub struct MemberSyncService<'a> {
    db: &'a DatabaseConnection,
    learnybox_client: &'a learnybox::Client,
    training_id: u64,
}

impl<'a> MemberSyncService<'a> {
    /// Creates a new instance of [`MemberSyncService`].
    ///
    /// # Arguments
    /// - `db` - Database connection reference
    /// - `learnybox_client` - LearnyBox API client
    /// - `training_id` - Training whose members may be resolved
    pub fn new(
        db: &'a DatabaseConnection,
        learnybox_client: &'a learnybox::Client,
        training_id: u64,
    ) -> Self {
        Self {
            db,
            learnybox_client,
            training_id,
        }
    }

    /// Resolves an email into a member.
    ///
    /// Members already stored are returned without any API call. Otherwise the training
    /// member list is scanned for the email; on a match the full LearnyBox user record is
    /// fetched and upserted by its LearnyBox user ID.
    ///
    /// # Returns
    /// - `Ok(Some(MemberModel))` - Member found locally or on LearnyBox
    /// - `Ok(None)` - The email is not a member of the training
    /// - `Err(Error::LearnyBoxError)` - LearnyBox request failed
    /// - `Err(Error::DbErr)` - Database operation failed
    pub async fn resolve(&self, email: &str) -> Result<Option<MemberModel>, Error> {
        let member_repo = MemberRepository::new(self.db);

        if let Some(member) = member_repo.find_by_email_hash(&hash_email(email)).await? {
            return Ok(Some(member));
        }

        let Some(external_id) = self.find_external_id(email).await? else {
            tracing::debug!(
                training_id = self.training_id,
                "Email is not a member of the LearnyBox training"
            );

            return Ok(None);
        };

        let profile = self
            .learnybox_client
            .member()
            .get_member_by_external_id(external_id)
            .await?;

        let member = member_repo.upsert_from_profile(profile).await?;

        tracing::debug!(
            member_id = member.id,
            external_id = member.external_id,
            "Synchronized member from LearnyBox"
        );

        Ok(Some(member))
    }

    /// Resolves an identifier from a URL or form, either an email or an email hash.
    ///
    /// Emails go through [`MemberSyncService::resolve`]; hashes are only looked up locally.
    pub async fn resolve_identifier(&self, identifier: &str) -> Result<Option<MemberModel>, Error> {
        let identifier = identifier.trim();
        if identifier.is_empty() {
            return Ok(None);
        }

        if is_email(identifier) {
            return self.resolve(identifier).await;
        }

        let member_repo = MemberRepository::new(self.db);

        Ok(member_repo
            .find_by_email_hash(&identifier_hash(identifier))
            .await?)
    }

    /// Scans the training member list for `email` and returns its LearnyBox user ID.
    ///
    /// The scan stops at the first match, so pages after it are not requested.
    async fn find_external_id(&self, email: &str) -> Result<Option<i64>, Error> {
        let email = normalize_email(email);

        let mut members = self
            .learnybox_client
            .member()
            .get_all_members_by_training_id(self.training_id);

        while let Some(entry) = members.try_next().await? {
            if normalize_email(&entry.user.email) == email {
                return Ok(Some(entry.user.user_id));
            }
        }

        Ok(None)
    }
}

#[cfg(test)]
mod tests {

    mod resolve {
        use entity::learnybox_member::RegistrationStatus;
        use learnybox_map_test_utils::prelude::*;

        use crate::server::{error::Error, service::member::MemberSyncService};

        /// Tests that a stored member is returned without calling LearnyBox.
        ///
        /// Expected: Ok(Some(member)) and no request to the token endpoint
        #[tokio::test]
        async fn returns_local_member_without_api_calls() -> Result<(), TestError> {
            let test = TestBuilder::new()
                .with_member_tables()
                .with_mock_member(42, "jane@example.com")
                .with_token_endpoint(0)
                .build()
                .await?;

            let service =
                MemberSyncService::new(&test.db, &test.learnybox_client, TEST_TRAINING_ID);
            let result = service.resolve("Jane@Example.com").await;

            assert!(result.is_ok(), "Error: {:?}", result);
            assert_eq!(result.unwrap().map(|m| m.external_id), Some(42));
            test.assert_mocks();

            Ok(())
        }

        /// Tests that an unknown email found in the training is stored as a draft.
        ///
        /// Expected: Ok(Some(member)) built from the LearnyBox user record
        #[tokio::test]
        async fn creates_draft_from_learnybox() -> Result<(), TestError> {
            let test = TestBuilder::new()
                .with_member_tables()
                .with_token_endpoint(1)
                .with_member_list_endpoint(
                    vec![
                        factory::training_member(7, "john@example.com"),
                        factory::training_member(42, "Jane@Example.com"),
                    ],
                    1,
                )
                .with_member_profile_endpoint(
                    factory::member_profile(42, "jane@example.com", "Jane Doe"),
                    1,
                )
                .build()
                .await?;

            let service =
                MemberSyncService::new(&test.db, &test.learnybox_client, TEST_TRAINING_ID);
            let result = service.resolve("jane@example.com").await;

            assert!(result.is_ok(), "Error: {:?}", result);
            let member = result.unwrap().expect("Member should be resolved");
            assert_eq!(member.external_id, 42);
            assert_eq!(member.email, "jane@example.com");
            assert_eq!(member.email_hash, email_hash("jane@example.com"));
            assert_eq!(member.display_name, "Jane Doe");
            assert_eq!(
                member.address.as_deref(),
                Some("1 rue de la Paix, 75002 Paris, France")
            );
            assert_eq!(member.registration_status, RegistrationStatus::Draft);
            test.assert_mocks();

            Ok(())
        }

        /// Tests that resolving the same email twice only scans LearnyBox once.
        ///
        /// Expected: Ok(Some(member)) twice with the same external ID
        #[tokio::test]
        async fn scans_learnybox_once() -> Result<(), TestError> {
            let test = TestBuilder::new()
                .with_member_tables()
                .with_token_endpoint(1)
                .with_member_list_endpoint(vec![factory::training_member(42, "jane@example.com")], 1)
                .with_member_profile_endpoint(
                    factory::member_profile(42, "jane@example.com", "Jane Doe"),
                    1,
                )
                .build()
                .await?;

            let service =
                MemberSyncService::new(&test.db, &test.learnybox_client, TEST_TRAINING_ID);
            let first = service.resolve("jane@example.com").await;
            let second = service.resolve("jane@example.com").await;

            assert!(first.is_ok(), "Error: {:?}", first);
            assert!(second.is_ok(), "Error: {:?}", second);
            let first = first.unwrap().expect("Member should be resolved");
            let second = second.unwrap().expect("Member should be resolved");
            assert_eq!(first.external_id, second.external_id);
            assert_eq!(first.id, second.id);
            test.assert_mocks();

            Ok(())
        }

        /// Tests that an email absent from the training resolves to nothing.
        ///
        /// Expected: Ok(None) without requesting any user record
        #[tokio::test]
        async fn returns_none_for_unknown_email() -> Result<(), TestError> {
            let test = TestBuilder::new()
                .with_member_tables()
                .with_token_endpoint(1)
                .with_member_list_endpoint(vec![factory::training_member(7, "john@example.com")], 1)
                .with_member_profile_endpoint(
                    factory::member_profile(7, "john@example.com", "John Doe"),
                    0,
                )
                .build()
                .await?;

            let service =
                MemberSyncService::new(&test.db, &test.learnybox_client, TEST_TRAINING_ID);
            let result = service.resolve("jane@example.com").await;

            assert!(result.is_ok(), "Error: {:?}", result);
            assert!(result.unwrap().is_none());
            test.assert_mocks();

            Ok(())
        }

        /// Tests that LearnyBox failures are propagated.
        ///
        /// Expected: Err(Error::LearnyBoxError) carrying the API status
        #[tokio::test]
        async fn propagates_learnybox_errors() -> Result<(), TestError> {
            let test = TestBuilder::new()
                .with_member_tables()
                .with_mock_endpoint(|server| {
                    server
                        .mock("POST", "/api/v2/oauth/token/")
                        .with_status(500)
                        .with_header("content-type", "application/json")
                        .with_body(r#"{"message":"Maintenance"}"#)
                        .expect(1)
                        .create()
                })
                .build()
                .await?;

            let service =
                MemberSyncService::new(&test.db, &test.learnybox_client, TEST_TRAINING_ID);
            let result = service.resolve("jane@example.com").await;

            assert!(matches!(
                result,
                Err(Error::LearnyBoxError(learnybox::Error::Api { code: 500, .. }))
            ));
            test.assert_mocks();

            Ok(())
        }
    }

    mod resolve_identifier {
        use learnybox_map_test_utils::prelude::*;

        use crate::server::service::member::MemberSyncService;

        /// Tests that an email hash is resolved from the database only.
        ///
        /// Expected: Ok(Some(member))
        #[tokio::test]
        async fn resolves_hash_locally() -> Result<(), TestError> {
            let test = TestBuilder::new()
                .with_member_tables()
                .with_mock_member(42, "jane@example.com")
                .with_token_endpoint(0)
                .build()
                .await?;

            let service =
                MemberSyncService::new(&test.db, &test.learnybox_client, TEST_TRAINING_ID);
            let result = service
                .resolve_identifier(&email_hash("jane@example.com"))
                .await;

            assert!(result.is_ok(), "Error: {:?}", result);
            assert_eq!(result.unwrap().map(|m| m.external_id), Some(42));
            test.assert_mocks();

            Ok(())
        }

        /// Tests that an unknown hash never triggers a LearnyBox scan.
        ///
        /// Expected: Ok(None)
        #[tokio::test]
        async fn returns_none_for_unknown_hash() -> Result<(), TestError> {
            let test = TestBuilder::new()
                .with_member_tables()
                .with_token_endpoint(0)
                .build()
                .await?;

            let service =
                MemberSyncService::new(&test.db, &test.learnybox_client, TEST_TRAINING_ID);
            let result = service
                .resolve_identifier(&email_hash("jane@example.com"))
                .await;

            assert!(result.is_ok(), "Error: {:?}", result);
            assert!(result.unwrap().is_none());
            test.assert_mocks();

            Ok(())
        }

        /// Tests that an email identifier is synchronized from LearnyBox.
        ///
        /// Expected: Ok(Some(member))
        #[tokio::test]
        async fn resolves_email_through_learnybox() -> Result<(), TestError> {
            let test = TestBuilder::new()
                .with_member_tables()
                .with_token_endpoint(1)
                .with_member_list_endpoint(vec![factory::training_member(42, "jane@example.com")], 1)
                .with_member_profile_endpoint(
                    factory::member_profile(42, "jane@example.com", "Jane Doe"),
                    1,
                )
                .build()
                .await?;

            let service =
                MemberSyncService::new(&test.db, &test.learnybox_client, TEST_TRAINING_ID);
            let result = service.resolve_identifier(" jane@example.com ").await;

            assert!(result.is_ok(), "Error: {:?}", result);
            assert_eq!(result.unwrap().map(|m| m.external_id), Some(42));
            test.assert_mocks();

            Ok(())
        }
    }
}
