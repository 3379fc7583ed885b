//! Registration workflow: validation of the registration form and publication of the member.

use std::collections::BTreeMap;

use entity::learnybox_member::RegistrationStatus;
use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::{
    model::{
        geo::GeoCoordinates,
        member::{
            CategoryDto, FormError, RegisterStatus, RegistrationFormDto, RegistrationPageDto,
            RegistrationRequest,
        },
    },
    server::{
        data::{category::CategoryRepository, member::MemberRepository},
        error::{member::MemberError, Error},
        model::{
            db::{CategoryModel, MemberModel},
            registration::{RegistrationOutcome, ValidRegistration},
        },
        util::html::sanitize_html,
    },
};

/// Service handling the registration form of a member.
pub struct RegistrationService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> RegistrationService<'a> {
    /// Creates a new instance of [`RegistrationService`].
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Builds the registration page of a member.
    ///
    /// # Arguments
    /// - `member` - Member the form belongs to
    /// - `form` - A rejected submission to show again, or `None` to prefill the form from the
    ///   stored member
    /// - `nonce` - Nonce the submission must carry
    /// - `consent_text` - Raw consent HTML, sanitized here
    pub async fn get_registration_page(
        &self,
        member: &MemberModel,
        form: Option<RegistrationFormDto>,
        nonce: String,
        consent_text: &str,
    ) -> Result<RegistrationPageDto, Error> {
        let categories = CategoryRepository::new(self.db).get_all().await?;

        Ok(RegistrationPageDto {
            form: form.unwrap_or_else(|| form_from_member(member)),
            categories: categories
                .into_iter()
                .map(|category| CategoryDto {
                    id: category.id,
                    name: category.name,
                })
                .collect(),
            consent_text: sanitize_html(consent_text),
            nonce,
            is_registered: member.registration_status == RegistrationStatus::Published,
        })
    }

    /// Validates a submission against the current categories and applies it.
    ///
    /// See [`RegistrationService::validate_and_apply`].
    pub async fn submit(
        &self,
        member: MemberModel,
        request: &RegistrationRequest,
    ) -> Result<RegistrationOutcome, Error> {
        let categories = CategoryRepository::new(self.db).get_all().await?;

        self.validate_and_apply(member, request, &categories).await
    }

    /// Validates a submission and, when valid, publishes the member with its values.
    ///
    /// The member is left untouched when validation fails. Otherwise its fields and then its
    /// category are written in a single transaction.
    ///
    /// # Returns
    /// - `Ok(RegistrationOutcome::Applied)` - Member published, `created` when it was a draft
    ///   and `updated` when it was already published
    /// - `Ok(RegistrationOutcome::Rejected)` - Submitted values with the field errors
    /// - `Err(Error::MemberError)` - The member was deleted meanwhile
    /// - `Err(Error::DbErr)` - Database operation failed, nothing was written
    pub async fn validate_and_apply(
        &self,
        member: MemberModel,
        request: &RegistrationRequest,
        categories: &[CategoryModel],
    ) -> Result<RegistrationOutcome, Error> {
        let registration = match validate(request, categories) {
            Ok(registration) => registration,
            Err(form) => return Ok(RegistrationOutcome::Rejected(form)),
        };

        let status = match member.registration_status {
            RegistrationStatus::Draft => RegisterStatus::Created,
            RegistrationStatus::Published => RegisterStatus::Updated,
        };

        let txn = self.db.begin().await?;
        let member_repo = MemberRepository::new(&txn);

        member_repo
            .apply_registration(member.id, &registration)
            .await?
            .ok_or_else(|| MemberError::NotFound(member.email_hash.clone()))?;

        let member = member_repo
            .set_category(member.id, registration.category_id)
            .await?
            .ok_or_else(|| MemberError::NotFound(member.email_hash.clone()))?;

        txn.commit().await?;

        Ok(RegistrationOutcome::Applied { member, status })
    }
}

/// Validates a registration form.
///
/// # Returns
/// - `Ok(ValidRegistration)` - Normalized values ready to be stored
/// - `Err(RegistrationFormDto)` - Submitted values, unchanged, with an error per rejected field
pub fn validate(
    request: &RegistrationRequest,
    categories: &[CategoryModel],
) -> Result<ValidRegistration, RegistrationFormDto> {
    let mut errors = BTreeMap::new();

    let display_name = request.name.trim();
    if display_name.is_empty() {
        errors.insert("name".to_string(), FormError::Required);
    }

    // Categories only become mandatory once an administrator created some.
    let category_id = if categories.is_empty() {
        None
    } else {
        match parse_category(&request.category, categories) {
            Ok(category_id) => Some(category_id),
            Err(error) => {
                errors.insert("category".to_string(), error);
                None
            }
        }
    };

    let coordinates = if request.geo_coordinates.trim().is_empty() {
        errors.insert("geo_coordinates".to_string(), FormError::Required);
        None
    } else {
        let coordinates = GeoCoordinates::parse(&request.geo_coordinates);
        if coordinates.is_none() {
            errors.insert("geo_coordinates".to_string(), FormError::Invalid);
        }
        coordinates
    };

    let consent = request
        .consent
        .as_deref()
        .is_some_and(|consent| !consent.trim().is_empty());
    if !consent {
        errors.insert("consent".to_string(), FormError::Required);
    }

    match coordinates {
        Some(coordinates) if errors.is_empty() => {
            let address = request.address.trim();

            Ok(ValidRegistration {
                display_name: display_name.to_string(),
                category_id,
                coordinates,
                address: (!address.is_empty()).then(|| address.to_string()),
                description: sanitize_html(request.description.trim()),
            })
        }
        _ => Err(RegistrationFormDto {
            member: request.member.clone(),
            name: request.name.clone(),
            category: request.category.clone(),
            geo_coordinates: request.geo_coordinates.clone(),
            address: request.address.clone(),
            description: request.description.clone(),
            consent,
            errors,
        }),
    }
}

fn parse_category(input: &str, categories: &[CategoryModel]) -> Result<i32, FormError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(FormError::Required);
    }

    let category_id: i32 = input.parse().map_err(|_| FormError::Invalid)?;

    categories
        .iter()
        .any(|category| category.id == category_id)
        .then_some(category_id)
        .ok_or(FormError::Invalid)
}

/// Registration form prefilled with the stored values of a member.
pub fn form_from_member(member: &MemberModel) -> RegistrationFormDto {
    let geo_coordinates = match (member.latitude, member.longitude) {
        (Some(latitude), Some(longitude)) => GeoCoordinates::new(latitude, longitude).to_string(),
        _ => String::new(),
    };

    RegistrationFormDto {
        member: member.email_hash.clone(),
        name: member.display_name.clone(),
        category: member
            .category_id
            .map(|category_id| category_id.to_string())
            .unwrap_or_default(),
        geo_coordinates,
        address: member.address.clone().unwrap_or_default(),
        description: member.description.clone().unwrap_or_default(),
        consent: member.registration_status == RegistrationStatus::Published,
        errors: BTreeMap::new(),
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use crate::{model::member::RegistrationRequest, server::model::db::CategoryModel};

    fn category(id: i32, name: &str) -> CategoryModel {
        CategoryModel {
            id,
            name: name.to_string(),
            created_at: Utc::now().naive_utc(),
        }
    }

    fn request() -> RegistrationRequest {
        RegistrationRequest {
            member: "jane@example.com".to_string(),
            name: " Jane Doe ".to_string(),
            category: "1".to_string(),
            geo_coordinates: "37.422, -122.084".to_string(),
            address: " Mountain View ".to_string(),
            description: "Hello <script>alert(1)</script><b>world</b>".to_string(),
            consent: Some("on".to_string()),
            nonce: "nonce".to_string(),
        }
    }

    mod validate {
        use crate::{
            model::{geo::GeoCoordinates, member::FormError},
            server::service::registration::validate,
        };

        use super::{category, request};

        /// Expect normalized values for a complete submission
        #[test]
        fn accepts_valid_submission() {
            let result = validate(&request(), &[category(1, "Coaches")]);

            let registration = result.unwrap();
            assert_eq!(registration.display_name, "Jane Doe");
            assert_eq!(registration.category_id, Some(1));
            assert_eq!(registration.coordinates, GeoCoordinates::new(37.422, -122.084));
            assert_eq!(registration.address.as_deref(), Some("Mountain View"));
            assert_eq!(registration.description, "Hello <b>world</b>");
        }

        /// Expect a name error and the submitted values kept verbatim
        #[test]
        fn requires_name() {
            let mut request = request();
            request.name = "   ".to_string();

            let form = validate(&request, &[category(1, "Coaches")]).unwrap_err();

            assert_eq!(form.errors.get("name"), Some(&FormError::Required));
            assert_eq!(form.errors.len(), 1);
            assert_eq!(form.name, "   ");
            assert_eq!(form.description, request.description);
            assert!(form.consent);
        }

        /// Expect the category to be optional while no categories exist
        #[test]
        fn ignores_category_without_categories() {
            let mut request = request();
            request.category = String::new();

            let registration = validate(&request, &[]).unwrap();

            assert_eq!(registration.category_id, None);
        }

        /// Expect a missing category to be required once categories exist
        #[test]
        fn requires_category_when_categories_exist() {
            let mut request = request();
            request.category = String::new();

            let form = validate(&request, &[category(1, "Coaches")]).unwrap_err();

            assert_eq!(form.errors.get("category"), Some(&FormError::Required));
        }

        /// Expect unknown and non-numeric categories to be invalid
        #[test]
        fn rejects_unknown_category() {
            for input in ["2", "coaches"] {
                let mut request = request();
                request.category = input.to_string();

                let form = validate(&request, &[category(1, "Coaches")]).unwrap_err();

                assert_eq!(form.errors.get("category"), Some(&FormError::Invalid));
            }
        }

        /// Expect zero, malformed and missing coordinates to be rejected
        #[test]
        fn rejects_invalid_coordinates() {
            for (input, error) in [
                ("0, 2.35", FormError::Invalid),
                ("48.85, 0", FormError::Invalid),
                ("48.85", FormError::Invalid),
                ("north, south", FormError::Invalid),
                (" ", FormError::Required),
            ] {
                let mut request = request();
                request.geo_coordinates = input.to_string();

                let form = validate(&request, &[]).unwrap_err();

                assert_eq!(form.errors.get("geo_coordinates"), Some(&error), "{input:?}");
                assert_eq!(form.geo_coordinates, input);
            }
        }

        /// Expect consent to be required
        #[test]
        fn requires_consent() {
            let mut request = request();
            request.consent = None;

            let form = validate(&request, &[]).unwrap_err();

            assert_eq!(form.errors.get("consent"), Some(&FormError::Required));
            assert!(!form.consent);
        }
    }

    mod validate_and_apply {
        use entity::learnybox_member::RegistrationStatus;
        use learnybox_map_test_utils::prelude::*;

        use crate::{
            model::member::{FormError, RegisterStatus},
            server::{
                data::member::MemberRepository, model::registration::RegistrationOutcome,
                service::registration::RegistrationService,
            },
        };

        use super::request;

        /// Tests that a draft member is published with the submitted values.
        ///
        /// Expected: Ok(Applied) with status `created`
        #[tokio::test]
        async fn publishes_draft_member() -> Result<(), TestError> {
            let mut test = TestBuilder::new().with_member_tables().build().await?;
            let category = test.member().insert_mock_category("Coaches").await?;
            let member = test.member().insert_mock_member(42, "jane@example.com").await?;

            let service = RegistrationService::new(&test.db);
            let result = service
                .validate_and_apply(member, &request(), &[category.clone()])
                .await;

            assert!(result.is_ok(), "Error: {:?}", result);
            let RegistrationOutcome::Applied { member, status } = result.unwrap() else {
                panic!("Expected the registration to be applied");
            };
            assert_eq!(status, RegisterStatus::Created);
            assert_eq!(member.display_name, "Jane Doe");
            assert_eq!(member.category_id, Some(category.id));
            assert_eq!(member.latitude, Some(37.422));
            assert_eq!(member.longitude, Some(-122.084));
            assert_eq!(member.registration_status, RegistrationStatus::Published);

            Ok(())
        }

        /// Tests that a published member submitting again stays published.
        ///
        /// Expected: Ok(Applied) with status `updated`
        #[tokio::test]
        async fn updates_published_member() -> Result<(), TestError> {
            let mut test = TestBuilder::new().with_member_tables().build().await?;
            let member = test
                .member()
                .insert_published_member(42, "jane@example.com", None)
                .await?;

            let service = RegistrationService::new(&test.db);
            let result = service.validate_and_apply(member, &request(), &[]).await;

            assert!(result.is_ok(), "Error: {:?}", result);
            let RegistrationOutcome::Applied { member, status } = result.unwrap() else {
                panic!("Expected the registration to be applied");
            };
            assert_eq!(status, RegisterStatus::Updated);
            assert_eq!(member.display_name, "Jane Doe");
            assert_eq!(member.registration_status, RegistrationStatus::Published);

            Ok(())
        }

        /// Tests that a rejected submission leaves the member untouched.
        ///
        /// Expected: Ok(Rejected) and the stored display name unchanged
        #[tokio::test]
        async fn leaves_member_unchanged_on_error() -> Result<(), TestError> {
            let mut test = TestBuilder::new().with_member_tables().build().await?;
            let member = test.member().insert_mock_member(42, "jane@example.com").await?;
            let mut request = request();
            request.name = String::new();

            let service = RegistrationService::new(&test.db);
            let result = service.validate_and_apply(member, &request, &[]).await;

            assert!(result.is_ok(), "Error: {:?}", result);
            let RegistrationOutcome::Rejected(form) = result.unwrap() else {
                panic!("Expected the registration to be rejected");
            };
            assert_eq!(form.errors.get("name"), Some(&FormError::Required));

            let stored = MemberRepository::new(&test.db)
                .find_by_external_id(42)
                .await?
                .expect("Member should exist");
            assert_eq!(stored.display_name, "Member 42");
            assert_eq!(stored.registration_status, RegistrationStatus::Draft);

            Ok(())
        }
    }

    mod get_registration_page {
        use learnybox_map_test_utils::prelude::*;

        use crate::server::service::registration::RegistrationService;

        /// Tests that the page is prefilled from the stored member.
        ///
        /// Expected: Ok(page) with the member hash, coordinates and categories
        #[tokio::test]
        async fn prefills_form_from_member() -> Result<(), TestError> {
            let mut test = TestBuilder::new()
                .with_member_tables()
                .with_mock_category("Coaches")
                .build()
                .await?;
            let member = test
                .member()
                .insert_published_member(42, "jane@example.com", Some(1))
                .await?;

            let service = RegistrationService::new(&test.db);
            let result = service
                .get_registration_page(
                    &member,
                    None,
                    "nonce".to_string(),
                    "I agree<script>alert(1)</script>",
                )
                .await;

            assert!(result.is_ok(), "Error: {:?}", result);
            let page = result.unwrap();
            assert_eq!(page.form.member, email_hash("jane@example.com"));
            assert_eq!(page.form.category, "1");
            assert_eq!(
                page.form.geo_coordinates,
                format!("{MOCK_LATITUDE}, {MOCK_LONGITUDE}")
            );
            assert!(page.form.consent);
            assert!(page.is_registered);
            assert_eq!(page.categories.len(), 1);
            assert_eq!(page.consent_text, "I agree");
            assert_eq!(page.nonce, "nonce");

            Ok(())
        }
    }
}
