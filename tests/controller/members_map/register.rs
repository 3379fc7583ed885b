//! Tests for the register endpoint.
//!
//! Covers nonce validation, publication of draft and already published members, and the
//! re-rendered form of invalid submissions. No session is involved: the nonce alone proves the
//! form was served by this server.

use axum::{
    extract::{Query, State},
    http::{header::LOCATION, StatusCode},
    response::IntoResponse,
    Form,
};
use chrono::{TimeDelta, Utc};
use entity::{learnybox_member::RegistrationStatus, prelude::LearnyboxMember};
use learnybox_map::{
    model::member::{FormError, RegistrationPageDto, RegistrationRequest},
    server::{
        controller::members_map::{get_registration, register, MemberParams},
        model::nonce::{RegistrationNonce, NONCE_LIFETIME_SECS},
    },
};
use sea_orm::EntityTrait;

use super::*;

/// Nonce of the registration form of `email` as served now.
fn nonce(email: &str) -> String {
    RegistrationNonce::new(TEST_NONCE_SECRET)
        .issue(&email_hash(email), Utc::now())
        .unwrap()
}

fn request(email: &str) -> RegistrationRequest {
    RegistrationRequest {
        member: email_hash(email),
        name: "Jane Doe".to_string(),
        category: String::new(),
        geo_coordinates: "37.422, -122.084".to_string(),
        address: "1600 Amphitheatre Parkway, Mountain View".to_string(),
        description: "Hello <script>alert(1)</script><strong>world</strong>".to_string(),
        consent: Some("on".to_string()),
        nonce: nonce(email),
    }
}

/// Tests the first valid submission of a draft member.
///
/// Expected: 303 See Other to the map with `register_status=created`, member published
#[tokio::test]
async fn publishes_draft_member() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_member_tables()
        .with_mock_member(1, "jane@example.com")
        .build()
        .await?;

    let result = register(
        State(test.into_app_state()),
        Form(request("jane@example.com")),
    )
    .await;

    assert!(result.is_ok());
    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        resp.headers().get(LOCATION).unwrap().to_str().unwrap(),
        format!(
            "/?member={}&register_status=created",
            email_hash("jane@example.com")
        )
    );

    let member = LearnyboxMember::find().one(&test.db).await?.unwrap();
    assert_eq!(member.registration_status, RegistrationStatus::Published);
    assert_eq!(member.display_name, "Jane Doe");
    assert_eq!(member.latitude, Some(37.422));
    assert_eq!(member.longitude, Some(-122.084));
    assert_eq!(
        member.description.as_deref(),
        Some("Hello <strong>world</strong>")
    );

    Ok(())
}

/// Tests a new submission of an already published member.
///
/// Expected: 303 See Other to the map with `register_status=updated`
#[tokio::test]
async fn updates_published_member() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_member_tables()
        .with_published_member(1, "jane@example.com")
        .build()
        .await?;

    let result = register(
        State(test.into_app_state()),
        Form(request("jane@example.com")),
    )
    .await;

    assert!(result.is_ok());
    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert!(resp
        .headers()
        .get(LOCATION)
        .unwrap()
        .to_str()
        .unwrap()
        .ends_with("register_status=updated"));

    Ok(())
}

/// Tests an invalid submission.
///
/// Expected: 422 Unprocessable Entity with the submitted values, the errors and a new nonce
#[tokio::test]
async fn rejects_invalid_form() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_member_tables()
        .with_mock_category("Coaches")
        .with_mock_member(1, "jane@example.com")
        .build()
        .await?;

    let mut request = request("jane@example.com");
    request.name = "  ".to_string();
    request.geo_coordinates = "0, 2.35".to_string();

    let result = register(
        State(test.into_app_state()),
        Form(request),
    )
    .await;

    assert!(result.is_ok());
    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let page: RegistrationPageDto = json_body(resp).await;
    assert_eq!(page.form.errors.get("name"), Some(&FormError::Required));
    assert_eq!(page.form.errors.get("category"), Some(&FormError::Required));
    assert_eq!(
        page.form.errors.get("geo_coordinates"),
        Some(&FormError::Invalid)
    );
    assert_eq!(page.form.geo_coordinates, "0, 2.35");
    assert_eq!(
        page.form.address,
        "1600 Amphitheatre Parkway, Mountain View"
    );
    let signer = RegistrationNonce::new(TEST_NONCE_SECRET);
    assert!(signer
        .verify(&email_hash("jane@example.com"), &page.nonce, Utc::now())
        .unwrap());

    let member = LearnyboxMember::find().one(&test.db).await?.unwrap();
    assert_eq!(member.registration_status, RegistrationStatus::Draft);
    assert_eq!(member.display_name, "Member 1");

    Ok(())
}

/// Tests a submission with the nonce of a form served by an earlier request.
///
/// The two requests share nothing but the application state, as from a framed page whose
/// cookies the browser withholds.
///
/// Expected: 303 See Other
#[tokio::test]
async fn accepts_nonce_of_served_form() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_member_tables()
        .with_mock_member(1, "jane@example.com")
        .build()
        .await?;

    let resp = get_registration(
        State(test.into_app_state()),
        Query(MemberParams {
            member: Some("jane@example.com".to_string()),
        }),
    )
    .await
    .unwrap()
    .into_response();
    let page: RegistrationPageDto = json_body(resp).await;

    let mut request = request("jane@example.com");
    request.member = page.form.member;
    request.nonce = page.nonce;

    let result = register(State(test.into_app_state()), Form(request)).await;

    assert!(result.is_ok());
    assert_eq!(result.unwrap().into_response().status(), StatusCode::SEE_OTHER);

    Ok(())
}

/// Tests a submission carrying the nonce of another member's form.
///
/// Expected: Err converting to 400 Bad Request, member untouched
#[tokio::test]
async fn fails_for_nonce_of_other_member() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_member_tables()
        .with_mock_member(1, "jane@example.com")
        .with_mock_member(2, "john@example.com")
        .build()
        .await?;

    let mut request = request("jane@example.com");
    request.nonce = nonce("john@example.com");

    let result = register(State(test.into_app_state()), Form(request)).await;

    assert!(result.is_err());
    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let member = LearnyboxMember::find().one(&test.db).await?.unwrap();
    assert_eq!(member.registration_status, RegistrationStatus::Draft);

    Ok(())
}

/// Tests a submission of a form left open longer than the nonce lifetime.
///
/// Expected: Err converting to 400 Bad Request
#[tokio::test]
async fn fails_for_expired_nonce() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_member_tables()
        .with_mock_member(1, "jane@example.com")
        .build()
        .await?;

    let served_at = Utc::now() - TimeDelta::seconds(NONCE_LIFETIME_SECS + 60);
    let mut request = request("jane@example.com");
    request.nonce = RegistrationNonce::new(TEST_NONCE_SECRET)
        .issue(&email_hash("jane@example.com"), served_at)
        .unwrap();

    let result = register(State(test.into_app_state()), Form(request)).await;

    assert!(result.is_err());
    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    Ok(())
}

/// Tests a submission without any nonce.
///
/// Expected: Err converting to 400 Bad Request
#[tokio::test]
async fn fails_without_nonce() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_member_tables()
        .with_mock_member(1, "jane@example.com")
        .build()
        .await?;

    let mut request = request("jane@example.com");
    request.nonce = String::new();

    let result = register(State(test.into_app_state()), Form(request)).await;

    assert!(result.is_err());
    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    Ok(())
}

/// Tests a submission for a member hash unknown locally.
///
/// Expected: Err converting to 404 Not Found without calling LearnyBox
#[tokio::test]
async fn fails_for_unknown_member() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_member_tables()
        .with_token_endpoint(0)
        .build()
        .await?;

    let result = register(
        State(test.into_app_state()),
        Form(request("jane@example.com")),
    )
    .await;

    assert!(result.is_err());
    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    test.assert_mocks();

    Ok(())
}
