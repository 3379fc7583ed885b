//! Tests for the get_registration endpoint.
//!
//! Covers members already stored locally, members materialized from LearnyBox, unknown
//! members and LearnyBox failures.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;
use entity::prelude::LearnyboxMember;
use learnybox_map::{
    model::member::RegistrationPageDto,
    server::{
        controller::members_map::{get_registration, MemberParams},
        model::nonce::RegistrationNonce,
    },
};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};

use super::*;

fn params(member: &str) -> Query<MemberParams> {
    Query(MemberParams {
        member: Some(member.to_string()),
    })
}

/// Tests the form of a member already stored locally.
///
/// Expected: 200 OK with the stored values and a nonce signed for the member
#[tokio::test]
async fn returns_form_of_local_member() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_member_tables()
        .with_mock_member(1, "jane@example.com")
        .build()
        .await?;

    let result = get_registration(
        State(test.into_app_state()),
        params("Jane@Example.com"),
    )
    .await;

    assert!(result.is_ok());
    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);

    let page: RegistrationPageDto = json_body(resp).await;
    assert_eq!(page.form.name, "Member 1");
    assert_eq!(page.form.member, email_hash("jane@example.com"));
    assert!(!page.is_registered);

    let signer = RegistrationNonce::new(TEST_NONCE_SECRET);
    assert!(signer
        .verify(&email_hash("jane@example.com"), &page.nonce, Utc::now())
        .unwrap());

    Ok(())
}

/// Tests the form of a member only known by LearnyBox.
///
/// Expected: 200 OK and a draft member created from the LearnyBox record
#[tokio::test]
async fn creates_member_from_learnybox() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_member_tables()
        .with_token_endpoint(1)
        .with_member_list_endpoint(
            vec![
                factory::training_member(41, "john@example.com"),
                factory::training_member(42, "jane@example.com"),
            ],
            1,
        )
        .with_member_profile_endpoint(
            factory::member_profile(42, "jane@example.com", "Jane Doe"),
            1,
        )
        .build()
        .await?;

    let result = get_registration(
        State(test.into_app_state()),
        params("jane@example.com"),
    )
    .await;

    assert!(result.is_ok());
    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);

    let page: RegistrationPageDto = json_body(resp).await;
    assert_eq!(page.form.name, "Jane Doe");
    assert_eq!(page.form.address, "1 rue de la Paix, 75002 Paris, France");

    let member = LearnyboxMember::find()
        .filter(entity::learnybox_member::Column::ExternalId.eq(42))
        .one(&test.db)
        .await?;
    assert!(member.is_some());

    test.assert_mocks();

    Ok(())
}

/// Tests an email missing from the training.
///
/// Expected: Err converting to 404 Not Found
#[tokio::test]
async fn fails_for_unknown_member() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_member_tables()
        .with_token_endpoint(1)
        .with_member_list_endpoint(vec![factory::training_member(41, "john@example.com")], 1)
        .build()
        .await?;

    let result = get_registration(
        State(test.into_app_state()),
        params("jane@example.com"),
    )
    .await;

    assert!(result.is_err());
    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    test.assert_mocks();

    Ok(())
}

/// Tests a request without member.
///
/// Expected: Err converting to 404 Not Found, LearnyBox never called
#[tokio::test]
async fn fails_without_member() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_member_tables()
        .with_token_endpoint(0)
        .build()
        .await?;

    let result = get_registration(
        State(test.into_app_state()),
        Query(MemberParams { member: None }),
    )
    .await;

    assert!(result.is_err());
    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    test.assert_mocks();

    Ok(())
}

/// Tests a LearnyBox authentication failure.
///
/// Expected: Err converting to 500 Internal Server Error
#[tokio::test]
async fn fails_when_learnybox_unavailable() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_member_tables()
        .with_mock_endpoint(|server| {
            server
                .mock("POST", "/api/v2/oauth/token/")
                .with_status(500)
                .with_body(r#"{"message": "Internal error"}"#)
                .expect(1)
                .create()
        })
        .build()
        .await?;

    let result = get_registration(
        State(test.into_app_state()),
        params("jane@example.com"),
    )
    .await;

    assert!(result.is_err());
    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    test.assert_mocks();

    Ok(())
}
