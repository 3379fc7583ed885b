//! Tests for the get_members_map endpoint.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use learnybox_map::{
    model::member::MembersMapDto,
    server::controller::members_map::{get_members_map, MemberParams},
};

use super::*;

/// Tests the map content with published and draft members.
///
/// Expected: 200 OK listing only the published members, the requesting member flagged
#[tokio::test]
async fn lists_published_members() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_member_tables()
        .with_mock_member(1, "draft@example.com")
        .with_published_member(2, "john@example.com")
        .build()
        .await?;
    let category = test.member().insert_mock_category("Coaches").await?;
    test.member()
        .insert_published_member(3, "jane@example.com", Some(category.id))
        .await?;

    let result = get_members_map(
        State(test.into_app_state()),
        Query(MemberParams {
            member: Some("jane@example.com".to_string()),
        }),
    )
    .await;

    assert!(result.is_ok());
    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);

    let members_map: MembersMapDto = json_body(resp).await;
    assert_eq!(members_map.categories.len(), 1);
    assert_eq!(members_map.members.len(), 2);
    assert_eq!(
        members_map
            .members
            .iter()
            .filter(|member| member.is_current_member)
            .count(),
        1
    );

    Ok(())
}

/// Tests the map content without any member.
///
/// Expected: 200 OK with an empty payload
#[tokio::test]
async fn returns_empty_map() -> Result<(), TestError> {
    let test = TestBuilder::new().with_member_tables().build().await?;

    let result = get_members_map(
        State(test.into_app_state()),
        Query(MemberParams { member: None }),
    )
    .await;

    assert!(result.is_ok());
    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);

    let members_map: MembersMapDto = json_body(resp).await;
    assert_eq!(members_map, MembersMapDto::default());

    Ok(())
}

/// Tests error handling when the member tables are missing.
///
/// Expected: Err converting to 500 Internal Server Error
#[tokio::test]
async fn fails_when_tables_missing() -> Result<(), TestError> {
    let test = TestBuilder::new().build().await?;

    let result = get_members_map(
        State(test.into_app_state()),
        Query(MemberParams { member: None }),
    )
    .await;

    assert!(result.is_err());
    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    Ok(())
}
