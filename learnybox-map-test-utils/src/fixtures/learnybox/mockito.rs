//! Mock LearnyBox endpoints.
//!
//! Every route lives under `/api/v2/` on the mock server, mirroring the client's base URL.

use learnybox::{
    member::{MemberProfile, TrainingMember},
    pagination::PAGE_SIZE,
};
use mockito::{Matcher, Mock};
use serde_json::json;

use crate::{
    constant::{TEST_ACCESS_TOKEN, TEST_API_KEY, TEST_REFRESH_TOKEN},
    fixtures::learnybox::LearnyBoxFixtures,
};

impl<'a> LearnyBoxFixtures<'a> {
    /// Creates the token endpoint exchanging the test API key for the test token pair.
    ///
    /// # Arguments
    /// - `expected_requests` - Number of times this endpoint should be called
    pub fn create_token_endpoint(&mut self, expected_requests: usize) -> Mock {
        self.setup
            .server
            .mock("POST", "/api/v2/oauth/token/")
            .match_header("x-api-key", TEST_API_KEY)
            .match_body(Matcher::UrlEncoded(
                "grant_type".into(),
                "access_token".into(),
            ))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "data": {
                        "access_token": TEST_ACCESS_TOKEN,
                        "refresh_token": TEST_REFRESH_TOKEN,
                        "expires_in": 3600
                    }
                })
                .to_string(),
            )
            .expect(expected_requests)
            .create()
    }

    /// Creates the member list of a training.
    ///
    /// Members are split into pages of [`PAGE_SIZE`], followed by the empty page ending the
    /// scan. Each member page expects `expected_requests` calls. The empty page expects at most
    /// that many, since a scan stopping at a match never reaches it.
    ///
    /// # Returns
    /// - `Vec<Mock>` - One mock per page, the empty page last
    pub fn create_member_list_endpoint(
        &mut self,
        training_id: u64,
        members: Vec<TrainingMember>,
        expected_requests: usize,
    ) -> Vec<Mock> {
        let path = format!("/api/v2/formations/{training_id}/membres/");

        let mut pages: Vec<&[TrainingMember]> = members.chunks(PAGE_SIZE).collect();
        pages.push(&[]);

        let last_page = pages.len() - 1;

        pages
            .into_iter()
            .enumerate()
            .map(|(index, page)| {
                let mock = self
                    .setup
                    .server
                    .mock("GET", path.as_str())
                    .match_query(Matcher::AllOf(vec![
                        Matcher::UrlEncoded("limit".into(), PAGE_SIZE.to_string()),
                        Matcher::UrlEncoded("offset".into(), (index * PAGE_SIZE).to_string()),
                    ]))
                    .match_header("authorization", format!("Bearer {TEST_ACCESS_TOKEN}").as_str())
                    .with_status(200)
                    .with_header("content-type", "application/json")
                    .with_body(json!({ "data": page }).to_string());

                if index == last_page {
                    mock.expect_at_most(expected_requests).create()
                } else {
                    mock.expect(expected_requests).create()
                }
            })
            .collect()
    }

    /// Creates the user record endpoint of `profile`.
    ///
    /// # Arguments
    /// - `profile` - Record returned at `/api/v2/users/{user_id}/`
    /// - `expected_requests` - Number of times this endpoint should be called
    pub fn create_member_profile_endpoint(
        &mut self,
        profile: MemberProfile,
        expected_requests: usize,
    ) -> Mock {
        let path = format!("/api/v2/users/{}/", profile.user_id);

        self.setup
            .server
            .mock("GET", path.as_str())
            .match_header("authorization", format!("Bearer {TEST_ACCESS_TOKEN}").as_str())
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!({ "data": profile }).to_string())
            .expect(expected_requests)
            .create()
    }
}
