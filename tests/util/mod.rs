//! Helpers shared by the controller tests.

use axum::{body::to_bytes, response::Response};
use learnybox_map::server::model::app::AppState;
use learnybox_map_test_utils::TestContext;
use serde::de::DeserializeOwned;

/// Extension trait creating the application state from a [`TestContext`]
pub trait TestContextExt {
    fn into_app_state(&self) -> AppState;
}

impl TestContextExt for TestContext {
    fn into_app_state(&self) -> AppState {
        self.to_app_state::<AppState>()
    }
}

/// Reads a JSON response body.
pub async fn json_body<T: DeserializeOwned>(resp: Response) -> T {
    let bytes = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("Failed to read response body");

    serde_json::from_slice(&bytes).expect("Failed to parse response body")
}
