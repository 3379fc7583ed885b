//! Constant values shared by every test.
//!
//! None of these are real credentials.

/// User agent of the test LearnyBox client.
pub static TEST_USER_AGENT: &str = "learnybox-map-tests/1.0 (contact@example.com)";

/// API key sent by the test client when requesting a token pair.
pub static TEST_API_KEY: &str = "learnybox_api_key";

/// Access token returned by the mock token endpoint.
pub static TEST_ACCESS_TOKEN: &str = "learnybox_access_token";

/// Refresh token returned by the mock token endpoint.
pub static TEST_REFRESH_TOKEN: &str = "learnybox_refresh_token";

/// Training whose members are listed by the mock member list endpoint.
pub const TEST_TRAINING_ID: u64 = 1;

/// Consent text handed to the application state.
pub static TEST_CONSENT_TEXT: &str = "I agree to appear on the <strong>members map</strong>.";

/// Key the application state signs registration nonces with.
pub static TEST_NONCE_SECRET: &str = "learnybox_map_nonce_secret";
