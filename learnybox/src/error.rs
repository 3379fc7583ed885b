use thiserror::Error;

/// HTTP status LearnyBox answers with when the bearer token is expired or revoked.
pub const TOKEN_EXPIRED_STATUS: u16 = 498;

#[derive(Error, Debug)]
pub enum Error {
    /// The API answered with a non-2xx status.
    ///
    /// `message` is the `message` field of the response body when present, otherwise the
    /// HTTP reason phrase.
    #[error("LearnyBox API request failed with status {code}: {message}")]
    Api { code: u16, message: String },
    /// No LearnyBox user exists for the given identifier.
    #[error("LearnyBox user {0} does not exist")]
    MemberNotFound(i64),
    #[error("Invalid LearnyBox client configuration: {0}")]
    Config(String),
    /// The transient store backing the token and page caches failed.
    #[error("Transient store error: {0}")]
    Store(String),
    #[error(transparent)]
    Reqwest(#[from] reqwest::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Returns true for the status LearnyBox uses to signal an expired access token.
    pub fn is_token_expired(&self) -> bool {
        matches!(self, Self::Api { code, .. } if *code == TOKEN_EXPIRED_STATUS)
    }
}
