//! Access token lifecycle.
//!
//! LearnyBox issues an access/refresh token pair in exchange for the API key. The pair is
//! cached in the transient store for as long as the server says it is valid, and both tokens
//! are replaced together whenever a new pair is obtained.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    client::{handle_response, Client, Envelope},
    error::Error,
};

/// Transient store key of the cached token pair.
pub const AUTH_CACHE_KEY: &str = "learnyboxmap_api_auth";

const TOKEN_ROUTE: &str = "oauth/token/";

/// Cached token pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthToken {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_at: DateTime<Utc>,
}

impl AuthToken {
    /// A token is never used at or past its expiry instant.
    pub fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now()
    }
}

#[derive(Debug, Deserialize)]
struct TokenGrant {
    access_token: String,
    refresh_token: String,
    expires_in: i64,
}

/// Authentication endpoints, see [`Client::auth`].
pub struct AuthApi<'a> {
    client: &'a Client,
}

impl<'a> AuthApi<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Returns a usable access token, from the cache when possible.
    pub async fn access_token(&self) -> Result<String, Error> {
        match self.cached_token().await? {
            Some(token) if !token.is_expired() => Ok(token.access_token),
            _ => self.authenticate().await,
        }
    }

    /// Exchanges the API key for a new token pair.
    pub async fn authenticate(&self) -> Result<String, Error> {
        tracing::debug!("Requesting LearnyBox access token");

        let response = self
            .client
            .http()
            .post(self.client.url(TOKEN_ROUTE))
            .header("X-API-Key", self.client.api_key())
            .form(&[("grant_type", "access_token")])
            .send()
            .await?;

        self.store_grant(handle_response(response).await?).await
    }

    /// Exchanges the cached refresh token for a new token pair.
    ///
    /// Falls back to [`AuthApi::authenticate`] when no refresh token is cached anymore.
    pub async fn refresh(&self) -> Result<String, Error> {
        let Some(token) = self.cached_token().await? else {
            return self.authenticate().await;
        };

        tracing::debug!("Refreshing LearnyBox access token");

        let response = self
            .client
            .http()
            .post(self.client.url(TOKEN_ROUTE))
            .form(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", token.refresh_token.as_str()),
            ])
            .send()
            .await?;

        self.store_grant(handle_response(response).await?).await
    }

    /// Returns the cached token pair, expired or not.
    pub async fn cached_token(&self) -> Result<Option<AuthToken>, Error> {
        let Some(raw) = self.client.store().get(AUTH_CACHE_KEY).await? else {
            return Ok(None);
        };

        match serde_json::from_str(&raw) {
            Ok(token) => Ok(Some(token)),
            Err(e) => {
                tracing::warn!("Discarding unreadable cached LearnyBox token: {}", e);

                Ok(None)
            }
        }
    }

    async fn store_grant(&self, grant: Envelope<TokenGrant>) -> Result<String, Error> {
        let grant = grant.data;
        let expires_in = grant.expires_in.max(0);

        let token = AuthToken {
            access_token: grant.access_token,
            refresh_token: grant.refresh_token,
            expires_at: Utc::now() + chrono::Duration::seconds(expires_in),
        };

        self.client
            .store()
            .set(
                AUTH_CACHE_KEY,
                serde_json::to_string(&token)?,
                Duration::from_secs(expires_in as u64),
            )
            .await?;

        Ok(token.access_token)
    }
}
