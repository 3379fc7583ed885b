//! HTTP client and request plumbing shared by the endpoint groups.

use std::sync::Arc;

use reqwest::{header, Method, StatusCode};
use serde::{de::DeserializeOwned, Deserialize};

use crate::{auth::AuthApi, error::Error, member::MemberApi, store::TransientStore};

/// Path of the API entry point, relative to the platform URL.
pub const API_ENTRYPOINT: &str = "api/v2/";

/// Body shared by every LearnyBox response.
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope<T> {
    pub data: T,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// LearnyBox API client.
///
/// Cheap to clone; clones share the HTTP connection pool and the transient store.
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientRef>,
}

struct ClientRef {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    store: Arc<dyn TransientStore>,
}

impl Client {
    /// Creates a [`ClientBuilder`].
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    /// Authentication endpoints.
    pub fn auth(&self) -> AuthApi<'_> {
        AuthApi::new(self)
    }

    /// Member endpoints.
    pub fn member(&self) -> MemberApi<'_> {
        MemberApi::new(self)
    }

    pub(crate) fn api_key(&self) -> &str {
        &self.inner.api_key
    }

    pub(crate) fn store(&self) -> &dyn TransientStore {
        self.inner.store.as_ref()
    }

    pub(crate) fn url(&self, route: &str) -> String {
        format!("{}{}", self.inner.base_url, route)
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.inner.http
    }

    /// Sends an authenticated GET request and decodes the JSON body.
    ///
    /// An expired token is refreshed and the request replayed once; if the replay is rejected
    /// for the same reason the error is returned as is.
    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        route: &str,
        query: &[(&str, String)],
    ) -> Result<T, Error> {
        match self.send_authorized(Method::GET, route, query).await {
            Err(err) if err.is_token_expired() => {
                tracing::warn!(route = %route, "LearnyBox access token expired, refreshing it");

                self.auth().refresh().await?;
                self.send_authorized(Method::GET, route, query).await
            }
            result => result,
        }
    }

    async fn send_authorized<T: DeserializeOwned>(
        &self,
        method: Method,
        route: &str,
        query: &[(&str, String)],
    ) -> Result<T, Error> {
        let access_token = self.auth().access_token().await?;

        let mut request = self
            .http()
            .request(method, self.url(route))
            .bearer_auth(access_token);
        if !query.is_empty() {
            request = request.query(query);
        }

        let response = request.send().await?;

        handle_response(response).await
    }
}

/// Decodes a 2xx response body, or turns any other status into [`Error::Api`].
pub(crate) async fn handle_response<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, Error> {
    let status = response.status();
    let body = response.text().await?;

    if status.is_success() {
        return Ok(serde_json::from_str(&body)?);
    }

    Err(Error::Api {
        code: status.as_u16(),
        message: error_message(status, &body),
    })
}

fn error_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|body| body.message)
        .or_else(|| status.canonical_reason().map(str::to_string))
        .unwrap_or_else(|| format!("HTTP {}", status.as_u16()))
}

/// Builder for [`Client`].
#[derive(Default)]
pub struct ClientBuilder {
    api_url: Option<String>,
    api_key: Option<String>,
    user_agent: Option<String>,
    store: Option<Arc<dyn TransientStore>>,
}

impl ClientBuilder {
    /// URL of the LearnyBox platform, e.g. `https://acme.learnybox.com/`.
    pub fn api_url(mut self, api_url: &str) -> Self {
        self.api_url = Some(api_url.to_string());
        self
    }

    pub fn api_key(mut self, api_key: &str) -> Self {
        self.api_key = Some(api_key.to_string());
        self
    }

    pub fn user_agent(mut self, user_agent: &str) -> Self {
        self.user_agent = Some(user_agent.to_string());
        self
    }

    /// Store used to cache the token pair and list pages.
    pub fn store(mut self, store: Arc<dyn TransientStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Builds the client.
    ///
    /// # Returns
    /// - `Ok(Client)` - Client ready to send requests
    /// - `Err(Error::Config)` - API URL, API key or store is missing
    /// - `Err(Error::Reqwest)` - The HTTP client could not be created
    pub fn build(self) -> Result<Client, Error> {
        let api_url = self
            .api_url
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| Error::Config("API URL is required".to_string()))?;
        let api_key = self
            .api_key
            .ok_or_else(|| Error::Config("API key is required".to_string()))?;
        let store = self
            .store
            .ok_or_else(|| Error::Config("transient store is required".to_string()))?;

        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );

        let mut http = reqwest::Client::builder().default_headers(headers);
        if let Some(user_agent) = self.user_agent {
            http = http.user_agent(user_agent);
        }

        let api_url = api_url.trim();
        let base_url = if api_url.ends_with('/') {
            format!("{api_url}{API_ENTRYPOINT}")
        } else {
            format!("{api_url}/{API_ENTRYPOINT}")
        };

        Ok(Client {
            inner: Arc::new(ClientRef {
                http: http.build()?,
                base_url,
                api_key,
                store,
            }),
        })
    }
}
