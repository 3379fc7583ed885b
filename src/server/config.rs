//! Application configuration loaded from environment variables.

use reqwest::Url;

use crate::server::error::config::ConfigError;

/// Environment variable holding the key registration nonces are signed with.
pub const NONCE_SECRET_VAR: &str = "REGISTRATION_NONCE_SECRET";

const API_URL_SCHEME: &str = "https";
const API_URL_DOMAIN: &str = ".learnybox.com";

pub struct Config {
    /// URL of the LearnyBox platform, normalized with a trailing slash
    pub learnybox_api_url: String,
    pub learnybox_api_key: String,
    /// LearnyBox training whose members may register on the map
    pub learnybox_training_id: u64,
    /// Consent text shown on the registration form, raw HTML
    pub consent_text: String,
    /// Key signing registration form nonces, shared by every server instance
    pub nonce_secret: String,
    pub user_agent: String,
    pub database_url: String,
    pub valkey_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let training_id = required_var("LEARNYBOX_TRAINING_ID")?;

        Ok(Self {
            learnybox_api_url: validate_api_url(&required_var("LEARNYBOX_API_URL")?)?,
            learnybox_api_key: required_var("LEARNYBOX_API_KEY")?,
            learnybox_training_id: training_id.trim().parse().map_err(|_| {
                ConfigError::InvalidEnvValue {
                    var: "LEARNYBOX_TRAINING_ID".to_string(),
                    reason: format!("expected a non-negative integer, got {training_id:?}"),
                }
            })?,
            consent_text: std::env::var("CONSENT_TEXT").unwrap_or_default(),
            nonce_secret: validate_nonce_secret(required_var(NONCE_SECRET_VAR)?)?,
            user_agent: std::env::var("USER_AGENT").unwrap_or_else(|_| {
                format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
            }),
            database_url: required_var("DATABASE_URL")?,
            valkey_url: required_var("VALKEY_URL")?,
        })
    }
}

fn required_var(var: &str) -> Result<String, ConfigError> {
    std::env::var(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
}

fn validate_nonce_secret(secret: String) -> Result<String, ConfigError> {
    if secret.trim().is_empty() {
        return Err(ConfigError::InvalidEnvValue {
            var: NONCE_SECRET_VAR.to_string(),
            reason: "must not be empty".to_string(),
        });
    }

    Ok(secret)
}

/// Checks that `url` points at a LearnyBox platform, e.g. `https://acme.learnybox.com/`.
///
/// A missing trailing slash is added before validation. Only the bare platform root is
/// accepted: no credentials, port, path, query or fragment.
pub fn validate_api_url(url: &str) -> Result<String, ConfigError> {
    let mut url = url.trim().to_string();
    if !url.ends_with('/') {
        url.push('/');
    }

    let Ok(parsed) = Url::parse(&url) else {
        return Err(ConfigError::InvalidApiUrl(url));
    };

    let is_platform_root = parsed.scheme() == API_URL_SCHEME
        && parsed.username().is_empty()
        && parsed.password().is_none()
        && parsed.port().is_none()
        && parsed.path() == "/"
        && parsed.query().is_none()
        && parsed.fragment().is_none()
        && parsed.host_str().is_some_and(is_learnybox_host);

    if is_platform_root {
        return Ok(parsed.to_string());
    }

    Err(ConfigError::InvalidApiUrl(url))
}

/// `<subdomain>.learnybox.com` with a single non-empty label before the domain.
fn is_learnybox_host(host: &str) -> bool {
    host.strip_suffix(API_URL_DOMAIN)
        .is_some_and(|subdomain| !subdomain.is_empty() && !subdomain.contains('.'))
}
