//! Registration form nonce.
//!
//! A nonce reads `<issued_at>.<signature>`: the Unix timestamp it was issued at, then the hex
//! HMAC-SHA256 of the member's email hash and that timestamp. Nothing is stored server side, so
//! the form keeps working from a third-party frame where the browser sends no cookies.

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::server::{
    config::NONCE_SECRET_VAR,
    error::{config::ConfigError, Error},
};

/// Seconds a registration form may stay open before its nonce is refused.
pub const NONCE_LIFETIME_SECS: i64 = 24 * 60 * 60;

type HmacSha256 = Hmac<Sha256>;

/// Signs and checks registration nonces with the server secret.
pub struct RegistrationNonce<'a> {
    secret: &'a str,
}

impl<'a> RegistrationNonce<'a> {
    pub fn new(secret: &'a str) -> Self {
        Self { secret }
    }

    /// Issues a nonce for the registration form of the member identified by `email_hash`.
    pub fn issue(&self, email_hash: &str, now: DateTime<Utc>) -> Result<String, Error> {
        let issued_at = now.timestamp();

        let mut mac = self.mac()?;
        mac.update(signed_payload(email_hash, issued_at).as_bytes());

        Ok(format!(
            "{issued_at}.{}",
            hex::encode(mac.finalize().into_bytes())
        ))
    }

    /// Checks that `nonce` was issued for `email_hash` and is not expired at `now`.
    ///
    /// # Returns
    /// - `Ok(true)` - Nonce signed for this member within [`NONCE_LIFETIME_SECS`]
    /// - `Ok(false)` - Malformed, expired, issued in the future or signed for someone else
    /// - `Err(Error::ConfigError)` - Secret unusable as an HMAC key
    pub fn verify(&self, email_hash: &str, nonce: &str, now: DateTime<Utc>) -> Result<bool, Error> {
        let Some((issued_at, signature)) = nonce.split_once('.') else {
            return Ok(false);
        };
        let (Ok(issued_at), Ok(signature)) = (issued_at.parse::<i64>(), hex::decode(signature))
        else {
            return Ok(false);
        };

        let age = now.timestamp().saturating_sub(issued_at);
        if !(0..=NONCE_LIFETIME_SECS).contains(&age) {
            return Ok(false);
        }

        let mut mac = self.mac()?;
        mac.update(signed_payload(email_hash, issued_at).as_bytes());

        Ok(mac.verify_slice(&signature).is_ok())
    }

    fn mac(&self) -> Result<HmacSha256, Error> {
        HmacSha256::new_from_slice(self.secret.as_bytes()).map_err(|_| {
            ConfigError::InvalidEnvValue {
                var: NONCE_SECRET_VAR.to_string(),
                reason: "unusable as an HMAC key".to_string(),
            }
            .into()
        })
    }
}

fn signed_payload(email_hash: &str, issued_at: i64) -> String {
    format!("registration:{email_hash}:{issued_at}")
}
