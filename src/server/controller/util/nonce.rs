use chrono::Utc;

use crate::server::{
    error::{auth::AuthError, Error},
    model::{app::MembersMapSettings, nonce::RegistrationNonce},
};

/// Issue the nonce of the registration form of the member identified by `email_hash`.
pub fn issue_nonce(settings: &MembersMapSettings, email_hash: &str) -> Result<String, Error> {
    RegistrationNonce::new(&settings.nonce_secret).issue(email_hash, Utc::now())
}

/// Validate that `nonce` was issued for the registration form of `email_hash` and is not expired.
pub fn validate_nonce(
    settings: &MembersMapSettings,
    email_hash: &str,
    nonce: &str,
) -> Result<(), Error> {
    let signer = RegistrationNonce::new(&settings.nonce_secret);

    if signer.verify(email_hash, nonce, Utc::now())? {
        return Ok(());
    }

    Err(Error::AuthError(AuthError::NonceValidationFailed))
}
