//! Email normalization and hashing.
//!
//! Emails are compared case-insensitively. The hash of the normalized email is the opaque
//! identifier put in map links instead of the address itself.

use sha2::{Digest, Sha256};

/// Trims and lowercases an email address.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Lowercase hex SHA-256 digest of the normalized email.
pub fn hash_email(email: &str) -> String {
    hex::encode(Sha256::digest(normalize_email(email).as_bytes()))
}

/// Whether a member identifier is an email rather than an email hash.
pub fn is_email(identifier: &str) -> bool {
    identifier.contains('@')
}

/// Email hash designated by a member identifier, which is either an email or a hash.
pub fn identifier_hash(identifier: &str) -> String {
    if is_email(identifier) {
        hash_email(identifier)
    } else {
        identifier.trim().to_lowercase()
    }
}
