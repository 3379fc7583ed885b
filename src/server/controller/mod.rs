//! HTTP controller endpoints of the members map API.
//!
//! Controllers extract the request, call the services and map their results to responses.
//! The registration form nonce is signed rather than stored, so no endpoint needs a session.

pub mod members_map;
pub mod util;
