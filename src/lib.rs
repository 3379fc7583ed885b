//! LearnyBox members map.
//!
//! Members of a LearnyBox training register themselves on an interactive map and browse the
//! other registered members. The `model` module holds the payloads shared with the browser
//! client, while `server` holds the axum backend: LearnyBox synchronization, the registration
//! workflow and the public API.

pub mod model;

#[cfg(feature = "server")]
pub mod server;
