//! Server models: application state, database model aliases, registration data and the form
//! nonce.

pub mod app;
pub mod db;
pub mod nonce;
pub mod registration;
