//! Data transfer objects shared by the server API and the browser client.

pub mod api;
pub mod geo;
pub mod member;
