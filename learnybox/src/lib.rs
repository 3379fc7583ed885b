//! Client for the LearnyBox REST API.
//!
//! The client authenticates with an API key, keeps its access/refresh token pair in a
//! [`TransientStore`], and transparently refreshes an expired access token once before giving
//! up on a request. Paginated list routes are exposed as lazy streams whose pages are cached in
//! the same store for a day so that later scans only need to re-fetch the newest page.
//!
//! ```ignore
//! let client = learnybox::Client::builder()
//!     .api_url("https://acme.learnybox.com/")
//!     .api_key("secret")
//!     .store(Arc::new(learnybox::MemoryStore::default()))
//!     .build()?;
//!
//! let profile = client.member().get_member_by_external_id(42).await?;
//! ```

pub mod auth;
pub mod client;
pub mod error;
pub mod member;
pub mod pagination;
pub mod store;

pub use client::{Client, ClientBuilder};
pub use error::Error;
pub use store::{MemoryStore, TransientStore};
