//! Test utilities for the LearnyBox members map.
//!
//! Tests are set up in two phases: a [`TestBuilder`] declares the tables, database fixtures and
//! mock LearnyBox endpoints a test needs, and `build()` turns them into a [`TestContext`] holding
//! an in-memory SQLite database, a mockito server and a LearnyBox client pointed at that server.

pub mod builder;
pub mod constant;
pub mod context;
pub mod error;
pub mod fixtures;

pub use builder::TestBuilder;
pub use context::TestContext;
pub use error::TestError;

pub mod prelude {
    pub use crate::{
        constant::*,
        fixtures::{
            learnybox::factory,
            member::{email_hash, MOCK_LATITUDE, MOCK_LONGITUDE},
        },
        TestBuilder, TestContext, TestError,
    };
}
