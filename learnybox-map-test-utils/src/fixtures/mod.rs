//! Fixtures used while a test runs.
//!
//! - `learnybox` - LearnyBox API models and mock endpoints
//! - `member` - Member and category rows

pub mod learnybox;
pub mod member;
