//! Service layer for business logic.
//!
//! Services coordinate repositories and the LearnyBox client: member synchronization,
//! the registration workflow and the public map payload.

pub mod member;
pub mod members_map;
pub mod registration;
