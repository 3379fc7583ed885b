//! Data access layer repositories.
//!
//! Repositories are generic over [`sea_orm::ConnectionTrait`] so the same queries run on the
//! pooled connection or inside a transaction.

pub mod category;
pub mod member;
