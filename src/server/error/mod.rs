//! Error types for the members map server.
//!
//! Domain errors (configuration, form nonce, member lookup) live in their own modules and are
//! aggregated into [`Error`] together with the errors of the libraries the server relies on.
//! Every error converts into an axum response; anything without a dedicated mapping becomes a
//! generic 500 so internal details never reach the visitor.

pub mod auth;
pub mod config;
pub mod member;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use dioxus_logger::tracing;
use thiserror::Error;

use crate::{
    model::api::ErrorDto,
    server::error::{auth::AuthError, config::ConfigError, member::MemberError},
};

/// Main error type of the server.
///
/// `#[from]` conversions let the `?` operator lift library and domain errors into it.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error (missing or invalid environment variables).
    #[error(transparent)]
    ConfigError(#[from] ConfigError),
    /// Registration nonce error.
    #[error(transparent)]
    AuthError(#[from] AuthError),
    /// Member could not be resolved.
    #[error(transparent)]
    MemberError(#[from] MemberError),
    /// LearnyBox API error (authentication, unexpected status, unreadable response).
    #[error(transparent)]
    LearnyBoxError(#[from] learnybox::Error),
    /// Database error (query failures, connection issues, constraint violations).
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),
    /// Valkey/Redis error (connection, command execution).
    #[error(transparent)]
    RedisError(#[from] fred::prelude::Error),
}

/// Maps errors to HTTP responses.
///
/// # Returns
/// - 400 Bad Request - Registration nonce mismatch
/// - 404 Not Found - Member unknown locally and on LearnyBox
/// - 500 Internal Server Error - Everything else, logged
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Self::ConfigError(err) => err.into_response(),
            Self::AuthError(err) => err.into_response(),
            Self::MemberError(err) => err.into_response(),
            err => InternalServerError(err).into_response(),
        }
    }
}

/// Wrapper converting any displayable error into a logged 500 Internal Server Error response
/// with a generic message.
pub struct InternalServerError<E>(pub E);

impl<E: std::fmt::Display> IntoResponse for InternalServerError<E> {
    fn into_response(self) -> Response {
        tracing::error!("{}", self.0);

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorDto {
                error: "Internal server error".to_string(),
            }),
        )
            .into_response()
    }
}
