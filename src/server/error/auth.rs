use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use dioxus_logger::tracing;
use thiserror::Error;

use crate::model::api::ErrorDto;

#[derive(Error, Debug)]
pub enum AuthError {
    /// The submitted nonce is malformed, expired or was issued for another member.
    #[error("Registration form nonce is invalid or expired")]
    NonceValidationFailed,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match self {
            Self::NonceValidationFailed => {
                tracing::debug!("{}", self);

                (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorDto {
                        error: "This form has expired, please reload it and try again."
                            .to_string(),
                    }),
                )
                    .into_response()
            }
        }
    }
}
