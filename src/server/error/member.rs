use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use dioxus_logger::tracing;
use thiserror::Error;

use crate::model::api::ErrorDto;

#[derive(Error, Debug)]
pub enum MemberError {
    /// Neither the local store nor the LearnyBox training knows this member.
    #[error("Member {0:?} is not a member of the LearnyBox training")]
    NotFound(String),
}

impl IntoResponse for MemberError {
    fn into_response(self) -> Response {
        match self {
            Self::NotFound(ref member) => {
                tracing::debug!(member = %member, "{}", self);

                (
                    StatusCode::NOT_FOUND,
                    Json(ErrorDto {
                        error: "Member not found".to_string(),
                    }),
                )
                    .into_response()
            }
        }
    }
}
