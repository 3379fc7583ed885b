use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect},
    Form, Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    model::{
        api::ErrorDto,
        member::{MembersMapDto, RegistrationPageDto, RegistrationRequest},
    },
    server::{
        controller::util::nonce::{issue_nonce, validate_nonce},
        error::{member::MemberError, Error},
        model::{app::AppState, db::MemberModel, registration::RegistrationOutcome},
        service::{
            member::MemberSyncService, members_map::MembersMapService,
            registration::RegistrationService,
        },
    },
};

pub static MEMBERS_MAP_TAG: &str = "members-map";

#[derive(Deserialize, IntoParams)]
pub struct MemberParams {
    /// Email or email hash of the member
    pub member: Option<String>,
}

/// Get the categories and published members shown on the map
///
/// The entry of the member given in the query, if any, is flagged as the current member.
#[utoipa::path(
    get,
    path = "/api/members-map",
    tag = MEMBERS_MAP_TAG,
    params(MemberParams),
    responses(
        (status = 200, description = "Map content", body = MembersMapDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_members_map(
    State(state): State<AppState>,
    Query(params): Query<MemberParams>,
) -> Result<impl IntoResponse, Error> {
    let members_map_service = MembersMapService::new(&state.db);

    let members_map = members_map_service
        .get_members_map(params.member.as_deref())
        .await?;

    Ok((StatusCode::OK, Json(members_map)))
}

/// Get the registration form of a member
///
/// Members unknown locally are looked up in the LearnyBox training by email. The form carries a
/// nonce signed for the member which must be submitted with it.
#[utoipa::path(
    get,
    path = "/api/members-map/register",
    tag = MEMBERS_MAP_TAG,
    params(MemberParams),
    responses(
        (status = 200, description = "Registration form", body = RegistrationPageDto),
        (status = 404, description = "Member not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_registration(
    State(state): State<AppState>,
    Query(params): Query<MemberParams>,
) -> Result<impl IntoResponse, Error> {
    let identifier = params.member.unwrap_or_default();
    let member = resolve_member(&state, &identifier).await?;

    let nonce = issue_nonce(&state.settings, &member.email_hash)?;

    let registration_service = RegistrationService::new(&state.db);
    let page = registration_service
        .get_registration_page(&member, None, nonce, &state.settings.consent_text)
        .await?;

    Ok((StatusCode::OK, Json(page)))
}

/// Submit the registration form of a member
///
/// # Responses
/// - 303 (See Other): Member published, redirect to the map focused on the member
/// - 400 (Bad Request): Nonce expired or not issued for the submitted member
/// - 404 (Not Found): Member unknown locally and on LearnyBox
/// - 422 (Unprocessable Entity): Invalid form, returned with the errors and a new nonce
/// - 500 (Internal Server Error): Database or LearnyBox failure
#[utoipa::path(
    post,
    path = "/api/members-map/register",
    tag = MEMBERS_MAP_TAG,
    request_body(content = RegistrationRequest, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Member published, redirect to the map"),
        (status = 400, description = "Nonce validation failed", body = ErrorDto),
        (status = 404, description = "Member not found", body = ErrorDto),
        (status = 422, description = "Invalid registration form", body = RegistrationPageDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn register(
    State(state): State<AppState>,
    Form(request): Form<RegistrationRequest>,
) -> Result<impl IntoResponse, Error> {
    validate_nonce(&state.settings, &request.member, &request.nonce)?;

    let member = resolve_member(&state, &request.member).await?;

    let registration_service = RegistrationService::new(&state.db);

    match registration_service.submit(member.clone(), &request).await? {
        RegistrationOutcome::Applied { member, status } => Ok(Redirect::to(&format!(
            "/?member={}&register_status={}",
            member.email_hash,
            status.as_str()
        ))
        .into_response()),
        RegistrationOutcome::Rejected(form) => {
            let nonce = issue_nonce(&state.settings, &member.email_hash)?;

            let page = registration_service
                .get_registration_page(&member, Some(form), nonce, &state.settings.consent_text)
                .await?;

            Ok((StatusCode::UNPROCESSABLE_ENTITY, Json(page)).into_response())
        }
    }
}

async fn resolve_member(
    state: &AppState,
    identifier: &str,
) -> Result<MemberModel, Error> {
    let member_sync_service = MemberSyncService::new(
        &state.db,
        &state.learnybox_client,
        state.settings.training_id,
    );

    member_sync_service
        .resolve_identifier(identifier)
        .await?
        .ok_or_else(|| MemberError::NotFound(identifier.to_string()).into())
}
