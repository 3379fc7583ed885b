//! HTTP routing and OpenAPI documentation configuration.
//!
//! Every API endpoint is registered here together with its utoipa specification, and Swagger
//! UI serves the resulting document at `/api/docs`.

use axum::Router;
use utoipa::OpenApi;
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_swagger_ui::SwaggerUi;

use crate::server::{controller, model::app::AppState};

/// Builds the API router with Swagger UI.
///
/// # Registered Endpoints
/// - `GET /api/members-map` - Categories and published members
/// - `GET /api/members-map/register` - Registration form of a member
/// - `POST /api/members-map/register` - Registration form submission
///
/// The OpenAPI specification is available at `/api/docs/openapi.json`.
///
/// ```ignore
/// let router = routes().with_state(app_state);
/// ```
pub fn routes() -> Router<AppState> {
    #[derive(OpenApi)]
    #[openapi(info(title = "LearnyBox Map", description = "LearnyBox members map API"), tags(
        (name = controller::members_map::MEMBERS_MAP_TAG, description = "Members map API routes"),
    ))]
    struct ApiDoc;

    let (routes, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(controller::members_map::get_members_map))
        .routes(routes!(
            controller::members_map::get_registration,
            controller::members_map::register
        ))
        .split_for_parts();

    routes.merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", api))
}
