//! OpenAPI description of the HTTP surface

use axum::response::Json;
use utoipa::OpenApi;

/// OpenAPI document for the Lattes API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Lattes App API",
        version = env!("CARGO_PKG_VERSION"),
        description = "Research projects, their collaborators and results.",
        license(name = "MIT OR Apache-2.0")
    ),
    paths(
        crate::api::persons::list_persons,
        crate::api::persons::get_person,
        crate::api::projects::list_projects,
        crate::api::projects::get_project,
        crate::api::projects::create_project,
        crate::api::projects::delete_project,
        crate::api::projects::edit_project_members,
        crate::api::projects::remove_project_member,
        crate::api::projects::add_project_result,
        crate::api::projects::remove_project_result,
        get_openapi_json,
    ),
    components(schemas(
        crate::api::error::ErrorResponse,
        crate::entity::Collaborator,
        crate::entity::MemberEdit,
        crate::entity::Person,
        crate::entity::PersonDetail,
        crate::entity::PersonProject,
        crate::entity::Project,
        crate::entity::ProjectDraft,
        crate::entity::ProjectResult,
        crate::entity::ProjectView,
    )),
    tags(
        (name = "Persons", description = "People taking part in projects"),
        (name = "Projects", description = "Research projects"),
        (name = "Members", description = "Project membership edits"),
        (name = "Results", description = "Project result attachment"),
        (name = "OpenAPI", description = "This document"),
    )
)]
pub struct ApiDoc;

/// Serve the OpenAPI document
///
/// GET /api-docs/openapi.json
#[utoipa::path(
    get,
    path = "/api-docs/openapi.json",
    tag = "OpenAPI",
    responses((status = 200, description = "OpenAPI document"))
)]
pub async fn get_openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
