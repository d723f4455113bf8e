//! Project REST API endpoints
//!
//! Read and create projects, and edit their members and results. Membership
//! and result changes go through [`MembershipService`] on a freshly loaded
//! project.

use crate::{
    api::{
        error::{ApiError, ApiResult, ErrorResponse},
        AppState,
    },
    entity::{MemberEdit, Project, ProjectDraft, ProjectView},
    service::{project as project_service, MembershipService},
};
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    response::Json,
    routing::{delete, get, post, put},
    Router,
};

/// Create project management routes
pub fn create_project_routes() -> Router<AppState> {
    Router::new()
        .route("/projects", get(list_projects).post(create_project))
        .route("/projects/{id}", get(get_project).delete(delete_project))
        .route("/projects/{id}/members", put(edit_project_members))
        .route("/projects/{id}/members/{person_id}", delete(remove_project_member))
        .route(
            "/projects/{id}/results/{result_id}",
            post(add_project_result).delete(remove_project_result),
        )
}

async fn load_project(state: &AppState, id: i64) -> ApiResult<Project> {
    match project_service::fetch_project(state.gateway.as_ref(), id).await {
        Ok(Some(project)) => Ok(project),
        Ok(None) => Err(ApiError::not_found("Project not found")),
        Err(err) => Err(ApiError::raw("Can't retrieve project.", err)),
    }
}

/// List all projects
///
/// GET /projects
/// Returns: [{ "id": 1, "description": "...", "sponsor": "...", "personProjects": [...], "results": [...] }]
#[utoipa::path(
    get,
    path = "/projects",
    tag = "Projects",
    responses(
        (status = 200, description = "All projects with relations", body = Vec<ProjectView>),
        (status = 400, description = "Could not read projects", body = ErrorResponse),
    )
)]
pub async fn list_projects(State(state): State<AppState>) -> ApiResult<Json<Vec<ProjectView>>> {
    let projects = project_service::fetch_projects(state.gateway.as_ref())
        .await
        .map_err(|err| ApiError::raw("Cant retrieve list of projects", err))?;

    Ok(Json(projects.into_iter().map(ProjectView::from).collect()))
}

/// Get a project with its memberships and results
///
/// GET /projects/{id}
#[utoipa::path(
    get,
    path = "/projects/{id}",
    tag = "Projects",
    params(("id" = i64, Path, description = "Project id")),
    responses(
        (status = 200, description = "Project with relations", body = ProjectView),
        (status = 404, description = "Project not found", body = ErrorResponse),
        (status = 400, description = "Could not read project", body = ErrorResponse),
    )
)]
pub async fn get_project(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<ProjectView>> {
    let Path(id) = path?;
    let project = load_project(&state, id).await?;
    Ok(Json(project.into()))
}

/// Create a new project
///
/// POST /projects
/// Body: { "description": "...", "sponsor": "..." }
#[utoipa::path(
    post,
    path = "/projects",
    tag = "Projects",
    request_body = ProjectDraft,
    responses(
        (status = 201, description = "Project created", body = Project),
        (status = 400, description = "Could not create project", body = ErrorResponse),
    )
)]
pub async fn create_project(
    State(state): State<AppState>,
    payload: Result<Json<ProjectDraft>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Project>)> {
    let Json(draft) = payload?;

    let project = project_service::create_project(state.gateway.as_ref(), &draft)
        .await
        .map_err(|err| ApiError::raw("Could not create project", err))?;

    Ok((StatusCode::CREATED, Json(project)))
}

/// Delete a project together with its memberships and results
///
/// DELETE /projects/{id}
#[utoipa::path(
    delete,
    path = "/projects/{id}",
    tag = "Projects",
    params(("id" = i64, Path, description = "Project id")),
    responses(
        (status = 204, description = "Project deleted"),
        (status = 404, description = "Project not found", body = ErrorResponse),
        (status = 400, description = "Could not delete project", body = ErrorResponse),
    )
)]
pub async fn delete_project(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<StatusCode> {
    let Path(id) = path?;

    match project_service::delete_project(state.gateway.as_ref(), id).await {
        Ok(true) => Ok(StatusCode::NO_CONTENT),
        Ok(false) => Err(ApiError::not_found("Project not found")),
        Err(err) => Err(ApiError::raw("Could not delete project", err)),
    }
}

/// Add or re-role project members
///
/// PUT /projects/{id}/members
/// Body: [{ "id": 3, "role": "RESEARCHER" }]
#[utoipa::path(
    put,
    path = "/projects/{id}/members",
    tag = "Members",
    params(("id" = i64, Path, description = "Project id")),
    request_body = Vec<MemberEdit>,
    responses(
        (status = 200, description = "Updated project", body = ProjectView),
        (status = 404, description = "Project not found", body = ErrorResponse),
        (status = 400, description = "Invalid role for an existing member or storage failure", body = ErrorResponse),
    )
)]
pub async fn edit_project_members(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<Vec<MemberEdit>>, JsonRejection>,
) -> ApiResult<Json<ProjectView>> {
    let Path(id) = path?;
    let Json(edits) = payload?;

    let mut project = load_project(&state, id).await?;
    MembershipService::new(state.gateway.clone())
        .edit_members(&mut project, &edits)
        .await?;

    Ok(Json(project.into()))
}

/// Remove a person from a project
///
/// DELETE /projects/{id}/members/{person_id}
#[utoipa::path(
    delete,
    path = "/projects/{id}/members/{person_id}",
    tag = "Members",
    params(
        ("id" = i64, Path, description = "Project id"),
        ("person_id" = i64, Path, description = "Person id"),
    ),
    responses(
        (status = 200, description = "Updated project", body = ProjectView),
        (status = 404, description = "Project not found or person not related", body = ErrorResponse),
        (status = 400, description = "Storage failure", body = ErrorResponse),
    )
)]
pub async fn remove_project_member(
    State(state): State<AppState>,
    path: Result<Path<(i64, i64)>, PathRejection>,
) -> ApiResult<Json<ProjectView>> {
    let Path((id, person_id)) = path?;

    let mut project = load_project(&state, id).await?;
    MembershipService::new(state.gateway.clone())
        .remove_person_from_project(&mut project, person_id)
        .await?;

    Ok(Json(project.into()))
}

/// Attach a result to a project
///
/// POST /projects/{id}/results/{result_id}
#[utoipa::path(
    post,
    path = "/projects/{id}/results/{result_id}",
    tag = "Results",
    params(
        ("id" = i64, Path, description = "Project id"),
        ("result_id" = i64, Path, description = "Result id"),
    ),
    responses(
        (status = 200, description = "Updated project", body = ProjectView),
        (status = 404, description = "Project or result not found", body = ErrorResponse),
        (status = 400, description = "Storage failure", body = ErrorResponse),
    )
)]
pub async fn add_project_result(
    State(state): State<AppState>,
    path: Result<Path<(i64, i64)>, PathRejection>,
) -> ApiResult<Json<ProjectView>> {
    let Path((id, result_id)) = path?;

    let mut project = load_project(&state, id).await?;
    MembershipService::new(state.gateway.clone())
        .add_result_to_project(&mut project, result_id)
        .await?;

    Ok(Json(project.into()))
}

/// Delete a result and detach it from a project
///
/// DELETE /projects/{id}/results/{result_id}
#[utoipa::path(
    delete,
    path = "/projects/{id}/results/{result_id}",
    tag = "Results",
    params(
        ("id" = i64, Path, description = "Project id"),
        ("result_id" = i64, Path, description = "Result id"),
    ),
    responses(
        (status = 200, description = "Updated project", body = ProjectView),
        (status = 404, description = "Project not found", body = ErrorResponse),
        (status = 400, description = "Result could not be deleted", body = ErrorResponse),
    )
)]
pub async fn remove_project_result(
    State(state): State<AppState>,
    path: Result<Path<(i64, i64)>, PathRejection>,
) -> ApiResult<Json<ProjectView>> {
    let Path((id, result_id)) = path?;

    let mut project = load_project(&state, id).await?;
    MembershipService::new(state.gateway.clone())
        .remove_result_from_project(&mut project, result_id)
        .await?;

    Ok(Json(project.into()))
}
