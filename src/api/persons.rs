//! Person REST API endpoints

use crate::{
    api::{
        error::{ApiError, ApiResult, ErrorResponse},
        AppState,
    },
    entity::{Person, PersonDetail},
    service::person,
};
use axum::{
    extract::{rejection::PathRejection, Path, State},
    response::Json,
    routing::get,
    Router,
};

/// Create person routes
pub fn create_person_routes() -> Router<AppState> {
    Router::new()
        .route("/persons", get(list_persons))
        .route("/persons/{id}", get(get_person))
}

/// List all persons
///
/// GET /persons
/// Returns: [{ "id": 1, "name": "...", "email": "...", "institution": "..." }]
#[utoipa::path(
    get,
    path = "/persons",
    tag = "Persons",
    responses(
        (status = 200, description = "All persons", body = Vec<Person>),
        (status = 400, description = "Could not read persons", body = ErrorResponse),
    )
)]
pub async fn list_persons(State(state): State<AppState>) -> ApiResult<Json<Vec<Person>>> {
    person::fetch_persons(state.gateway.as_ref())
        .await
        .map(Json)
        .map_err(|err| ApiError::raw("Cant retrieve list of persons", err))
}

/// Get a person with their project memberships
///
/// GET /persons/{id}
#[utoipa::path(
    get,
    path = "/persons/{id}",
    tag = "Persons",
    params(("id" = i64, Path, description = "Person id")),
    responses(
        (status = 200, description = "Person with memberships", body = PersonDetail),
        (status = 404, description = "Person not found", body = ErrorResponse),
        (status = 400, description = "Could not read person", body = ErrorResponse),
    )
)]
pub async fn get_person(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<PersonDetail>> {
    let Path(id) = path?;

    match person::fetch_person(state.gateway.as_ref(), id).await {
        Ok(Some(found)) => Ok(Json(found)),
        Ok(None) => Err(ApiError::NotFound {
            message: "User not found".to_string(),
            errors: Some(vec!["User not found".to_string()]),
        }),
        Err(err) => Err(ApiError::raw("Can't retrieve list of users.", err)),
    }
}
