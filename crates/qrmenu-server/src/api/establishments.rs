//! Establishment API handlers.

use axum::extract::{Path, Query, State};
use axum::routing::{get, patch};
use axum::{Json, Router};
use http::StatusCode;
use qrmenu_core::models::establishment::{
    CreateEstablishment, Establishment, UpdateEstablishment,
};
use qrmenu_core::models::menu::Menu;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::error::{ApiResult, ErrorBody};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        // Static segments are matched before /{id}.
        .route("/active", get(list_active))
        .route("/search", get(search))
        .route("/{id}", get(get_by_id).put(update).delete(delete))
        .route("/{id}/activate", patch(activate))
        .route("/{id}/deactivate", patch(deactivate))
        .route("/{id}/menus", get(list_menus))
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    /// Case-insensitive substring of the name. Must not be blank.
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StatusMessage {
    pub message: String,
}

#[utoipa::path(
    get,
    path = "/api/establishments",
    responses(
        (status = 200, description = "All establishments", body = [Establishment]),
        (status = 500, description = "Store unavailable", body = ErrorBody)
    ),
    tag = "Establishments"
)]
pub async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<Establishment>>> {
    Ok(Json(state.establishments.list_all().await?))
}

#[utoipa::path(
    get,
    path = "/api/establishments/{id}",
    params(("id" = String, Path, description = "Establishment id")),
    responses(
        (status = 200, description = "Establishment returned", body = Establishment),
        (status = 404, description = "No such establishment", body = ErrorBody)
    ),
    tag = "Establishments"
)]
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Establishment>> {
    Ok(Json(state.establishments.get(&id).await?))
}

#[utoipa::path(
    get,
    path = "/api/establishments/active",
    responses(
        (status = 200, description = "Active establishments", body = [Establishment]),
        (status = 500, description = "Store unavailable", body = ErrorBody)
    ),
    tag = "Establishments"
)]
pub async fn list_active(State(state): State<AppState>) -> ApiResult<Json<Vec<Establishment>>> {
    Ok(Json(state.establishments.list_active().await?))
}

#[utoipa::path(
    post,
    path = "/api/establishments",
    request_body = CreateEstablishment,
    responses(
        (status = 201, description = "Establishment created", body = Establishment),
        (status = 400, description = "Invalid payload", body = ErrorBody)
    ),
    tag = "Establishments"
)]
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CreateEstablishment>,
) -> ApiResult<(StatusCode, Json<Establishment>)> {
    let establishment = state.establishments.create(payload).await?;
    Ok((StatusCode::CREATED, Json(establishment)))
}

#[utoipa::path(
    put,
    path = "/api/establishments/{id}",
    params(("id" = String, Path, description = "Establishment id")),
    request_body = UpdateEstablishment,
    responses(
        (status = 200, description = "Establishment updated", body = Establishment),
        (status = 400, description = "Invalid payload", body = ErrorBody),
        (status = 404, description = "No such establishment", body = ErrorBody)
    ),
    tag = "Establishments"
)]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateEstablishment>,
) -> ApiResult<Json<Establishment>> {
    Ok(Json(state.establishments.update(&id, payload).await?))
}

#[utoipa::path(
    get,
    path = "/api/establishments/search",
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching establishments", body = [Establishment]),
        (status = 400, description = "Blank search name", body = ErrorBody)
    ),
    tag = "Establishments"
)]
pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> ApiResult<Json<Vec<Establishment>>> {
    Ok(Json(state.establishments.search(&query.name).await?))
}

#[utoipa::path(
    patch,
    path = "/api/establishments/{id}/activate",
    params(("id" = String, Path, description = "Establishment id")),
    responses(
        (status = 200, description = "Establishment activated", body = StatusMessage),
        (status = 404, description = "No such establishment", body = ErrorBody)
    ),
    tag = "Establishments"
)]
pub async fn activate(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<StatusMessage>> {
    state.establishments.activate(&id).await?;
    Ok(Json(StatusMessage {
        message: "Establishment activated successfully".into(),
    }))
}

#[utoipa::path(
    patch,
    path = "/api/establishments/{id}/deactivate",
    params(("id" = String, Path, description = "Establishment id")),
    responses(
        (status = 200, description = "Establishment deactivated", body = StatusMessage),
        (status = 404, description = "No such establishment", body = ErrorBody)
    ),
    tag = "Establishments"
)]
pub async fn deactivate(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<StatusMessage>> {
    state.establishments.deactivate(&id).await?;
    Ok(Json(StatusMessage {
        message: "Establishment deactivated successfully".into(),
    }))
}

#[utoipa::path(
    delete,
    path = "/api/establishments/{id}",
    params(("id" = String, Path, description = "Establishment id")),
    responses(
        (status = 204, description = "Establishment deleted"),
        (status = 404, description = "No such establishment", body = ErrorBody)
    ),
    tag = "Establishments"
)]
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<StatusCode> {
    state.establishments.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/establishments/{id}/menus",
    params(("id" = String, Path, description = "Establishment id")),
    responses(
        (status = 200, description = "Menus of the establishment", body = [Menu])
    ),
    tag = "Establishments"
)]
pub async fn list_menus(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Vec<Menu>>> {
    Ok(Json(state.menus.list_for_establishment(&id).await?))
}
