//! QR API handlers.

use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use http::header;
use qrmenu_qr::{BulkQrResult, ContactCard, QrInfo, Resolution};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::error::{ApiResult, ErrorBody};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/generate/bulk", post(generate_bulk))
        .route("/generate/{id}", get(generate).post(generate_and_store))
        .route("/generate/{id}/data", get(generate_data_url))
        .route("/info/{id}", get(info))
        .route("/redirect/{id}", get(redirect))
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SizeQuery {
    /// Pixels per module, 1 to 100. Defaults to the configured size.
    pub size: Option<u32>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DataUrlResponse {
    pub establishment_id: String,
    pub data_url: String,
}

#[utoipa::path(
    get,
    path = "/api/qr/generate/{id}",
    params(("id" = String, Path, description = "Establishment id"), SizeQuery),
    responses(
        (status = 200, description = "PNG download named qr-{id}.png", content_type = "image/png", body = Vec<u8>),
        (status = 400, description = "Size out of range", body = ErrorBody),
        (status = 404, description = "No such establishment", body = ErrorBody)
    ),
    tag = "QR"
)]
pub async fn generate(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<SizeQuery>,
) -> ApiResult<Response> {
    let image = state.qr.generate_png(&id, query.size).await?;
    let disposition = format!("attachment; filename=\"{}\"", image.filename);
    Ok((
        [
            (header::CONTENT_TYPE, "image/png".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        image.png,
    )
        .into_response())
}

#[utoipa::path(
    post,
    path = "/api/qr/generate/{id}",
    params(("id" = String, Path, description = "Establishment id")),
    responses(
        (status = 200, description = "Generation summary for the one id", body = BulkQrResult)
    ),
    tag = "QR"
)]
pub async fn generate_and_store(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Json<BulkQrResult> {
    Json(state.qr.generate_and_store(&id).await)
}

#[utoipa::path(
    get,
    path = "/api/qr/generate/{id}/data",
    params(("id" = String, Path, description = "Establishment id"), SizeQuery),
    responses(
        (status = 200, description = "Code as a data URL", body = DataUrlResponse),
        (status = 400, description = "Size out of range", body = ErrorBody),
        (status = 404, description = "No such establishment", body = ErrorBody)
    ),
    tag = "QR"
)]
pub async fn generate_data_url(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<SizeQuery>,
) -> ApiResult<Json<DataUrlResponse>> {
    let data_url = state.qr.generate_data_url(&id, query.size).await?;
    Ok(Json(DataUrlResponse {
        establishment_id: id,
        data_url,
    }))
}

#[utoipa::path(
    get,
    path = "/api/qr/info/{id}",
    params(("id" = String, Path, description = "Establishment id"), SizeQuery),
    responses(
        (status = 200, description = "Redirect URL and code", body = QrInfo),
        (status = 400, description = "Size out of range", body = ErrorBody),
        (status = 404, description = "No such establishment", body = ErrorBody)
    ),
    tag = "QR"
)]
pub async fn info(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<SizeQuery>,
) -> ApiResult<Json<QrInfo>> {
    Ok(Json(state.qr.info(&id, query.size).await?))
}

#[utoipa::path(
    post,
    path = "/api/qr/generate/bulk",
    params(SizeQuery),
    request_body = Vec<String>,
    responses(
        (status = 200, description = "Per-id generation results", body = BulkQrResult),
        (status = 400, description = "Size out of range", body = ErrorBody)
    ),
    tag = "QR"
)]
pub async fn generate_bulk(
    State(state): State<AppState>,
    Query(query): Query<SizeQuery>,
    Json(ids): Json<Vec<String>>,
) -> ApiResult<Json<BulkQrResult>> {
    Ok(Json(state.qr.generate_bulk(&ids, query.size).await?))
}

/// 307 to the establishment's website when it has one, otherwise its
/// contact card as JSON.
#[utoipa::path(
    get,
    path = "/api/qr/redirect/{id}",
    params(("id" = String, Path, description = "Establishment id")),
    responses(
        (status = 307, description = "Redirect to the establishment website"),
        (status = 200, description = "Contact card of an establishment without a website", body = ContactCard),
        (status = 404, description = "No such establishment", body = ErrorBody),
        (status = 410, description = "Establishment is inactive", body = ErrorBody)
    ),
    tag = "QR"
)]
pub async fn redirect(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Response> {
    match state.qr.resolve(&id).await? {
        Resolution::Redirect(url) => Ok(Redirect::temporary(&url).into_response()),
        Resolution::ContactCard(card) => Ok(Json(card).into_response()),
    }
}
