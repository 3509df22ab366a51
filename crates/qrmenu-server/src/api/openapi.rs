//! OpenAPI document for the HTTP API, served at `/api/openapi.json`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "QR Menu API",
        description = "Establishment directory, menus and QR redirect service"
    ),
    tags(
        (name = "Establishments", description = "Directory of establishments"),
        (name = "Menus", description = "Menus and their category tree"),
        (name = "QR", description = "QR generation and scan redirects")
    ),
    paths(
        // Establishments
        crate::api::establishments::list,
        crate::api::establishments::get_by_id,
        crate::api::establishments::list_active,
        crate::api::establishments::create,
        crate::api::establishments::update,
        crate::api::establishments::search,
        crate::api::establishments::activate,
        crate::api::establishments::deactivate,
        crate::api::establishments::delete,
        crate::api::establishments::list_menus,

        // Menus
        crate::api::menus::create,
        crate::api::menus::get_by_id,
        crate::api::menus::update,
        crate::api::menus::delete,
        crate::api::menus::add_category,
        crate::api::menus::update_category,
        crate::api::menus::remove_category,
        crate::api::menus::add_sub_category,
        crate::api::menus::update_sub_category,
        crate::api::menus::remove_sub_category,
        crate::api::menus::add_item,
        crate::api::menus::update_item,
        crate::api::menus::remove_item,

        // QR
        crate::api::qr::generate,
        crate::api::qr::generate_and_store,
        crate::api::qr::generate_data_url,
        crate::api::qr::info,
        crate::api::qr::generate_bulk,
        crate::api::qr::redirect,
    ),
    components(schemas(
        qrmenu_core::models::establishment::Establishment,
        qrmenu_core::models::establishment::EstablishmentType,
        qrmenu_core::models::establishment::Owner,
        qrmenu_core::models::menu::Menu,
        qrmenu_core::models::menu::MenuCategory,
        qrmenu_core::models::menu::MenuSubCategory,
        qrmenu_core::models::menu::MenuItem,
        qrmenu_qr::BulkQrEntry,
        crate::error::ErrorBody,
    ))
)]
pub struct ApiDoc;

pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(openapi_json))
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
