//! API routes, mounted under `/api`.

pub mod establishments;
pub mod menus;
pub mod openapi;
pub mod qr;

use axum::Router;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .merge(openapi::router())
        .nest("/establishments", establishments::router())
        .nest("/menus", menus::router())
        .nest("/qr", qr::router())
}
