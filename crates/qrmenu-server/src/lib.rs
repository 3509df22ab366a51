//! QR Menu Server: HTTP API for the establishment directory, menus and
//! QR redirect service.
//!
//! The binary in `main.rs` only loads configuration, connects to the
//! store and serves [`build_app`]. Everything else lives here so the
//! router can be driven in-process by tests.

pub mod api;
pub mod config;
pub mod error;
pub mod state;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use config::ServerConfig;
pub use state::AppState;

/// Build the fully configured application: every route under `/api`,
/// CORS and request tracing.
pub fn build_app(state: AppState) -> Router {
    Router::new()
        .nest("/api", api::router())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
