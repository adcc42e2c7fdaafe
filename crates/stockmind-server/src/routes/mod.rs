//! HTTP route handlers.

pub mod assistant;
pub mod board;
pub mod sessions;
pub mod stats;
pub mod stocks;

use std::sync::Arc;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the main Axum router with all routes.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .nest("/api", api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .merge(stats::routes())
        .merge(stocks::routes())
        .merge(sessions::routes())
        .merge(board::routes())
        .merge(assistant::routes())
}
