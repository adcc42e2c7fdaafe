//! Stats and server info routes.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/stats", get(get_stats))
}

/// GET /api/stats: session counts and effective timing configuration.
async fn get_stats(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let sessions = state.sessions.list();
    let nodes: usize = sessions.iter().map(|s| s.node_count).sum();
    let insights: usize = sessions.iter().map(|s| s.insight_count).sum();

    Json(serde_json::json!({
        "sessions": sessions.len(),
        "nodes": nodes,
        "insights": insights,
        "catalogSize": state.catalog.search("").len(),
        "port": state.config.port,
        "followUpDelayMs": state.config.follow_up_delay_ms,
        "thinkingDelayMs": state.config.thinking_delay_ms,
        "platform": std::env::consts::OS,
    }))
}
