//! Assistant panel routes.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use stockmind_runtime::AssistantPanel;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/sessions/{id}/assistant", get(get_assistant))
        .route("/sessions/{id}/assistant/deep-analysis", post(deep_analysis))
        .route("/sessions/{id}/assistant/risk-analysis", post(risk_analysis))
        .route(
            "/sessions/{id}/assistant/suggestions/{index}",
            post(adopt_suggestion),
        )
}

async fn get_assistant(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<AssistantPanel>> {
    let session = state.session(&id)?;
    let panel = session.lock().assistant().clone();
    Ok(Json(panel))
}

async fn deep_analysis(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<serde_json::Value>> {
    let session = state.session(&id)?;
    let mut controller = session.lock();
    let started = controller.deep_analysis();
    Ok(Json(serde_json::json!({
        "started": started,
        "thinking": controller.assistant().is_thinking(),
    })))
}

async fn risk_analysis(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<serde_json::Value>> {
    let session = state.session(&id)?;
    let mut controller = session.lock();
    let added = controller.risk_analysis();
    Ok(Json(serde_json::json!({
        "added": added,
        "pendingQuestions": controller.board().pending_questions(),
    })))
}

/// POST /api/sessions/{id}/assistant/suggestions/{index}: queue a suggestion.
async fn adopt_suggestion(
    State(state): State<Arc<AppState>>,
    Path((id, index)): Path<(String, usize)>,
) -> ApiResult<Json<serde_json::Value>> {
    let session = state.session(&id)?;
    let mut controller = session.lock();
    let added = controller
        .adopt_suggestion(index)
        .ok_or_else(|| ApiError::not_found(format!("suggestion {index}")))?;
    Ok(Json(serde_json::json!({
        "added": added,
        "pendingQuestions": controller.board().pending_questions(),
    })))
}
