//! Research session lifecycle.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use stockmind_core::Error;
use stockmind_runtime::ResearchSession;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/sessions", get(list_sessions).post(create_session))
        .route("/sessions/{id}", get(get_session).delete(end_session))
}

/// Session id and timestamps merged into the controller snapshot.
pub(crate) fn session_json(session: &ResearchSession) -> ApiResult<serde_json::Value> {
    let snapshot = session.lock().snapshot();
    let mut value = serde_json::to_value(snapshot).map_err(Error::from)?;
    if let Some(obj) = value.as_object_mut() {
        obj.insert("id".into(), session.id.clone().into());
        obj.insert("createdAt".into(), session.created_at.to_rfc3339().into());
    }
    Ok(value)
}

async fn create_session(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<serde_json::Value>> {
    let session = state.sessions.create();
    Ok(Json(session_json(&session)?))
}

async fn list_sessions(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let sessions = state.sessions.list();
    Json(serde_json::json!({
        "sessions": sessions,
        "count": sessions.len(),
    }))
}

async fn get_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<serde_json::Value>> {
    let session = state.session(&id)?;
    Ok(Json(session_json(&session)?))
}

async fn end_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<serde_json::Value>> {
    if state.sessions.end(&id) {
        Ok(Json(serde_json::json!({ "success": true })))
    } else {
        Err(ApiError::not_found(format!("session {id}")))
    }
}
