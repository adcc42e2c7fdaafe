//! Research board routes: the controller's operations over HTTP.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde::Deserialize;
use stockmind_core::{ResearchNode, Verdict};
use stockmind_runtime::GraphView;
use tracing::info;

use crate::error::{ApiError, ApiResult};
use crate::extract::JsonBody;
use crate::routes::sessions::session_json;
use crate::state::AppState;

// ---------------------------------------------------------------
// Route builder
// ---------------------------------------------------------------

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/sessions/{id}/stock", post(select_stock))
        .route("/sessions/{id}/questions", post(propose_question))
        .route("/sessions/{id}/questions/answer", post(answer_question))
        .route("/sessions/{id}/nodes", post(add_node))
        .route("/sessions/{id}/nodes/{node_id}/click", post(click_node))
        .route("/sessions/{id}/nodes/{node_id}/position", put(move_node))
        .route("/sessions/{id}/graph", get(get_graph))
}

// ---------------------------------------------------------------
// Request types
// ---------------------------------------------------------------

#[derive(Deserialize)]
struct SelectStockBody {
    symbol: String,
}

#[derive(Deserialize)]
struct QuestionBody {
    question: String,
}

#[derive(Deserialize)]
struct AnswerBody {
    question: String,
    verdict: Verdict,
}

#[derive(Deserialize)]
struct PointBody {
    x: f64,
    y: f64,
}

// ---------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------

/// POST /api/sessions/{id}/stock: reset the board to a catalog stock.
async fn select_stock(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody<SelectStockBody>,
) -> ApiResult<Json<serde_json::Value>> {
    let session = state.session(&id)?;
    let stock = state
        .catalog
        .get(&body.symbol)
        .ok_or_else(|| ApiError::not_found(format!("stock {}", body.symbol)))?;

    info!("Session {} researching {}", id, stock.symbol);
    session.lock().select_stock(stock);
    Ok(Json(session_json(&session)?))
}

async fn propose_question(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody<QuestionBody>,
) -> ApiResult<Json<serde_json::Value>> {
    let session = state.session(&id)?;
    let mut controller = session.lock();
    let added = controller.propose_question(body.question);
    Ok(Json(serde_json::json!({
        "added": added,
        "pendingQuestions": controller.board().pending_questions(),
    })))
}

/// POST /api/sessions/{id}/questions/answer: investigate or skip.
async fn answer_question(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody<AnswerBody>,
) -> ApiResult<Json<serde_json::Value>> {
    let session = state.session(&id)?;
    let mut controller = session.lock();
    let outcome = controller.answer_question(&body.question, body.verdict);
    let board = controller.board();
    Ok(Json(serde_json::json!({
        "outcome": outcome,
        "pendingQuestions": board.pending_questions(),
        "insights": board.insights(),
        "stats": board.stats(),
    })))
}

/// POST /api/sessions/{id}/nodes: canvas double-click.
async fn add_node(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody<PointBody>,
) -> ApiResult<Json<ResearchNode>> {
    let session = state.session(&id)?;
    let mut controller = session.lock();
    let node_id = controller.add_free_node(body.x, body.y);
    controller
        .board()
        .node(&node_id)
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError(stockmind_core::Error::Internal("node vanished".into())))
}

async fn click_node(
    State(state): State<Arc<AppState>>,
    Path((id, node_id)): Path<(String, String)>,
) -> ApiResult<Json<serde_json::Value>> {
    let session = state.session(&id)?;
    let mut controller = session.lock();
    if !controller.click_node_id(&node_id) {
        return Err(ApiError::not_found(format!("node {node_id}")));
    }
    Ok(Json(serde_json::json!({
        "currentAnalysis": controller.board().current_analysis(),
    })))
}

/// PUT /api/sessions/{id}/nodes/{node_id}/position: drag.
async fn move_node(
    State(state): State<Arc<AppState>>,
    Path((id, node_id)): Path<(String, String)>,
    JsonBody(body): JsonBody<PointBody>,
) -> ApiResult<Json<ResearchNode>> {
    let session = state.session(&id)?;
    let mut controller = session.lock();
    if !controller.move_node(&node_id, body.x, body.y) {
        return Err(ApiError::not_found(format!("node {node_id}")));
    }
    controller
        .board()
        .node(&node_id)
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::not_found(format!("node {node_id}")))
}

async fn get_graph(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<GraphView>> {
    let session = state.session(&id)?;
    let graph = session.lock().graph();
    Ok(Json(graph))
}
