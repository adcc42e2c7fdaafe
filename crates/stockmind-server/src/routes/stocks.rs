//! Catalog search and oracle lookups.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use stockmind_core::Stock;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/stocks", get(search_stocks))
        .route("/stocks/{symbol}", get(get_stock))
        .route("/oracle/{symbol}", get(get_oracle))
}

#[derive(Deserialize)]
struct SearchParams {
    #[serde(default)]
    q: String,
}

/// GET /api/stocks?q=: symbol or name search; empty query lists everything.
async fn search_stocks(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Json<serde_json::Value> {
    let stocks = state.catalog.search(&params.q);
    Json(serde_json::json!({
        "stocks": stocks,
        "total": stocks.len(),
        "query": params.q,
    }))
}

async fn get_stock(
    State(state): State<Arc<AppState>>,
    Path(symbol): Path<String>,
) -> ApiResult<Json<Stock>> {
    state
        .catalog
        .get(&symbol)
        .map(Json)
        .ok_or_else(|| ApiError::not_found(format!("stock {symbol}")))
}

/// GET /api/oracle/{symbol}: canned insight and questions, with fallback.
async fn get_oracle(
    State(state): State<Arc<AppState>>,
    Path(symbol): Path<String>,
) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "symbol": symbol,
        "insight": state.oracle.insight(&symbol),
        "questions": state.oracle.questions(&symbol),
    }))
}
