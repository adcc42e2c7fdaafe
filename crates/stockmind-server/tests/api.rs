//! API tests: drive the router in-process and check response shapes and
//! the research flow end to end.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use stockmind_catalog::StaticCatalog;
use stockmind_core::StockMindConfig;
use stockmind_oracle::CannedOracle;
use stockmind_runtime::{ManualClock, SessionManager};
use stockmind_server::{build_router, AppState};
use tower::ServiceExt;

struct Harness {
    state: Arc<AppState>,
    clock: Arc<ManualClock>,
}

impl Harness {
    fn new() -> Self {
        let config = StockMindConfig {
            placement_seed: Some(3),
            ..StockMindConfig::default()
        };
        let oracle = Arc::new(CannedOracle::new());
        let clock = Arc::new(ManualClock::new());
        let sessions = SessionManager::with_clock(config.clone(), oracle.clone(), clock.clone());
        let state = Arc::new(AppState::with_sessions(
            config,
            Arc::new(StaticCatalog::mock()),
            oracle,
            sessions,
        ));
        Self { state, clock }
    }

    fn router(&self) -> Router {
        build_router(self.state.clone())
    }

    async fn call(
        &self,
        method: &str,
        uri: &str,
        body: Option<serde_json::Value>,
    ) -> (StatusCode, serde_json::Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let response = self.router().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    async fn new_session(&self) -> String {
        let (status, json) = self.call("POST", "/api/sessions", None).await;
        assert_eq!(status, StatusCode::OK);
        json["id"].as_str().unwrap().to_string()
    }
}

#[tokio::test]
async fn test_stock_search() {
    let h = Harness::new();

    let (status, json) = h.call("GET", "/api/stocks", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["total"], 5);

    let (_, json) = h.call("GET", "/api/stocks?q=nvidia", None).await;
    assert_eq!(json["total"], 1);
    assert_eq!(json["stocks"][0]["symbol"], "NVDA");
    assert!(json["stocks"][0]["changePercent"].is_number());
    assert!(json["stocks"][0]["marketCap"].is_string());

    let (status, _) = h.call("GET", "/api/stocks/IBM", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_oracle_fallback() {
    let h = Harness::new();
    let (status, json) = h.call("GET", "/api/oracle/IBM", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(json["insight"].as_str().unwrap().starts_with("Analyzing"));
    assert_eq!(json["questions"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_select_stock_seeds_board() {
    let h = Harness::new();
    let id = h.new_session().await;

    let (status, json) = h
        .call(
            "POST",
            &format!("/api/sessions/{id}/stock"),
            Some(serde_json::json!({ "symbol": "AAPL" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["id"], id.as_str());
    assert_eq!(json["nodes"].as_array().unwrap().len(), 1);
    assert_eq!(json["nodes"][0]["type"], "stock");
    let analysis = json["currentAnalysis"].as_str().unwrap();
    assert!(analysis.contains("Apple Inc."));
    assert!(analysis.contains("175.43"));
    assert!(analysis.contains("positive"));
    let pending = json["pendingQuestions"].as_array().unwrap();
    assert_eq!(pending.len(), 3);
    assert!(pending.iter().all(|q| q.as_str().unwrap().contains("AAPL")));

    let (status, _) = h
        .call(
            "POST",
            &format!("/api/sessions/{id}/stock"),
            Some(serde_json::json!({ "symbol": "NOPE" })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_investigate_flow() {
    let h = Harness::new();
    let id = h.new_session().await;
    h.call(
        "POST",
        &format!("/api/sessions/{id}/stock"),
        Some(serde_json::json!({ "symbol": "TSLA" })),
    )
    .await;

    let (_, session) = h.call("GET", &format!("/api/sessions/{id}"), None).await;
    let question = session["pendingQuestions"][0].as_str().unwrap().to_string();

    let (status, json) = h
        .call(
            "POST",
            &format!("/api/sessions/{id}/questions/answer"),
            Some(serde_json::json!({ "question": question, "verdict": "investigate" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["outcome"]["removed"], true);
    assert!(json["outcome"]["nodeId"].is_string());
    assert_eq!(json["pendingQuestions"].as_array().unwrap().len(), 2);
    assert_eq!(json["insights"].as_array().unwrap().len(), 1);
    assert_eq!(json["stats"]["nodes"], 2);
    assert_eq!(json["stats"]["researchDepth"], 20);

    let (_, graph) = h.call("GET", &format!("/api/sessions/{id}/graph"), None).await;
    assert_eq!(graph["links"].as_array().unwrap().len(), 1);
    assert_eq!(graph["links"][0]["target"], "stock-TSLA");

    h.clock.advance_ms(1000);
    h.state.sessions.tick_all();

    let (_, session) = h.call("GET", &format!("/api/sessions/{id}"), None).await;
    let pending = session["pendingQuestions"].as_array().unwrap();
    assert_eq!(pending.len(), 3);
    assert!(pending[2].as_str().unwrap().contains(&question));
}

#[tokio::test]
async fn test_skip_and_propose() {
    let h = Harness::new();
    let id = h.new_session().await;
    let uri = format!("/api/sessions/{id}/questions");

    for q in ["Q1", "Q2", "Q1"] {
        h.call("POST", &uri, Some(serde_json::json!({ "question": q })))
            .await;
    }
    let (_, json) = h
        .call(
            "POST",
            &format!("{uri}/answer"),
            Some(serde_json::json!({ "question": "Q1", "verdict": "skip" })),
        )
        .await;
    assert_eq!(json["pendingQuestions"], serde_json::json!(["Q2"]));
    assert_eq!(json["insights"], serde_json::json!([]));
    assert!(json["outcome"].get("followUpTask").is_none());
}

#[tokio::test]
async fn test_nodes_click_and_move() {
    let h = Harness::new();
    let id = h.new_session().await;

    let (status, node) = h
        .call(
            "POST",
            &format!("/api/sessions/{id}/nodes"),
            Some(serde_json::json!({ "x": 150.0, "y": 200.0 })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(node["type"], "insight");
    assert_eq!(node["x"], 150.0);
    assert_eq!(node["connections"], serde_json::json!([]));
    let node_id = node["id"].as_str().unwrap().to_string();

    let (_, json) = h
        .call(
            "POST",
            &format!("/api/sessions/{id}/nodes/{node_id}/click"),
            None,
        )
        .await;
    assert_eq!(
        json["currentAnalysis"],
        "Examining insight: Double-click to add research nodes"
    );

    let (status, moved) = h
        .call(
            "PUT",
            &format!("/api/sessions/{id}/nodes/{node_id}/position"),
            Some(serde_json::json!({ "x": 10.0, "y": 20.0 })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(moved["y"], 20.0);

    let (status, json) = h
        .call("POST", &format!("/api/sessions/{id}/nodes/ghost/click"), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(json["error"].is_string());
}

#[tokio::test]
async fn test_assistant_flow() {
    let h = Harness::new();
    let id = h.new_session().await;
    h.call(
        "POST",
        &format!("/api/sessions/{id}/stock"),
        Some(serde_json::json!({ "symbol": "MSFT" })),
    )
    .await;

    let (_, panel) = h.call("GET", &format!("/api/sessions/{id}/assistant"), None).await;
    assert_eq!(panel["thinking"], true);
    assert_eq!(panel["symbol"], "MSFT");

    h.clock.advance_ms(2000);
    h.state.sessions.tick_all();

    let (_, panel) = h.call("GET", &format!("/api/sessions/{id}/assistant"), None).await;
    assert_eq!(panel["thinking"], false);
    assert!(panel["currentInsight"].as_str().unwrap().starts_with("Microsoft"));
    assert_eq!(panel["suggestedQuestions"].as_array().unwrap().len(), 3);

    let (status, json) = h
        .call(
            "POST",
            &format!("/api/sessions/{id}/assistant/suggestions/0"),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["added"], true);
    assert_eq!(json["pendingQuestions"].as_array().unwrap().len(), 4);

    let (status, _) = h
        .call(
            "POST",
            &format!("/api/sessions/{id}/assistant/suggestions/9"),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, json) = h
        .call(
            "POST",
            &format!("/api/sessions/{id}/assistant/risk-analysis"),
            None,
        )
        .await;
    assert_eq!(json["added"], true);

    let (_, json) = h
        .call(
            "POST",
            &format!("/api/sessions/{id}/assistant/deep-analysis"),
            None,
        )
        .await;
    assert_eq!(json["started"], true);
    assert_eq!(json["thinking"], true);
}

#[tokio::test]
async fn test_session_lifecycle() {
    let h = Harness::new();
    let id = h.new_session().await;
    h.new_session().await;

    let (_, json) = h.call("GET", "/api/sessions", None).await;
    assert_eq!(json["count"], 2);

    let (_, stats) = h.call("GET", "/api/stats", None).await;
    assert_eq!(stats["sessions"], 2);
    assert_eq!(stats["catalogSize"], 5);

    let (status, json) = h.call("DELETE", &format!("/api/sessions/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);

    let (status, _) = h.call("GET", &format!("/api/sessions/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = h.call("DELETE", &format!("/api/sessions/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_bad_request_bodies_are_json_400() {
    let h = Harness::new();
    let id = h.new_session().await;

    let (status, json) = h
        .call(
            "POST",
            &format!("/api/sessions/{id}/questions/answer"),
            Some(serde_json::json!({ "question": "Q", "verdict": "maybe" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().starts_with("Invalid argument"));

    let (status, json) = h
        .call(
            "POST",
            &format!("/api/sessions/{id}/nodes"),
            Some(serde_json::json!({ "x": "left" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].is_string());

    // missing content type
    let (status, json) = h
        .call("POST", &format!("/api/sessions/{id}/questions"), None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].is_string());
}

#[tokio::test]
async fn test_reselecting_stock_keeps_assistant_output() {
    let h = Harness::new();
    let id = h.new_session().await;
    let uri = format!("/api/sessions/{id}/stock");
    h.call("POST", &uri, Some(serde_json::json!({ "symbol": "AAPL" })))
        .await;
    h.clock.advance_ms(2000);
    h.state.sessions.tick_all();

    let (status, json) = h
        .call("POST", &uri, Some(serde_json::json!({ "symbol": "aapl" })))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["assistant"]["thinking"], false);
    assert!(json["assistant"]["currentInsight"].is_string());
}
