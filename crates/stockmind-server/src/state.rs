//! Shared application state.

use std::sync::Arc;

use stockmind_catalog::StockCatalog;
use stockmind_core::StockMindConfig;
use stockmind_oracle::InsightOracle;
use stockmind_runtime::{ResearchSession, SessionManager};

use crate::error::ApiError;

/// Shared application state accessible from all route handlers.
pub struct AppState {
    pub config: StockMindConfig,
    pub catalog: Arc<dyn StockCatalog>,
    pub oracle: Arc<dyn InsightOracle>,
    pub sessions: SessionManager,
}

impl AppState {
    pub fn new(
        config: StockMindConfig,
        catalog: Arc<dyn StockCatalog>,
        oracle: Arc<dyn InsightOracle>,
    ) -> Self {
        let sessions = SessionManager::new(config.clone(), oracle.clone());
        Self::with_sessions(config, catalog, oracle, sessions)
    }

    /// State around an existing session manager, e.g. one on a manual clock.
    pub fn with_sessions(
        config: StockMindConfig,
        catalog: Arc<dyn StockCatalog>,
        oracle: Arc<dyn InsightOracle>,
        sessions: SessionManager,
    ) -> Self {
        Self {
            config,
            catalog,
            oracle,
            sessions,
        }
    }

    pub fn session(&self, id: &str) -> Result<Arc<ResearchSession>, ApiError> {
        self.sessions
            .get(id)
            .ok_or_else(|| ApiError::not_found(format!("session {id}")))
    }
}
