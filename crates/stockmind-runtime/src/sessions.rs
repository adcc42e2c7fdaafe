//! Session registry: independent research sessions keyed by id.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::{Mutex, MutexGuard, RwLock};
use serde::Serialize;
use stockmind_core::StockMindConfig;
use stockmind_oracle::InsightOracle;
use tracing::info;

use crate::controller::ResearchController;
use crate::scheduler::{Clock, SystemClock};

/// Summary row for session listings.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionInfo {
    pub id: String,
    pub created_at: String,
    pub selected_symbol: Option<String>,
    pub node_count: usize,
    pub pending_questions: usize,
    pub insight_count: usize,
}

/// One user's research session.
pub struct ResearchSession {
    pub id: String,
    pub created_at: DateTime<Utc>,
    /// Creation order within the manager; eviction and listings follow it.
    seq: u64,
    controller: Mutex<ResearchController>,
}

impl ResearchSession {
    /// Exclusive access to the controller. Operations on a session are serialized.
    pub fn lock(&self) -> MutexGuard<'_, ResearchController> {
        self.controller.lock()
    }

    pub fn info(&self) -> SessionInfo {
        let controller = self.controller.lock();
        let stats = controller.board().stats();
        SessionInfo {
            id: self.id.clone(),
            created_at: self.created_at.to_rfc3339(),
            selected_symbol: controller.board().selected_stock().map(|s| s.symbol.clone()),
            node_count: stats.nodes,
            pending_questions: stats.pending_questions,
            insight_count: stats.insights,
        }
    }
}

/// Creates, tracks, ticks and tears down research sessions.
pub struct SessionManager {
    sessions: RwLock<HashMap<String, Arc<ResearchSession>>>,
    config: StockMindConfig,
    oracle: Arc<dyn InsightOracle>,
    clock: Arc<dyn Clock>,
    max_sessions: usize,
    next_seq: AtomicU64,
}

impl SessionManager {
    pub fn new(config: StockMindConfig, oracle: Arc<dyn InsightOracle>) -> Self {
        Self::with_clock(config, oracle, Arc::new(SystemClock::new()))
    }

    pub fn with_clock(
        config: StockMindConfig,
        oracle: Arc<dyn InsightOracle>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            config,
            oracle,
            clock,
            max_sessions: 100,
            next_seq: AtomicU64::new(0),
        }
    }

    pub fn with_max_sessions(mut self, max_sessions: usize) -> Self {
        self.max_sessions = max_sessions.max(1);
        self
    }

    /// Start a new, empty session.
    pub fn create(&self) -> Arc<ResearchSession> {
        let controller =
            ResearchController::with_clock(&self.config, self.oracle.clone(), self.clock.clone());
        let session = Arc::new(ResearchSession {
            id: uuid::Uuid::new_v4().to_string(),
            created_at: Utc::now(),
            seq: self.next_seq.fetch_add(1, Ordering::Relaxed),
            controller: Mutex::new(controller),
        });

        let mut sessions = self.sessions.write();
        if sessions.len() >= self.max_sessions {
            // Evict the oldest session
            if let Some(oldest_id) = sessions
                .values()
                .min_by_key(|s| s.seq)
                .map(|s| s.id.clone())
            {
                if let Some(evicted) = sessions.remove(&oldest_id) {
                    evicted.lock().shutdown();
                    info!("Research session evicted: {}", oldest_id);
                }
            }
        }

        sessions.insert(session.id.clone(), session.clone());
        info!("Research session created: {}", session.id);
        session
    }

    pub fn get(&self, id: &str) -> Option<Arc<ResearchSession>> {
        self.sessions.read().get(id).cloned()
    }

    /// Sessions, oldest first.
    pub fn list(&self) -> Vec<SessionInfo> {
        let mut sessions: Vec<Arc<ResearchSession>> =
            self.sessions.read().values().cloned().collect();
        sessions.sort_by_key(|s| s.seq);
        sessions.iter().map(|s| s.info()).collect()
    }

    /// End a session, cancelling its deferred work.
    pub fn end(&self, id: &str) -> bool {
        let Some(session) = self.sessions.write().remove(id) else {
            return false;
        };
        let cancelled = session.lock().shutdown();
        info!("Research session ended: {} ({} tasks cancelled)", id, cancelled);
        true
    }

    /// End every session. Used on server shutdown.
    pub fn end_all(&self) -> usize {
        let drained: Vec<Arc<ResearchSession>> =
            self.sessions.write().drain().map(|(_, s)| s).collect();
        for session in &drained {
            session.lock().shutdown();
        }
        if !drained.is_empty() {
            info!("Ended {} research sessions", drained.len());
        }
        drained.len()
    }

    /// Fire due deferred work in every session. Returns total actions run.
    pub fn tick_all(&self) -> usize {
        let sessions: Vec<Arc<ResearchSession>> = self.sessions.read().values().cloned().collect();
        sessions.iter().map(|s| s.lock().tick()).sum()
    }

    pub fn count(&self) -> usize {
        self.sessions.read().len()
    }

    pub fn config(&self) -> &StockMindConfig {
        &self.config
    }
}
