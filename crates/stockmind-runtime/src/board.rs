//! Research board: the authoritative state of one research session.
//!
//! Every operation is total: bad or stale input degrades to a no-op rather
//! than an error.

use serde::Serialize;
use stockmind_core::{CanvasRegion, NodeKind, Position, ResearchNode, Stock, Verdict};
use tracing::debug;

use crate::templates;

pub const STOCK_NODE_POSITION: Position = Position { x: 400.0, y: 200.0 };
pub const STOCK_NODE_CONFIDENCE: u32 = 85;
pub const QUESTION_NODE_TITLE: &str = "Research Q";
pub const QUESTION_NODE_CONFIDENCE: u32 = 75;
pub const FREE_NODE_TITLE: &str = "New Insight";
pub const FREE_NODE_CONTENT: &str = "Double-click to add research nodes";
pub const FREE_NODE_CONFIDENCE: u32 = 60;

/// Id of the node seeded for a selected stock.
pub fn stock_node_id(symbol: &str) -> String {
    format!("stock-{symbol}")
}

/// Result of answering a question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    /// Whether the question was pending.
    pub removed: bool,
    /// Node created for an investigated question.
    pub node_id: Option<String>,
    /// Question to propose once the follow-up delay has passed.
    pub follow_up: Option<String>,
}

/// Header counters shown alongside the graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardStats {
    pub nodes: usize,
    pub pending_questions: usize,
    pub insights: usize,
    /// Percentage, 20 per insight, capped at 100.
    pub research_depth: u8,
}

/// Serializable copy of the board for rendering.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardSnapshot {
    pub selected_stock: Option<Stock>,
    pub nodes: Vec<ResearchNode>,
    pub pending_questions: Vec<String>,
    pub insights: Vec<String>,
    pub current_analysis: String,
    pub stats: BoardStats,
}

pub struct ResearchBoard {
    selected_stock: Option<Stock>,
    nodes: Vec<ResearchNode>,
    pending_questions: Vec<String>,
    insights: Vec<String>,
    current_analysis: String,
    region: CanvasRegion,
    rng: fastrand::Rng,
    next_seq: u64,
}

impl ResearchBoard {
    pub fn new(region: CanvasRegion, rng: fastrand::Rng) -> Self {
        Self {
            selected_stock: None,
            nodes: Vec::new(),
            pending_questions: Vec::new(),
            insights: Vec::new(),
            current_analysis: String::new(),
            region,
            rng,
            next_seq: 1,
        }
    }

    /// Board with default region and a fixed placement seed.
    pub fn seeded(seed: u64) -> Self {
        Self::new(CanvasRegion::default(), fastrand::Rng::with_seed(seed))
    }

    /// Start fresh research on `stock`. Discards the previous graph and questions.
    pub fn select_stock(&mut self, stock: Stock) {
        debug!(symbol = %stock.symbol, dropped_nodes = self.nodes.len(), "Resetting board");

        self.current_analysis = templates::analysis_summary(&stock);
        self.nodes = vec![ResearchNode {
            id: stock_node_id(&stock.symbol),
            title: stock.symbol.clone(),
            kind: NodeKind::Stock,
            content: templates::stock_node_content(&stock),
            position: STOCK_NODE_POSITION,
            connections: Vec::new(),
            confidence: STOCK_NODE_CONFIDENCE,
        }];
        self.pending_questions = templates::opening_questions(&stock.symbol);
        self.selected_stock = Some(stock);
    }

    /// Add a question unless the exact string is already pending.
    pub fn propose_question(&mut self, question: impl Into<String>) -> bool {
        let question = question.into();
        if self.pending_questions.contains(&question) {
            return false;
        }
        self.pending_questions.push(question);
        true
    }

    /// Resolve a question. Investigating records a node and an insight and
    /// hands back the follow-up the caller should propose later.
    pub fn answer_question(&mut self, question: &str, verdict: Verdict) -> Answer {
        let removed = match self.pending_questions.iter().position(|q| q == question) {
            Some(idx) => {
                self.pending_questions.remove(idx);
                true
            }
            None => false,
        };

        if verdict == Verdict::Skip {
            return Answer {
                removed,
                node_id: None,
                follow_up: None,
            };
        }

        let id = self.next_id("question");
        let position = self.random_position();
        let connections = self
            .selected_stock
            .as_ref()
            .map(|s| vec![stock_node_id(&s.symbol)])
            .unwrap_or_default();

        self.nodes.push(ResearchNode {
            id: id.clone(),
            title: QUESTION_NODE_TITLE.into(),
            kind: NodeKind::Question,
            content: question.to_string(),
            position,
            connections,
            confidence: QUESTION_NODE_CONFIDENCE,
        });
        self.insights.push(templates::investigation_insight(question));

        Answer {
            removed,
            node_id: Some(id),
            follow_up: Some(templates::follow_up_question(question)),
        }
    }

    /// Describe `node` in the analysis pane. Nothing else changes.
    pub fn click_node(&mut self, node: &ResearchNode) {
        self.current_analysis = templates::node_analysis(node);
    }

    /// Drop a placeholder insight node where the canvas was double-clicked.
    pub fn add_free_node(&mut self, x: f64, y: f64) -> String {
        let id = self.next_id("node");
        self.nodes.push(ResearchNode {
            id: id.clone(),
            title: FREE_NODE_TITLE.into(),
            kind: NodeKind::Insight,
            content: FREE_NODE_CONTENT.into(),
            position: Position::new(x, y),
            connections: Vec::new(),
            confidence: FREE_NODE_CONFIDENCE,
        });
        id
    }

    /// Drag a node to a new position.
    pub fn move_node(&mut self, id: &str, x: f64, y: f64) -> bool {
        match self.nodes.iter_mut().find(|n| n.id == id) {
            Some(node) => {
                node.position = Position::new(x, y);
                true
            }
            None => false,
        }
    }

    pub fn node(&self, id: &str) -> Option<&ResearchNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn selected_stock(&self) -> Option<&Stock> {
        self.selected_stock.as_ref()
    }

    pub fn nodes(&self) -> &[ResearchNode] {
        &self.nodes
    }

    pub fn pending_questions(&self) -> &[String] {
        &self.pending_questions
    }

    pub fn insights(&self) -> &[String] {
        &self.insights
    }

    pub fn current_analysis(&self) -> &str {
        &self.current_analysis
    }

    pub fn stats(&self) -> BoardStats {
        BoardStats {
            nodes: self.nodes.len(),
            pending_questions: self.pending_questions.len(),
            insights: self.insights.len(),
            research_depth: (self.insights.len().saturating_mul(20)).min(100) as u8,
        }
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            selected_stock: self.selected_stock.clone(),
            nodes: self.nodes.clone(),
            pending_questions: self.pending_questions.clone(),
            insights: self.insights.clone(),
            current_analysis: self.current_analysis.clone(),
            stats: self.stats(),
        }
    }

    fn next_id(&mut self, prefix: &str) -> String {
        let id = format!("{prefix}-{}", self.next_seq);
        self.next_seq += 1;
        id
    }

    fn random_position(&mut self) -> Position {
        Position::new(
            self.region.x_min + self.rng.f64() * self.region.width,
            self.region.y_min + self.rng.f64() * self.region.height,
        )
    }
}
