//! Research board types: stocks, graph nodes, question verdicts.

use serde::{Deserialize, Serialize};

/// A listed stock as returned by a catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stock {
    pub symbol: String,
    pub name: String,
    pub price: f64,
    pub change: f64,
    pub change_percent: f64,
    /// Display string, e.g. `45.2M`.
    pub volume: String,
    /// Display string, e.g. `2.78T`.
    pub market_cap: String,
}

impl Stock {
    /// Whether the day's change is non-negative.
    pub fn is_up(&self) -> bool {
        self.change >= 0.0
    }
}

/// Kind of research node. Only affects how a node is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Stock,
    Question,
    Insight,
    Analysis,
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Stock => write!(f, "stock"),
            Self::Question => write!(f, "question"),
            Self::Insight => write!(f, "insight"),
            Self::Analysis => write!(f, "analysis"),
        }
    }
}

/// Canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A point in the research graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResearchNode {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    pub content: String,
    #[serde(flatten)]
    pub position: Position,
    /// Ids this node links to. May name nodes that no longer exist.
    pub connections: Vec<String>,
    pub confidence: u32,
}

/// User decision on a pending question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    #[serde(alias = "positive")]
    Investigate,
    #[serde(alias = "negative")]
    Skip,
}
