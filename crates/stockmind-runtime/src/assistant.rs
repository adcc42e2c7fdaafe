//! Assistant panel: simulated AI analysis for the selected symbol.
//!
//! Insights are not shown immediately: [`AssistantPanel::begin`] marks the
//! panel as thinking and the owner reveals the oracle's answer once the
//! thinking delay has elapsed. A reveal for a superseded request is ignored.

use serde::Serialize;
use stockmind_oracle::InsightOracle;

/// Question proposed by the "Risk Analysis" action.
pub const RISK_QUESTION: &str = "What are the key risks I should investigate further?";

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssistantPanel {
    symbol: Option<String>,
    thinking: bool,
    current_insight: Option<String>,
    suggested_questions: Vec<String>,
    generation: u64,
}

impl AssistantPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start analysing `symbol`. Returns the generation to reveal later.
    pub fn begin(&mut self, symbol: &str) -> u64 {
        self.symbol = Some(symbol.to_string());
        self.thinking = true;
        self.generation += 1;
        self.generation
    }

    /// Re-run analysis for the current symbol.
    ///
    /// `None` when there is no symbol yet or a run is already in flight.
    pub fn rerun(&mut self) -> Option<u64> {
        if self.thinking {
            return None;
        }
        let symbol = self.symbol.clone()?;
        Some(self.begin(&symbol))
    }

    /// Publish the oracle's answer if `generation` is still current.
    pub fn reveal(&mut self, generation: u64, oracle: &dyn InsightOracle) -> bool {
        if generation != self.generation || !self.thinking {
            return false;
        }
        let Some(symbol) = self.symbol.as_deref() else {
            return false;
        };
        self.current_insight = Some(oracle.insight(symbol));
        self.suggested_questions = oracle.questions(symbol);
        self.thinking = false;
        true
    }

    pub fn suggestion(&self, index: usize) -> Option<&str> {
        self.suggested_questions.get(index).map(String::as_str)
    }

    pub fn symbol(&self) -> Option<&str> {
        self.symbol.as_deref()
    }

    pub fn is_thinking(&self) -> bool {
        self.thinking
    }

    pub fn current_insight(&self) -> Option<&str> {
        self.current_insight.as_deref()
    }

    pub fn suggested_questions(&self) -> &[String] {
        &self.suggested_questions
    }
}
