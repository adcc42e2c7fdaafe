//! Research controller: the single owner of a session's research state.
//!
//! Wraps the board and assistant panel with the deferred work the board
//! itself does not do: proposing follow-up questions after a delay and
//! revealing the assistant's analysis after its thinking time. Deferred work
//! runs only when [`ResearchController::tick`] observes it is due.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use stockmind_core::{ResearchNode, Stock, StockMindConfig, Verdict};
use stockmind_oracle::InsightOracle;
use tracing::{debug, info};

use crate::assistant::{AssistantPanel, RISK_QUESTION};
use crate::board::{BoardSnapshot, ResearchBoard};
use crate::graph::GraphView;
use crate::scheduler::{Clock, Scheduler, SystemClock, TaskId};

/// Work queued for later.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeferredAction {
    /// Propose the captured question, subject to the usual dedup rule.
    ProposeQuestion(String),
    /// Publish assistant output for the given run.
    RevealInsights { generation: u64 },
}

/// What answering a question did.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerOutcome {
    pub removed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub follow_up_task: Option<TaskId>,
}

/// Full controller state for rendering.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ControllerSnapshot {
    #[serde(flatten)]
    pub board: BoardSnapshot,
    pub assistant: AssistantPanel,
    pub scheduled_tasks: usize,
}

pub struct ResearchController {
    board: ResearchBoard,
    assistant: AssistantPanel,
    scheduler: Scheduler<DeferredAction>,
    clock: Arc<dyn Clock>,
    oracle: Arc<dyn InsightOracle>,
    follow_up_delay: Duration,
    thinking_delay: Duration,
    pending_reveal: Option<TaskId>,
}

impl ResearchController {
    /// Controller on the system clock, seeded from config when a seed is set.
    pub fn new(config: &StockMindConfig, oracle: Arc<dyn InsightOracle>) -> Self {
        Self::with_clock(config, oracle, Arc::new(SystemClock::new()))
    }

    pub fn with_clock(
        config: &StockMindConfig,
        oracle: Arc<dyn InsightOracle>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let rng = match config.placement_seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        };
        Self {
            board: ResearchBoard::new(config.question_region, rng),
            assistant: AssistantPanel::new(),
            scheduler: Scheduler::new(),
            clock,
            oracle,
            follow_up_delay: config.follow_up_delay(),
            thinking_delay: config.thinking_delay(),
            pending_reveal: None,
        }
    }

    // ---------------------------------------------------------------
    // Board operations
    // ---------------------------------------------------------------

    /// Reset the board to `stock`. The assistant restarts only when the
    /// symbol changes.
    pub fn select_stock(&mut self, stock: Stock) {
        info!(symbol = %stock.symbol, "Stock selected");
        let symbol = stock.symbol.clone();
        self.board.select_stock(stock);

        if self.assistant.symbol() == Some(symbol.as_str()) {
            return;
        }
        if let Some(task) = self.pending_reveal.take() {
            self.scheduler.cancel(task);
        }
        let generation = self.assistant.begin(&symbol);
        self.schedule_reveal(generation);
    }

    pub fn propose_question(&mut self, question: impl Into<String>) -> bool {
        self.board.propose_question(question)
    }

    /// Resolve a pending question; investigating queues its follow-up.
    pub fn answer_question(&mut self, question: &str, verdict: Verdict) -> AnswerOutcome {
        let answer = self.board.answer_question(question, verdict);
        let follow_up_task = answer.follow_up.map(|follow_up| {
            self.scheduler.schedule(
                self.clock.now(),
                self.follow_up_delay,
                DeferredAction::ProposeQuestion(follow_up),
            )
        });
        debug!(?verdict, removed = answer.removed, "Question answered");
        AnswerOutcome {
            removed: answer.removed,
            node_id: answer.node_id,
            follow_up_task,
        }
    }

    pub fn click_node(&mut self, node: &ResearchNode) {
        self.board.click_node(node);
    }

    /// Click by id. Returns false if the node is not on the board.
    pub fn click_node_id(&mut self, id: &str) -> bool {
        let Some(node) = self.board.node(id).cloned() else {
            return false;
        };
        self.board.click_node(&node);
        true
    }

    pub fn add_free_node(&mut self, x: f64, y: f64) -> String {
        self.board.add_free_node(x, y)
    }

    pub fn move_node(&mut self, id: &str, x: f64, y: f64) -> bool {
        self.board.move_node(id, x, y)
    }

    // ---------------------------------------------------------------
    // Assistant actions
    // ---------------------------------------------------------------

    /// Re-run the assistant. False when nothing is selected or it is busy.
    pub fn deep_analysis(&mut self) -> bool {
        match self.assistant.rerun() {
            Some(generation) => {
                self.schedule_reveal(generation);
                true
            }
            None => false,
        }
    }

    /// Propose the canned risk question.
    pub fn risk_analysis(&mut self) -> bool {
        self.board.propose_question(RISK_QUESTION)
    }

    /// Propose the assistant's suggestion at `index`.
    ///
    /// `None` when there is no such suggestion, otherwise whether it was added.
    pub fn adopt_suggestion(&mut self, index: usize) -> Option<bool> {
        let question = self.assistant.suggestion(index)?.to_string();
        Some(self.board.propose_question(question))
    }

    // ---------------------------------------------------------------
    // Deferred work
    // ---------------------------------------------------------------

    /// Run every deferred action that is due. Returns how many ran.
    pub fn tick(&mut self) -> usize {
        let due = self.scheduler.take_due(self.clock.now());
        let fired = due.len();
        for (task, action) in due {
            debug!(?task, ?action, "Deferred action due");
            match action {
                DeferredAction::ProposeQuestion(question) => {
                    self.board.propose_question(question);
                }
                DeferredAction::RevealInsights { generation } => {
                    if self.pending_reveal == Some(task) {
                        self.pending_reveal = None;
                    }
                    self.assistant.reveal(generation, self.oracle.as_ref());
                }
            }
        }
        fired
    }

    /// Cancel a follow-up handed out in [`AnswerOutcome::follow_up_task`].
    pub fn cancel_task(&mut self, task: TaskId) -> bool {
        self.scheduler.cancel(task)
    }

    /// Drop all deferred work. Returns how many tasks were cancelled.
    pub fn shutdown(&mut self) -> usize {
        self.pending_reveal = None;
        self.scheduler.cancel_all()
    }

    pub fn scheduled_tasks(&self) -> usize {
        self.scheduler.pending()
    }

    // ---------------------------------------------------------------
    // Views
    // ---------------------------------------------------------------

    pub fn board(&self) -> &ResearchBoard {
        &self.board
    }

    pub fn assistant(&self) -> &AssistantPanel {
        &self.assistant
    }

    pub fn graph(&self) -> GraphView {
        GraphView::build(self.board.nodes())
    }

    pub fn snapshot(&self) -> ControllerSnapshot {
        ControllerSnapshot {
            board: self.board.snapshot(),
            assistant: self.assistant.clone(),
            scheduled_tasks: self.scheduler.pending(),
        }
    }

    fn schedule_reveal(&mut self, generation: u64) {
        let task = self.scheduler.schedule(
            self.clock.now(),
            self.thinking_delay,
            DeferredAction::RevealInsights { generation },
        );
        self.pending_reveal = Some(task);
    }
}
