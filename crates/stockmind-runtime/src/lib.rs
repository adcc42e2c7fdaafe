//! Research runtime: the controller that owns a research session.
//!
//! The board holds graph, question and insight state; the controller adds
//! clock-driven deferred work and the assistant panel; the session manager
//! keeps independent sessions apart.

pub mod assistant;
pub mod board;
pub mod controller;
pub mod graph;
pub mod scheduler;
pub mod sessions;
pub mod templates;

pub use assistant::{AssistantPanel, RISK_QUESTION};
pub use board::{Answer, BoardSnapshot, BoardStats, ResearchBoard};
pub use controller::{AnswerOutcome, ControllerSnapshot, DeferredAction, ResearchController};
pub use graph::{GraphEdge, GraphStats, GraphView};
pub use scheduler::{Clock, ManualClock, Scheduler, SystemClock, TaskId};
pub use sessions::{ResearchSession, SessionInfo, SessionManager};
