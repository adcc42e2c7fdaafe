//! Insight oracle: canned research insights and question suggestions.
//!
//! Stands in for an AI analyst. Lookups are pure and instant; any simulated
//! thinking time belongs to the caller.

pub mod oracle;

pub use oracle::{CannedOracle, InsightOracle, FALLBACK_INSIGHT, FALLBACK_QUESTIONS};
