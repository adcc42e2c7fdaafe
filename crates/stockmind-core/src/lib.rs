//! StockMind Core: shared research types, configuration, errors.

pub mod config;
pub mod error;
pub mod types;

pub use config::{CanvasRegion, StockMindConfig};
pub use error::{Error, Result};
pub use types::*;
