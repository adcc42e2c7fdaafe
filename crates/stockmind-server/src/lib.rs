//! StockMind server: HTTP surface over research sessions.

pub mod error;
pub mod extract;
pub mod routes;
pub mod state;
pub mod ticker;

pub use routes::build_router;
pub use state::AppState;
