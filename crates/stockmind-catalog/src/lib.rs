//! Stock catalog: read-only listings searched by symbol or name.
//!
//! The catalog is a collaborator of the research controller, not part of it:
//! anything implementing [`StockCatalog`] can back the stock picker.

pub mod catalog;

pub use catalog::{StaticCatalog, StockCatalog};
