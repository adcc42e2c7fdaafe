//! Catalog trait and the built-in mock listings.

use stockmind_core::Stock;

/// A read-only source of stock listings.
pub trait StockCatalog: Send + Sync {
    /// Case-insensitive substring match against symbol or name.
    ///
    /// Results keep catalog order. An empty term matches everything.
    fn search(&self, term: &str) -> Vec<Stock>;

    /// Exact symbol lookup, ignoring case.
    fn get(&self, symbol: &str) -> Option<Stock>;
}

/// Catalog over a fixed in-memory list.
#[derive(Debug, Clone)]
pub struct StaticCatalog {
    stocks: Vec<Stock>,
}

impl StaticCatalog {
    pub fn new(stocks: Vec<Stock>) -> Self {
        Self { stocks }
    }

    /// The five mock listings the board ships with.
    pub fn mock() -> Self {
        Self::new(vec![
            listing("AAPL", "Apple Inc.", 175.43, 2.34, 1.35, "45.2M", "2.78T"),
            listing("MSFT", "Microsoft Corporation", 338.11, -1.24, -0.37, "23.8M", "2.51T"),
            listing("GOOGL", "Alphabet Inc.", 127.83, 0.89, 0.70, "28.4M", "1.63T"),
            listing("TSLA", "Tesla, Inc.", 248.50, -5.67, -2.23, "67.9M", "791.2B"),
            listing("NVDA", "NVIDIA Corporation", 445.87, 12.45, 2.87, "41.2M", "1.09T"),
        ])
    }
}

impl Default for StaticCatalog {
    fn default() -> Self {
        Self::mock()
    }
}

impl StockCatalog for StaticCatalog {
    fn search(&self, term: &str) -> Vec<Stock> {
        let needle = term.to_lowercase();
        self.stocks
            .iter()
            .filter(|s| {
                s.symbol.to_lowercase().contains(&needle)
                    || s.name.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect()
    }

    fn get(&self, symbol: &str) -> Option<Stock> {
        self.stocks
            .iter()
            .find(|s| s.symbol.eq_ignore_ascii_case(symbol))
            .cloned()
    }
}

fn listing(
    symbol: &str,
    name: &str,
    price: f64,
    change: f64,
    change_percent: f64,
    volume: &str,
    market_cap: &str,
) -> Stock {
    Stock {
        symbol: symbol.into(),
        name: name.into(),
        price,
        change,
        change_percent,
        volume: volume.into(),
        market_cap: market_cap.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn symbols(stocks: &[Stock]) -> Vec<&str> {
        stocks.iter().map(|s| s.symbol.as_str()).collect()
    }

    #[test]
    fn test_empty_term_returns_everything_in_order() {
        let catalog = StaticCatalog::mock();
        let all = catalog.search("");
        assert_eq!(symbols(&all), vec!["AAPL", "MSFT", "GOOGL", "TSLA", "NVDA"]);
    }

    #[test]
    fn test_search_by_symbol_ignores_case() {
        let catalog = StaticCatalog::mock();
        assert_eq!(symbols(&catalog.search("tsl")), vec!["TSLA"]);
    }

    #[test]
    fn test_search_by_name() {
        let catalog = StaticCatalog::mock();
        // "Corporation" appears in two names
        assert_eq!(symbols(&catalog.search("corporation")), vec!["MSFT", "NVDA"]);
        assert_eq!(symbols(&catalog.search("alphabet")), vec!["GOOGL"]);
    }

    #[test]
    fn test_search_matches_symbol_or_name() {
        let catalog = StaticCatalog::mock();
        // "a" hits every symbol or name
        assert_eq!(catalog.search("a").len(), 5);
        assert!(catalog.search("zzz").is_empty());
    }

    #[test]
    fn test_get_symbol() {
        let catalog = StaticCatalog::mock();
        let apple = catalog.get("aapl").unwrap();
        assert_eq!(apple.name, "Apple Inc.");
        assert_eq!(apple.price, 175.43);
        assert!(catalog.get("AAP").is_none());
    }
}
