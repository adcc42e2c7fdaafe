//! Canned research text produced by the board.

use stockmind_core::{ResearchNode, Stock};

pub fn analysis_summary(stock: &Stock) -> String {
    format!(
        "Initiating comprehensive analysis for {} ({}). Current price: ${:.2} with {} momentum of {:.2}%.",
        stock.name,
        stock.symbol,
        stock.price,
        if stock.is_up() { "positive" } else { "negative" },
        stock.change_percent,
    )
}

pub fn stock_node_content(stock: &Stock) -> String {
    format!("{} - ${:.2}", stock.name, stock.price)
}

pub fn opening_questions(symbol: &str) -> Vec<String> {
    vec![
        format!("What drives {symbol}'s recent price movement?"),
        format!("How does {symbol} compare to industry peers?"),
        format!("What are the key financial metrics to analyze for {symbol}?"),
    ]
}

pub fn investigation_insight(question: &str) -> String {
    format!(
        "Investigation into \"{question}\" reveals important market dynamics that warrant deeper analysis."
    )
}

pub fn follow_up_question(question: &str) -> String {
    format!("Based on the investigation of \"{question}\", what specific metrics should we prioritize?")
}

pub fn node_analysis(node: &ResearchNode) -> String {
    format!("Examining {}: {}", node.kind, node.content)
}
