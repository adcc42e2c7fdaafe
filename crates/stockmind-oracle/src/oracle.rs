//! Oracle trait and the curated lookup tables.

use std::collections::HashMap;

pub const FALLBACK_INSIGHT: &str =
    "Analyzing market position and competitive dynamics for detailed insights...";

pub const FALLBACK_QUESTIONS: &[&str] = &[
    "What are the key competitive advantages of this company?",
    "How does this stock perform during economic downturns?",
    "What are the main risks facing this company's business model?",
];

/// Source of research text for a symbol.
///
/// Both lookups must return something for symbols they do not know.
pub trait InsightOracle: Send + Sync {
    fn insight(&self, symbol: &str) -> String;
    fn questions(&self, symbol: &str) -> Vec<String>;
}

struct Entry {
    insight: &'static str,
    questions: [&'static str; 3],
}

/// Oracle backed by hand-written entries for a handful of large caps.
pub struct CannedOracle {
    entries: HashMap<&'static str, Entry>,
}

impl CannedOracle {
    pub fn new() -> Self {
        let mut entries = HashMap::new();
        entries.insert(
            "AAPL",
            Entry {
                insight: "Apple shows strong fundamentals with consistent revenue growth. Recent iPhone sales data suggests market saturation concerns, but services revenue continues expanding. Consider investigating supply chain dependencies and competitive positioning in emerging markets.",
                questions: [
                    "How sustainable is Apple's services revenue growth trajectory?",
                    "What impact will emerging market smartphone competition have on iPhone sales?",
                    "How well positioned is Apple for the next major technology shift?",
                ],
            },
        );
        entries.insert(
            "MSFT",
            Entry {
                insight: "Microsoft demonstrates robust cloud growth through Azure platform. Enterprise adoption rates are accelerating, but pricing pressure from competitors like AWS needs analysis. Explore AI integration impact on productivity software suite.",
                questions: [
                    "Can Microsoft maintain Azure's growth rate against AWS competition?",
                    "How will AI integration affect Office 365 pricing power?",
                    "What are the regulatory risks for Microsoft's market position?",
                ],
            },
        );
        entries.insert(
            "GOOGL",
            Entry {
                insight: "Alphabet faces regulatory scrutiny but maintains search dominance. AI investments in Bard and cloud services show promise. Ad revenue sensitivity to economic cycles requires deeper investigation.",
                questions: [
                    "How will AI chatbots impact Google's search advertising business?",
                    "What are the potential financial impacts of ongoing antitrust cases?",
                    "Can Google Cloud catch up to AWS and Azure in market share?",
                ],
            },
        );
        entries.insert(
            "TSLA",
            Entry {
                insight: "Tesla shows volatility with production scaling challenges. Energy storage business potential undervalued by market. Investigate autonomous driving timeline and competitive moat sustainability.",
                questions: [
                    "When will Tesla achieve full autonomous driving capability?",
                    "How scalable is Tesla's energy storage business model?",
                    "What are Tesla's competitive advantages in the EV market long-term?",
                ],
            },
        );
        entries.insert(
            "NVDA",
            Entry {
                insight: "NVIDIA benefits from AI boom but faces cyclical semiconductor risks. Data center revenue growth impressive, but gaming segment volatility concerning. Analyze China export restrictions impact.",
                questions: [
                    "How sustainable is the current AI-driven demand for NVIDIA chips?",
                    "What happens to NVIDIA if the crypto market crashes again?",
                    "How will geopolitical tensions affect NVIDIA's China business?",
                ],
            },
        );
        Self { entries }
    }
}

impl Default for CannedOracle {
    fn default() -> Self {
        Self::new()
    }
}

impl InsightOracle for CannedOracle {
    fn insight(&self, symbol: &str) -> String {
        self.entries
            .get(symbol)
            .map(|e| e.insight)
            .unwrap_or(FALLBACK_INSIGHT)
            .to_string()
    }

    fn questions(&self, symbol: &str) -> Vec<String> {
        match self.entries.get(symbol) {
            Some(e) => e.questions.iter().map(|q| q.to_string()).collect(),
            None => FALLBACK_QUESTIONS.iter().map(|q| q.to_string()).collect(),
        }
    }
}
