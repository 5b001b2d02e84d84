//! Built-in learning modules offered by the academy.
//!
//! The catalog is advisory: progress can be recorded for any valid
//! `ModuleId`, but summaries only count the modules listed here.

use serde::Serialize;

use crate::model::ModuleId;

/// Static description of a learning module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LearningModule {
    pub id: &'static str,
    pub title: &'static str,
    pub tagline: &'static str,
    pub description: &'static str,
    pub path: &'static str,
}

const MODULES: [LearningModule; 4] = [
    LearningModule {
        id: "smt",
        title: "SMT",
        tagline: "Smart Money Technique",
        description: "Understand how institutional traders move markets. Learn liquidity \
                      sweeps, order flow, and displacement patterns.",
        path: "/smt",
    },
    LearningModule {
        id: "ict",
        title: "ICT",
        tagline: "Inner Circle Trader",
        description: "Master order blocks, fair value gaps, market structure, and kill \
                      zones used by professional traders.",
        path: "/ict",
    },
    LearningModule {
        id: "priceAction",
        title: "Price Action",
        tagline: "Read the Market Naked",
        description: "Decode candlestick patterns, support & resistance, trend \
                      identification, and breakout strategies.",
        path: "/price-action",
    },
    LearningModule {
        id: "indicators",
        title: "Indicators",
        tagline: "Technical Analysis Tools",
        description: "Learn Moving Averages, RSI, MACD, Bollinger Bands, and Volume \
                      analysis for smarter entries.",
        path: "/indicators",
    },
];

/// All catalog modules, in display order.
#[must_use]
pub fn catalog() -> &'static [LearningModule] {
    &MODULES
}

/// Looks up a catalog module by id.
#[must_use]
pub fn find(id: &ModuleId) -> Option<&'static LearningModule> {
    MODULES.iter().find(|module| module.id == id.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn catalog_ids_are_valid_and_unique() {
        let mut seen = HashSet::new();
        for module in catalog() {
            let id = ModuleId::new(module.id).expect("valid catalog id");
            assert_eq!(id.as_str(), module.id);
            assert!(seen.insert(id), "duplicate id {}", module.id);
        }
        assert_eq!(seen.len(), 4);
    }

    #[test]
    fn find_matches_exact_id() {
        let id = ModuleId::new("priceAction").unwrap();
        let module = find(&id).expect("catalog entry");
        assert_eq!(module.title, "Price Action");
        assert_eq!(module.path, "/price-action");

        assert!(find(&ModuleId::new("priceaction").unwrap()).is_none());
        assert!(find(&ModuleId::new("crypto").unwrap()).is_none());
    }

    #[test]
    fn catalog_order_is_stable() {
        let ids: Vec<_> = catalog().iter().map(|m| m.id).collect();
        assert_eq!(ids, ["smt", "ict", "priceAction", "indicators"]);
    }
}
