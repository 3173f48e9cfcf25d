use core_types::{EquityPoint, TradeRecord};
use rust_decimal::Decimal;
use serde::Serialize;

/// Everything derived from one read of the trade ledger.
///
/// This is the history half of the display read model; the account snapshot
/// and persisted metrics are merged in by the report assembler.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LedgerAnalysis {
    /// Ledger rows ordered oldest first.
    pub trades: Vec<TradeRecord>,
    pub equity_curve: Vec<EquityPoint>,
    #[serde(with = "rust_decimal::serde::float")]
    pub sharpe_ratio: Decimal,
}

impl LedgerAnalysis {
    /// Creates an empty analysis, the result for a missing or unusable ledger.
    pub fn new() -> Self {
        Self {
            trades: Vec::new(),
            equity_curve: Vec::new(),
            sharpe_ratio: Decimal::ZERO,
        }
    }

    /// The most recent `limit` trades, newest first.
    pub fn recent_trades(&self, limit: usize) -> Vec<TradeRecord> {
        self.trades.iter().rev().take(limit).cloned().collect()
    }
}

impl Default for LedgerAnalysis {
    fn default() -> Self {
        Self::new()
    }
}
