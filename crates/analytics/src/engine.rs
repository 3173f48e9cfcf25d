use crate::curve::{build_equity_curve, sort_by_timestamp};
use crate::ledger::load_ledger;
use crate::report::LedgerAnalysis;
use crate::risk::sharpe;
use core_types::{EquityPoint, TradeRecord};
use rust_decimal::Decimal;
use std::path::Path;

/// A stateless calculator for deriving history statistics from the trade ledger.
#[derive(Debug, Clone, Copy)]
pub struct AnalyticsEngine {
    periods_per_year: u32,
}

impl AnalyticsEngine {
    pub fn new(periods_per_year: u32) -> Self {
        Self { periods_per_year }
    }

    /// Annualised Sharpe ratio of `curve` with this engine's annualisation factor.
    pub fn sharpe_ratio(&self, curve: &[EquityPoint]) -> Decimal {
        sharpe(curve, self.periods_per_year)
    }

    /// Orders the ledger, rebuilds the equity curve and computes its Sharpe ratio.
    ///
    /// An empty ledger produces an empty analysis with a Sharpe ratio of zero.
    pub fn analyze(&self, mut trades: Vec<TradeRecord>) -> LedgerAnalysis {
        if trades.is_empty() {
            return LedgerAnalysis::new();
        }

        sort_by_timestamp(&mut trades);
        let equity_curve = build_equity_curve(&trades);
        let sharpe_ratio = self.sharpe_ratio(&equity_curve);

        LedgerAnalysis {
            trades,
            equity_curve,
            sharpe_ratio,
        }
    }

    /// Best-effort analysis of the ledger file at `path`.
    pub fn analyze_file(&self, path: &Path) -> LedgerAnalysis {
        self.analyze(load_ledger(path))
    }
}

impl Default for AnalyticsEngine {
    fn default() -> Self {
        Self::new(365)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::parse_ledger;
    use rust_decimal_macros::dec;

    const UNSORTED: &str = "\
timestamp,action,price,qty,cash_available,shares_held
2025-03-03 09:00:00,SELL,1.10,100,1110.00,0
2025-03-01 09:00:00,BUY,1.00,100,900.00,100
2025-03-02 09:00:00,HOLD,1.05,0,900.00,100
";

    #[test]
    fn test_empty_ledger() {
        let analysis = AnalyticsEngine::default().analyze(Vec::new());
        assert!(analysis.trades.is_empty());
        assert!(analysis.equity_curve.is_empty());
        assert_eq!(analysis.sharpe_ratio, Decimal::ZERO);
    }

    #[test]
    fn test_analyze_orders_trades_and_curve() {
        let trades = parse_ledger(UNSORTED.as_bytes()).unwrap();
        let analysis = AnalyticsEngine::new(365).analyze(trades);

        let actions: Vec<_> = analysis.trades.iter().map(|t| t.action.clone().unwrap()).collect();
        assert_eq!(actions, vec!["BUY", "HOLD", "SELL"]);

        let equities: Vec<_> = analysis.equity_curve.iter().map(|p| p.equity).collect();
        assert_eq!(equities, vec![dec!(1000), dec!(1005), dec!(1110)]);
        assert!(analysis.sharpe_ratio > Decimal::ZERO);

        let recent = analysis.recent_trades(2);
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].action.as_deref(), Some("SELL"));
        assert_eq!(recent[1].action.as_deref(), Some("HOLD"));
    }

    #[test]
    fn test_analyze_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let analysis = AnalyticsEngine::default().analyze_file(&dir.path().join("data.csv"));
        assert_eq!(analysis, LedgerAnalysis::new());
    }
}
