use crate::model::{ReportModel, pct_change};
use analytics::AnalyticsEngine;
use configuration::settings::Config;
use core_types::{AccountState, DerivedMetrics};
use rust_decimal::Decimal;
use state_store::StateStore;
use std::path::PathBuf;

/// Recomputes the display read model from the files on every call.
///
/// Holds configuration only; no state is cached between calls, and the three
/// files are read independently, so a report may mix a snapshot with metrics
/// from a neighbouring update.
#[derive(Debug, Clone)]
pub struct ReportAssembler {
    store: StateStore,
    engine: AnalyticsEngine,
    status_file: PathBuf,
    metrics_file: PathBuf,
    trade_ledger: PathBuf,
    initial_capital: Decimal,
    recent_trades: usize,
}

impl ReportAssembler {
    pub fn new(config: &Config) -> Self {
        Self {
            store: StateStore::new(),
            engine: AnalyticsEngine::new(config.analytics.periods_per_year),
            status_file: config.paths.status_file.clone(),
            metrics_file: config.paths.metrics_file.clone(),
            trade_ledger: config.paths.trade_ledger.clone(),
            initial_capital: config.portfolio.initial_capital,
            recent_trades: config.analytics.recent_trades,
        }
    }

    /// Builds a best-effort report.
    ///
    /// Each missing field gets its own default: equity, cash and invested `0`,
    /// `last_equity` the initial capital, metrics at their initial values, an
    /// empty trade history.
    pub fn assemble(&self) -> ReportModel {
        let state_doc = self.store.read(&self.status_file);
        if let Err(reason) = AccountState::from_document(&state_doc, self.initial_capital) {
            tracing::debug!(%reason, "Incomplete account state, reporting defaults where missing.");
        }
        let account = AccountState::from_document_lenient(&state_doc, self.initial_capital);

        let metrics = DerivedMetrics::from_document_or_initial(
            &self.store.read(&self.metrics_file),
            self.initial_capital,
        );

        let history = self.engine.analyze_file(&self.trade_ledger);

        ReportModel {
            daily_pct: pct_change(account.equity, account.last_equity),
            total_pct: pct_change(account.equity, self.initial_capital),
            equity: account.equity,
            cash: account.cash,
            invested: account.invested,
            last_equity: account.last_equity,
            price: account.price,
            high_water_mark: metrics.high_water_mark,
            max_dd: metrics.max_drawdown,
            sharpe: history.sharpe_ratio,
            trades: history.recent_trades(self.recent_trades),
        }
    }
}
