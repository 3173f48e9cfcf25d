//! # Equity Watch Analytics
//!
//! Pure calculations over the trading process's output: reconstructing an
//! equity curve from the trade ledger, the annualised Sharpe ratio, and the
//! streaming high-water-mark / max-drawdown update.
//!
//! ## Architectural Principles
//!
//! - **Pure logic:** apart from [`ledger::load_ledger`], nothing here touches the
//!   file system. Degenerate inputs (empty ledger, flat equity, zero
//!   high-water-mark) yield `0` or an empty result, never an error.
//! - **Fixed-point:** every quantity is a `Decimal`.
//!
//! ## Public API
//!
//! - `AnalyticsEngine`: ledger analysis with a configured annualisation factor.
//! - `build_equity_curve`, `returns`, `sharpe`, `update_drawdown`: the individual routines.
//! - `AnalyticsError`: failures of the strict ledger reader.

pub mod curve;
pub mod engine;
pub mod error;
pub mod ledger;
mod math;
pub mod report;
pub mod risk;

pub use curve::{build_equity_curve, sort_by_timestamp};
pub use engine::AnalyticsEngine;
pub use error::AnalyticsError;
pub use ledger::{load_ledger, parse_ledger, read_ledger};
pub use report::LedgerAnalysis;
pub use risk::{drawdown_pct, max_drawdown_of, returns, sharpe, update_drawdown};
