use core_types::TradeRecord;
use rust_decimal::Decimal;
use serde::Serialize;

/// The aggregate handed to the display layer on every request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportModel {
    #[serde(with = "rust_decimal::serde::float")]
    pub equity: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub cash: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub invested: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub last_equity: Decimal,
    /// Last mark price reported by the trading process, if any.
    #[serde(with = "rust_decimal::serde::float_option")]
    pub price: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::float")]
    pub high_water_mark: Decimal,
    /// Worst drawdown ever observed, in percent (`<= 0`).
    #[serde(with = "rust_decimal::serde::float")]
    pub max_dd: Decimal,
    /// Annualised Sharpe ratio of the equity curve rebuilt from the ledger.
    #[serde(with = "rust_decimal::serde::float")]
    pub sharpe: Decimal,
    /// Change since `last_equity`, in percent.
    #[serde(with = "rust_decimal::serde::float")]
    pub daily_pct: Decimal,
    /// Change since the initial capital, in percent.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_pct: Decimal,
    /// Most recent ledger rows, newest first.
    pub trades: Vec<TradeRecord>,
}

/// `(value - base) / base * 100`, or `0` when `base` is not positive or the
/// change does not fit in a `Decimal`.
pub fn pct_change(value: Decimal, base: Decimal) -> Decimal {
    if base <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    value
        .checked_sub(base)
        .and_then(|delta| delta.checked_div(base))
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .unwrap_or(Decimal::ZERO)
}
