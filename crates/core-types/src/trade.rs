use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Serialize, Serializer};

/// Timestamp layout used by the trading process when appending to the ledger.
pub const LEDGER_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One row of the append-only trade ledger, recorded after an execution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TradeRecord {
    #[serde(serialize_with = "serialize_timestamp")]
    pub timestamp: NaiveDateTime,
    /// `BUY` / `SELL` as written by the producer, when present.
    pub action: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub qty: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::float")]
    pub cash_available: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub shares_held: Decimal,
}

impl TradeRecord {
    /// Mark-to-market account value right after this trade, or `None` when
    /// it does not fit in a `Decimal`.
    pub fn equity(&self) -> Option<Decimal> {
        self.shares_held
            .checked_mul(self.price)?
            .checked_add(self.cash_available)
    }
}

/// A single point on a reconstructed equity curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EquityPoint {
    #[serde(serialize_with = "serialize_timestamp")]
    pub timestamp: NaiveDateTime,
    #[serde(with = "rust_decimal::serde::float")]
    pub equity: Decimal,
}

fn serialize_timestamp<S>(ts: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(&ts.format(LEDGER_TIMESTAMP_FORMAT))
}
