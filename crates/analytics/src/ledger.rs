//! Reader for the trade ledger appended to by the trading process.
//!
//! Layout: `timestamp,action,price,qty,cash_available,shares_held`. Column
//! order does not matter; `action` and `qty` are optional.

use crate::error::AnalyticsError;
use chrono::{DateTime, NaiveDateTime};
use core_types::{LEDGER_TIMESTAMP_FORMAT, TradeRecord};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use std::str::FromStr;

/// Columns without which no equity value can be derived.
pub const REQUIRED_COLUMNS: [&str; 4] = ["timestamp", "cash_available", "shares_held", "price"];

#[derive(Debug, Deserialize)]
struct LedgerRow {
    timestamp: Option<String>,
    action: Option<String>,
    price: Option<String>,
    qty: Option<String>,
    cash_available: Option<String>,
    shares_held: Option<String>,
}

impl LedgerRow {
    fn into_record(self) -> Option<TradeRecord> {
        let record = TradeRecord {
            timestamp: parse_timestamp(self.timestamp.as_deref()?)?,
            action: self.action.filter(|a| !a.is_empty()),
            price: parse_decimal(self.price.as_deref()?)?,
            qty: self.qty.as_deref().and_then(parse_decimal),
            cash_available: parse_decimal(self.cash_available.as_deref()?)?,
            shares_held: parse_decimal(self.shares_held.as_deref()?)?,
        };
        // A row whose equity cannot be represented is as unusable as a missing field.
        record.equity().map(|_| record)
    }
}

fn parse_decimal(raw: &str) -> Option<Decimal> {
    let raw = raw.trim();
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .ok()
}

/// Accepts the producer's `%Y-%m-%d %H:%M:%S` wall-clock format (optionally
/// with fractional seconds) and RFC 3339.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    NaiveDateTime::parse_from_str(raw, LEDGER_TIMESTAMP_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.naive_utc()))
}

/// Parses a ledger from any reader, in file order.
///
/// A missing required column fails the whole ledger. Individual rows with an
/// unparseable required field, or an equity out of `Decimal` range, are skipped.
pub fn parse_ledger<R: Read>(reader: R) -> Result<Vec<TradeRecord>, AnalyticsError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(AnalyticsError::MissingColumn(column));
        }
    }

    let mut records = Vec::new();
    for (index, row) in csv_reader.deserialize::<LedgerRow>().enumerate() {
        // Header is line 1.
        let line = index + 2;
        match row {
            Ok(row) => match row.into_record() {
                Some(record) => records.push(record),
                None => tracing::warn!(line, "Skipping ledger row with a missing or invalid field."),
            },
            Err(e) => tracing::warn!(line, error = %e, "Skipping unreadable ledger row."),
        }
    }
    Ok(records)
}

/// Reads the ledger at `path`, reporting why it could not be used.
pub fn read_ledger(path: &Path) -> Result<Vec<TradeRecord>, AnalyticsError> {
    let file = File::open(path).map_err(|e| {
        if e.kind() == io::ErrorKind::NotFound {
            AnalyticsError::LedgerNotFound(path.to_path_buf())
        } else {
            AnalyticsError::Csv(csv::Error::from(e))
        }
    })?;
    parse_ledger(file)
}

/// Best-effort ledger read: any failure degrades to an empty history.
pub fn load_ledger(path: &Path) -> Vec<TradeRecord> {
    match read_ledger(path) {
        Ok(records) => records,
        Err(AnalyticsError::LedgerNotFound(_)) => {
            tracing::debug!(path = %path.display(), "Trade ledger not found, no history yet.");
            Vec::new()
        }
        Err(e) => {
            tracing::warn!(error = %e, path = %path.display(), "Trade ledger unusable, using empty history.");
            Vec::new()
        }
    }
}
