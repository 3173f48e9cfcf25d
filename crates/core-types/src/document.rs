use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde_json::{Map, Value};
use std::str::FromStr;

/// A raw JSON object as read from disk. Empty when the file was missing,
/// empty, malformed or caught mid-write.
pub type Document = Map<String, Value>;

/// Reads a numeric field out of a raw document.
///
/// JSON numbers are converted through their textual form so that `90000.0`
/// becomes exactly `90000.0`. Exponent notation falls back to a binary
/// conversion. Numeric strings are accepted as well; anything else is
/// treated as absent.
pub fn decimal_field(doc: &Document, key: &str) -> Option<Decimal> {
    match doc.get(key)? {
        Value::Number(n) => Decimal::from_str(&n.to_string())
            .ok()
            .or_else(|| n.as_f64().and_then(Decimal::from_f64)),
        Value::String(s) => Decimal::from_str(s.trim()).ok(),
        _ => None,
    }
}
