use crate::document::{Document, decimal_field};
use crate::error::CoreError;
use rust_decimal::Decimal;
use serde::Serialize;

/// The latest account snapshot written by the trading process.
///
/// Superseded wholesale on every external write; this workspace only reads it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccountState {
    #[serde(with = "rust_decimal::serde::float")]
    pub equity: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub cash: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub invested: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub last_equity: Decimal,
    /// Last mark price, when the producer reports one.
    #[serde(with = "rust_decimal::serde::float_option")]
    pub price: Option<Decimal>,
}

impl AccountState {
    /// Validates a raw state document.
    ///
    /// `equity` is required. `last_equity` falls back to the initial capital,
    /// `cash` and `invested` to zero.
    pub fn from_document(doc: &Document, initial_capital: Decimal) -> Result<Self, CoreError> {
        if doc.is_empty() {
            return Err(CoreError::EmptyDocument);
        }
        let equity = decimal_field(doc, "equity").ok_or(CoreError::MissingField("equity"))?;

        Ok(Self {
            equity,
            cash: decimal_field(doc, "cash").unwrap_or(Decimal::ZERO),
            invested: decimal_field(doc, "invested").unwrap_or(Decimal::ZERO),
            last_equity: decimal_field(doc, "last_equity").unwrap_or(initial_capital),
            price: decimal_field(doc, "price"),
        })
    }

    /// Reads whatever fields a state document carries, substituting a
    /// default for each one that is missing or not numeric.
    ///
    /// Never fails: `equity`, `cash` and `invested` default to zero and
    /// `last_equity` to the initial capital.
    pub fn from_document_lenient(doc: &Document, initial_capital: Decimal) -> Self {
        Self {
            equity: decimal_field(doc, "equity").unwrap_or(Decimal::ZERO),
            cash: decimal_field(doc, "cash").unwrap_or(Decimal::ZERO),
            invested: decimal_field(doc, "invested").unwrap_or(Decimal::ZERO),
            last_equity: decimal_field(doc, "last_equity").unwrap_or(initial_capital),
            price: decimal_field(doc, "price"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn doc(value: serde_json::Value) -> Document {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_full_document() {
        let d = doc(json!({
            "equity": 101250.5,
            "cash": 50000.0,
            "invested": 51250.5,
            "price": 0.1725,
            "last_equity": 100000.0
        }));
        let state = AccountState::from_document(&d, dec!(100000)).unwrap();
        assert_eq!(state.equity, dec!(101250.5));
        assert_eq!(state.cash, dec!(50000));
        assert_eq!(state.invested, dec!(51250.5));
        assert_eq!(state.last_equity, dec!(100000));
        assert_eq!(state.price, Some(dec!(0.1725)));
    }

    #[test]
    fn test_optional_fields_default() {
        let d = doc(json!({ "equity": 95000 }));
        let state = AccountState::from_document(&d, dec!(100000)).unwrap();
        assert_eq!(state.cash, Decimal::ZERO);
        assert_eq!(state.invested, Decimal::ZERO);
        assert_eq!(state.last_equity, dec!(100000));
        assert_eq!(state.price, None);
    }

    #[test]
    fn test_missing_equity_is_rejected() {
        let d = doc(json!({ "cash": 1.0 }));
        assert_eq!(
            AccountState::from_document(&d, dec!(100000)),
            Err(CoreError::MissingField("equity"))
        );
        assert_eq!(
            AccountState::from_document(&Document::new(), dec!(100000)),
            Err(CoreError::EmptyDocument)
        );
    }

    #[test]
    fn test_lenient_empty_document() {
        let state = AccountState::from_document_lenient(&Document::new(), dec!(100000));
        assert_eq!(state.equity, Decimal::ZERO);
        assert_eq!(state.cash, Decimal::ZERO);
        assert_eq!(state.invested, Decimal::ZERO);
        assert_eq!(state.last_equity, dec!(100000));
        assert_eq!(state.price, None);
    }

    #[test]
    fn test_lenient_keeps_fields_without_equity() {
        let d = doc(json!({ "cash": 5000.0, "invested": 1000.0, "last_equity": 90000.0 }));
        let state = AccountState::from_document_lenient(&d, dec!(100000));
        assert_eq!(state.equity, Decimal::ZERO);
        assert_eq!(state.cash, dec!(5000));
        assert_eq!(state.invested, dec!(1000));
        assert_eq!(state.last_equity, dec!(90000));
    }

    #[test]
    fn test_lenient_matches_strict_on_valid_documents() {
        let d = doc(json!({ "equity": 95000, "cash": "12.5", "price": 0.2 }));
        assert_eq!(
            AccountState::from_document_lenient(&d, dec!(100000)),
            AccountState::from_document(&d, dec!(100000)).unwrap()
        );
    }
}
