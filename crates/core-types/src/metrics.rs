use crate::document::{Document, decimal_field};
use crate::error::CoreError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Decimal places kept for drawdown percentages.
///
/// Fifteen significant digits survive a trip through an `f64`, so a rounded
/// drawdown read back from the metrics file compares equal to the value that
/// was written.
pub const DRAWDOWN_DP: u32 = 8;

/// The persisted risk statistics owned by the metrics watcher.
///
/// `high_water_mark` never decreases and never drops below the initial
/// capital. `max_drawdown` is a percentage `<= 0` that never increases.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedMetrics {
    #[serde(with = "rust_decimal::serde::float")]
    pub high_water_mark: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub max_drawdown: Decimal,
}

impl DerivedMetrics {
    /// Metrics for an account that has not been observed yet.
    pub fn initial(initial_capital: Decimal) -> Self {
        Self {
            high_water_mark: initial_capital,
            max_drawdown: Decimal::ZERO,
        }
    }

    /// Validates a raw metrics document. Both fields are required.
    pub fn from_document(doc: &Document) -> Result<Self, CoreError> {
        if doc.is_empty() {
            return Err(CoreError::EmptyDocument);
        }
        Ok(Self {
            high_water_mark: decimal_field(doc, "high_water_mark")
                .ok_or(CoreError::MissingField("high_water_mark"))?,
            max_drawdown: decimal_field(doc, "max_drawdown")
                .ok_or(CoreError::MissingField("max_drawdown"))?,
        })
    }

    /// Loads persisted metrics, falling back to [`DerivedMetrics::initial`]
    /// and re-establishing both invariants against the configured capital.
    pub fn from_document_or_initial(doc: &Document, initial_capital: Decimal) -> Self {
        match Self::from_document(doc) {
            Ok(metrics) => Self {
                high_water_mark: metrics.high_water_mark.max(initial_capital),
                max_drawdown: metrics.max_drawdown.min(Decimal::ZERO),
            },
            Err(_) => Self::initial(initial_capital),
        }
    }
}
