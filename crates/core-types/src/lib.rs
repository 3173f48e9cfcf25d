//! Shared data model for the equity watch workspace.
//!
//! Every other crate speaks in these types. The raw documents written by the
//! trading process are untyped JSON objects; they are validated exactly once,
//! at the read boundary, into the typed records below.

pub mod account;
pub mod document;
pub mod error;
pub mod metrics;
pub mod trade;

// Re-export the core types to provide a clean public API.
pub use account::AccountState;
pub use document::{Document, decimal_field};
pub use error::CoreError;
pub use metrics::{DRAWDOWN_DP, DerivedMetrics};
pub use trade::{EquityPoint, LEDGER_TIMESTAMP_FORMAT, TradeRecord};
