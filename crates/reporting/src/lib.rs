//! # Report Assembler
//!
//! Builds the single read model consumed by the display layer from the latest
//! account snapshot, the persisted derived metrics and the trade ledger.
//!
//! Assembly is read-only and never fails. Missing or partial inputs are
//! replaced by documented defaults, so it is safe to call from any number of
//! concurrent requests.

pub mod assembler;
pub mod model;

pub use assembler::ReportAssembler;
pub use model::ReportModel;
