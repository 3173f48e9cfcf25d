use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyticsError {
    #[error("Trade ledger not found: {0}")]
    LedgerNotFound(PathBuf),

    #[error("Failed to read trade ledger: {0}")]
    Csv(#[from] csv::Error),

    #[error("Trade ledger is missing required column '{0}'")]
    MissingColumn(&'static str),
}
