use thiserror::Error;

#[derive(Error, Debug)]
pub enum WatcherError {
    #[error("Failed to persist metrics: {0}")]
    Persist(#[from] state_store::StoreError),
}
