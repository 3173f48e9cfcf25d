//! # State Store
//!
//! Best-effort access to the small JSON documents shared with the trading
//! process. There is no lock cooperation with that process, so all tolerance
//! lives on the read side: a read never fails, it yields an empty document.
//! Writes are atomic replaces, so a concurrent reader sees either the old or
//! the new file, never a partial one.

pub mod error;
pub mod store;

pub use error::StoreError;
pub use store::StateStore;
