//! # Metrics Watcher
//!
//! Long-running poller that turns account-state updates from the trading
//! process into persisted high-water-mark / max-drawdown statistics.
//!
//! The trading process gives no signal when it writes, so the watcher polls
//! the state file's modification time on a fixed cadence. A cycle runs to
//! completion before the next one starts; cancellation is only observed in
//! the wait between cycles.

pub mod error;
pub mod metrics_watcher;

pub use error::WatcherError;
pub use metrics_watcher::MetricsWatcher;

use core_types::DerivedMetrics;

/// Where the watcher is in its polling cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatcherPhase {
    /// Constructed, no cycle run yet.
    Idle,
    /// Comparing the state file's modification time with the last one seen.
    Polling,
    /// The state file changed; reading the new snapshot.
    DetectedChange,
    /// Folding the observed equity into the persisted metrics.
    Computing,
    /// Writing updated metrics.
    Persisting,
    /// The last cycle failed; cooling down before polling again.
    Error,
}

/// Result of a single polling cycle.
#[derive(Debug, Clone, PartialEq)]
pub enum CycleOutcome {
    /// Modification time unchanged since the last cycle.
    Unchanged,
    /// The state file changed but held no usable snapshot.
    Skipped,
    /// Metrics recomputed and equal to what is already persisted.
    NoChange(DerivedMetrics),
    /// Metrics changed and were written.
    Persisted(DerivedMetrics),
}
