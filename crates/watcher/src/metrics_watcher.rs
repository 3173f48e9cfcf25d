use crate::error::WatcherError;
use crate::{CycleOutcome, WatcherPhase};
use analytics::update_drawdown;
use configuration::settings::Config;
use core_types::{AccountState, DerivedMetrics};
use rust_decimal::Decimal;
use state_store::StateStore;
use std::path::PathBuf;
use std::time::{Duration, SystemTime};
use tokio_util::sync::CancellationToken;

/// Polls the account-state file and maintains the derived-metrics file.
///
/// The watcher is the only writer of the metrics file.
#[derive(Debug)]
pub struct MetricsWatcher {
    store: StateStore,
    status_file: PathBuf,
    metrics_file: PathBuf,
    initial_capital: Decimal,
    poll_interval: Duration,
    error_cooldown: Duration,
    /// Modification time of the state file as of the last completed cycle.
    last_modified: Option<SystemTime>,
    phase: WatcherPhase,
}

impl MetricsWatcher {
    pub fn new(config: &Config) -> Self {
        Self {
            store: StateStore::new(),
            status_file: config.paths.status_file.clone(),
            metrics_file: config.paths.metrics_file.clone(),
            initial_capital: config.portfolio.initial_capital,
            poll_interval: config.watcher.poll_interval(),
            error_cooldown: config.watcher.error_cooldown(),
            last_modified: None,
            phase: WatcherPhase::Idle,
        }
    }

    pub fn phase(&self) -> WatcherPhase {
        self.phase
    }

    fn transition(&mut self, phase: WatcherPhase) {
        tracing::trace!(from = ?self.phase, to = ?phase, "Watcher phase change.");
        self.phase = phase;
    }

    /// Runs one polling cycle to completion.
    ///
    /// A change is detected when the state file's modification time differs
    /// from the last one seen, in either direction. The new time is only
    /// remembered once the cycle has been handled, so a failed cycle is
    /// retried on the next poll.
    pub fn poll_once(&mut self) -> Result<CycleOutcome, WatcherError> {
        self.transition(WatcherPhase::Polling);
        let modified = self.store.modified(&self.status_file);
        if modified == self.last_modified {
            return Ok(CycleOutcome::Unchanged);
        }

        self.transition(WatcherPhase::DetectedChange);
        let state_doc = self.store.read(&self.status_file);
        let state = match AccountState::from_document(&state_doc, self.initial_capital) {
            Ok(state) => state,
            Err(reason) => {
                tracing::warn!(%reason, path = %self.status_file.display(), "Skipping unusable account state.");
                self.last_modified = modified;
                self.transition(WatcherPhase::Polling);
                return Ok(CycleOutcome::Skipped);
            }
        };

        self.transition(WatcherPhase::Computing);
        let metrics_doc = self.store.read(&self.metrics_file);
        let persisted = DerivedMetrics::from_document(&metrics_doc).ok();
        let prior = DerivedMetrics::from_document_or_initial(&metrics_doc, self.initial_capital);
        let updated = update_drawdown(&prior, state.equity);

        if persisted == Some(updated) {
            self.last_modified = modified;
            self.transition(WatcherPhase::Polling);
            return Ok(CycleOutcome::NoChange(updated));
        }

        self.transition(WatcherPhase::Persisting);
        self.store.write(&self.metrics_file, &updated)?;
        tracing::info!(
            equity = %state.equity,
            high_water_mark = %updated.high_water_mark,
            max_drawdown = %updated.max_drawdown,
            "Metrics updated."
        );

        self.last_modified = modified;
        self.transition(WatcherPhase::Polling);
        Ok(CycleOutcome::Persisted(updated))
    }

    /// Polls until `cancel` fires.
    ///
    /// A failed cycle is logged and followed by the extended cooldown; the
    /// loop itself never exits on an I/O error.
    pub async fn run(mut self, cancel: CancellationToken) {
        tracing::info!(
            watching = %self.status_file.display(),
            writing = %self.metrics_file.display(),
            poll_interval_ms = self.poll_interval.as_millis() as u64,
            "Metrics watcher started."
        );

        loop {
            let pause = match self.poll_once() {
                Ok(outcome) => {
                    tracing::debug!(?outcome, "Poll cycle complete.");
                    self.poll_interval
                }
                Err(e) => {
                    self.transition(WatcherPhase::Error);
                    tracing::error!(error = %e, cooldown_ms = self.error_cooldown.as_millis() as u64, "Poll cycle failed.");
                    self.error_cooldown
                }
            };

            tokio::select! {
                biased;
                () = cancel.cancelled() => break,
                () = tokio::time::sleep(pause) => {}
            }
        }

        tracing::info!("Metrics watcher stopped.");
    }
}
