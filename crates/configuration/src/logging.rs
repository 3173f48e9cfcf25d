//! Tracing setup shared by the watcher and the web server.
//!
//! - **stdout**: compact, human-friendly, honours `RUST_LOG`.
//! - **file**: daily rotation to `<log_dir>/<service>.log`, non-blocking, full metadata.

use std::fs;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::time::LocalTime;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_FILTER: &str = "equitywatch=info,watcher=info,web_server=info,state_store=info,reporting=info,analytics=info,tower_http=info,warn";

/// Guards that must be held for the lifetime of the process.
/// Dropping this will cause buffered logs to be lost.
pub struct TracingGuards {
    file_guard: Option<WorkerGuard>,
}

impl TracingGuards {
    /// Whether the rolling file layer is active.
    pub fn writes_to_file(&self) -> bool {
        self.file_guard.is_some()
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Installs the global subscriber.
///
/// When `log_dir` cannot be created, logging continues on stdout only and a
/// warning is emitted once the subscriber is up. Fails only when a global
/// subscriber is already set.
pub fn init_tracing(
    service_name: &str,
    log_dir: &Path,
) -> Result<TracingGuards, tracing_subscriber::util::TryInitError> {
    let (file_layer, file_guard, dir_error) = match fs::create_dir_all(log_dir) {
        Ok(()) => {
            let file_appender =
                tracing_appender::rolling::daily(log_dir, format!("{service_name}.log"));
            let (file_writer, file_guard) = tracing_appender::non_blocking(file_appender);
            let file_layer = fmt::layer()
                .with_writer(file_writer)
                .with_ansi(false)
                .with_timer(LocalTime::rfc_3339())
                .with_target(true)
                .with_thread_names(true)
                .with_filter(env_filter());
            (Some(file_layer), Some(file_guard), None)
        }
        Err(e) => (None, None, Some(e)),
    };

    let stdout_layer = fmt::layer()
        .with_target(false)
        .compact()
        .with_filter(env_filter());

    tracing_subscriber::registry()
        .with(stdout_layer)
        .with(file_layer)
        .try_init()?;

    if let Some(e) = dir_error {
        tracing::warn!(
            error = %e,
            log_dir = %log_dir.display(),
            "Cannot create log directory, logging to stdout only."
        );
    }

    Ok(TracingGuards {
        file_guard,
    })
}
