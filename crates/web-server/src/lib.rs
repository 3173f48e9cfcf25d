use axum::{Router, http::Method, routing::get};
use configuration::settings::Config;
use reporting::ReportAssembler;
use std::future::Future;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod error;
pub mod handlers;

/// The shared application state that all handlers can access.
pub struct AppState {
    pub assembler: ReportAssembler,
}

/// Builds the router: the report endpoint at `report_path`, the inert root,
/// and nothing else.
pub fn router(config: &Config) -> Router {
    let app_state = Arc::new(AppState {
        assembler: ReportAssembler::new(config),
    });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET])
        .allow_headers(Any);

    Router::new()
        .route(&config.server.report_path, get(handlers::get_report))
        .route("/", get(handlers::root))
        .with_state(app_state)
        .layer(cors)
        // This middleware will automatically log information about every incoming request.
        .layer(TraceLayer::new_for_http())
}

/// Resolves on Ctrl-C, or SIGTERM on unix. Shared by every entry point that
/// serves or watches until the process is stopped.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C.");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM.");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    tracing::info!("Termination requested.");
}

/// Binds the configured address and serves until `shutdown` resolves.
pub async fn run_server<F>(config: &Config, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = router(config);
    let addr = config.server.bind_addr;

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(
        %addr,
        report_path = %config.server.report_path,
        "Web server started and listening."
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    tracing::info!("Web server stopped.");
    Ok(())
}
