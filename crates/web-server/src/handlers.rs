use crate::{AppState, error::AppError};
use axum::{Json, extract::State};
use reporting::ReportModel;
use std::sync::Arc;

/// # GET <report_path>
/// The single informational endpoint: the full read model, assembled fresh.
pub async fn get_report(State(state): State<Arc<AppState>>) -> Result<Json<ReportModel>, AppError> {
    // Assembly reads three files; keep it off the async workers.
    let report = tokio::task::spawn_blocking(move || state.assembler.assemble()).await?;
    Ok(Json(report))
}

/// # GET /
/// Deliberately inert.
pub async fn root() -> AppError {
    AppError::Forbidden
}
