use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Access denied")]
    Forbidden,
    #[error("Report task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Converts our custom `AppError` into an HTTP response.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Forbidden => (StatusCode::FORBIDDEN, "Access Denied").into_response(),
            AppError::Task(join_err) => {
                tracing::error!(error = ?join_err, "Report task failed.");
                let body = Json(json!({ "error": "An internal error occurred" }));
                (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
            }
        }
    }
}
