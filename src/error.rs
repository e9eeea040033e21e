use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// Generic message returned to clients when a store operation fails.
pub const STORE_ERROR_BODY: &str = "Error accessing Redis";

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Redis error: {0}")]
    Store(#[from] redis::RedisError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let AppError::Store(err) = &self;
        tracing::error!(error = %err, "got error when increasing counter");

        // Generic plain-text body; no structured error detail leaks to clients.
        (StatusCode::INTERNAL_SERVER_ERROR, STORE_ERROR_BODY).into_response()
    }
}
