use std::any::Any;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracker_app::{ApiError, AppError};

#[derive(Debug)]
pub struct HttpError {
    status: StatusCode,
    body: ApiError,
}

impl From<ApiError> for HttpError {
    fn from(body: ApiError) -> Self {
        let status =
            StatusCode::from_u16(body.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        Self { status, body }
    }
}

impl From<AppError> for HttpError {
    fn from(err: AppError) -> Self {
        if matches!(
            err,
            AppError::Db(_) | AppError::Io(_) | AppError::Config(_) | AppError::Unknown(_)
        ) {
            tracing::error!(error = %err, "request failed");
        }
        Self::from(ApiError::from(err))
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

/// Renders a handler panic as an unknown error.
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = panic.downcast_ref::<&str>() {
        message.to_string()
    } else {
        "handler panicked".to_string()
    };
    tracing::error!(%detail, "handler panicked");
    HttpError::from(ApiError::unknown(detail)).into_response()
}
