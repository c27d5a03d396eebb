use serde::Serialize;
use thiserror::Error;
use tracker_core::FieldError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error")]
    Validation(Vec<FieldError>),
    #[error("Database connection failed: {0}")]
    StoreUnavailable(String),
    #[error("Failed to save email tracking data")]
    SaveFailed,
    #[error("db error: {0}")]
    Db(#[from] tracker_db::DbError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config error: {0}")]
    Config(String),
    #[error("{0}")]
    Unknown(String),
}

pub type Result<T> = std::result::Result<T, AppError>;

/// JSON body of a failed request.
#[derive(Debug, Serialize)]
pub struct ApiError {
    #[serde(skip)]
    pub status: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<ApiErrorDetail>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ApiErrorDetail {
    Fields(Vec<FieldError>),
    Text(String),
}

impl ApiError {
    pub fn unknown(detail: impl Into<String>) -> Self {
        Self {
            status: 500,
            message: "Unknown Error".to_string(),
            errors: Some(ApiErrorDetail::Text(detail.into())),
        }
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::Validation(fields) => Self {
                status: 400,
                message: "Validation error".to_string(),
                errors: Some(ApiErrorDetail::Fields(fields)),
            },
            AppError::StoreUnavailable(detail) => Self {
                status: 500,
                message: "Database connection failed".to_string(),
                errors: Some(ApiErrorDetail::Text(detail)),
            },
            AppError::SaveFailed => Self {
                status: 500,
                message: err.to_string(),
                errors: None,
            },
            AppError::Db(_) | AppError::Io(_) | AppError::Config(_) => {
                Self::unknown(err.to_string())
            }
            AppError::Unknown(detail) => Self::unknown(detail),
        }
    }
}
