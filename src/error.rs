//! Unified error handling for the request/service layer.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::storage::StorageError;

/// Error payload returned to the caller: `{ "status": 400, "message": "..." }`
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub status: u16,
    pub message: String,
}

/// Validation and business-rule failures of the service layer.
///
/// Every variant carries the message surfaced to the caller.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    MissingField(String),

    #[error("{0}")]
    InvalidValue(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("storage error: {0}")]
    Storage(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<StorageError> for ServiceError {
    fn from(e: StorageError) -> Self {
        match e {
            // Конфликт, пойманный уже внутри транзакции (гонка двух запросов)
            StorageError::Conflict(msg) => ServiceError::Conflict(msg),
            StorageError::RowNotFound(msg) => ServiceError::NotFound(msg),
            StorageError::Database(msg) => ServiceError::Storage(msg),
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ServiceError::MissingField(msg)
            | ServiceError::InvalidValue(msg)
            | ServiceError::Conflict(msg) => (StatusCode::BAD_REQUEST, msg),

            ServiceError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),

            // Не отдаем наружу детали БД, только логируем
            ServiceError::Storage(msg) => {
                error!(target: "storage", error = %msg, "Storage error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(ErrorBody {
            status: status.as_u16(),
            message,
        });

        (status, body).into_response()
    }
}
