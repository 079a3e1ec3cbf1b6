//! Error handling module
//!
//! Defines the application error type and its HTTP mapping

use crate::services::CalculationError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] anyhow::Error),

    /// HTTP client error
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Storage error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Bad credentials
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Request validation failed
    #[error("Request validation failed: {0}")]
    Validation(String),

    /// Resource not found
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Resource already exists
    #[error("Conflict: {0}")]
    Conflict(String),

    /// External API error
    #[error("External API error: {0}")]
    ExternalApi(String),

    /// A lookup produced no usable data
    #[error("No data available: {0}")]
    NoData(String),

    /// Service temporarily unavailable
    #[error("Service temporarily unavailable: {0}")]
    ServiceUnavailable(String),

    /// Request timeout
    #[error("Request timeout")]
    Timeout,

    /// Internal server error
    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(rename = "type")]
    pub response_type: String,
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    #[serde(rename = "type")]
    pub error_type: String,
    pub message: String,
}

impl AppError {
    /// Get HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Authentication(_) => StatusCode::UNAUTHORIZED,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) | AppError::NoData(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Timeout => StatusCode::GATEWAY_TIMEOUT,
            AppError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::ExternalApi(_) | AppError::HttpClient(_) => StatusCode::BAD_GATEWAY,
            AppError::Config(_)
            | AppError::Serialization(_)
            | AppError::Database(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get error type string
    pub fn error_type(&self) -> &'static str {
        match self {
            AppError::Authentication(_) => "authentication_error",
            AppError::Validation(_) => "invalid_request_error",
            AppError::NotFound(_) => "not_found_error",
            AppError::NoData(_) => "no_data_error",
            AppError::Conflict(_) => "conflict_error",
            AppError::Timeout => "timeout_error",
            AppError::ServiceUnavailable(_) => "unavailable_error",
            AppError::ExternalApi(_) | AppError::HttpClient(_) => "upstream_error",
            AppError::Config(_)
            | AppError::Serialization(_)
            | AppError::Database(_)
            | AppError::Internal(_) => "api_error",
        }
    }

    /// Whether detailed error information should be logged
    pub fn should_log_details(&self) -> bool {
        !matches!(self, AppError::Authentication(_))
    }

    pub fn to_error_response(&self) -> ErrorResponse {
        ErrorResponse {
            response_type: "error".to_string(),
            error: ErrorDetail {
                error_type: self.error_type().to_string(),
                message: self.to_string(),
            },
        }
    }
}

impl From<CalculationError> for AppError {
    fn from(e: CalculationError) -> Self {
        AppError::NoData(e.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() && self.should_log_details() {
            tracing::error!("Application error: {} - Status code: {}", self, status);
        } else if self.should_log_details() {
            tracing::warn!("Client error: {} - Status code: {}", self, status);
        } else {
            tracing::warn!("Client error: {} - Status code: {}", self.error_type(), status);
        }

        (status, Json(self.to_error_response())).into_response()
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Error handling helper functions
pub mod helpers {
    use super::*;

    pub fn auth_error(message: impl Into<String>) -> AppError {
        AppError::Authentication(message.into())
    }

    pub fn validation_error(message: impl Into<String>) -> AppError {
        AppError::Validation(message.into())
    }

    pub fn no_data_error(message: impl Into<String>) -> AppError {
        AppError::NoData(message.into())
    }

    pub fn conflict_error(message: impl Into<String>) -> AppError {
        AppError::Conflict(message.into())
    }

    pub fn internal_error(message: impl Into<String>) -> AppError {
        AppError::Internal(message.into())
    }

    pub fn service_unavailable_error(message: impl Into<String>) -> AppError {
        AppError::ServiceUnavailable(message.into())
    }
}

/// Error context extension trait
pub trait ErrorContext<T> {
    /// Add validation error context
    fn validation_context(self, message: &str) -> AppResult<T>;

    /// Add external API error context
    fn external_api_context(self, message: &str) -> AppResult<T>;

    /// Add internal error context
    fn internal_context(self, message: &str) -> AppResult<T>;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn validation_context(self, message: &str) -> AppResult<T> {
        self.map_err(|e| AppError::Validation(format!("{}: {}", message, e)))
    }

    fn external_api_context(self, message: &str) -> AppResult<T> {
        self.map_err(|e| AppError::ExternalApi(format!("{}: {}", message, e)))
    }

    fn internal_context(self, message: &str) -> AppResult<T> {
        self.map_err(|e| AppError::Internal(format!("{}: {}", message, e)))
    }
}
