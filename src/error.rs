use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    /// The classifier artifact failed to load; predictions are unavailable
    #[error("Model is not loaded: {0}")]
    ModelUnavailable(String),

    /// Validation errors (bad request body, missing fields)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Inference failed while running the classifier
    #[error("Inference error: {0}")]
    Inference(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Network errors (launcher-side health polling)
    #[error("Network error: {0}")]
    Network(String),

    /// Internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::ModelUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Inference(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Network(_) => StatusCode::BAD_GATEWAY,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get error code string
    pub fn error_code(&self) -> &str {
        match self {
            AppError::ModelUnavailable(_) => "MODEL_UNAVAILABLE",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Inference(_) => "INFERENCE_ERROR",
            AppError::Io(_) => "IO_ERROR",
            AppError::Serialization(_) => "SERIALIZATION_ERROR",
            AppError::Configuration(_) => "CONFIGURATION_ERROR",
            AppError::Network(_) => "NETWORK_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Message exposed to HTTP callers. Inference and model-load failures
    /// get a fixed generic message; the underlying cause (which may include
    /// filesystem paths) stays in the logs.
    fn public_message(&self) -> String {
        match self {
            AppError::Inference(_) => "Inference failed".to_string(),
            AppError::ModelUnavailable(_) => "Model is not loaded".to_string(),
            other => other.to_string(),
        }
    }
}

/// Convert AppError to HTTP response
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_code = self.error_code();
        let detail = self.to_string();

        if status.is_client_error() {
            tracing::warn!(
                error_code = error_code,
                status_code = status.as_u16(),
                detail = %detail,
                "Request rejected"
            );
        } else {
            tracing::error!(
                error_code = error_code,
                status_code = status.as_u16(),
                detail = %detail,
                "Request error"
            );
        }

        let body = Json(json!({
            "error": {
                "code": error_code,
                "message": self.public_message(),
                "status": status.as_u16(),
            }
        }));

        (status, body).into_response()
    }
}

/// Conversion from serde_json::Error
impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

/// Conversion from validator::ValidationErrors
impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Validation(err.to_string())
    }
}

/// Conversion from config::ConfigError
impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Configuration(err.to_string())
    }
}

/// Conversion from reqwest::Error
impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Network(err.to_string())
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, AppError>;
