//! Error types for the page service
//!
//! The cache itself never fails; these errors come from rendering pages,
//! handling requests and loading configuration.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == App Error Enum ==
/// Unified error type for the page service.
#[derive(Error, Debug)]
pub enum AppError {
    /// No active template with the given name
    #[error("Template not found: {0}")]
    TemplateNotFound(String),

    /// Template data is not a JSON object
    #[error("Malformed template data: {0}")]
    MalformedData(#[from] serde_json::Error),

    /// Key not present in the cache
    #[error("Key not found: {0}")]
    NotFound(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Bad configuration value or file
    #[error("Configuration error: {0}")]
    Config(String),

    /// Reading a file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// HTTP status this error is reported with.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::TemplateNotFound(_) | AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AppError::MalformedData(_) | AppError::Config(_) | AppError::Io(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the page service.
pub type Result<T> = std::result::Result<T, AppError>;
