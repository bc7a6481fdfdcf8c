use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde::Serialize;

/// Application-wide Result type
pub type Result<T> = std::result::Result<T, AppError>;

/// Main application error type
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    /// Business-rule violations: missing entities, invalid first
    /// installment dates, ownership mismatches. Message text is part of
    /// the API contract.
    #[error("{0}")]
    Business(String),

    /// Request payload failed field validation
    #[error("{0}")]
    Validation(String),

    /// Unique-constraint violation on save (cpf, credit code)
    #[error("{0}")]
    Conflict(String),

    /// Database operation errors
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal server errors
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error body returned to API clients: a title per status class, a
/// timestamp, the numeric status, the error kind, and detail messages.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub title: String,
    pub timestamp: String,
    pub status: u16,
    pub exception: String,
    pub details: Vec<String>,
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let status_code = self.status_code();

        let title = match status_code {
            StatusCode::BAD_REQUEST => "Bad Request! Consult the documentation",
            StatusCode::CONFLICT => "Conflict! Consult the documentation",
            _ => "Internal Server Error! Consult the documentation",
        };

        HttpResponse::build(status_code).json(ErrorBody {
            title: title.to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            status: status_code.as_u16(),
            exception: self.kind().to_string(),
            details: vec![self.to_string()],
        })
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Business(_) => StatusCode::BAD_REQUEST,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl AppError {
    pub fn business(msg: impl Into<String>) -> Self {
        AppError::Business(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        AppError::Conflict(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }

    /// Error kind surfaced in the `exception` field of API error bodies
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Business(_) => "BusinessError",
            AppError::Validation(_) => "ValidationError",
            AppError::Conflict(_) => "ConflictError",
            AppError::Database(_) => "DatabaseError",
            AppError::Configuration(_) => "ConfigurationError",
            AppError::Internal(_) => "InternalError",
        }
    }
}
