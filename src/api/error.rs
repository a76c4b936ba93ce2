//! API error types with HTTP status code mapping

use serde::Serialize;

use crate::core::models::FormError;
use crate::site::SiteError;

/// Error codes that map to HTTP status codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Resource not found (404)
    NotFound,
    /// Invalid request (400)
    BadRequest,
    /// Not signed in, or bad credentials (401)
    Unauthorized,
    /// Internal server error (500)
    Internal,
}

impl ErrorCode {
    /// Get the HTTP status code for this error
    #[must_use]
    pub const fn status_code(self) -> u16 {
        match self {
            Self::NotFound => 404,
            Self::BadRequest => 400,
            Self::Unauthorized => 401,
            Self::Internal => 500,
        }
    }

    /// Get the error code string
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "NOT_FOUND",
            Self::BadRequest => "BAD_REQUEST",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Internal => "INTERNAL_ERROR",
        }
    }
}

/// API error with code and message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// Error code (determines HTTP status)
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
}

impl ApiError {
    /// Create a not found error
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::NotFound,
            message: message.into(),
        }
    }

    /// Create a bad request error
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::BadRequest,
            message: message.into(),
        }
    }

    /// Create an unauthorized error
    #[must_use]
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::Unauthorized,
            message: message.into(),
        }
    }

    /// Create an internal error
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::Internal,
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        self.code.status_code()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for ApiError {}

impl From<FormError> for ApiError {
    fn from(err: FormError) -> Self {
        Self::bad_request(err.to_string())
    }
}

impl From<SiteError> for ApiError {
    fn from(err: SiteError) -> Self {
        match err {
            SiteError::Form(e) => e.into(),
            SiteError::Auth(e) => Self::unauthorized(e.to_string()),
            SiteError::Store(e) if e.is_not_found() => Self::not_found(e.to_string()),
            SiteError::Store(e) => Self::internal(e.to_string()),
            e @ SiteError::UnknownEntry { .. } => Self::not_found(e.to_string()),
        }
    }
}

/// Serializable error data for JSON responses
#[derive(Debug, Serialize)]
pub struct ApiErrorData {
    /// Error code string
    pub code: String,
    /// Human-readable message
    pub message: String,
}

impl From<&ApiError> for ApiErrorData {
    fn from(err: &ApiError) -> Self {
        Self {
            code: err.code.as_str().to_string(),
            message: err.message.clone(),
        }
    }
}
