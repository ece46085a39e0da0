//! Accounts Error Types
//!
//! This module provides account-specific error variants that integrate
//! with the unified `kernel::error::AppError` system. The presentation
//! layer is the only place these are turned into wire responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::token::TokenError;
use thiserror::Error;

/// Account-specific result type alias
pub type AccountResult<T> = Result<T, AccountError>;

/// Account-specific error variants
#[derive(Debug, Error)]
pub enum AccountError {
    /// User not found
    #[error("User not found")]
    UserNotFound,

    /// User name already exists
    #[error("User name already exists")]
    UserNameTaken,

    /// Email already registered
    #[error("Email already registered")]
    EmailTaken,

    /// Invalid credentials (wrong password)
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Required field missing or empty
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// Input validation failure
    #[error("{0}")]
    Validation(String),

    /// No token presented where one is required
    #[error("Authentication token required")]
    MissingToken,

    /// Token malformed, signature invalid, or wrong purpose
    #[error("Invalid token")]
    TokenInvalid,

    /// Token past its expiry
    #[error("Token expired")]
    TokenExpired,

    /// Signature-valid refresh token that no longer matches the stored one
    #[error("Refresh token revoked or superseded")]
    TokenRevoked,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AccountError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AccountError::UserNotFound => StatusCode::NOT_FOUND,
            AccountError::UserNameTaken | AccountError::EmailTaken => StatusCode::CONFLICT,
            AccountError::InvalidCredentials
            | AccountError::MissingToken
            | AccountError::TokenInvalid
            | AccountError::TokenExpired
            | AccountError::TokenRevoked => StatusCode::UNAUTHORIZED,
            AccountError::MissingField(_) | AccountError::Validation(_) => StatusCode::BAD_REQUEST,
            AccountError::Database(_) | AccountError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AccountError::UserNotFound => ErrorKind::NotFound,
            AccountError::UserNameTaken | AccountError::EmailTaken => ErrorKind::Conflict,
            AccountError::InvalidCredentials
            | AccountError::MissingToken
            | AccountError::TokenInvalid
            | AccountError::TokenExpired
            | AccountError::TokenRevoked => ErrorKind::Unauthorized,
            AccountError::MissingField(_) | AccountError::Validation(_) => ErrorKind::BadRequest,
            AccountError::Database(_) | AccountError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    ///
    /// Internal failures are flattened to a generic message so database
    /// and hashing details never reach the client.
    pub fn to_app_error(&self) -> AppError {
        match self {
            AccountError::Database(_) | AccountError::Internal(_) => {
                AppError::new(self.kind(), "Internal server error")
            }
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AccountError::Database(e) => {
                tracing::error!(error = %e, "Accounts database error");
            }
            AccountError::Internal(msg) => {
                tracing::error!(message = %msg, "Accounts internal error");
            }
            AccountError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AccountError::TokenRevoked => {
                tracing::warn!("Rejected revoked or superseded refresh token");
            }
            _ => {
                tracing::debug!(error = %self, "Accounts error");
            }
        }
    }
}

impl IntoResponse for AccountError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<TokenError> for AccountError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Expired => AccountError::TokenExpired,
            TokenError::Invalid | TokenError::WrongPurpose { .. } => AccountError::TokenInvalid,
            TokenError::Issuance(e) => AccountError::Internal(format!("Token issuance failed: {e}")),
            TokenError::Clock => AccountError::Internal("System clock error".to_string()),
        }
    }
}

impl From<AppError> for AccountError {
    fn from(err: AppError) -> Self {
        match err.kind() {
            ErrorKind::BadRequest => AccountError::Validation(err.message().to_string()),
            ErrorKind::NotFound => AccountError::UserNotFound,
            _ => AccountError::Internal(err.to_string()),
        }
    }
}
