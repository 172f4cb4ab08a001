/// Application Error Handling
///
/// Every failure a handler can produce is an `AppError`. The enum is split into
/// domain-specific parts so callers branch on a closed set instead of inspecting
/// error strings:
/// 1. Validation errors (malformed bodies, bad parameters, oversize content)
/// 2. Database errors (not found, duplicates, pool and query failures)
/// 3. Authentication errors (missing or invalid credentials)
/// 4. Authorization errors (authenticated but not entitled)
///
/// Errors are rendered as `{"error": "<message>"}` with a matching status code.

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use std::error::Error as StdError;
use std::fmt;

use crate::logger::RequestId;

/// ============================================================================
/// 1. DOMAIN-SPECIFIC ERROR TYPES
/// ============================================================================

/// Validation errors for input data
#[derive(Debug, Clone)]
pub enum ValidationError {
    EmptyField(String),
    TooLong(String, usize),
    InvalidFormat(String),
    InvalidValue(String, String),
    MalformedBody(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::EmptyField(field) => write!(f, "{} is empty", field),
            ValidationError::TooLong(field, max) => {
                write!(f, "{} is too long (maximum {} characters)", field, max)
            }
            ValidationError::InvalidFormat(field) => write!(f, "{} has invalid format", field),
            ValidationError::InvalidValue(field, hint) => write!(f, "invalid {}: {}", field, hint),
            ValidationError::MalformedBody(reason) => {
                write!(f, "could not decode request: {}", reason)
            }
        }
    }
}

impl StdError for ValidationError {}

/// Database operation errors
#[derive(Debug)]
pub enum DatabaseError {
    UniqueConstraintViolation(String),
    NotFound(String),
    ConnectionPool(String),
    UnexpectedError(String),
}

impl fmt::Display for DatabaseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatabaseError::UniqueConstraintViolation(msg) => {
                write!(f, "Duplicate entry: {}", msg)
            }
            DatabaseError::NotFound(msg) => write!(f, "{}", msg),
            DatabaseError::ConnectionPool(msg) => write!(f, "Database connection error: {}", msg),
            DatabaseError::UnexpectedError(msg) => write!(f, "Database error: {}", msg),
        }
    }
}

impl StdError for DatabaseError {}

/// Authentication errors
///
/// Token failures deliberately collapse into `TokenInvalid`: callers never learn
/// whether a token was expired, forged or malformed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    InvalidCredentials,
    TokenInvalid,
    MissingToken,
    InvalidApiKey,
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::InvalidCredentials => write!(f, "Incorrect email or password"),
            AuthError::TokenInvalid => write!(f, "Invalid or expired token"),
            AuthError::MissingToken => write!(f, "Missing or malformed authorization header"),
            AuthError::InvalidApiKey => write!(f, "Invalid API key"),
        }
    }
}

impl StdError for AuthError {}

/// ============================================================================
/// 2. UNIFIED APPLICATION ERROR TYPE
/// ============================================================================

#[derive(Debug)]
pub enum AppError {
    Validation(ValidationError),
    Database(DatabaseError),
    Auth(AuthError),
    Forbidden(String),
    Internal(String),
}

impl AppError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        AppError::Database(DatabaseError::NotFound(msg.into()))
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Validation(e) => write!(f, "{}", e),
            AppError::Database(e) => write!(f, "{}", e),
            AppError::Auth(e) => write!(f, "{}", e),
            AppError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl StdError for AppError {}

// ============================================================================
// FROM IMPLEMENTATIONS
// ============================================================================

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::Validation(err)
    }
}

impl From<DatabaseError> for AppError {
    fn from(err: DatabaseError) -> Self {
        AppError::Database(err)
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        AppError::Auth(err)
    }
}

/// Postgres SQLSTATE for unique_violation
const UNIQUE_VIOLATION: &str = "23505";
/// Postgres SQLSTATE for foreign_key_violation
const FOREIGN_KEY_VIOLATION: &str = "23503";

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => {
                AppError::Database(DatabaseError::NotFound("Record not found".to_string()))
            }
            sqlx::Error::Database(ref db_err)
                if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) =>
            {
                AppError::Database(DatabaseError::UniqueConstraintViolation(
                    "Email already registered".to_string(),
                ))
            }
            // The referenced row is gone, e.g. a token whose user was deleted
            sqlx::Error::Database(ref db_err)
                if db_err.code().as_deref() == Some(FOREIGN_KEY_VIOLATION) =>
            {
                AppError::Database(DatabaseError::NotFound(
                    "Referenced user not found".to_string(),
                ))
            }
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
                AppError::Database(DatabaseError::ConnectionPool(err.to_string()))
            }
            other => AppError::Database(DatabaseError::UnexpectedError(other.to_string())),
        }
    }
}

// ============================================================================
// 3. HTTP RESPONSE MAPPING
// ============================================================================

/// Error envelope returned to clients
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Trait for converting errors to HTTP responses with proper logging
pub trait ErrorHandler {
    fn error_response(&self) -> (StatusCode, ErrorResponse);
    fn log_error(&self, request_id: &str);
}

impl ErrorHandler for AppError {
    fn error_response(&self) -> (StatusCode, ErrorResponse) {
        let message = match self {
            AppError::Validation(e) => e.to_string(),
            AppError::Database(DatabaseError::NotFound(msg)) => msg.clone(),
            AppError::Database(DatabaseError::UniqueConstraintViolation(msg)) => msg.clone(),
            AppError::Database(DatabaseError::ConnectionPool(_)) => {
                "Database service temporarily unavailable".to_string()
            }
            AppError::Database(_) => "Internal Server Error".to_string(),
            AppError::Auth(e) => e.to_string(),
            AppError::Forbidden(msg) => msg.clone(),
            AppError::Internal(_) => "Internal Server Error".to_string(),
        };

        (self.status_code(), ErrorResponse::new(message))
    }

    fn log_error(&self, request_id: &str) {
        match self {
            AppError::Validation(e) => {
                tracing::warn!(request_id = request_id, error = %e, "Validation error");
            }
            AppError::Database(DatabaseError::NotFound(msg)) => {
                tracing::info!(request_id = request_id, error = %msg, "Resource not found");
            }
            AppError::Database(DatabaseError::UniqueConstraintViolation(_)) => {
                tracing::warn!(request_id = request_id, error = %self, "Duplicate entry attempt");
            }
            AppError::Database(e) => {
                tracing::error!(request_id = request_id, error = %e, "Database error");
            }
            AppError::Auth(e) => {
                tracing::warn!(request_id = request_id, error = %e, "Authentication error");
            }
            AppError::Forbidden(msg) => {
                tracing::warn!(request_id = request_id, error = %msg, "Access denied");
            }
            AppError::Internal(msg) => {
                tracing::error!(request_id = request_id, error = %msg, "Internal error");
            }
        }
    }
}

/// Logged by `LoggerMiddleware` under the request's id
impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let (status, body) = <Self as ErrorHandler>::error_response(self);
        HttpResponse::build(status).json(body)
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Database(e) => match e {
                DatabaseError::UniqueConstraintViolation(_) => StatusCode::CONFLICT,
                DatabaseError::NotFound(_) => StatusCode::NOT_FOUND,
                DatabaseError::ConnectionPool(_) => StatusCode::SERVICE_UNAVAILABLE,
                DatabaseError::UnexpectedError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            AppError::Auth(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// ============================================================================
// 4. ERROR CONTEXT
// ============================================================================

/// Per-request context attached to success and failure logs
#[derive(Debug, Clone)]
pub struct ErrorContext {
    pub request_id: String,
    pub user_id: Option<String>,
    pub operation: String,
}

impl ErrorContext {
    pub fn new(request_id: &RequestId, operation: impl Into<String>) -> Self {
        Self {
            request_id: request_id.to_string(),
            user_id: None,
            operation: operation.into(),
        }
    }

    pub fn with_user_id(mut self, user_id: impl ToString) -> Self {
        self.user_id = Some(user_id.to_string());
        self
    }

    pub fn log_error(&self, error: &AppError) {
        tracing::warn!(
            request_id = %self.request_id,
            operation = %self.operation,
            user_id = ?self.user_id,
            error = %error,
            "Operation failed"
        );
    }
}
