use axum::response::{IntoResponse, Response};
use axum::Json;
use diesel::r2d2;
use diesel::result::DatabaseErrorKind;
use http::StatusCode;
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

pub const DUPLICATE_USER_MESSAGE: &str =
    "User already exists with this username, aadhar, or wallet ID";

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Authorization header required")]
    MissingHeader,
    #[error("Invalid Authorization format")]
    InvalidFormat,
    #[error("Invalid token: {0}")]
    InvalidToken(String),
    #[error("Token references a user that no longer exists")]
    UserNotFound,
    #[error("Invalid credentials")]
    InvalidCredentials,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    Auth(#[from] AuthError),
    #[error("{0}")]
    Forbidden(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    InvalidState(String),
    #[error("Database error: {0}")]
    Database(#[from] diesel::result::Error),
    #[error("Database connection error: {0}")]
    DatabaseConnection(String),
    #[error("Password hashing error: {0}")]
    PasswordHash(#[from] bcrypt::BcryptError),
    #[error("Token error: {0}")]
    Token(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error envelope returned for every failed request.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ErrorBody {
    fn new(message: impl Into<String>, error: Option<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            error,
        }
    }
}

impl From<r2d2::PoolError> for ApiError {
    fn from(err: r2d2::PoolError) -> Self {
        ApiError::DatabaseConnection(err.to_string())
    }
}

impl ApiError {
    pub fn not_found(what: &str) -> Self {
        ApiError::NotFound(format!("{what} not found"))
    }

    pub fn access_denied() -> Self {
        ApiError::Forbidden("Access denied".into())
    }

    fn is_unique_violation(&self) -> bool {
        matches!(
            self,
            ApiError::Database(diesel::result::Error::DatabaseError(
                DatabaseErrorKind::UniqueViolation,
                _
            ))
        )
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_)
            | ApiError::BadRequest(_)
            | ApiError::Conflict(_)
            | ApiError::InvalidState(_) => StatusCode::BAD_REQUEST,
            ApiError::Auth(AuthError::InvalidCredentials) => StatusCode::BAD_REQUEST,
            ApiError::Auth(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Database(_) if self.is_unique_violation() => StatusCode::BAD_REQUEST,
            ApiError::Database(_)
            | ApiError::DatabaseConnection(_)
            | ApiError::PasswordHash(_)
            | ApiError::Token(_)
            | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn body(&self) -> ErrorBody {
        match self {
            ApiError::Validation(errors) => {
                ErrorBody::new("Validation failed", Some(errors.to_string()))
            }
            ApiError::BadRequest(msg)
            | ApiError::Conflict(msg)
            | ApiError::Forbidden(msg)
            | ApiError::NotFound(msg)
            | ApiError::InvalidState(msg) => ErrorBody::new(msg.as_str(), None),
            ApiError::Auth(e) => ErrorBody::new(e.to_string(), None),
            ApiError::Database(e) if self.is_unique_violation() => {
                ErrorBody::new("Duplicate value for a unique field", Some(e.to_string()))
            }
            other => ErrorBody::new("Server error", Some(other.to_string())),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        (status, Json(self.body())).into_response()
    }
}
