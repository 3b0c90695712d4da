//!
//! # Custom Error Handling
//!
//! This module defines the transport-facing error type `AppError`. Handlers
//! return it, and it implements `actix_web::error::ResponseError` to turn
//! failures into HTTP responses with a JSON `{"error": ...}` body.
//!
//! The core reports failures as `AuthError` and the stores as `StoreError`;
//! the `From` implementations below are where those map to status codes.
//! Internal details (storage faults, malformed stored hashes) are logged and
//! replaced by a generic message before reaching the client.

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use log::error;
use serde_json::json;
use thiserror::Error;
use validator::ValidationErrors;

use crate::auth::AuthError;
use crate::store::StoreError;

/// Represents all possible errors returned from HTTP handlers.
#[derive(Debug, Error)]
pub enum AppError {
    /// Authentication failed or is missing (HTTP 401).
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    /// The caller is authenticated but does not own the resource (HTTP 403).
    #[error("Forbidden: {0}")]
    Forbidden(String),
    /// Malformed request (HTTP 400).
    #[error("Bad Request: {0}")]
    BadRequest(String),
    /// The requested resource does not exist (HTTP 404).
    #[error("Not Found: {0}")]
    NotFound(String),
    /// The request conflicts with existing state, e.g. a taken email (HTTP 409).
    #[error("Conflict: {0}")]
    Conflict(String),
    /// Input failed validation (HTTP 422).
    #[error("Validation Error: {0}")]
    ValidationError(String),
    /// Unexpected server-side error (HTTP 500).
    #[error("Internal Server Error: {0}")]
    InternalServerError(String),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::ValidationError(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let msg = match self {
            AppError::Unauthorized(msg)
            | AppError::Forbidden(msg)
            | AppError::BadRequest(msg)
            | AppError::NotFound(msg)
            | AppError::Conflict(msg)
            | AppError::ValidationError(msg)
            | AppError::InternalServerError(msg) => msg,
        };
        HttpResponse::build(self.status_code()).json(json!({ "error": msg }))
    }
}

impl From<AuthError> for AppError {
    fn from(error: AuthError) -> AppError {
        match error {
            AuthError::InvalidCredentials
            | AuthError::UnknownPrincipal
            | AuthError::TokenInvalid
            | AuthError::TokenExpired
            | AuthError::TokenMalformed => AppError::Unauthorized(error.to_string()),
            AuthError::Forbidden => AppError::Forbidden(error.to_string()),
            AuthError::IdentityAlreadyExists => AppError::Conflict(error.to_string()),
            AuthError::PasswordTooLong => AppError::ValidationError(error.to_string()),
            AuthError::Store(store_err) => store_err.into(),
            AuthError::CredentialError(_) | AuthError::Internal(_) => {
                error!("{}", error);
                AppError::InternalServerError("Internal server error".into())
            }
        }
    }
}

impl From<StoreError> for AppError {
    fn from(error: StoreError) -> AppError {
        match error {
            StoreError::NotFound => AppError::NotFound("Record not found".into()),
            StoreError::DuplicateIdentity => AppError::Conflict(error.to_string()),
            StoreError::Database(msg) => {
                error!("Database error: {}", msg);
                AppError::InternalServerError("Database error".into())
            }
            StoreError::EmptyCredential => {
                error!("Refused to store principal: {}", error);
                AppError::InternalServerError("Internal server error".into())
            }
        }
    }
}

/// Converts `validator::ValidationErrors` into `AppError::ValidationError`.
///
/// The detailed validation messages are preserved.
impl From<ValidationErrors> for AppError {
    fn from(error: ValidationErrors) -> AppError {
        AppError::ValidationError(error.to_string())
    }
}
