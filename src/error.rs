/*
 * Responsibility
 * - App-wide ApiError definition
 * - IntoResponse (HTTP status / JSON error body)
 * - Unified conversion of repo / session / cache errors
 */
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::repos::error::RepoError;
use crate::services::cache::CacheError;
use crate::services::session::SessionError;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{code}: {message}")]
    BadRequest { code: &'static str, message: String },
    #[error("unauthorized: {code}")]
    Unauthorized { code: &'static str },
    #[error("forbidden")]
    Forbidden,
    #[error("not found: {resource}")]
    NotFound { resource: &'static str },
    #[error("{code}: {message}")]
    Conflict { code: &'static str, message: String },
    #[error("internal server error")]
    Internal,
}

impl AppError {
    pub fn bad_request(code: &'static str, message: impl Into<String>) -> Self {
        Self::BadRequest {
            code,
            message: message.into(),
        }
    }

    pub fn unauthorized(code: &'static str) -> Self {
        Self::Unauthorized { code }
    }

    pub fn not_found(resource: &'static str) -> Self {
        Self::NotFound { resource }
    }

    pub fn conflict(code: &'static str, message: impl Into<String>) -> Self {
        Self::Conflict {
            code,
            message: message.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AppError::BadRequest { code, message } => (StatusCode::BAD_REQUEST, code, message),
            AppError::Unauthorized { code } => {
                (StatusCode::UNAUTHORIZED, code, "unauthorized".into())
            }
            AppError::Forbidden => (StatusCode::FORBIDDEN, "FORBIDDEN", "forbidden".into()),
            AppError::NotFound { resource } => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                format!("{resource} not found."),
            ),
            AppError::Conflict { code, message } => (StatusCode::CONFLICT, code, message),
            AppError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_SERVER_ERROR",
                "internal server error".into(),
            ),
        };

        let body = ErrorResponse {
            error: ErrorBody { code, message },
        };

        (status, Json(body)).into_response()
    }
}

impl From<RepoError> for AppError {
    fn from(e: RepoError) -> Self {
        match e {
            RepoError::Conflict => AppError::conflict("CONFLICT", "already exists"),
            RepoError::Db(_) => AppError::Internal,
        }
    }
}

impl From<SessionError> for AppError {
    fn from(e: SessionError) -> Self {
        match e {
            SessionError::Malformed => AppError::unauthorized("TOKEN_MALFORMED"),
            SessionError::UnsupportedAlgorithm => {
                AppError::unauthorized("TOKEN_UNSUPPORTED_ALGORITHM")
            }
            SessionError::BadSignature => AppError::unauthorized("TOKEN_BAD_SIGNATURE"),
            SessionError::MissingClaims => AppError::unauthorized("TOKEN_MISSING_CLAIMS"),
            SessionError::Expired => AppError::unauthorized("SESSION_EXPIRED"),
            // Signing faults are a server-side problem, not a credential fault.
            SessionError::Signing => AppError::Internal,
        }
    }
}

impl From<CacheError> for AppError {
    fn from(_: CacheError) -> Self {
        AppError::Internal
    }
}
