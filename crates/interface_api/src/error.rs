//! API error handling
//!
//! Every failure leaving the API wears the same envelope:
//! `{"status": "error", "message": "..."}`. Internal detail is logged,
//! never returned to the caller.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use core_kernel::CoreError;
use domain_claims::ClaimError;
use domain_items::ItemError;
use infra_db::{DatabaseError, ResolutionError};

use crate::auth::AuthError;

/// API error types, one variant per status code
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Unauthenticated(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Validation(String),

    #[error("Internal server error")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub status: &'static str,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Unauthenticated(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Validation(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::Internal(detail) => {
                error!(detail = %detail, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = ErrorBody {
            status: "error",
            message,
        };

        (status, Json(body)).into_response()
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(msg) => ApiError::Validation(msg),
            CoreError::Unauthenticated(msg) => ApiError::Unauthenticated(msg),
            CoreError::Unauthorized(msg) => ApiError::Forbidden(msg),
            CoreError::NotFound(msg) => ApiError::NotFound(msg),
            CoreError::Conflict(msg) => ApiError::Conflict(msg),
            CoreError::InvalidStateTransition(msg) => ApiError::Conflict(msg),
        }
    }
}

impl From<ClaimError> for ApiError {
    fn from(err: ClaimError) -> Self {
        match err {
            ClaimError::ClaimNotFound(_) => ApiError::NotFound(err.to_string()),
            ClaimError::AlreadyResolved { .. } | ClaimError::ItemUnavailable => {
                ApiError::Conflict(err.to_string())
            }
            ClaimError::DuplicateClaim => ApiError::Conflict(err.to_string()),
            ClaimError::EmptyJustification
            | ClaimError::InvalidDecision(_)
            | ClaimError::InvalidParameters(_) => ApiError::Validation(err.to_string()),
        }
    }
}

impl From<ItemError> for ApiError {
    fn from(err: ItemError) -> Self {
        match err {
            ItemError::ItemNotFound(_) => ApiError::NotFound(err.to_string()),
            ItemError::InvalidStatusTransition { .. } => ApiError::Conflict(err.to_string()),
            ItemError::EmptyTitle => ApiError::Validation(err.to_string()),
        }
    }
}

impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        match &err {
            DatabaseError::NotFound(msg) => ApiError::NotFound(msg.clone()),
            DatabaseError::DuplicateEntry(_) => ApiError::Conflict(err.to_string()),
            // FK violations on insert mean the referenced record is gone.
            DatabaseError::ForeignKeyViolation(_) => {
                ApiError::NotFound("Referenced record not found".to_string())
            }
            DatabaseError::ConstraintViolation(_) => ApiError::Conflict(err.to_string()),
            _ => ApiError::Internal(err.to_string()),
        }
    }
}

impl From<ResolutionError> for ApiError {
    fn from(err: ResolutionError) -> Self {
        match err {
            ResolutionError::Claim(e) => e.into(),
            ResolutionError::Database(e) => e.into(),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::PasswordHash(detail) => ApiError::Internal(detail),
            _ => ApiError::Unauthenticated(err.to_string()),
        }
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(err: validator::ValidationErrors) -> Self {
        ApiError::Validation(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    fn status_of(err: ApiError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            status_of(ApiError::Unauthenticated("x".into())),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status_of(ApiError::Forbidden("x".into())),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            status_of(ApiError::NotFound("x".into())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(ApiError::Conflict("x".into())),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(ApiError::Validation("x".into())),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            status_of(ApiError::Internal("boom".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_domain_error_translation() {
        assert!(matches!(
            ApiError::from(ClaimError::DuplicateClaim),
            ApiError::Conflict(_)
        ));
        assert!(matches!(
            ApiError::from(ClaimError::EmptyJustification),
            ApiError::Validation(_)
        ));
        assert!(matches!(
            ApiError::from(ClaimError::AlreadyResolved {
                current: "approved".into()
            }),
            ApiError::Conflict(_)
        ));
        assert!(matches!(
            ApiError::from(DatabaseError::ForeignKeyViolation("items".into())),
            ApiError::NotFound(_)
        ));
    }

    #[test]
    fn test_internal_detail_is_not_leaked() {
        let response = ApiError::Internal("connection string with password".into());
        assert_eq!(response.to_string(), "Internal server error");
    }
}
