use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use pfm_identity_core::{IdentityCoreError, KeyRejection};

/// API error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetails,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetails {
    pub code: String,
    pub message: String,
}

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(KeyRejection),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl From<IdentityCoreError> for ApiError {
    fn from(err: IdentityCoreError) -> Self {
        match err {
            IdentityCoreError::EmailAlreadyInUse(_) => {
                ApiError::Conflict("Email is already in use.".to_string())
            }
            IdentityCoreError::KeyRejected(reason) => ApiError::Unauthorized(reason),
            IdentityCoreError::KeyNotFound => {
                ApiError::NotFound("No registration key has been issued.".to_string())
            }
            IdentityCoreError::AccountNotFound(email) => {
                ApiError::NotFound(format!("No account found for {}", email))
            }
            other => ApiError::Internal(anyhow::anyhow!(other)),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            ApiError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, "INVALID_REQUEST", msg),
            ApiError::Unauthorized(reason) => {
                let (code, message) = match reason {
                    KeyRejection::NoKeyIssued => {
                        ("NO_KEY_ISSUED", "No registration key has been issued.")
                    }
                    KeyRejection::Expired => ("KEY_EXPIRED", "Registration key has expired."),
                    KeyRejection::Mismatch => ("KEY_MISMATCH", "Registration key is not valid."),
                };
                (StatusCode::UNAUTHORIZED, code, message.to_string())
            }
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg),
            ApiError::Internal(err) => {
                tracing::error!("Internal error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse {
            error: ErrorDetails {
                code: code.to_string(),
                message,
            },
        });

        (status, body).into_response()
    }
}
