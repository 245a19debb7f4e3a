use axum::{extract::State, response::Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use pfm_identity_core::IdentityDirectory;

use crate::{error::ApiError, state::AppState};

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct AdminRegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    /// Invitation key gating admin creation
    pub registration_key: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UserRegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub message: String,
    pub id: Uuid,
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /v1/register/admin
pub async fn register_admin(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AdminRegisterRequest>,
) -> Result<Json<RegisterResponse>, ApiError> {
    validate_registration_fields(&req.name, &req.email, &req.password)?;

    let admin = state
        .identity_service
        .register_admin(req.name, req.email, &req.password, req.registration_key.as_deref())
        .await?;

    Ok(Json(RegisterResponse {
        message: "Admin registered successfully.".to_string(),
        id: admin.id,
    }))
}

/// POST /v1/register/user
pub async fn register_user(
    State(state): State<Arc<AppState>>,
    Json(req): Json<UserRegisterRequest>,
) -> Result<Json<RegisterResponse>, ApiError> {
    validate_registration_fields(&req.name, &req.email, &req.password)?;

    let user = state
        .identity_service
        .register_user(req.name, req.email, &req.password)
        .await?;

    Ok(Json(RegisterResponse {
        message: "User registered successfully.".to_string(),
        id: user.id,
    }))
}

fn validate_registration_fields(name: &str, email: &str, password: &str) -> Result<(), ApiError> {
    if name.is_empty() {
        return Err(ApiError::InvalidRequest("Name must not be empty".to_string()));
    }
    if email.is_empty() {
        return Err(ApiError::InvalidRequest("Email must not be empty".to_string()));
    }
    if password.is_empty() {
        return Err(ApiError::InvalidRequest(
            "Password must not be empty".to_string(),
        ));
    }
    Ok(())
}
