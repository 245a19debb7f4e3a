use axum::{
    extract::{Path, State},
    response::Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use pfm_identity_core::IdentityDirectory;

use crate::{api::helpers::format_timestamp, error::ApiError, state::AppState};

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Deserialize)]
pub struct UserUpdateRequest {
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl From<pfm_identity_core::User> for UserResponse {
    fn from(user: pfm_identity_core::User) -> Self {
        UserResponse {
            id: user.id,
            name: user.name,
            email: user.email,
            created_at: format_timestamp(user.created_at),
            updated_at: format_timestamp(user.updated_at),
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /v1/users
pub async fn list_users(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    let users = state.identity_service.list_users().await?;

    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// GET /v1/users/:email
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(email): Path<String>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = state.identity_service.get_user(&email).await?;

    Ok(Json(user.into()))
}

/// PUT /v1/users/:email
pub async fn update_user(
    State(state): State<Arc<AppState>>,
    Path(email): Path<String>,
    Json(req): Json<UserUpdateRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    if req.name.is_empty() {
        return Err(ApiError::InvalidRequest("Name must not be empty".to_string()));
    }

    let user = state.identity_service.update_user(&email, req.name).await?;

    Ok(Json(user.into()))
}

/// DELETE /v1/users/:email
pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    Path(email): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.identity_service.delete_user(&email).await?;

    Ok(Json(MessageResponse {
        message: "User deleted successfully.".to_string(),
    }))
}
