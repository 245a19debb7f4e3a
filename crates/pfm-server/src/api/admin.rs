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

#[derive(Debug, Deserialize)]
pub struct KeyUpdateRequest {
    pub key: String,
    /// Key lifetime in minutes
    pub expires_in: u64,
}

#[derive(Debug, Serialize)]
pub struct KeyResponse {
    pub key: String,
    pub expires_at: String,
}

#[derive(Debug, Serialize)]
pub struct AdminResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Deserialize)]
pub struct AdminUpdateRequest {
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl From<pfm_identity_core::Admin> for AdminResponse {
    fn from(admin: pfm_identity_core::Admin) -> Self {
        AdminResponse {
            id: admin.id,
            name: admin.name,
            email: admin.email,
            created_at: format_timestamp(admin.created_at),
            updated_at: format_timestamp(admin.updated_at),
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /v1/admin/key
pub async fn update_key(
    State(state): State<Arc<AppState>>,
    Json(req): Json<KeyUpdateRequest>,
) -> Result<Json<KeyResponse>, ApiError> {
    if req.key.is_empty() {
        return Err(ApiError::InvalidRequest("Key must not be empty".to_string()));
    }

    let settings = state
        .identity_service
        .issue_registration_key(req.key, req.expires_in)
        .await?;

    Ok(Json(KeyResponse {
        key: settings.registration_key,
        expires_at: format_timestamp(settings.expires_at),
    }))
}

/// GET /v1/admin/key
pub async fn get_current_key(
    State(state): State<Arc<AppState>>,
) -> Result<Json<KeyResponse>, ApiError> {
    let settings = state.identity_service.current_registration_key().await?;

    Ok(Json(KeyResponse {
        key: settings.registration_key,
        expires_at: format_timestamp(settings.expires_at),
    }))
}

/// GET /v1/admins
pub async fn list_admins(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<AdminResponse>>, ApiError> {
    let admins = state.identity_service.list_admins().await?;

    Ok(Json(admins.into_iter().map(AdminResponse::from).collect()))
}

/// GET /v1/admins/:email
pub async fn get_admin(
    State(state): State<Arc<AppState>>,
    Path(email): Path<String>,
) -> Result<Json<AdminResponse>, ApiError> {
    let admin = state.identity_service.get_admin(&email).await?;

    Ok(Json(admin.into()))
}

/// PUT /v1/admins/:email
pub async fn update_admin(
    State(state): State<Arc<AppState>>,
    Path(email): Path<String>,
    Json(req): Json<AdminUpdateRequest>,
) -> Result<Json<AdminResponse>, ApiError> {
    if req.name.is_empty() {
        return Err(ApiError::InvalidRequest("Name must not be empty".to_string()));
    }

    let admin = state.identity_service.update_admin(&email, req.name).await?;

    Ok(Json(admin.into()))
}

/// DELETE /v1/admins/:email
pub async fn delete_admin(
    State(state): State<Arc<AppState>>,
    Path(email): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.identity_service.delete_admin(&email).await?;

    Ok(Json(MessageResponse {
        message: "Admin deleted successfully.".to_string(),
    }))
}
