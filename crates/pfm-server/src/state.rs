use anyhow::Result;
use std::sync::Arc;

use pfm_identity_core::{IdentityService, SystemClock};
use pfm_storage::RocksDbStorage;

use crate::config::Config;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub identity_service: Arc<IdentityService<RocksDbStorage, SystemClock>>,
}

impl AppState {
    pub async fn new(config: Config) -> Result<Self> {
        // Initialize storage
        let storage = Arc::new(RocksDbStorage::open(&config.database_path)?);
        let clock = Arc::new(SystemClock);

        // Initialize service
        let identity_service = Arc::new(if config.require_registration_key {
            IdentityService::new(storage, clock)
        } else {
            IdentityService::without_key_gate(storage, clock)
        });

        Ok(AppState { identity_service })
    }
}
