//! Registration key lifecycle: issue, inspect, validate.

use crate::{errors::*, traits::Clock, types::*};
use pfm_crypto::constant_time_compare;
use pfm_storage::{Storage, CF_ADMIN_SETTINGS, SETTINGS_KEY};
use tracing::info;

use super::IdentityService;

impl<S, C> IdentityService<S, C>
where
    S: Storage + 'static,
    C: Clock + 'static,
{
    /// Replace the registration key singleton; last write wins.
    pub(crate) async fn issue_registration_key_internal(
        &self,
        new_key: String,
        ttl_minutes: u64,
    ) -> Result<AdminSettings> {
        let settings = AdminSettings {
            registration_key: new_key,
            expires_at: self.clock.now() + ttl_minutes * 60,
        };

        self.storage
            .put(CF_ADMIN_SETTINGS, &SETTINGS_KEY, &settings)
            .await?;

        info!(
            "Registration key rotated, expires_at={}",
            settings.expires_at
        );
        Ok(settings)
    }

    pub(crate) async fn current_registration_key_internal(&self) -> Result<AdminSettings> {
        self.storage
            .get(CF_ADMIN_SETTINGS, &SETTINGS_KEY)
            .await?
            .ok_or(IdentityCoreError::KeyNotFound)
    }

    /// Validate a presented key against the stored singleton.
    ///
    /// Expiry is checked lazily against the injected clock at the instant of
    /// the call; there is no background sweep. Valid iff a key exists, it is
    /// unexpired, and the presented value matches exactly.
    pub(crate) async fn validate_registration_key_internal(
        &self,
        presented_key: &str,
    ) -> Result<KeyValidation> {
        let settings: Option<AdminSettings> =
            self.storage.get(CF_ADMIN_SETTINGS, &SETTINGS_KEY).await?;

        let Some(settings) = settings else {
            return Ok(KeyValidation::Invalid(KeyRejection::NoKeyIssued));
        };

        if self.clock.now() > settings.expires_at {
            return Ok(KeyValidation::Invalid(KeyRejection::Expired));
        }

        if !constant_time_compare(
            presented_key.as_bytes(),
            settings.registration_key.as_bytes(),
        ) {
            return Ok(KeyValidation::Invalid(KeyRejection::Mismatch));
        }

        Ok(KeyValidation::Valid)
    }
}
