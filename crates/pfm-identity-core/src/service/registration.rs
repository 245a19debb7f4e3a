//! Registration flows and the cross-entity uniqueness check.

use crate::{errors::*, traits::Clock, types::*};
use pfm_crypto::{generate_salt, hash_password};
use pfm_storage::{Storage, StorageError, CF_ADMINS, CF_EMAIL_INDEX, CF_USERS};
use tracing::info;
use uuid::Uuid;

use super::IdentityService;

impl<S, C> IdentityService<S, C>
where
    S: Storage + 'static,
    C: Clock + 'static,
{
    /// True iff the email matches any administrator OR any user record.
    ///
    /// Both collections are consulted; comparison is exact byte equality,
    /// the store does not normalize case.
    pub(crate) async fn email_in_use_internal(&self, email: &str) -> Result<bool> {
        Ok(self.storage.exists(CF_ADMINS, &email).await?
            || self.storage.exists(CF_USERS, &email).await?)
    }

    pub(crate) async fn register_user_internal(
        &self,
        name: String,
        email: String,
        password: &str,
    ) -> Result<User> {
        // Fast-path uniqueness check; the index reservation below is the
        // authoritative guard.
        if self.email_in_use_internal(&email).await? {
            return Err(IdentityCoreError::EmailAlreadyInUse(email));
        }

        let password_hash = hash_password(password.as_bytes(), &generate_salt())?;
        let now = self.clock.now();
        let user = User {
            id: Uuid::new_v4(),
            name,
            email,
            password_hash,
            created_at: now,
            updated_at: now,
        };

        self.reserve_email(&user.email, AccountRole::User).await?;
        self.storage.put(CF_USERS, &user.email, &user).await?;

        info!("User registered: {}", user.id);
        Ok(user)
    }

    pub(crate) async fn register_admin_internal(
        &self,
        name: String,
        email: String,
        password: &str,
        presented_key: Option<&str>,
    ) -> Result<Admin> {
        // Key gate first. A uniqueness failure is still reported as
        // EmailAlreadyInUse, never folded into the key error.
        if self.require_registration_key {
            match self
                .validate_registration_key_internal(presented_key.unwrap_or(""))
                .await?
            {
                KeyValidation::Valid => {}
                KeyValidation::Invalid(reason) => {
                    return Err(IdentityCoreError::KeyRejected(reason));
                }
            }
        }

        if self.email_in_use_internal(&email).await? {
            return Err(IdentityCoreError::EmailAlreadyInUse(email));
        }

        let password_hash = hash_password(password.as_bytes(), &generate_salt())?;
        let now = self.clock.now();
        let admin = Admin {
            id: Uuid::new_v4(),
            name,
            email,
            password_hash,
            created_at: now,
            updated_at: now,
        };

        self.reserve_email(&admin.email, AccountRole::Admin).await?;
        self.storage.put(CF_ADMINS, &admin.email, &admin).await?;

        info!("Admin registered: {}", admin.id);
        Ok(admin)
    }

    /// Reserve an email in the unified index spanning both collections.
    ///
    /// The store's insert-if-absent is the authoritative duplicate signal;
    /// two concurrent registrations of the same email cannot both pass it.
    async fn reserve_email(&self, email: &str, role: AccountRole) -> Result<()> {
        match self.storage.insert(CF_EMAIL_INDEX, &email, &role).await {
            Ok(()) => Ok(()),
            Err(StorageError::AlreadyExists) => {
                Err(IdentityCoreError::EmailAlreadyInUse(email.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }
}
