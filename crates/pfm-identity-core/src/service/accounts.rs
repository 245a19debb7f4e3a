//! Account CRUD over the two identity collections.

use crate::{errors::*, traits::Clock, types::*};
use pfm_storage::{traits::BatchExt, Storage, CF_ADMINS, CF_EMAIL_INDEX, CF_USERS};
use tracing::info;

use super::IdentityService;

impl<S, C> IdentityService<S, C>
where
    S: Storage + 'static,
    C: Clock + 'static,
{
    pub(crate) async fn get_admin_internal(&self, email: &str) -> Result<Admin> {
        self.storage
            .get(CF_ADMINS, &email)
            .await?
            .ok_or_else(|| IdentityCoreError::AccountNotFound(email.to_string()))
    }

    pub(crate) async fn get_user_internal(&self, email: &str) -> Result<User> {
        self.storage
            .get(CF_USERS, &email)
            .await?
            .ok_or_else(|| IdentityCoreError::AccountNotFound(email.to_string()))
    }

    pub(crate) async fn list_admins_internal(&self) -> Result<Vec<Admin>> {
        let rows: Vec<(Vec<u8>, Admin)> = self.storage.scan_all(CF_ADMINS).await?;
        Ok(rows.into_iter().map(|(_, admin)| admin).collect())
    }

    pub(crate) async fn list_users_internal(&self) -> Result<Vec<User>> {
        let rows: Vec<(Vec<u8>, User)> = self.storage.scan_all(CF_USERS).await?;
        Ok(rows.into_iter().map(|(_, user)| user).collect())
    }

    /// Rename an administrator. Email is the record key and the uniqueness
    /// anchor; it cannot change here.
    pub(crate) async fn update_admin_internal(&self, email: &str, name: String) -> Result<Admin> {
        let mut admin = self.get_admin_internal(email).await?;
        admin.name = name;
        admin.updated_at = self.clock.now();

        self.storage.put(CF_ADMINS, &email, &admin).await?;

        info!("Admin updated: {}", admin.id);
        Ok(admin)
    }

    pub(crate) async fn update_user_internal(&self, email: &str, name: String) -> Result<User> {
        let mut user = self.get_user_internal(email).await?;
        user.name = name;
        user.updated_at = self.clock.now();

        self.storage.put(CF_USERS, &email, &user).await?;

        info!("User updated: {}", user.id);
        Ok(user)
    }

    /// Delete an administrator. The record and its email-index entry go in
    /// one batch, so the email becomes free for re-registration.
    pub(crate) async fn delete_admin_internal(&self, email: &str) -> Result<()> {
        let admin = self.get_admin_internal(email).await?;

        let mut batch = self.storage.batch();
        batch.delete(CF_ADMINS, &email)?;
        batch.delete(CF_EMAIL_INDEX, &email)?;
        batch.commit().await?;

        info!("Admin deleted: {}", admin.id);
        Ok(())
    }

    pub(crate) async fn delete_user_internal(&self, email: &str) -> Result<()> {
        let user = self.get_user_internal(email).await?;

        let mut batch = self.storage.batch();
        batch.delete(CF_USERS, &email)?;
        batch.delete(CF_EMAIL_INDEX, &email)?;
        batch.commit().await?;

        info!("User deleted: {}", user.id);
        Ok(())
    }
}
