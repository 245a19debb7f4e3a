//! Identity service implementation.

mod accounts;
mod keys;
mod registration;

use crate::{errors::*, traits::*, types::*};
use async_trait::async_trait;
use pfm_storage::Storage;
use std::sync::Arc;

/// Identity service implementation
///
/// Owns the registration key singleton and the two identity collections
/// through the injected storage handle; no hidden global state.
pub struct IdentityService<S, C>
where
    S: Storage,
    C: Clock,
{
    storage: Arc<S>,
    clock: Arc<C>,
    require_registration_key: bool,
}

impl<S, C> IdentityService<S, C>
where
    S: Storage,
    C: Clock,
{
    /// Create a new identity service with the admin key gate enforced
    pub fn new(storage: Arc<S>, clock: Arc<C>) -> Self {
        Self {
            storage,
            clock,
            require_registration_key: true,
        }
    }

    /// Create an identity service that admits admin registrations without a key
    pub fn without_key_gate(storage: Arc<S>, clock: Arc<C>) -> Self {
        Self {
            storage,
            clock,
            require_registration_key: false,
        }
    }
}

#[async_trait]
impl<S, C> IdentityDirectory for IdentityService<S, C>
where
    S: Storage + 'static,
    C: Clock + 'static,
{
    async fn issue_registration_key(
        &self,
        new_key: String,
        ttl_minutes: u64,
    ) -> Result<AdminSettings> {
        self.issue_registration_key_internal(new_key, ttl_minutes)
            .await
    }

    async fn current_registration_key(&self) -> Result<AdminSettings> {
        self.current_registration_key_internal().await
    }

    async fn validate_registration_key(&self, presented_key: &str) -> Result<KeyValidation> {
        self.validate_registration_key_internal(presented_key).await
    }

    async fn email_in_use(&self, email: &str) -> Result<bool> {
        self.email_in_use_internal(email).await
    }

    async fn register_admin(
        &self,
        name: String,
        email: String,
        password: &str,
        presented_key: Option<&str>,
    ) -> Result<Admin> {
        self.register_admin_internal(name, email, password, presented_key)
            .await
    }

    async fn register_user(&self, name: String, email: String, password: &str) -> Result<User> {
        self.register_user_internal(name, email, password).await
    }

    async fn get_admin(&self, email: &str) -> Result<Admin> {
        self.get_admin_internal(email).await
    }

    async fn get_user(&self, email: &str) -> Result<User> {
        self.get_user_internal(email).await
    }

    async fn list_admins(&self) -> Result<Vec<Admin>> {
        self.list_admins_internal().await
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        self.list_users_internal().await
    }

    async fn update_admin(&self, email: &str, name: String) -> Result<Admin> {
        self.update_admin_internal(email, name).await
    }

    async fn update_user(&self, email: &str, name: String) -> Result<User> {
        self.update_user_internal(email, name).await
    }

    async fn delete_admin(&self, email: &str) -> Result<()> {
        self.delete_admin_internal(email).await
    }

    async fn delete_user(&self, email: &str) -> Result<()> {
        self.delete_user_internal(email).await
    }
}
