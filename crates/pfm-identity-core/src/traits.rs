//! Identity trait definitions.

use crate::{errors::Result, types::*};
use async_trait::async_trait;

/// Time source for registration key expiry decisions
///
/// This trait is injected into the identity service so that expiration can
/// be tested deterministically.
pub trait Clock: Send + Sync {
    /// Current Unix timestamp in seconds
    fn now(&self) -> u64;
}

/// Clock backed by the operating system time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> u64 {
        pfm_crypto::current_timestamp()
    }
}

/// Identity subsystem trait
#[async_trait]
pub trait IdentityDirectory: Send + Sync {
    /// Replace the admin registration key unconditionally
    ///
    /// The previous key, if any, becomes invalid immediately even if not
    /// yet expired. `ttl_minutes` counts from the clock's current time.
    async fn issue_registration_key(
        &self,
        new_key: String,
        ttl_minutes: u64,
    ) -> Result<AdminSettings>;

    /// Get the currently stored registration key settings
    async fn current_registration_key(&self) -> Result<AdminSettings>;

    /// Validate a presented registration key against the stored one
    ///
    /// Expiry is evaluated at call time against the injected clock.
    /// Validation does not consume the key.
    async fn validate_registration_key(&self, presented_key: &str) -> Result<KeyValidation>;

    /// True iff the email matches any administrator OR any user record
    async fn email_in_use(&self, email: &str) -> Result<bool>;

    /// Register a new administrator account
    ///
    /// When the key gate is enforced, `presented_key` must match the
    /// current unexpired registration key.
    async fn register_admin(
        &self,
        name: String,
        email: String,
        password: &str,
        presented_key: Option<&str>,
    ) -> Result<Admin>;

    /// Register a new user account (no key requirement)
    async fn register_user(&self, name: String, email: String, password: &str) -> Result<User>;

    /// Get an administrator by email
    async fn get_admin(&self, email: &str) -> Result<Admin>;

    /// Get a user by email
    async fn get_user(&self, email: &str) -> Result<User>;

    /// List all administrator accounts
    async fn list_admins(&self) -> Result<Vec<Admin>>;

    /// List all user accounts
    async fn list_users(&self) -> Result<Vec<User>>;

    /// Rename an administrator account
    async fn update_admin(&self, email: &str, name: String) -> Result<Admin>;

    /// Rename a user account
    async fn update_user(&self, email: &str, name: String) -> Result<User>;

    /// Delete an administrator account, releasing its email
    async fn delete_admin(&self, email: &str) -> Result<()>;

    /// Delete a user account, releasing its email
    async fn delete_user(&self, email: &str) -> Result<()>;
}
