//! Identity error types.

use crate::types::KeyRejection;
use thiserror::Error;

/// Identity subsystem errors
#[derive(Debug, Error)]
pub enum IdentityCoreError {
    /// Email already belongs to an admin or user account
    #[error("Email is already in use: {0}")]
    EmailAlreadyInUse(String),

    /// Presented registration key was rejected
    #[error("Registration key rejected: {0}")]
    KeyRejected(KeyRejection),

    /// No registration key has ever been issued
    #[error("No registration key found")]
    KeyNotFound,

    /// No account with the given email
    #[error("Account not found: {0}")]
    AccountNotFound(String),

    /// Storage error
    #[error("Storage error: {0}")]
    Storage(#[from] pfm_storage::StorageError),

    /// Cryptographic error
    #[error("Cryptographic error: {0}")]
    Crypto(#[from] pfm_crypto::CryptoError),
}

/// Result type for identity operations
pub type Result<T> = std::result::Result<T, IdentityCoreError>;
