//! Identity type definitions.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Which identity collection owns an email address
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountRole {
    Admin = 0x01,
    User = 0x02,
}

/// Administrator record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Admin {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: u64,
    pub updated_at: u64,
}

/// User record
///
/// Same lifecycle shape as [`Admin`], disjoint collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: u64,
    pub updated_at: u64,
}

/// The single current admin registration key
///
/// One logical row. A fresh issue replaces it wholesale; the previous key
/// becomes invalid immediately, even if not yet expired.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminSettings {
    pub registration_key: String,
    /// Unix timestamp after which the key no longer validates
    pub expires_at: u64,
}

/// Reason a presented registration key was rejected
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyRejection {
    NoKeyIssued = 0x01,
    Expired = 0x02,
    Mismatch = 0x03,
}

impl std::fmt::Display for KeyRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            KeyRejection::NoKeyIssued => "no_key_issued",
            KeyRejection::Expired => "expired",
            KeyRejection::Mismatch => "mismatch",
        };
        write!(f, "{}", s)
    }
}

/// Outcome of validating a presented registration key
///
/// Validation never consumes the key; the same key validates any number of
/// times until it expires or is rotated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyValidation {
    Valid,
    Invalid(KeyRejection),
}
