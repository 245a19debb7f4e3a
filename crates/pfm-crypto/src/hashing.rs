//! Password hashing using Argon2id.

use crate::{constants::*, errors::*};
use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};

/// Hash a password using Argon2id
///
/// # Arguments
///
/// * `password` - The password to hash
/// * `salt` - Salt string (use `generate_salt()` to create)
///
/// # Returns
///
/// PHC-formatted hash string that includes algorithm, parameters, salt, and hash
pub fn hash_password(password: &[u8], salt: &SaltString) -> Result<String> {
    let argon2 = Argon2::new(
        argon2::Algorithm::Argon2id,
        argon2_params::VERSION,
        argon2_params::get_params(),
    );

    let password_hash = argon2
        .hash_password(password, salt)
        .map_err(|e| CryptoError::Argon2Failed(e.to_string()))?;

    Ok(password_hash.to_string())
}

/// Verify a password against an Argon2id hash
///
/// # Arguments
///
/// * `password` - The password to verify
/// * `hash_str` - The PHC-formatted hash string from `hash_password`
///
/// # Returns
///
/// `Ok(())` if password matches, `Err` otherwise
pub fn verify_password(password: &[u8], hash_str: &str) -> Result<()> {
    let parsed_hash = PasswordHash::new(hash_str).map_err(|_| CryptoError::InvalidHashFormat)?;

    let argon2 = Argon2::new(
        argon2::Algorithm::Argon2id,
        argon2_params::VERSION,
        argon2_params::get_params(),
    );

    argon2
        .verify_password(password, &parsed_hash)
        .map_err(|e| CryptoError::Argon2Failed(e.to_string()))
}

/// Generate a random salt for password hashing
pub fn generate_salt() -> SaltString {
    SaltString::generate(&mut rand::thread_rng())
}

/// Securely compare two byte slices in constant time
///
/// Use when comparing secrets like presented keys or hash fragments.
pub fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        result |= x ^ y;
    }

    result == 0
}
