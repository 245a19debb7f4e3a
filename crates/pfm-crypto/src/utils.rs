//! Common utility functions.

use std::time::{SystemTime, UNIX_EPOCH};

/// Returns the current Unix timestamp in seconds.
///
/// This is the single source of truth for timestamp generation across the
/// pfm backend; services that need a substitutable time source wrap it in a
/// `Clock` implementation.
///
/// # Panics
///
/// Panics if the system time is set before the Unix epoch (January 1, 1970).
pub fn current_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("System time is before Unix epoch")
        .as_secs()
}
