//! Test helpers for identity service tests.

use std::sync::Arc;

use pfm_storage::RocksDbStorage;
use tempfile::TempDir;

use crate::service::IdentityService;
use crate::traits::mocks::ManualClock;

/// Fixed test epoch; all scenarios start here.
pub const T0: u64 = 1_700_000_000;

pub type TestService = IdentityService<RocksDbStorage, ManualClock>;

/// Helper to create test storage
pub fn create_test_storage() -> (Arc<RocksDbStorage>, TempDir) {
    let temp_dir = tempfile::tempdir().unwrap();
    let db = RocksDbStorage::open(temp_dir.path()).unwrap();
    (Arc::new(db), temp_dir)
}

/// Helper to create a key-gated service with a clock frozen at `T0`
///
/// The returned clock handle shares state with the one inside the service.
pub fn create_test_service() -> (TestService, ManualClock, TempDir) {
    let (storage, temp_dir) = create_test_storage();
    let clock = ManualClock::at(T0);
    let service = IdentityService::new(storage, Arc::new(clock.clone()));
    (service, clock, temp_dir)
}

/// Helper to create a service with the admin key gate disabled
pub fn create_open_service() -> (TestService, ManualClock, TempDir) {
    let (storage, temp_dir) = create_test_storage();
    let clock = ManualClock::at(T0);
    let service = IdentityService::without_key_gate(storage, Arc::new(clock.clone()));
    (service, clock, temp_dir)
}
