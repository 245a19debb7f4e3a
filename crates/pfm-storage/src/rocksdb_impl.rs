//! RocksDB storage implementation.

use crate::{
    column_families::all_column_families,
    errors::{Result, StorageError},
    traits::{deserialize_value, serialize_key, serialize_value, Batch, Storage},
};
use async_trait::async_trait;
use rocksdb::{Options, WriteBatch, DB};
use serde::{de::DeserializeOwned, Serialize};
use std::{path::Path, sync::Arc};
use tokio::sync::Mutex;
use tracing::debug;

/// RocksDB storage implementation
pub struct RocksDbStorage {
    db: Arc<DB>,
    /// Serializes `insert` calls so check-and-write is one step.
    write_lock: Mutex<()>,
}

impl RocksDbStorage {
    /// Open RocksDB database at the specified path
    ///
    /// Creates all required column families if they don't exist.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        // Open database with all column families
        let db = DB::open_cf(&opts, &path, all_column_families())
            .map_err(|e| StorageError::Database(e.to_string()))?;

        debug!("Opened RocksDB at {:?}", path.as_ref());

        Ok(Self {
            db: Arc::new(db),
            write_lock: Mutex::new(()),
        })
    }

    /// Open RocksDB database for testing (temp directory)
    ///
    /// This is public for use in other crates' test modules.
    pub fn open_test() -> Result<Self> {
        let temp_dir = tempfile::TempDir::new().map_err(StorageError::IoError)?;
        Self::open(temp_dir.path())
    }

    /// Get column family handle
    fn cf_handle(&self, cf: &str) -> Result<&rocksdb::ColumnFamily> {
        self.db
            .cf_handle(cf)
            .ok_or_else(|| StorageError::InvalidColumnFamily(cf.to_string()))
    }
}

#[async_trait]
impl Storage for RocksDbStorage {
    async fn get<K, V>(&self, cf: &str, key: &K) -> Result<Option<V>>
    where
        K: Serialize + Send + Sync,
        V: DeserializeOwned,
    {
        let cf_handle = self.cf_handle(cf)?;
        let key_bytes = serialize_key(key)?;

        let result = self
            .db
            .get_cf(cf_handle, &key_bytes)
            .map_err(|e| StorageError::Database(e.to_string()))?;

        match result {
            Some(bytes) => {
                let value = deserialize_value(&bytes)?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    async fn put<K, V>(&self, cf: &str, key: &K, value: &V) -> Result<()>
    where
        K: Serialize + Send + Sync,
        V: Serialize + Send + Sync,
    {
        let cf_handle = self.cf_handle(cf)?;
        let key_bytes = serialize_key(key)?;
        let value_bytes = serialize_value(value)?;

        self.db
            .put_cf(cf_handle, &key_bytes, &value_bytes)
            .map_err(|e| StorageError::Database(e.to_string()))?;

        Ok(())
    }

    async fn insert<K, V>(&self, cf: &str, key: &K, value: &V) -> Result<()>
    where
        K: Serialize + Send + Sync,
        V: Serialize + Send + Sync,
    {
        let cf_handle = self.cf_handle(cf)?;
        let key_bytes = serialize_key(key)?;
        let value_bytes = serialize_value(value)?;

        // Hold the write lock across check and write; concurrent inserts of
        // the same key cannot both observe absence.
        let _guard = self.write_lock.lock().await;

        let existing = self
            .db
            .get_cf(cf_handle, &key_bytes)
            .map_err(|e| StorageError::Database(e.to_string()))?;

        if existing.is_some() {
            return Err(StorageError::AlreadyExists);
        }

        self.db
            .put_cf(cf_handle, &key_bytes, &value_bytes)
            .map_err(|e| StorageError::Database(e.to_string()))?;

        Ok(())
    }

    async fn delete<K>(&self, cf: &str, key: &K) -> Result<()>
    where
        K: Serialize + Send + Sync,
    {
        let cf_handle = self.cf_handle(cf)?;
        let key_bytes = serialize_key(key)?;

        self.db
            .delete_cf(cf_handle, &key_bytes)
            .map_err(|e| StorageError::Database(e.to_string()))?;

        Ok(())
    }

    async fn exists<K>(&self, cf: &str, key: &K) -> Result<bool>
    where
        K: Serialize + Send + Sync,
    {
        let cf_handle = self.cf_handle(cf)?;
        let key_bytes = serialize_key(key)?;

        let result = self
            .db
            .get_cf(cf_handle, &key_bytes)
            .map_err(|e| StorageError::Database(e.to_string()))?;

        Ok(result.is_some())
    }

    async fn scan_all<V>(&self, cf: &str) -> Result<Vec<(Vec<u8>, V)>>
    where
        V: DeserializeOwned,
    {
        let cf_handle = self.cf_handle(cf)?;

        let mut results = Vec::new();
        let iter = self.db.iterator_cf(cf_handle, rocksdb::IteratorMode::Start);

        for item in iter {
            let (key, value) = item.map_err(|e| StorageError::Database(e.to_string()))?;
            let deserialized_value = deserialize_value(&value)?;
            results.push((key.to_vec(), deserialized_value));
        }

        Ok(results)
    }

    fn batch(&self) -> Box<dyn Batch> {
        Box::new(RocksDbBatch {
            db: Arc::clone(&self.db),
            write_batch: WriteBatch::default(),
        })
    }
}

/// RocksDB batch implementation
pub struct RocksDbBatch {
    db: Arc<DB>,
    write_batch: WriteBatch,
}

#[async_trait]
impl Batch for RocksDbBatch {
    fn put_raw(&mut self, cf: &str, key: Vec<u8>, value: Vec<u8>) -> Result<()> {
        let cf_handle = self
            .db
            .cf_handle(cf)
            .ok_or_else(|| StorageError::InvalidColumnFamily(cf.to_string()))?;

        self.write_batch.put_cf(cf_handle, &key, &value);

        Ok(())
    }

    fn delete_raw(&mut self, cf: &str, key: Vec<u8>) -> Result<()> {
        let cf_handle = self
            .db
            .cf_handle(cf)
            .ok_or_else(|| StorageError::InvalidColumnFamily(cf.to_string()))?;

        self.write_batch.delete_cf(cf_handle, &key);

        Ok(())
    }

    async fn commit(self: Box<Self>) -> Result<()> {
        self.db
            .write(self.write_batch)
            .map_err(|e| StorageError::Database(e.to_string()))?;

        debug!("Batch committed successfully");
        Ok(())
    }

    fn rollback(self: Box<Self>) {
        // WriteBatch is dropped, no commit
        debug!("Batch rolled back");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column_families::{CF_ADMINS, CF_EMAIL_INDEX, CF_USERS};
    use crate::traits::BatchExt;
    use serde::{Deserialize, Serialize};
    use uuid::Uuid;

    #[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
    struct TestRecord {
        id: Uuid,
        email: String,
        name: String,
    }

    fn test_record(email: &str) -> TestRecord {
        TestRecord {
            id: Uuid::new_v4(),
            email: email.to_string(),
            name: "Test".to_string(),
        }
    }

    #[tokio::test]
    async fn test_put_and_get() {
        let storage = RocksDbStorage::open_test().unwrap();
        let record = test_record("a@test.com");

        storage.put(CF_USERS, &record.email, &record).await.unwrap();

        let result: Option<TestRecord> = storage.get(CF_USERS, &record.email).await.unwrap();
        assert_eq!(result, Some(record));
    }

    #[tokio::test]
    async fn test_get_nonexistent() {
        let storage = RocksDbStorage::open_test().unwrap();

        let result: Option<TestRecord> = storage.get(CF_USERS, &"missing@test.com").await.unwrap();
        assert_eq!(result, None);
    }

    #[tokio::test]
    async fn test_string_and_str_keys_are_interchangeable() {
        let storage = RocksDbStorage::open_test().unwrap();
        let record = test_record("b@test.com");

        // Stored with a String key, retrievable with a &str key
        storage.put(CF_USERS, &record.email, &record).await.unwrap();
        assert!(storage.exists(CF_USERS, &"b@test.com").await.unwrap());
    }

    #[tokio::test]
    async fn test_insert_rejects_duplicate() {
        let storage = RocksDbStorage::open_test().unwrap();

        storage
            .insert(CF_EMAIL_INDEX, &"c@test.com", &1u8)
            .await
            .unwrap();

        let result = storage.insert(CF_EMAIL_INDEX, &"c@test.com", &2u8).await;
        assert!(matches!(result, Err(StorageError::AlreadyExists)));

        // First write survives
        let stored: Option<u8> = storage.get(CF_EMAIL_INDEX, &"c@test.com").await.unwrap();
        assert_eq!(stored, Some(1));
    }

    #[tokio::test]
    async fn test_insert_after_delete_succeeds() {
        let storage = RocksDbStorage::open_test().unwrap();

        storage
            .insert(CF_EMAIL_INDEX, &"d@test.com", &1u8)
            .await
            .unwrap();
        storage.delete(CF_EMAIL_INDEX, &"d@test.com").await.unwrap();

        assert!(storage
            .insert(CF_EMAIL_INDEX, &"d@test.com", &2u8)
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn test_exists_and_delete() {
        let storage = RocksDbStorage::open_test().unwrap();
        let record = test_record("e@test.com");

        assert!(!storage.exists(CF_ADMINS, &record.email).await.unwrap());

        storage
            .put(CF_ADMINS, &record.email, &record)
            .await
            .unwrap();
        assert!(storage.exists(CF_ADMINS, &record.email).await.unwrap());

        storage.delete(CF_ADMINS, &record.email).await.unwrap();
        assert!(!storage.exists(CF_ADMINS, &record.email).await.unwrap());
    }

    #[tokio::test]
    async fn test_scan_all() {
        let storage = RocksDbStorage::open_test().unwrap();

        for email in ["f@test.com", "g@test.com", "h@test.com"] {
            let record = test_record(email);
            storage.put(CF_USERS, &record.email, &record).await.unwrap();
        }

        let results: Vec<(Vec<u8>, TestRecord)> = storage.scan_all(CF_USERS).await.unwrap();
        assert_eq!(results.len(), 3);
    }

    #[tokio::test]
    async fn test_batch_commit() {
        let storage = RocksDbStorage::open_test().unwrap();
        let record = test_record("i@test.com");

        let mut batch = storage.batch();
        batch.put(CF_USERS, &record.email, &record).unwrap();
        batch.put(CF_EMAIL_INDEX, &record.email, &2u8).unwrap();
        batch.commit().await.unwrap();

        assert!(storage.exists(CF_USERS, &record.email).await.unwrap());
        assert!(storage.exists(CF_EMAIL_INDEX, &record.email).await.unwrap());
    }

    #[tokio::test]
    async fn test_batch_delete_spans_column_families() {
        let storage = RocksDbStorage::open_test().unwrap();
        let record = test_record("j@test.com");

        storage.put(CF_USERS, &record.email, &record).await.unwrap();
        storage
            .put(CF_EMAIL_INDEX, &record.email, &2u8)
            .await
            .unwrap();

        let mut batch = storage.batch();
        batch.delete(CF_USERS, &record.email).unwrap();
        batch.delete(CF_EMAIL_INDEX, &record.email).unwrap();
        batch.commit().await.unwrap();

        assert!(!storage.exists(CF_USERS, &record.email).await.unwrap());
        assert!(!storage.exists(CF_EMAIL_INDEX, &record.email).await.unwrap());
    }

    #[tokio::test]
    async fn test_batch_rollback() {
        let storage = RocksDbStorage::open_test().unwrap();
        let record = test_record("k@test.com");

        let mut batch = storage.batch();
        batch.put(CF_USERS, &record.email, &record).unwrap();
        batch.rollback();

        let result: Option<TestRecord> = storage.get(CF_USERS, &record.email).await.unwrap();
        assert_eq!(result, None);
    }
}
