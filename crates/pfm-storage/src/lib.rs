//! # pfm-storage
//!
//! Storage abstraction layer for the pfm backend using RocksDB.
//!
//! This crate provides the storage interface and the RocksDB implementation
//! backing the identity collections and the admin settings singleton.

#![warn(clippy::all)]

pub mod column_families;
pub mod errors;
pub mod rocksdb_impl;
pub mod traits;

pub use column_families::*;
pub use errors::{Result, StorageError};
pub use rocksdb_impl::RocksDbStorage;
pub use traits::{Batch, Storage};
