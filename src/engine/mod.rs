//! Key-Value Store Engine Adapter
//!
//! Wraps an embedded ordered key-value engine behind two traits so the
//! store layer never depends on a concrete engine.
//!
//! ## Responsibilities
//! - Own on-disk lifecycle: open, create keyspaces, close
//! - Expose get/put/delete and ordered iteration per keyspace
//! - Reject use after close with [`StoreError::Disposed`]
//!
//! ## Backends
//! - [`MemoryEngine`] — ordered in-memory maps, no durability
//! - [`SledEngine`] — persistent, one sled tree per keyspace

mod memory;
mod sled;

use std::sync::Arc;

use crate::config::{Config, StoreBackend};
use crate::error::Result;

pub use self::memory::MemoryEngine;
pub use self::sled::SledEngine;

/// One logical ordered partition of the engine ("column family").
///
/// Keys are opaque byte sequences, totally ordered byte-lexicographically.
/// Within a keyspace keys are unique; last writer wins. Single-key
/// operations are atomic; no multi-key transactions at this layer.
pub trait Keyspace: Send + Sync {
    /// Get the value for a key, or None if absent
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>>;

    /// Upsert a key-value pair
    fn put(&self, key: &[u8], value: &[u8]) -> Result<()>;

    /// Remove a key; no-op if absent
    fn delete(&self, key: &[u8]) -> Result<()>;

    /// Check whether a key is present
    fn contains(&self, key: &[u8]) -> Result<bool>;

    /// Return up to `max_count` entries with key >= `start_key`,
    /// in ascending key order.
    ///
    /// Finite and not restartable - a new call re-scans current state.
    fn iterate_from(&self, start_key: &[u8], max_count: usize) -> Result<Vec<(Vec<u8>, Vec<u8>)>>;

    /// Entry with the smallest key, or None if the keyspace is empty
    fn first(&self) -> Result<Option<(Vec<u8>, Vec<u8>)>>;

    /// Entry with the largest key, or None if the keyspace is empty
    fn last(&self) -> Result<Option<(Vec<u8>, Vec<u8>)>>;
}

/// Handle to an open engine instance shared by all stores of one provider
pub trait StoreEngine: Send + Sync {
    /// Get or create the keyspace with the given name
    fn keyspace(&self, name: &str) -> Result<Arc<dyn Keyspace>>;

    /// Names of all keyspaces opened so far
    fn keyspace_names(&self) -> Vec<String>;

    /// Flush and release the engine. Idempotent; all keyspace handles
    /// handed out by this engine fail with `Disposed` afterwards.
    fn close(&self) -> Result<()>;
}

/// Open the engine selected by the config
pub fn open(config: &Config) -> Result<Arc<dyn StoreEngine>> {
    match config.backend {
        StoreBackend::InMemory => {
            let engine = MemoryEngine::new();
            for name in &config.keyspaces {
                engine.keyspace(name)?;
            }
            Ok(Arc::new(engine))
        }
        StoreBackend::Sled => Ok(Arc::new(SledEngine::open(config)?)),
    }
}
