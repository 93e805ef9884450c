//! Entity Store
//!
//! Key/value facade bound to one keyspace of the shared engine. Keys and
//! values are opaque bytes at this layer; serialization belongs to the
//! caller (see [`crate::codec`] for what the sequential store uses).
//!
//! Single-key operations are atomic. There are no multi-key transactions
//! here — callers must not assume atomicity across calls.

use std::sync::Arc;

use crate::engine::Keyspace;
use crate::error::Result;

/// Typed key/value abstraction over one named keyspace
pub struct EntityStore {
    /// Entity name, equal to the backing keyspace name
    name: String,

    /// Keyspace handle held for the life of this store
    keyspace: Arc<dyn Keyspace>,
}

impl EntityStore {
    /// Wrap a keyspace handle obtained from the engine
    pub fn new(name: impl Into<String>, keyspace: Arc<dyn Keyspace>) -> Self {
        Self {
            name: name.into(),
            keyspace,
        }
    }

    /// The entity name this store is bound to
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Upsert a key-value pair (last writer wins)
    pub fn put(&self, key: &[u8], value: &[u8]) -> Result<()> {
        self.keyspace.put(key, value)
    }

    /// Get the value for a key, or None if absent
    pub fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        self.keyspace.get(key)
    }

    /// Check whether a key is present
    pub fn contains(&self, key: &[u8]) -> Result<bool> {
        self.keyspace.contains(key)
    }

    /// Remove a key; idempotent, no-op if absent
    pub fn delete(&self, key: &[u8]) -> Result<()> {
        self.keyspace.delete(key)
    }

    /// Return up to `max_count` entries with key >= `start_key` in
    /// ascending key order.
    ///
    /// Finite and not restartable — each call re-scans current state.
    pub fn iterate_batch(
        &self,
        start_key: &[u8],
        max_count: usize,
    ) -> Result<Vec<(Vec<u8>, Vec<u8>)>> {
        self.keyspace.iterate_from(start_key, max_count)
    }

    /// Entry with the smallest key, or None if empty
    pub fn first_entry(&self) -> Result<Option<(Vec<u8>, Vec<u8>)>> {
        self.keyspace.first()
    }

    /// Entry with the largest key, or None if empty
    pub fn last_entry(&self) -> Result<Option<(Vec<u8>, Vec<u8>)>> {
        self.keyspace.last()
    }
}
