//! In-memory engine backend
//!
//! BTreeMap-based keyspaces behind RwLocks. Same ordering contract as the
//! persistent backend, no durability. Used by tests and by deployments
//! that buffer on a RAM disk anyway.

use std::collections::{BTreeMap, HashMap};
use std::ops::Bound;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;

use crate::error::{Result, StoreError};

use super::{Keyspace, StoreEngine};

/// Ordered in-memory key-value engine
pub struct MemoryEngine {
    /// Keyspaces created so far, by name
    keyspaces: RwLock<HashMap<String, Arc<MemoryKeyspace>>>,

    /// Set by `close()`; shared with every keyspace handle
    closed: Arc<AtomicBool>,
}

impl MemoryEngine {
    /// Create an empty engine with no keyspaces
    pub fn new() -> Self {
        Self {
            keyspaces: RwLock::new(HashMap::new()),
            closed: Arc::new(AtomicBool::new(false)),
        }
    }
}

impl Default for MemoryEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl StoreEngine for MemoryEngine {
    fn keyspace(&self, name: &str) -> Result<Arc<dyn Keyspace>> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(StoreError::Disposed);
        }

        // Fast path: keyspace already exists
        if let Some(ks) = self.keyspaces.read().get(name) {
            return Ok(Arc::clone(ks) as Arc<dyn Keyspace>);
        }

        // Slow path: re-check under the write lock so concurrent first
        // accesses map the name to exactly one keyspace
        let mut keyspaces = self.keyspaces.write();
        let ks = keyspaces
            .entry(name.to_string())
            .or_insert_with(|| {
                Arc::new(MemoryKeyspace {
                    data: RwLock::new(BTreeMap::new()),
                    closed: Arc::clone(&self.closed),
                })
            });
        Ok(Arc::clone(ks) as Arc<dyn Keyspace>)
    }

    fn keyspace_names(&self) -> Vec<String> {
        self.keyspaces.read().keys().cloned().collect()
    }

    fn close(&self) -> Result<()> {
        self.closed.store(true, Ordering::SeqCst);
        Ok(())
    }
}

/// One ordered in-memory keyspace
struct MemoryKeyspace {
    data: RwLock<BTreeMap<Vec<u8>, Vec<u8>>>,
    closed: Arc<AtomicBool>,
}

impl MemoryKeyspace {
    fn check_open(&self) -> Result<()> {
        if self.closed.load(Ordering::SeqCst) {
            Err(StoreError::Disposed)
        } else {
            Ok(())
        }
    }
}

impl Keyspace for MemoryKeyspace {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        self.check_open()?;
        Ok(self.data.read().get(key).cloned())
    }

    fn put(&self, key: &[u8], value: &[u8]) -> Result<()> {
        self.check_open()?;
        self.data.write().insert(key.to_vec(), value.to_vec());
        Ok(())
    }

    fn delete(&self, key: &[u8]) -> Result<()> {
        self.check_open()?;
        self.data.write().remove(key);
        Ok(())
    }

    fn contains(&self, key: &[u8]) -> Result<bool> {
        self.check_open()?;
        Ok(self.data.read().contains_key(key))
    }

    fn iterate_from(&self, start_key: &[u8], max_count: usize) -> Result<Vec<(Vec<u8>, Vec<u8>)>> {
        self.check_open()?;
        let data = self.data.read();
        Ok(data
            .range::<[u8], _>((Bound::Included(start_key), Bound::Unbounded))
            .take(max_count)
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect())
    }

    fn first(&self) -> Result<Option<(Vec<u8>, Vec<u8>)>> {
        self.check_open()?;
        let data = self.data.read();
        Ok(data.iter().next().map(|(k, v)| (k.clone(), v.clone())))
    }

    fn last(&self) -> Result<Option<(Vec<u8>, Vec<u8>)>> {
        self.check_open()?;
        let data = self.data.read();
        Ok(data.iter().next_back().map(|(k, v)| (k.clone(), v.clone())))
    }
}
