//! Sled engine backend
//!
//! One sled `Tree` per keyspace. Sled keeps trees byte-ordered, which is
//! exactly the iteration contract the store layer needs; `first`/`last`
//! map straight onto the tree endpoints.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, info};

use crate::config::Config;
use crate::error::{Result, StoreError};

use super::{Keyspace, StoreEngine};

/// Persistent engine backed by a single sled database
pub struct SledEngine {
    db: sled::Db,

    /// Keyspace handles opened so far, by name
    trees: RwLock<HashMap<String, Arc<SledKeyspace>>>,

    /// Set by `close()`; shared with every keyspace handle
    closed: Arc<AtomicBool>,
}

impl SledEngine {
    /// Open or create the database at `config.data_dir`
    ///
    /// Pre-declares every keyspace named in the config so path or
    /// permission problems surface here, with `StorageUnavailable`,
    /// instead of on first write.
    pub fn open(config: &Config) -> Result<Self> {
        let db = ::sled::Config::new()
            .path(&config.data_dir)
            .cache_capacity(config.cache_capacity_bytes)
            .flush_every_ms(config.flush_every_ms)
            .open()
            .map_err(|e| StoreError::StorageUnavailable {
                path: config.data_dir.clone(),
                reason: e.to_string(),
            })?;

        let engine = Self {
            db,
            trees: RwLock::new(HashMap::new()),
            closed: Arc::new(AtomicBool::new(false)),
        };

        for name in &config.keyspaces {
            engine.keyspace(name)?;
        }

        info!(
            path = %config.data_dir.display(),
            keyspaces = config.keyspaces.len(),
            "opened sled engine"
        );
        Ok(engine)
    }
}

impl StoreEngine for SledEngine {
    fn keyspace(&self, name: &str) -> Result<Arc<dyn Keyspace>> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(StoreError::Disposed);
        }

        if let Some(ks) = self.trees.read().get(name) {
            return Ok(Arc::clone(ks) as Arc<dyn Keyspace>);
        }

        // Re-check under the write lock; open_tree is itself idempotent
        // but the name must map to exactly one handle
        let mut trees = self.trees.write();
        if let Some(ks) = trees.get(name) {
            return Ok(Arc::clone(ks) as Arc<dyn Keyspace>);
        }

        let tree = self.db.open_tree(name)?;
        debug!(keyspace = name, "opened keyspace");
        let ks = Arc::new(SledKeyspace {
            tree,
            closed: Arc::clone(&self.closed),
        });
        trees.insert(name.to_string(), Arc::clone(&ks));
        Ok(ks as Arc<dyn Keyspace>)
    }

    fn keyspace_names(&self) -> Vec<String> {
        self.trees.read().keys().cloned().collect()
    }

    fn close(&self) -> Result<()> {
        if self.closed.swap(true, Ordering::SeqCst) {
            return Ok(()); // Already closed
        }
        self.db.flush()?;
        info!("closed sled engine");
        Ok(())
    }
}

/// One keyspace backed by a sled tree
struct SledKeyspace {
    tree: sled::Tree,
    closed: Arc<AtomicBool>,
}

impl SledKeyspace {
    fn check_open(&self) -> Result<()> {
        if self.closed.load(Ordering::SeqCst) {
            Err(StoreError::Disposed)
        } else {
            Ok(())
        }
    }
}

impl Keyspace for SledKeyspace {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        self.check_open()?;
        Ok(self.tree.get(key)?.map(|v| v.to_vec()))
    }

    fn put(&self, key: &[u8], value: &[u8]) -> Result<()> {
        self.check_open()?;
        self.tree.insert(key, value)?;
        Ok(())
    }

    fn delete(&self, key: &[u8]) -> Result<()> {
        self.check_open()?;
        self.tree.remove(key)?;
        Ok(())
    }

    fn contains(&self, key: &[u8]) -> Result<bool> {
        self.check_open()?;
        Ok(self.tree.contains_key(key)?)
    }

    fn iterate_from(&self, start_key: &[u8], max_count: usize) -> Result<Vec<(Vec<u8>, Vec<u8>)>> {
        self.check_open()?;
        let mut entries = Vec::new();
        for item in self.tree.range(start_key.to_vec()..).take(max_count) {
            let (key, value) = item?;
            entries.push((key.to_vec(), value.to_vec()));
        }
        Ok(entries)
    }

    fn first(&self) -> Result<Option<(Vec<u8>, Vec<u8>)>> {
        self.check_open()?;
        Ok(self.tree.first()?.map(|(k, v)| (k.to_vec(), v.to_vec())))
    }

    fn last(&self) -> Result<Option<(Vec<u8>, Vec<u8>)>> {
        self.check_open()?;
        Ok(self.tree.last()?.map(|(k, v)| (k.to_vec(), v.to_vec())))
    }
}
