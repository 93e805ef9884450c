//! Store Provider
//!
//! Creates and caches one entity store per logical name, all backed by a
//! single shared engine instance, and owns the engine handle's lifetime.
//!
//! ## Responsibilities
//! - Lazily create keyspaces through the engine adapter
//! - Guarantee one entity store instance per name under concurrent access
//! - Dispose the shared engine exactly once and fail later use

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::info;

use crate::config::Config;
use crate::engine::{self, StoreEngine};
use crate::error::{Result, StoreError};

use super::{EntityStore, SequentialStore};

/// Factory and cache for entity stores over one shared engine
pub struct StoreProvider {
    engine: Arc<dyn StoreEngine>,

    /// Entity stores created so far, by name
    stores: RwLock<HashMap<String, Arc<EntityStore>>>,

    disposed: AtomicBool,
}

impl StoreProvider {
    /// Wrap an already-open engine
    pub fn new(engine: Arc<dyn StoreEngine>) -> Self {
        Self {
            engine,
            stores: RwLock::new(HashMap::new()),
            disposed: AtomicBool::new(false),
        }
    }

    /// Open the engine selected by the config and wrap it
    pub fn open(config: &Config) -> Result<Self> {
        let engine = engine::open(config)?;
        Ok(Self::new(engine))
    }

    /// Get the entity store for `name`, creating its keyspace on first use
    ///
    /// Concurrent calls with the same name return the same instance;
    /// two callers never race to create the same keyspace.
    pub fn get_entity_store(&self, name: &str) -> Result<Arc<EntityStore>> {
        if self.disposed.load(Ordering::SeqCst) {
            return Err(StoreError::Disposed);
        }

        // Fast path: already created
        if let Some(store) = self.stores.read().get(name) {
            return Ok(Arc::clone(store));
        }

        // Slow path: re-check under the write lock, then create
        let mut stores = self.stores.write();
        if let Some(store) = stores.get(name) {
            return Ok(Arc::clone(store));
        }

        let keyspace = self.engine.keyspace(name)?;
        let store = Arc::new(EntityStore::new(name, keyspace));
        stores.insert(name.to_string(), Arc::clone(&store));
        info!(entity = name, "created entity store");
        Ok(store)
    }

    /// Get a sequential store for `name`, recovering its log bounds from
    /// the backing entity store
    pub fn get_sequential_store<T>(&self, name: &str) -> Result<SequentialStore<T>>
    where
        T: Serialize + DeserializeOwned,
    {
        let entity = self.get_entity_store(name)?;
        SequentialStore::create(entity)
    }

    /// Names of all entity stores created by this provider
    pub fn store_names(&self) -> Vec<String> {
        self.stores.read().keys().cloned().collect()
    }

    /// Close the shared engine and invalidate every store this provider
    /// produced. Idempotent; any later use fails with `Disposed`.
    pub fn dispose(&self) -> Result<()> {
        if self.disposed.swap(true, Ordering::SeqCst) {
            return Ok(()); // Already disposed
        }
        self.stores.write().clear();
        self.engine.close()?;
        info!("store provider disposed");
        Ok(())
    }
}
