//! Configuration for edgestore
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;

/// Main configuration for an edgestore instance
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Storage Configuration
    // -------------------------------------------------------------------------
    /// Root directory for all on-disk state (ignored by the in-memory backend)
    pub data_dir: PathBuf,

    /// Which key-value engine backs the stores
    pub backend: StoreBackend,

    /// Keyspaces to declare up front when the engine opens.
    ///
    /// Both built-in backends also create keyspaces lazily on first use;
    /// pre-declaring is for engines/configurations that require it and to
    /// surface path problems at startup rather than on first write.
    pub keyspaces: Vec<String>,

    // -------------------------------------------------------------------------
    // Sled Tuning
    // -------------------------------------------------------------------------
    /// Page cache size in bytes for the sled backend
    pub cache_capacity_bytes: u64,

    /// Background flush interval in milliseconds (None = flush only on close)
    pub flush_every_ms: Option<u64>,
}

/// Selects the key-value engine backing a provider
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// Ordered in-memory maps; no durability. Intended for tests and
    /// diskless deployments that can afford to lose the buffer.
    InMemory,

    /// Persistent sled database rooted at `data_dir`
    Sled,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./edgestore_data"),
            backend: StoreBackend::Sled,
            keyspaces: Vec::new(),
            cache_capacity_bytes: 64 * 1024 * 1024, // 64 MB
            flush_every_ms: Some(500),
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the data directory (root for all on-disk state)
    pub fn data_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.data_dir = path.into();
        self
    }

    /// Set the backing engine
    pub fn backend(mut self, backend: StoreBackend) -> Self {
        self.config.backend = backend;
        self
    }

    /// Add a keyspace to declare at engine open
    pub fn keyspace(mut self, name: impl Into<String>) -> Self {
        self.config.keyspaces.push(name.into());
        self
    }

    /// Set all keyspaces to declare at engine open
    pub fn keyspaces(mut self, names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.config.keyspaces = names.into_iter().map(Into::into).collect();
        self
    }

    /// Set the sled page cache size (in bytes)
    pub fn cache_capacity_bytes(mut self, bytes: u64) -> Self {
        self.config.cache_capacity_bytes = bytes;
        self
    }

    /// Set the sled background flush interval (in milliseconds)
    pub fn flush_every_ms(mut self, ms: Option<u64>) -> Self {
        self.config.flush_every_ms = ms;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
