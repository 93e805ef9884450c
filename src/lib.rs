//! # edgestore
//!
//! Durable ordered message store for edge-device runtimes:
//! - Offset-addressed append-only log with exactly-once-offset semantics
//! - Safe concurrent appends, range reads, non-destructive head trimming
//! - Crash-consistent recovery of log bounds from the persisted keyspace
//! - Backend-agnostic: any ordered byte-oriented engine fits behind the
//!   adapter traits (sled and an in-memory engine ship built in)
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     StoreProvider                            │
//! │            (engine lifetime, one store per name)             │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                SequentialStore<T>                            │
//! │     (offset bookkeeping, append/get_batch/remove_first)      │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                    EntityStore                               │
//! │           (byte key/value facade per keyspace)               │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │ SledEngine  │          │MemoryEngine │
//!   │ (on disk)   │          │ (BTreeMap)  │
//!   └─────────────┘          └─────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod codec;
pub mod engine;
pub mod store;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use config::{Config, StoreBackend};
pub use engine::{Keyspace, MemoryEngine, SledEngine, StoreEngine};
pub use error::{Result, StoreError};
pub use store::{EntityStore, SequentialStore, StoreProvider};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of edgestore
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
