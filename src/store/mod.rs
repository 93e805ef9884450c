//! Store Layer
//!
//! The typed storage abstractions layered on the engine adapter:
//!
//! - [`EntityStore`] — key/value facade over one keyspace
//! - [`SequentialStore`] — offset-addressed append-only log
//! - [`StoreProvider`] — engine lifetime + per-name store cache

mod entity;
mod provider;
mod sequential;

pub use entity::EntityStore;
pub use provider::StoreProvider;
pub use sequential::SequentialStore;
