//! Tests for the engine adapters
//!
//! The same conformance assertions run against both built-in backends;
//! the store layer depends only on the Keyspace contract, so the two
//! engines must be indistinguishable through it.

use std::sync::Arc;

use tempfile::TempDir;

use edgestore::{Config, Keyspace, MemoryEngine, SledEngine, StoreEngine, StoreError};

// =============================================================================
// Helper Functions
// =============================================================================

fn sled_engine() -> (TempDir, SledEngine) {
    let temp = TempDir::new().unwrap();
    let config = Config::builder().data_dir(temp.path()).build();
    let engine = SledEngine::open(&config).unwrap();
    (temp, engine)
}

fn check_keyspace_contract(engine: &dyn StoreEngine) {
    let ks = engine.keyspace("contract").unwrap();

    // Put / get / contains / delete
    assert_eq!(ks.get(b"k1").unwrap(), None);
    assert!(!ks.contains(b"k1").unwrap());

    ks.put(b"k1", b"v1").unwrap();
    assert_eq!(ks.get(b"k1").unwrap(), Some(b"v1".to_vec()));
    assert!(ks.contains(b"k1").unwrap());

    // Last writer wins
    ks.put(b"k1", b"v2").unwrap();
    assert_eq!(ks.get(b"k1").unwrap(), Some(b"v2".to_vec()));

    ks.delete(b"k1").unwrap();
    assert_eq!(ks.get(b"k1").unwrap(), None);
    ks.delete(b"k1").unwrap(); // Idempotent

    // Ordered iteration from a start key
    for key in [&b"b"[..], &b"d"[..], &b"a"[..], &b"c"[..]] {
        ks.put(key, b"x").unwrap();
    }
    let entries = ks.iterate_from(b"b", 10).unwrap();
    let keys: Vec<&[u8]> = entries.iter().map(|(k, _)| k.as_slice()).collect();
    assert_eq!(keys, vec![&b"b"[..], &b"c"[..], &b"d"[..]]);

    let entries = ks.iterate_from(b"", 2).unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].0, b"a");

    // Endpoints
    assert_eq!(ks.first().unwrap().unwrap().0, b"a");
    assert_eq!(ks.last().unwrap().unwrap().0, b"d");

    let empty = engine.keyspace("empty").unwrap();
    assert_eq!(empty.first().unwrap(), None);
    assert_eq!(empty.last().unwrap(), None);
    assert!(empty.iterate_from(b"", 10).unwrap().is_empty());
}

// =============================================================================
// Conformance Tests
// =============================================================================

#[test]
fn test_memory_engine_keyspace_contract() {
    let engine = MemoryEngine::new();
    check_keyspace_contract(&engine);
}

#[test]
fn test_sled_engine_keyspace_contract() {
    let (_temp, engine) = sled_engine();
    check_keyspace_contract(&engine);
}

// =============================================================================
// Keyspace Identity Tests
// =============================================================================

#[test]
fn test_same_name_returns_same_keyspace() {
    let engine = MemoryEngine::new();

    let a = engine.keyspace("shared").unwrap();
    let b = engine.keyspace("shared").unwrap();
    a.put(b"k", b"v").unwrap();
    assert_eq!(b.get(b"k").unwrap(), Some(b"v".to_vec()));
}

#[test]
fn test_keyspaces_are_isolated() {
    let (_temp, engine) = sled_engine();

    let left = engine.keyspace("left").unwrap();
    let right = engine.keyspace("right").unwrap();
    left.put(b"k", b"from-left").unwrap();
    assert_eq!(right.get(b"k").unwrap(), None);
}

#[test]
fn test_keyspace_names_reports_opened() {
    let engine = MemoryEngine::new();
    engine.keyspace("one").unwrap();
    engine.keyspace("two").unwrap();

    let mut names = engine.keyspace_names();
    names.sort();
    assert_eq!(names, vec!["one", "two"]);
}

// =============================================================================
// Lifecycle Tests
// =============================================================================

#[test]
fn test_pre_declared_keyspaces_open_at_startup() {
    let temp = TempDir::new().unwrap();
    let config = Config::builder()
        .data_dir(temp.path())
        .keyspaces(["messages", "twins"])
        .build();

    let engine = SledEngine::open(&config).unwrap();
    let mut names = engine.keyspace_names();
    names.sort();
    assert_eq!(names, vec!["messages", "twins"]);
}

#[test]
fn test_open_fails_on_inaccessible_path() {
    let temp = TempDir::new().unwrap();
    // A file where the engine expects a directory
    let bogus = temp.path().join("not_a_dir");
    std::fs::write(&bogus, b"occupied").unwrap();

    let config = Config::builder().data_dir(&bogus).build();
    match SledEngine::open(&config) {
        Err(StoreError::StorageUnavailable { path, .. }) => assert_eq!(path, bogus),
        other => panic!("expected StorageUnavailable, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_use_after_close_is_rejected() {
    let engine = MemoryEngine::new();
    let ks = engine.keyspace("doomed").unwrap();
    ks.put(b"k", b"v").unwrap();

    engine.close().unwrap();
    assert!(matches!(ks.get(b"k"), Err(StoreError::Disposed)));
    assert!(matches!(ks.put(b"k", b"v"), Err(StoreError::Disposed)));
    assert!(matches!(
        engine.keyspace("another").map(|_| ()),
        Err(StoreError::Disposed)
    ));
}

#[test]
fn test_close_is_idempotent() {
    let (_temp, engine) = sled_engine();
    engine.keyspace("k").unwrap();
    engine.close().unwrap();
    engine.close().unwrap();
}

#[test]
fn test_sled_data_survives_reopen() {
    let temp = TempDir::new().unwrap();
    let config = Config::builder().data_dir(temp.path()).build();

    {
        let engine = SledEngine::open(&config).unwrap();
        let ks = engine.keyspace("durable").unwrap();
        ks.put(b"k", b"v").unwrap();
        engine.close().unwrap();
    }

    let engine = SledEngine::open(&config).unwrap();
    let ks = engine.keyspace("durable").unwrap();
    assert_eq!(ks.get(b"k").unwrap(), Some(b"v".to_vec()));
}

// =============================================================================
// Concurrency Tests
// =============================================================================

#[test]
fn test_concurrent_keyspace_creation_yields_one_instance() {
    let engine = Arc::new(MemoryEngine::new());

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let engine = Arc::clone(&engine);
            std::thread::spawn(move || {
                let ks = engine.keyspace("racy").unwrap();
                ks.put(format!("k{}", i).as_bytes(), b"v").unwrap();
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    // All writes landed in the one keyspace mapped to the name
    let ks = engine.keyspace("racy").unwrap();
    assert_eq!(ks.iterate_from(b"", 100).unwrap().len(), 8);
    assert_eq!(engine.keyspace_names(), vec!["racy"]);
}
