//! Sequential Store
//!
//! The offset-addressed append-only log at the heart of the message
//! buffer. Each entry is keyed by its offset (8-byte big-endian, see
//! [`crate::codec`]) inside one entity store, so engine key order equals
//! offset order and range reads are a single ordered scan.
//!
//! ## Concurrency Model
//!
//! - **Append**: serialized by `append_lock`. The critical region covers
//!   offset assignment, the engine put, and the `next_offset` advance, so
//!   N concurrent appends receive exactly N consecutive offsets with no
//!   gaps or duplicates. A failed put does not advance `next_offset` —
//!   a retried append reuses the same offset.
//! - **RemoveFirst**: serialized by the `head` mutex. Operates on the
//!   opposite end of the log from append and on a different key, so it
//!   does not take `append_lock`.
//! - **GetBatch**: takes no long-lived lock; each call re-reads current
//!   engine state.

use std::marker::PhantomData;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, trace};

use crate::codec;
use crate::error::{Result, StoreError};

use super::EntityStore;

/// Offset-indexed append-only log of items of type `T`
pub struct SequentialStore<T> {
    /// Backing entity store (one keyspace per log)
    entity: Arc<EntityStore>,

    /// Oldest retained offset, or None while the log is empty.
    /// Doubles as the critical region for head mutation.
    head: Mutex<Option<u64>>,

    /// Offset the next successful append will return. Written only
    /// inside the append critical region; read anywhere.
    next_offset: AtomicU64,

    /// Serializes offset assignment across concurrent appends
    append_lock: Mutex<()>,

    _item: PhantomData<fn() -> T>,
}

impl<T> SequentialStore<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Attach to an entity store and recover the log bounds
    ///
    /// Recovery is the durability contract: across a restart against the
    /// same entity store, the next append resumes at the correct offset
    /// and no previously appended entry is lost or revisited. The bounds
    /// come from the keyspace endpoints — no full scan, no pointer
    /// entries that could go stale.
    pub fn create(entity: Arc<EntityStore>) -> Result<Self> {
        let head = match entity.first_entry()? {
            Some((key, _)) => Some(codec::decode_offset(&key)?),
            None => None,
        };
        let next_offset = match entity.last_entry()? {
            Some((key, _)) => codec::decode_offset(&key)? + 1,
            None => 0,
        };

        debug!(
            entity = entity.name(),
            head = ?head,
            next_offset,
            "recovered sequential store"
        );

        Ok(Self {
            entity,
            head: Mutex::new(head),
            next_offset: AtomicU64::new(next_offset),
            append_lock: Mutex::new(()),
            _item: PhantomData,
        })
    }

    /// Append an item and return the offset it was assigned
    ///
    /// Offsets are strictly increasing by exactly 1 per successful
    /// append. If the engine put fails, the offset is not consumed and
    /// the error propagates unchanged.
    pub fn append(&self, item: &T) -> Result<u64> {
        let value = codec::serialize_item(item)?;

        let _guard = self.append_lock.lock();

        let offset = self.next_offset.load(Ordering::SeqCst);
        self.entity.put(&codec::encode_offset(offset), &value)?;
        self.next_offset.store(offset + 1, Ordering::SeqCst);

        // First entry of an empty log becomes the head. Done before the
        // append lock is released: a concurrent trim that emptied the log
        // may have missed this offset when it re-read next_offset, and
        // a later append must not install its own offset as head first.
        {
            let mut head = self.head.lock();
            if head.is_none() {
                *head = Some(offset);
            }
        }

        trace!(entity = self.entity.name(), offset, "appended item");
        Ok(offset)
    }

    /// Read up to `max_count` entries starting at `start_offset`,
    /// in ascending offset order
    ///
    /// ## Errors
    /// - [`StoreError::OffsetBelowHead`] if `start_offset` addresses
    ///   trimmed data. Permanent — the caller must advance its cursor.
    ///
    /// Asking at or past the tail is not an error: the result is empty.
    pub fn get_batch(&self, start_offset: u64, max_count: usize) -> Result<Vec<(u64, T)>> {
        if let Some(head) = *self.head.lock() {
            if start_offset < head {
                return Err(StoreError::OffsetBelowHead {
                    requested: start_offset,
                    head,
                });
            }
        }

        if start_offset >= self.next_offset.load(Ordering::SeqCst) {
            return Ok(Vec::new());
        }

        let entries = self
            .entity
            .iterate_batch(&codec::encode_offset(start_offset), max_count)?;

        let mut batch = Vec::with_capacity(entries.len());
        for (key, value) in entries {
            let offset = codec::decode_offset(&key)?;
            let item = codec::deserialize_item(&value)?;
            batch.push((offset, item));
        }
        Ok(batch)
    }

    /// Inspect the oldest entry and remove it if the predicate accepts it
    ///
    /// Returns whether an entry was removed. On an empty log the
    /// predicate is never invoked and the result is false. Only the
    /// single oldest entry is ever considered — callers loop to trim
    /// more than one.
    pub fn remove_first<F>(&self, mut predicate: F) -> Result<bool>
    where
        F: FnMut(u64, &T) -> bool,
    {
        let mut head = self.head.lock();

        let head_offset = match *head {
            Some(offset) => offset,
            None => return Ok(false),
        };

        let key = codec::encode_offset(head_offset);
        let value = self.entity.get(&key)?.ok_or_else(|| {
            StoreError::Corruption(format!(
                "log entry missing at head offset {} of '{}'",
                head_offset,
                self.entity.name()
            ))
        })?;
        let item = codec::deserialize_item(&value)?;

        if !predicate(head_offset, &item) {
            return Ok(false);
        }

        self.entity.delete(&key)?;

        // Advance the head; the log is empty once it catches the tail
        let next = self.next_offset.load(Ordering::SeqCst);
        *head = if head_offset + 1 < next {
            Some(head_offset + 1)
        } else {
            None
        };

        debug!(
            entity = self.entity.name(),
            removed = head_offset,
            new_head = ?*head,
            "trimmed log head"
        );
        Ok(true)
    }

    /// Oldest retained offset, or None while the log is empty
    pub fn head_offset(&self) -> Option<u64> {
        *self.head.lock()
    }

    /// Offset the next successful append will return
    pub fn next_offset(&self) -> u64 {
        self.next_offset.load(Ordering::SeqCst)
    }

    /// Name of the backing entity store
    pub fn entity_name(&self) -> &str {
        self.entity.name()
    }
}
