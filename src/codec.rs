//! Offset key encoding and item (de)serialization
//!
//! ## Key Format
//!
//! Every log entry is keyed by its offset encoded as 8 big-endian bytes,
//! so byte-lexicographic key order in the engine equals numeric offset
//! order. Decoding rejects keys of any other length — a foreign key in a
//! log keyspace means the keyspace was written by something else.
//!
//! ## Value Format
//!
//! Values are bincode-encoded items. Encoding/decoding failures surface as
//! [`StoreError::Serialization`] and never touch other stored entries.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{Result, StoreError};

/// Length of an encoded offset key, in bytes
pub const OFFSET_KEY_LEN: usize = 8;

/// Encode an offset as an order-preserving fixed-width key
pub fn encode_offset(offset: u64) -> [u8; OFFSET_KEY_LEN] {
    offset.to_be_bytes()
}

/// Decode an offset key written by [`encode_offset`]
pub fn decode_offset(key: &[u8]) -> Result<u64> {
    let bytes: [u8; OFFSET_KEY_LEN] = key.try_into().map_err(|_| {
        StoreError::Corruption(format!(
            "offset key has length {}, expected {}",
            key.len(),
            OFFSET_KEY_LEN
        ))
    })?;
    Ok(u64::from_be_bytes(bytes))
}

/// Serialize an item into its stored byte representation
pub fn serialize_item<T: Serialize>(item: &T) -> Result<Vec<u8>> {
    bincode::serialize(item).map_err(|e| StoreError::Serialization(e.to_string()))
}

/// Deserialize an item from its stored byte representation
pub fn deserialize_item<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    bincode::deserialize(bytes).map_err(|e| StoreError::Serialization(e.to_string()))
}
