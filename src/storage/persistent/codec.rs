//! JSON document codec for whole-store snapshots.
//!
//! A document is a JSON array of entity objects. There is no header, version
//! byte, or checksum; the field names of each entity are its serde names.

use serde::{de::DeserializeOwned, Serialize};

/// Serializes entities into a document.
///
/// Pretty output ends with a newline so the file is friendly to text tools.
pub fn encode<T: Serialize>(entities: &[T], pretty: bool) -> serde_json::Result<Vec<u8>> {
    if pretty {
        let mut out = serde_json::to_vec_pretty(entities)?;
        out.push(b'\n');
        Ok(out)
    } else {
        serde_json::to_vec(entities)
    }
}

/// Deserializes a document into entities, in document order.
///
/// # Errors
/// Fails if the bytes are not JSON, the top level is not an array, or any
/// element does not match `T`.
pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> serde_json::Result<Vec<T>> {
    serde_json::from_slice(bytes)
}
