//! In-memory blob store.
//!
//! # Responsibility
//! - Back `BlobStore` with a process-local map for tests and ephemeral sessions.
//!
//! # Invariants
//! - Clones share one map; a write through any clone is visible to all.
//! - A poisoned lock surfaces as `BlobError::Unavailable`, never a panic.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::repo::blob_repo::{BlobError, BlobResult, BlobStore};

/// In-memory blob store for tests and ephemeral sessions.
///
/// Clones share the same map, so a caller can keep a handle and inspect what
/// a store wrote.
#[derive(Clone, Debug, Default)]
pub struct MemoryBlobStore {
    blobs: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-seeded with one value.
    pub fn with_blob(key: &str, value: impl Into<String>) -> Self {
        let store = Self::new();
        if let Ok(mut blobs) = store.blobs.lock() {
            blobs.insert(key.to_string(), value.into());
        }
        store
    }
}

impl BlobStore for MemoryBlobStore {
    fn get(&self, key: &str) -> BlobResult<Option<String>> {
        let blobs = self
            .blobs
            .lock()
            .map_err(|_| BlobError::Unavailable("memory store lock poisoned".to_string()))?;
        Ok(blobs.get(key).cloned())
    }

    fn put(&self, key: &str, value: &str) -> BlobResult<()> {
        let mut blobs = self
            .blobs
            .lock()
            .map_err(|_| BlobError::Unavailable("memory store lock poisoned".to_string()))?;
        blobs.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_reads_as_none() {
        let store = MemoryBlobStore::new();
        assert_eq!(store.get("tasks").unwrap(), None);
    }

    #[test]
    fn clones_share_contents() {
        let store = MemoryBlobStore::new();
        let handle = store.clone();

        store.put("tasks", "[]").unwrap();
        store.put("tasks", "[1]").unwrap();

        assert_eq!(handle.get("tasks").unwrap().as_deref(), Some("[1]"));
    }

    #[test]
    fn with_blob_seeds_value() {
        let store = MemoryBlobStore::with_blob("tasks", "seed");
        assert_eq!(store.get("tasks").unwrap().as_deref(), Some("seed"));
    }

    #[test]
    fn poisoned_lock_reads_as_unavailable() {
        let store = MemoryBlobStore::new();
        let shared = store.clone();
        let _ = std::thread::spawn(move || {
            let _guard = shared.blobs.lock().unwrap();
            panic!("writer died holding the lock");
        })
        .join();

        assert!(matches!(store.get("tasks"), Err(BlobError::Unavailable(_))));
        assert!(matches!(
            store.put("tasks", "[]"),
            Err(BlobError::Unavailable(_))
        ));
    }
}
