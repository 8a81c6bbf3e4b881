use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::RwLock;

use crate::error::{StoreError, StoreResult};
use crate::names::validate_asset_name;
use crate::traits::BlobStore;

/// In-memory, HashMap-based blob store.
///
/// Intended for tests and embedding. Blobs are held behind a `RwLock` and
/// cloned on read/write. The store counts successful writes and can be
/// switched to read-only, which makes every `set` fail with
/// [`StoreError::ReadOnly`].
pub struct InMemoryBlobStore {
    destination: String,
    blobs: RwLock<HashMap<String, Vec<u8>>>,
    writes: AtomicU64,
    read_only: AtomicBool,
}

impl InMemoryBlobStore {
    /// Create a new empty store for `destination`.
    pub fn new(destination: impl Into<String>) -> Self {
        Self {
            destination: destination.into(),
            blobs: RwLock::new(HashMap::new()),
            writes: AtomicU64::new(0),
            read_only: AtomicBool::new(false),
        }
    }

    /// Number of blobs currently stored.
    pub fn len(&self) -> usize {
        self.blobs.read().expect("lock poisoned").len()
    }

    /// Returns `true` if the store holds no blobs.
    pub fn is_empty(&self) -> bool {
        self.blobs.read().expect("lock poisoned").is_empty()
    }

    /// Number of successful `set` calls since creation.
    pub fn writes(&self) -> u64 {
        self.writes.load(Ordering::SeqCst)
    }

    /// Make subsequent writes fail (`true`) or succeed again (`false`).
    pub fn set_read_only(&self, read_only: bool) {
        self.read_only.store(read_only, Ordering::SeqCst);
    }

    /// Return a sorted list of all stored asset names.
    pub fn assets(&self) -> Vec<String> {
        let map = self.blobs.read().expect("lock poisoned");
        let mut assets: Vec<String> = map.keys().cloned().collect();
        assets.sort();
        assets
    }
}

impl Default for InMemoryBlobStore {
    fn default() -> Self {
        Self::new("memory")
    }
}

impl BlobStore for InMemoryBlobStore {
    fn destination(&self) -> &str {
        &self.destination
    }

    fn get(&self, asset: &str) -> StoreResult<Option<Vec<u8>>> {
        validate_asset_name(asset)?;
        let map = self.blobs.read().expect("lock poisoned");
        Ok(map.get(asset).cloned())
    }

    fn set(&self, asset: &str, data: &[u8]) -> StoreResult<()> {
        validate_asset_name(asset)?;
        if self.read_only.load(Ordering::SeqCst) {
            return Err(StoreError::ReadOnly);
        }
        let mut map = self.blobs.write().expect("lock poisoned");
        map.insert(asset.to_string(), data.to_vec());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn remove(&self, asset: &str) -> StoreResult<bool> {
        validate_asset_name(asset)?;
        let mut map = self.blobs.write().expect("lock poisoned");
        Ok(map.remove(asset).is_some())
    }

    fn exists(&self, asset: &str) -> StoreResult<bool> {
        validate_asset_name(asset)?;
        let map = self.blobs.read().expect("lock poisoned");
        Ok(map.contains_key(asset))
    }
}

impl std::fmt::Debug for InMemoryBlobStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryBlobStore")
            .field("destination", &self.destination)
            .field("blob_count", &self.len())
            .field("writes", &self.writes())
            .finish()
    }
}
