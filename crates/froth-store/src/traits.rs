use std::sync::Arc;

use crate::error::StoreResult;

/// Blob storage addressed by asset name within a single destination.
///
/// All implementations must satisfy these invariants:
/// - `get` on an asset that was never written returns `Ok(None)`.
/// - `set` overwrites the asset's blob in full; a later `get` returns
///   exactly the bytes last written.
/// - Invalid asset names are rejected before touching storage.
/// - All I/O errors are propagated, never silently ignored.
pub trait BlobStore: Send + Sync {
    /// The destination this store was opened on.
    fn destination(&self) -> &str;

    /// Read the blob stored under `asset`.
    ///
    /// Returns `Ok(None)` if no blob exists for the asset.
    fn get(&self, asset: &str) -> StoreResult<Option<Vec<u8>>>;

    /// Store `data` under `asset`, replacing any previous blob.
    fn set(&self, asset: &str, data: &[u8]) -> StoreResult<()>;

    /// Delete the blob stored under `asset`. Returns `true` if it existed.
    fn remove(&self, asset: &str) -> StoreResult<bool>;

    /// Check whether a blob exists for `asset`.
    ///
    /// Default implementation reads the blob. Backends may override with a
    /// cheaper check.
    fn exists(&self, asset: &str) -> StoreResult<bool> {
        Ok(self.get(asset)?.is_some())
    }
}

impl<T: BlobStore + ?Sized> BlobStore for Arc<T> {
    fn destination(&self) -> &str {
        (**self).destination()
    }

    fn get(&self, asset: &str) -> StoreResult<Option<Vec<u8>>> {
        (**self).get(asset)
    }

    fn set(&self, asset: &str, data: &[u8]) -> StoreResult<()> {
        (**self).set(asset, data)
    }

    fn remove(&self, asset: &str) -> StoreResult<bool> {
        (**self).remove(asset)
    }

    fn exists(&self, asset: &str) -> StoreResult<bool> {
        (**self).exists(asset)
    }
}
