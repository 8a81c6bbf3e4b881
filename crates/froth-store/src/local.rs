use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::names::validate_asset_name;
use crate::traits::BlobStore;

/// File extension used for asset blobs on disk.
pub const BLOB_EXTENSION: &str = "blob";

/// Directory-backed blob store.
///
/// Each asset lives in `<destination>/<asset>.blob`. Writes go to a
/// temporary file in the same directory which is then renamed over the
/// target, so a concurrent reader sees either the old blob or the new one,
/// never a torn write. Nothing coordinates two writers: the last rename wins.
pub struct LocalBlobStore {
    root: PathBuf,
    destination: String,
}

impl LocalBlobStore {
    /// Open the store rooted at `destination`, creating the directory if it
    /// does not exist yet.
    pub fn open(destination: impl AsRef<Path>) -> StoreResult<Self> {
        let root = destination.as_ref().to_path_buf();
        let shown = root.display().to_string();

        if root.exists() && !root.is_dir() {
            return Err(StoreError::Unavailable {
                destination: shown,
                reason: "destination exists and is not a directory".into(),
            });
        }

        fs::create_dir_all(&root).map_err(|e| StoreError::Unavailable {
            destination: shown.clone(),
            reason: e.to_string(),
        })?;

        debug!(destination = %shown, "opened local blob store");
        Ok(Self {
            root,
            destination: shown,
        })
    }

    /// Root directory of this store.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// On-disk path of the blob for `asset`.
    pub fn blob_path(&self, asset: &str) -> StoreResult<PathBuf> {
        validate_asset_name(asset)?;
        Ok(self.root.join(format!("{asset}.{BLOB_EXTENSION}")))
    }

    /// Return a sorted list of all assets currently stored.
    pub fn assets(&self) -> StoreResult<Vec<String>> {
        let mut assets = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }
            if path.extension().and_then(|e| e.to_str()) != Some(BLOB_EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                assets.push(stem.to_string());
            }
        }
        assets.sort();
        Ok(assets)
    }
}

impl BlobStore for LocalBlobStore {
    fn destination(&self) -> &str {
        &self.destination
    }

    fn get(&self, asset: &str) -> StoreResult<Option<Vec<u8>>> {
        let path = self.blob_path(asset)?;
        match fs::read(&path) {
            Ok(data) => {
                debug!(asset, len = data.len(), "read blob");
                Ok(Some(data))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, asset: &str, data: &[u8]) -> StoreResult<()> {
        let path = self.blob_path(asset)?;
        let mut tmp = NamedTempFile::new_in(&self.root)?;
        tmp.write_all(data)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&path).map_err(|e| e.error)?;
        debug!(asset, len = data.len(), "wrote blob");
        Ok(())
    }

    fn remove(&self, asset: &str) -> StoreResult<bool> {
        let path = self.blob_path(asset)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    fn exists(&self, asset: &str) -> StoreResult<bool> {
        let path = self.blob_path(asset)?;
        match fs::metadata(&path) {
            Ok(meta) if meta.is_file() => Ok(true),
            Ok(_) => Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("blob path is not a regular file: {}", path.display()),
            )
            .into()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

impl std::fmt::Debug for LocalBlobStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalBlobStore")
            .field("root", &self.root)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_creates_destination() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("nested").join("dest");
        let store = LocalBlobStore::open(&dest).unwrap();
        assert!(dest.is_dir());
        assert_eq!(store.root(), dest.as_path());
    }

    #[test]
    fn open_on_a_file_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("plain");
        fs::write(&file, b"x").unwrap();
        assert!(matches!(
            LocalBlobStore::open(&file),
            Err(StoreError::Unavailable { .. })
        ));
    }

    #[test]
    fn missing_asset_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalBlobStore::open(dir.path()).unwrap();
        assert!(store.get("catalog").unwrap().is_none());
        assert!(!store.exists("catalog").unwrap());
    }

    #[test]
    fn set_then_get() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalBlobStore::open(dir.path()).unwrap();
        store.set("catalog", b"hello").unwrap();
        assert_eq!(store.get("catalog").unwrap().unwrap(), b"hello");
        assert!(store.exists("catalog").unwrap());
        assert!(dir.path().join("catalog.blob").is_file());
    }

    #[test]
    fn set_overwrites_in_full() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalBlobStore::open(dir.path()).unwrap();
        store.set("catalog", b"a much longer first blob").unwrap();
        store.set("catalog", b"short").unwrap();
        assert_eq!(store.get("catalog").unwrap().unwrap(), b"short");
    }

    #[test]
    fn blobs_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        {
            let store = LocalBlobStore::open(dir.path()).unwrap();
            store.set("catalog", b"persisted").unwrap();
        }
        let store = LocalBlobStore::open(dir.path()).unwrap();
        assert_eq!(store.get("catalog").unwrap().unwrap(), b"persisted");
    }

    #[test]
    fn remove_reports_existence() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalBlobStore::open(dir.path()).unwrap();
        store.set("catalog", b"x").unwrap();
        assert!(store.remove("catalog").unwrap());
        assert!(!store.remove("catalog").unwrap());
        assert!(store.get("catalog").unwrap().is_none());
    }

    #[test]
    fn assets_lists_only_blobs() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalBlobStore::open(dir.path()).unwrap();
        store.set("b", b"2").unwrap();
        store.set("a", b"1").unwrap();
        fs::write(dir.path().join("notes.txt"), b"ignored").unwrap();
        assert_eq!(store.assets().unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn no_temp_files_left_behind() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalBlobStore::open(dir.path()).unwrap();
        store.set("catalog", b"x").unwrap();
        store.set("catalog", b"y").unwrap();
        let count = fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(count, 1);
    }

    #[test]
    fn invalid_asset_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalBlobStore::open(dir.path()).unwrap();
        assert!(matches!(
            store.set("../escape", b"x"),
            Err(StoreError::InvalidAssetName { .. })
        ));
        assert!(matches!(
            store.get(""),
            Err(StoreError::InvalidAssetName { .. })
        ));
    }

    #[test]
    fn exists_reports_non_file_blob_path() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalBlobStore::open(dir.path()).unwrap();
        fs::create_dir(dir.path().join("x.blob")).unwrap();
        assert!(matches!(store.exists("x"), Err(StoreError::Io(_))));
        assert!(store.get("x").is_err());
    }

    #[test]
    fn destination_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalBlobStore::open(dir.path()).unwrap();
        assert_eq!(store.destination(), dir.path().display().to_string());
    }
}
