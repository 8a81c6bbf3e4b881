use std::path::Path;

use froth_codec::{BincodeCodec, Codec, CodecKind, Value, ValueKind, ValueMap};
use froth_store::{BlobStore, InMemoryBlobStore, LocalBlobStore};
use tracing::{debug, info};

use crate::config::StashConfig;
use crate::error::{StashError, StashResult};

/// A persistent mapping of string keys to typed values.
///
/// The mapping is loaded from the store when the stash is constructed and
/// written through on every mutation: each setter updates the in-memory
/// mapping, re-encodes the *whole* mapping, and overwrites the asset's blob
/// before returning.
///
/// If persisting fails the in-memory change is kept, so the stash is ahead of
/// durable state until a later mutation persists successfully. Repeating the
/// failed call is safe.
///
/// Two stashes opened on the same destination and asset do not see each
/// other's writes. Each one overwrites the blob with its own mapping; the
/// last writer wins.
#[derive(Debug)]
pub struct Stash<S = LocalBlobStore, C = BincodeCodec> {
    store: S,
    codec: C,
    asset: String,
    values: ValueMap,
}

impl Stash<LocalBlobStore, BincodeCodec> {
    /// Open the stash for `asset` in the directory `destination`, using the
    /// default bincode codec.
    ///
    /// A missing blob yields an empty stash; nothing is written until the
    /// first mutation.
    pub fn open(destination: impl AsRef<Path>, asset: impl Into<String>) -> StashResult<Self> {
        let store = LocalBlobStore::open(destination)?;
        Self::with_parts(store, BincodeCodec, asset)
    }
}

impl Stash<LocalBlobStore, CodecKind> {
    /// Open the stash described by `config`.
    pub fn from_config(config: &StashConfig) -> StashResult<Self> {
        let store = LocalBlobStore::open(&config.destination)?;
        Self::with_parts(store, config.codec, config.asset.clone())
    }
}

impl Stash<InMemoryBlobStore, BincodeCodec> {
    /// An empty stash over a private in-memory store.
    ///
    /// Useful where a caller needs a stash before one has been loaded: every
    /// read returns `Ok(None)` and writes never leave the process.
    pub fn detached(asset: impl Into<String>) -> Self {
        Self {
            store: InMemoryBlobStore::default(),
            codec: BincodeCodec,
            asset: asset.into(),
            values: ValueMap::new(),
        }
    }
}

impl<S: BlobStore, C: Codec> Stash<S, C> {
    /// Build a stash from an already-open store and a codec, loading the
    /// current blob for `asset`.
    pub fn with_parts(store: S, codec: C, asset: impl Into<String>) -> StashResult<Self> {
        let asset = asset.into();
        let values = match store.get(&asset)? {
            Some(bytes) => {
                let values = codec.decode(&bytes).map_err(|source| StashError::Decode {
                    asset: asset.clone(),
                    source,
                })?;
                debug!(
                    destination = store.destination(),
                    asset = %asset,
                    keys = values.len(),
                    bytes = bytes.len(),
                    "loaded stash"
                );
                values
            }
            None => {
                info!(
                    destination = store.destination(),
                    asset = %asset,
                    "no stored blob; starting empty stash"
                );
                ValueMap::new()
            }
        };

        Ok(Self {
            store,
            codec,
            asset,
            values,
        })
    }

    pub fn destination(&self) -> &str {
        self.store.destination()
    }

    pub fn asset(&self) -> &str {
        &self.asset
    }

    /// The backing store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Every key currently held. Order is not meaningful.
    pub fn all(&self) -> Vec<&str> {
        self.values.keys().map(String::as_str).collect()
    }

    /// The live mapping.
    pub fn values(&self) -> &ValueMap {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// The raw value stored under `key`, whatever its kind.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// The kind `key` was last written with.
    pub fn kind_of(&self, key: &str) -> Option<ValueKind> {
        self.values.get(key).map(Value::kind)
    }

    // ---- Single-key writes ----

    /// Insert or overwrite `key` and persist.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> StashResult<()> {
        self.values.insert(key.into(), value.into());
        self.persist()
    }

    pub fn set_string(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> StashResult<()> {
        self.set(key, Value::Text(value.into()))
    }

    pub fn set_string_list<I, T>(&mut self, key: impl Into<String>, values: I) -> StashResult<()>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let list = values.into_iter().map(Into::into).collect();
        self.set(key, Value::TextList(list))
    }

    pub fn set_int(&mut self, key: impl Into<String>, value: i64) -> StashResult<()> {
        self.set(key, Value::Integer(value))
    }

    // ---- Batch writes ----

    /// Overlay every pair onto the mapping, then persist once for the whole
    /// batch.
    pub fn set_many<I, K, V>(&mut self, pairs: I) -> StashResult<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        self.values
            .extend(pairs.into_iter().map(|(k, v)| (k.into(), v.into())));
        self.persist()
    }

    pub fn set_many_strings<I, K, V>(&mut self, pairs: I) -> StashResult<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.set_many(pairs.into_iter().map(|(k, v)| (k, Value::Text(v.into()))))
    }

    pub fn set_many_string_lists<I, K>(&mut self, pairs: I) -> StashResult<()>
    where
        I: IntoIterator<Item = (K, Vec<String>)>,
        K: Into<String>,
    {
        self.set_many(pairs.into_iter().map(|(k, v)| (k, Value::TextList(v))))
    }

    pub fn set_many_ints<I, K>(&mut self, pairs: I) -> StashResult<()>
    where
        I: IntoIterator<Item = (K, i64)>,
        K: Into<String>,
    {
        self.set_many(pairs.into_iter().map(|(k, v)| (k, Value::Integer(v))))
    }

    // ---- Typed reads ----

    /// Read a text value.
    ///
    /// Returns `Ok(None)` if the key is absent and
    /// [`StashError::TypeMismatch`] if it holds another kind.
    pub fn get_string(&self, key: &str) -> StashResult<Option<&str>> {
        self.typed(key, ValueKind::Text, Value::as_text)
    }

    pub fn get_string_list(&self, key: &str) -> StashResult<Option<&[String]>> {
        self.typed(key, ValueKind::TextList, Value::as_text_list)
    }

    pub fn get_int(&self, key: &str) -> StashResult<Option<i64>> {
        self.typed(key, ValueKind::Integer, Value::as_integer)
    }

    fn typed<'a, T, F>(&'a self, key: &str, expected: ValueKind, view: F) -> StashResult<Option<T>>
    where
        F: FnOnce(&'a Value) -> Option<T>,
    {
        let Some(value) = self.values.get(key) else {
            return Ok(None);
        };
        match view(value) {
            Some(v) => Ok(Some(v)),
            None => Err(StashError::TypeMismatch {
                key: key.to_string(),
                expected,
                found: value.kind(),
            }),
        }
    }

    /// Encode the whole mapping and overwrite the asset's blob.
    fn persist(&self) -> StashResult<()> {
        let bytes = self
            .codec
            .encode(&self.values)
            .map_err(|source| StashError::Encode {
                asset: self.asset.clone(),
                source,
            })?;
        self.store.set(&self.asset, &bytes)?;
        debug!(
            destination = self.store.destination(),
            asset = %self.asset,
            keys = self.values.len(),
            bytes = bytes.len(),
            "persisted stash"
        );
        Ok(())
    }
}
