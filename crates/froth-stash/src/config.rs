use std::path::{Path, PathBuf};

use froth_codec::CodecKind;
use serde::{Deserialize, Serialize};

use crate::error::{StashError, StashResult};

/// Where a stash lives and how it is encoded.
///
/// Every field is optional in TOML:
///
/// ```toml
/// destination = "/var/lib/froth"
/// asset = "catalog"
/// codec = "json"
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StashConfig {
    pub destination: PathBuf,
    pub asset: String,
    pub codec: CodecKind,
}

impl Default for StashConfig {
    fn default() -> Self {
        Self {
            destination: PathBuf::from(".froth"),
            asset: "stash".into(),
            codec: CodecKind::default(),
        }
    }
}

impl StashConfig {
    pub fn from_toml_str(text: &str) -> StashResult<Self> {
        toml::from_str(text).map_err(|e| StashError::Config(e.to_string()))
    }

    /// Read and parse a TOML config file.
    pub fn load(path: impl AsRef<Path>) -> StashResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| StashError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }
}
