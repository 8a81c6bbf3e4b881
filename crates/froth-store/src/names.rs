//! Asset name validation.
//!
//! Asset names become file names in [`LocalBlobStore`](crate::LocalBlobStore),
//! so they are held to rules that keep every blob inside its destination:
//! - Must be non-empty
//! - Must not contain path separators (`/`, `\`) or control characters
//! - Must not contain `..`
//! - Must not start with `.`

use crate::error::{StoreError, StoreResult};

/// Characters that are forbidden anywhere in an asset name.
const FORBIDDEN_CHARS: &[char] = &['/', '\\', ':', '\0'];

/// Validate an asset name, returning `Ok(())` if it is a usable address.
///
/// # Examples
///
/// ```
/// use froth_store::names::validate_asset_name;
///
/// assert!(validate_asset_name("catalog").is_ok());
/// assert!(validate_asset_name("release-notes_v2").is_ok());
/// assert!(validate_asset_name("").is_err());
/// assert!(validate_asset_name("../etc/passwd").is_err());
/// ```
pub fn validate_asset_name(name: &str) -> StoreResult<()> {
    if name.is_empty() {
        return Err(invalid(name, "asset name must not be empty"));
    }

    for ch in FORBIDDEN_CHARS {
        if name.contains(*ch) {
            return Err(invalid(name, format!("contains forbidden character: {ch:?}")));
        }
    }

    if name.chars().any(char::is_control) {
        return Err(invalid(name, "must not contain control characters"));
    }

    if name.contains("..") {
        return Err(invalid(name, "must not contain '..'"));
    }

    if name.starts_with('.') {
        return Err(invalid(name, "must not start with '.'"));
    }

    Ok(())
}

fn invalid(name: &str, reason: impl Into<String>) -> StoreError {
    StoreError::InvalidAssetName {
        name: name.to_string(),
        reason: reason.into(),
    }
}
