//! Durable owner-ID to image-URI mapping.
//!
//! # Responsibility
//! - Keep the last picked image URI per connection/contact.
//! - Persist the whole mapping as one JSON document in a `KeyValueStore`.
//!
//! # Invariants
//! - Owner IDs are exact keys and URIs are stored verbatim; only blank
//!   (whitespace-only) input is rejected.
//! - Every read-modify-write runs under one mutex; overlapping calls are
//!   serialized and no update is lost.
//! - A failed `put`/`delete` leaves the previously persisted mapping intact.
//! - `get`/`list_all` treat an unreadable mapping as empty and log a warning.
//! - `put` never overwrites a mapping it could not read.
//! - `list_all` orders by most recent write first; legacy entries without
//!   recency metadata follow, ordered by owner ID.

use crate::model::image_ref::ImageRef;
use crate::repo::kv_repo::{KeyValueStore, KvError};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Instant, SystemTime, UNIX_EPOCH};

/// Storage key of the serialized mapping, shared with earlier app builds.
pub const IMAGE_STORAGE_KEY: &str = "orbit_app_images";
const MAPPING_FORMAT_VERSION: u32 = 1;

pub type ImageRefResult<T> = Result<T, ImageRefError>;

/// Low-level cause of a storage failure.
#[derive(Debug)]
pub enum StorageFailure {
    Medium(KvError),
    Encoding(serde_json::Error),
}

impl Display for StorageFailure {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Medium(err) => write!(f, "{err}"),
            Self::Encoding(err) => write!(f, "mapping encoding failed: {err}"),
        }
    }
}

impl Error for StorageFailure {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Medium(err) => Some(err),
            Self::Encoding(err) => Some(err),
        }
    }
}

/// Image reference store error.
#[derive(Debug)]
pub enum ImageRefError {
    /// Caller input is unusable; nothing was read or written.
    Validation(&'static str),
    /// Writing the mapping failed; the prior mapping is unchanged.
    StorageWrite(StorageFailure),
    /// The persisted mapping could not be read or decoded.
    StorageRead(StorageFailure),
}

impl Display for ImageRefError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(message) => write!(f, "invalid image reference: {message}"),
            Self::StorageWrite(err) => write!(f, "image reference write failed: {err}"),
            Self::StorageRead(err) => write!(f, "image reference read failed: {err}"),
        }
    }
}

impl Error for ImageRefError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(_) => None,
            Self::StorageWrite(err) | Self::StorageRead(err) => Some(err),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct StoredEntry {
    uri: String,
    #[serde(default)]
    updated_at_ms: Option<i64>,
    /// Monotonic write counter; `0` marks legacy entries.
    #[serde(default)]
    revision: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
struct ImageMapping {
    #[serde(default)]
    version: u32,
    entries: BTreeMap<String, StoredEntry>,
}

impl ImageMapping {
    fn next_revision(&self) -> u64 {
        self.entries
            .values()
            .map(|entry| entry.revision)
            .max()
            .unwrap_or(0)
            + 1
    }
}

/// On-disk shapes accepted by the decoder.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StoredMapping {
    Current(ImageMapping),
    /// Flat `{ "<owner>": "<uri>" }` object without recency metadata.
    Legacy(BTreeMap<String, String>),
}

impl From<StoredMapping> for ImageMapping {
    fn from(value: StoredMapping) -> Self {
        match value {
            StoredMapping::Current(mapping) => mapping,
            StoredMapping::Legacy(flat) => Self {
                version: MAPPING_FORMAT_VERSION,
                entries: flat
                    .into_iter()
                    .map(|(owner_id, uri)| {
                        (
                            owner_id,
                            StoredEntry {
                                uri,
                                updated_at_ms: None,
                                revision: 0,
                            },
                        )
                    })
                    .collect(),
            },
        }
    }
}

/// Serialized-mapping image reference store over a durable medium.
pub struct ImageRefStore<S: KeyValueStore> {
    medium: Mutex<S>,
    storage_key: String,
}

impl<S: KeyValueStore> ImageRefStore<S> {
    /// Creates a store persisting under [`IMAGE_STORAGE_KEY`].
    pub fn new(medium: S) -> Self {
        Self::with_storage_key(medium, IMAGE_STORAGE_KEY)
    }

    /// Creates a store persisting under a caller-provided key.
    pub fn with_storage_key(medium: S, storage_key: impl Into<String>) -> Self {
        Self {
            medium: Mutex::new(medium),
            storage_key: storage_key.into(),
        }
    }

    /// Returns the current URI for `owner_id`.
    ///
    /// Missing keys, blank IDs and unreadable storage all yield `None`.
    pub fn get(&self, owner_id: &str) -> Option<String> {
        if owner_id.trim().is_empty() {
            return None;
        }

        let medium = self.lock();
        let mapping = self.load_or_empty(&medium, "get");
        let uri = mapping.entries.get(owner_id).map(|entry| entry.uri.clone());
        debug!(
            "event=image_ref_get module=image_store status=ok hit={}",
            uri.is_some()
        );
        uri
    }

    /// Stores `uri` for `owner_id`, replacing any previous value.
    ///
    /// Returns the stored URI.
    ///
    /// # Errors
    /// - `Validation` for a blank owner ID or URI.
    /// - `StorageRead` when the existing mapping cannot be read; nothing is written.
    /// - `StorageWrite` when encoding or writing fails; the prior mapping stays.
    pub fn put(&self, owner_id: &str, uri: &str) -> ImageRefResult<String> {
        if owner_id.trim().is_empty() {
            return Err(ImageRefError::Validation("owner_id must not be empty"));
        }
        if uri.trim().is_empty() {
            return Err(ImageRefError::Validation("uri must not be empty"));
        }

        let started_at = Instant::now();
        let medium = self.lock();
        let mut mapping = self.load(&medium).inspect_err(|err| {
            warn!(
                "event=image_ref_put module=image_store status=error error_code=mapping_read_failed error={err}"
            );
        })?;

        let revision = mapping.next_revision();
        mapping.version = MAPPING_FORMAT_VERSION;
        mapping.entries.insert(
            owner_id.to_string(),
            StoredEntry {
                uri: uri.to_string(),
                updated_at_ms: Some(now_epoch_ms()),
                revision,
            },
        );

        self.store(&medium, &mapping).inspect_err(|err| {
            warn!(
                "event=image_ref_put module=image_store status=error error_code=mapping_write_failed error={err}"
            );
        })?;

        info!(
            "event=image_ref_put module=image_store status=ok entries={} duration_ms={}",
            mapping.entries.len(),
            started_at.elapsed().as_millis()
        );
        Ok(uri.to_string())
    }

    /// Removes the mapping for `owner_id`; absent IDs are a no-op.
    ///
    /// Removing the last entry drops the storage key itself.
    ///
    /// # Errors
    /// - `StorageRead` when the existing mapping cannot be read.
    /// - `StorageWrite` when persisting the reduced mapping fails.
    pub fn delete(&self, owner_id: &str) -> ImageRefResult<()> {
        if owner_id.trim().is_empty() {
            return Ok(());
        }

        let medium = self.lock();
        let mut mapping = self.load(&medium)?;
        if mapping.entries.remove(owner_id).is_none() {
            debug!("event=image_ref_delete module=image_store status=ok removed=false");
            return Ok(());
        }

        mapping.version = MAPPING_FORMAT_VERSION;
        let persisted = if mapping.entries.is_empty() {
            medium
                .remove(&self.storage_key)
                .map_err(|err| ImageRefError::StorageWrite(StorageFailure::Medium(err)))
        } else {
            self.store(&medium, &mapping)
        };
        persisted.inspect_err(|err| {
            warn!(
                "event=image_ref_delete module=image_store status=error error_code=mapping_write_failed error={err}"
            );
        })?;

        info!(
            "event=image_ref_delete module=image_store status=ok removed=true entries={}",
            mapping.entries.len()
        );
        Ok(())
    }

    /// Returns every live mapping, most recently written first.
    pub fn list_all(&self) -> Vec<ImageRef> {
        let medium = self.lock();
        let mapping = self.load_or_empty(&medium, "list_all");

        let mut ranked = mapping
            .entries
            .into_iter()
            .map(|(owner_id, entry)| {
                (
                    entry.revision,
                    ImageRef {
                        owner_id,
                        uri: entry.uri,
                        updated_at_ms: entry.updated_at_ms,
                    },
                )
            })
            .collect::<Vec<_>>();
        // BTreeMap iteration is owner-ordered, so the stable sort keeps
        // owner order among equal revisions.
        ranked.sort_by(|left, right| right.0.cmp(&left.0));

        ranked.into_iter().map(|(_, image_ref)| image_ref).collect()
    }

    fn lock(&self) -> MutexGuard<'_, S> {
        // A panicking holder never leaves a half-written mapping behind, since
        // each write replaces the whole document.
        self.medium.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn load(&self, medium: &S) -> ImageRefResult<ImageMapping> {
        let raw = medium
            .read(&self.storage_key)
            .map_err(|err| ImageRefError::StorageRead(StorageFailure::Medium(err)))?;

        let Some(raw) = raw else {
            return Ok(ImageMapping::default());
        };

        let stored: StoredMapping = serde_json::from_str(&raw)
            .map_err(|err| ImageRefError::StorageRead(StorageFailure::Encoding(err)))?;
        Ok(stored.into())
    }

    fn load_or_empty(&self, medium: &S, operation: &str) -> ImageMapping {
        match self.load(medium) {
            Ok(mapping) => mapping,
            Err(err) => {
                warn!(
                    "event=image_ref_{operation} module=image_store status=degraded error_code=mapping_read_failed error={err}"
                );
                ImageMapping::default()
            }
        }
    }

    fn store(&self, medium: &S, mapping: &ImageMapping) -> ImageRefResult<()> {
        let encoded = serde_json::to_string(mapping)
            .map_err(|err| ImageRefError::StorageWrite(StorageFailure::Encoding(err)))?;
        medium
            .write(&self.storage_key, &encoded)
            .map_err(|err| ImageRefError::StorageWrite(StorageFailure::Medium(err)))
    }
}

fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::{ImageMapping, StoredMapping};

    fn decode(raw: &str) -> ImageMapping {
        serde_json::from_str::<StoredMapping>(raw)
            .expect("mapping should decode")
            .into()
    }

    #[test]
    fn decodes_legacy_flat_object() {
        let mapping = decode(r#"{"3":"file://a.jpg","1":"file://dad.jpg"}"#);
        assert_eq!(mapping.entries.len(), 2);
        let entry = &mapping.entries["3"];
        assert_eq!(entry.uri, "file://a.jpg");
        assert_eq!(entry.updated_at_ms, None);
        assert_eq!(entry.revision, 0);
    }

    #[test]
    fn decodes_empty_legacy_object() {
        assert!(decode("{}").entries.is_empty());
    }

    #[test]
    fn decodes_current_document() {
        let mapping = decode(
            r#"{"version":1,"entries":{"3":{"uri":"file://b.jpg","updated_at_ms":5,"revision":2}}}"#,
        );
        assert_eq!(mapping.version, 1);
        assert_eq!(mapping.entries["3"].revision, 2);
        assert_eq!(mapping.next_revision(), 3);
    }

    #[test]
    fn rejects_non_object_documents() {
        assert!(serde_json::from_str::<StoredMapping>("[1,2]").is_err());
    }
}
