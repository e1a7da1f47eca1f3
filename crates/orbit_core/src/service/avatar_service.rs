//! Avatar pick/store/resolve use-cases.
//!
//! # Responsibility
//! - Bridge the platform image picker to the image reference store.
//! - Resolve stored avatars for connections at render time.
//!
//! # Invariants
//! - The store is written only when the picker returns a URI.
//! - A cancelled pick is a silent no-op; a denied permission is reported.
//! - Resolution never fails: missing or unreadable refs fall back to an
//!   initial-letter placeholder.

use crate::model::feed::Connection;
use crate::repo::image_ref_repo::{ImageRefError, ImageRefStore};
use crate::repo::kv_repo::KeyValueStore;
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Result of asking the platform for an image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickOutcome {
    Picked(String),
    PermissionDenied,
    Cancelled,
}

/// Platform image acquisition capability (gallery/camera picker).
///
/// Implementations request runtime permission themselves and fail soft.
pub trait ImagePicker {
    fn request_image(&self) -> PickOutcome;
}

/// Avatar use-case error.
#[derive(Debug)]
pub enum AvatarError {
    /// Media library permission was refused; the caller should inform the user.
    PermissionDenied,
    Store(ImageRefError),
}

impl Display for AvatarError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PermissionDenied => write!(f, "permission to access media library was denied"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for AvatarError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::PermissionDenied => None,
            Self::Store(err) => Some(err),
        }
    }
}

impl From<ImageRefError> for AvatarError {
    fn from(value: ImageRefError) -> Self {
        Self::Store(value)
    }
}

/// What the avatar slot of a connection should render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AvatarImage {
    Uri(String),
    /// Uppercased first letter of the display name.
    Initial(char),
}

/// Connection paired with its resolved avatar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionAvatar {
    pub connection: Connection,
    pub avatar: AvatarImage,
}

/// Avatar service over an image reference store.
pub struct AvatarService<S: KeyValueStore> {
    store: ImageRefStore<S>,
}

impl<S: KeyValueStore> AvatarService<S> {
    pub fn new(store: ImageRefStore<S>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &ImageRefStore<S> {
        &self.store
    }

    /// Runs the picker for `owner_id` and persists the picked URI.
    ///
    /// Returns `Ok(Some(uri))` when stored, `Ok(None)` when the user cancelled.
    ///
    /// # Errors
    /// - `PermissionDenied` when the picker reports a refused permission.
    /// - `Store` when persisting the URI fails; the prior avatar is kept.
    pub fn pick_and_store(
        &self,
        owner_id: &str,
        picker: &dyn ImagePicker,
    ) -> Result<Option<String>, AvatarError> {
        match picker.request_image() {
            PickOutcome::Picked(uri) => {
                let stored = self.store.put(owner_id, &uri)?;
                Ok(Some(stored))
            }
            PickOutcome::Cancelled => {
                info!("event=avatar_pick module=avatar status=cancelled");
                Ok(None)
            }
            PickOutcome::PermissionDenied => {
                info!("event=avatar_pick module=avatar status=permission_denied");
                Err(AvatarError::PermissionDenied)
            }
        }
    }

    /// Resolves the avatar to render for one connection.
    pub fn resolve(&self, connection: &Connection) -> ConnectionAvatar {
        let avatar = match self.store.get(&connection.id) {
            Some(uri) => AvatarImage::Uri(uri),
            None => AvatarImage::Initial(avatar_initial(&connection.name)),
        };
        ConnectionAvatar {
            connection: connection.clone(),
            avatar,
        }
    }

    /// Resolves avatars for a list of connections, preserving order.
    pub fn resolve_all(&self, connections: &[Connection]) -> Vec<ConnectionAvatar> {
        connections
            .iter()
            .map(|connection| self.resolve(connection))
            .collect()
    }
}

/// Placeholder letter for a display name: first character, uppercased.
///
/// Blank names yield `?`.
pub fn avatar_initial(name: &str) -> char {
    name.trim()
        .chars()
        .next()
        .and_then(|first| first.to_uppercase().next())
        .unwrap_or('?')
}

#[cfg(test)]
mod tests {
    use super::avatar_initial;

    #[test]
    fn initial_uses_first_letter_uppercased() {
        assert_eq!(avatar_initial("dad"), 'D');
        assert_eq!(avatar_initial("  ömer"), 'Ö');
    }

    #[test]
    fn initial_falls_back_for_blank_names() {
        assert_eq!(avatar_initial("   "), '?');
    }
}
