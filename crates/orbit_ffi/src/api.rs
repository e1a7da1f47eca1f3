//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose stable, use-case-level functions to Dart via FRB.
//! - Flatten core types into plain envelopes the bridge can copy.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - One process-wide image reference store serializes all avatar writes.

use log::warn;
use once_cell::sync::OnceCell;
use orbit_core::{
    avatar_initial, core_version as core_version_inner, init_logging as init_logging_inner,
    ping as ping_inner, sample_feed, AvatarImage, AvatarService, HomeFeedService, ImageRefStore,
    KeyValueStore, SqliteKeyValueStore,
};
use std::path::PathBuf;

const DB_FILE_NAME: &str = "orbit.sqlite3";
const DB_PATH_ENV: &str = "ORBIT_DB_PATH";

static AVATARS: OnceCell<AvatarService<SqliteKeyValueStore>> = OnceCell::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Stored avatar reference returned by [`image_ref_list`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRefItem {
    pub owner_id: String,
    pub uri: String,
    /// Epoch milliseconds of the last write; `None` for migrated entries.
    pub updated_at_ms: Option<i64>,
}

/// Action envelope for image reference writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRefActionResponse {
    pub ok: bool,
    /// Stored URI after a successful put.
    pub uri: Option<String>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl ImageRefActionResponse {
    fn success(message: impl Into<String>, uri: Option<String>) -> Self {
        Self {
            ok: true,
            uri,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            uri: None,
            message: message.into(),
        }
    }
}

/// Returns the stored avatar URI for `owner_id`, if any.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Storage failures degrade to `None`.
#[flutter_rust_bridge::frb(sync)]
pub fn image_ref_get(owner_id: String) -> Option<String> {
    get_image_ref(avatars(), &owner_id)
}

/// Stores the URI returned by the platform picker for `owner_id`.
///
/// Callers invoke this only when the picker returned a URI; cancel/deny
/// outcomes are handled on the Dart side.
#[flutter_rust_bridge::frb(sync)]
pub fn image_ref_put(owner_id: String, uri: String) -> ImageRefActionResponse {
    put_image_ref(avatars(), &owner_id, &uri)
}

/// Removes the avatar reference for `owner_id`; absent IDs succeed.
#[flutter_rust_bridge::frb(sync)]
pub fn image_ref_delete(owner_id: String) -> ImageRefActionResponse {
    delete_image_ref(avatars(), &owner_id)
}

/// Lists stored avatar references, most recently written first.
#[flutter_rust_bridge::frb(sync)]
pub fn image_ref_list() -> Vec<ImageRefItem> {
    list_image_refs(avatars())
}

fn get_image_ref<S: KeyValueStore>(
    avatars: Option<&AvatarService<S>>,
    owner_id: &str,
) -> Option<String> {
    avatars?.store().get(owner_id)
}

fn put_image_ref<S: KeyValueStore>(
    avatars: Option<&AvatarService<S>>,
    owner_id: &str,
    uri: &str,
) -> ImageRefActionResponse {
    match avatars.map(|avatars| avatars.store().put(owner_id, uri)) {
        Some(Ok(stored)) => ImageRefActionResponse::success("Image saved.", Some(stored)),
        Some(Err(err)) => ImageRefActionResponse::failure(format!("image_ref_put failed: {err}")),
        None => ImageRefActionResponse::failure("image_ref_put failed: storage unavailable"),
    }
}

fn delete_image_ref<S: KeyValueStore>(
    avatars: Option<&AvatarService<S>>,
    owner_id: &str,
) -> ImageRefActionResponse {
    match avatars.map(|avatars| avatars.store().delete(owner_id)) {
        Some(Ok(())) => ImageRefActionResponse::success("Image removed.", None),
        Some(Err(err)) => {
            ImageRefActionResponse::failure(format!("image_ref_delete failed: {err}"))
        }
        None => ImageRefActionResponse::failure("image_ref_delete failed: storage unavailable"),
    }
}

fn list_image_refs<S: KeyValueStore>(avatars: Option<&AvatarService<S>>) -> Vec<ImageRefItem> {
    avatars
        .map(|avatars| avatars.store().list_all())
        .unwrap_or_default()
        .into_iter()
        .map(|image_ref| ImageRefItem {
            owner_id: image_ref.owner_id,
            uri: image_ref.uri,
            updated_at_ms: image_ref.updated_at_ms,
        })
        .collect()
}

/// Category chip in the home screen selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryChip {
    pub id: String,
    pub label: String,
    pub selected: bool,
}

/// Connection avatar cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionCard {
    pub id: String,
    pub name: String,
    pub online: bool,
    /// Stored avatar URI; `None` renders `initial` instead.
    pub image_uri: Option<String>,
    pub initial: String,
}

/// Activity card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityCard {
    pub id: String,
    pub title: String,
    pub description: String,
    pub timestamp: String,
}

/// Event card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventCard {
    pub id: String,
    pub title: String,
    pub kind: String,
    pub date: String,
    pub day: String,
    pub month: String,
}

/// Home screen envelope for one selected category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeFeedResponse {
    pub categories: Vec<CategoryChip>,
    pub connections: Vec<ConnectionCard>,
    pub activities: Vec<ActivityCard>,
    pub events: Vec<EventCard>,
    pub message: String,
}

/// Builds the demo home feed filtered by `category`.
///
/// # FFI contract
/// - Sync call; avatar lookups hit the DB, filtering does not.
/// - Unknown categories return empty sections, never an error.
#[flutter_rust_bridge::frb(sync)]
pub fn home_feed(category: String) -> HomeFeedResponse {
    build_home_feed(avatars(), &category)
}

/// Labels are matched exactly; `" Work"` is an unknown category.
fn build_home_feed<S: KeyValueStore>(
    avatars: Option<&AvatarService<S>>,
    label: &str,
) -> HomeFeedResponse {
    let (categories, engine) = sample_feed().into_parts();
    let service = match HomeFeedService::try_new(categories, engine) {
        Ok(service) => service,
        Err(err) => {
            return HomeFeedResponse {
                categories: Vec::new(),
                connections: Vec::new(),
                activities: Vec::new(),
                events: Vec::new(),
                message: format!("home_feed failed: {err}"),
            }
        }
    };

    let chips = service
        .categories()
        .iter()
        .map(|chip| CategoryChip {
            id: chip.id.clone(),
            label: chip.label.clone(),
            selected: chip.label == label,
        })
        .collect::<Vec<_>>();

    let view = service.view(label);
    let connections = view
        .connections
        .iter()
        .map(|connection| {
            let image_uri = match avatars.map(|avatars| avatars.resolve(connection).avatar) {
                Some(AvatarImage::Uri(uri)) => Some(uri),
                _ => None,
            };
            ConnectionCard {
                id: connection.id.clone(),
                name: connection.name.clone(),
                online: connection.is_online(),
                image_uri,
                initial: avatar_initial(&connection.name).to_string(),
            }
        })
        .collect::<Vec<_>>();

    let activities = view
        .activities
        .iter()
        .map(|activity| ActivityCard {
            id: activity.id.clone(),
            title: activity.title.clone(),
            description: activity.description.clone(),
            timestamp: activity.timestamp.clone(),
        })
        .collect::<Vec<_>>();

    let events = view
        .events
        .iter()
        .map(|event| EventCard {
            id: event.id.clone(),
            title: event.title.clone(),
            kind: event.kind.clone(),
            date: event.date.clone(),
            day: event.day.clone(),
            month: event.month.clone(),
        })
        .collect::<Vec<_>>();

    let total = connections.len() + activities.len() + events.len();
    HomeFeedResponse {
        categories: chips,
        connections,
        activities,
        events,
        message: if total == 0 {
            "Nothing here yet.".to_string()
        } else {
            format!("Showing {total} item(s).")
        },
    }
}

fn resolve_db_path() -> PathBuf {
    if let Ok(raw) = std::env::var(DB_PATH_ENV) {
        let trimmed = raw.trim();
        if !trimmed.is_empty() {
            return PathBuf::from(trimmed);
        }
    }
    std::env::temp_dir().join(DB_FILE_NAME)
}

/// Returns the process-wide avatar service.
///
/// Returns `None` when the backing database cannot be opened; the next call
/// retries.
fn avatars() -> Option<&'static AvatarService<SqliteKeyValueStore>> {
    AVATARS
        .get_or_try_init(|| {
            SqliteKeyValueStore::open(resolve_db_path())
                .map(|medium| AvatarService::new(ImageRefStore::new(medium)))
        })
        .map_err(|err| {
            warn!("event=ffi_store_open module=ffi status=error error={err}");
        })
        .ok()
}

#[cfg(test)]
mod tests {
    use super::{
        build_home_feed, core_version, delete_image_ref, get_image_ref, init_logging,
        list_image_refs, ping, put_image_ref,
    };
    use orbit_core::{AvatarService, ImageRefStore, SqliteKeyValueStore};

    fn memory_avatars() -> AvatarService<SqliteKeyValueStore> {
        AvatarService::new(ImageRefStore::new(
            SqliteKeyValueStore::open_in_memory().expect("open in-memory store"),
        ))
    }

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_empty_log_dir() {
        let error = init_logging("info".to_string(), String::new());
        assert!(!error.is_empty());
    }

    #[test]
    fn init_logging_rejects_unsupported_level() {
        let error = init_logging("verbose".to_string(), "/tmp/orbit-logs".to_string());
        assert!(!error.is_empty());
    }

    #[test]
    fn image_ref_put_get_delete_roundtrip() {
        let avatars = memory_avatars();
        let avatars = Some(&avatars);

        let first = put_image_ref(avatars, "3", "file://a.jpg");
        assert!(first.ok, "{}", first.message);
        assert_eq!(first.uri.as_deref(), Some("file://a.jpg"));

        put_image_ref(avatars, "3", "file://b.jpg");
        assert_eq!(get_image_ref(avatars, "3").as_deref(), Some("file://b.jpg"));
        let listed = list_image_refs(avatars);
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].owner_id, "3");

        let removed = delete_image_ref(avatars, "3");
        assert!(removed.ok, "{}", removed.message);
        assert_eq!(get_image_ref(avatars, "3"), None);

        let again = delete_image_ref(avatars, "3");
        assert!(again.ok);
    }

    #[test]
    fn image_ref_put_rejects_blank_uri() {
        let avatars = memory_avatars();
        let response = put_image_ref(Some(&avatars), "3", "  ");
        assert!(!response.ok);
        assert!(response.message.contains("uri"));
    }

    #[test]
    fn unavailable_storage_degrades_every_call() {
        let avatars: Option<&AvatarService<SqliteKeyValueStore>> = None;

        assert_eq!(get_image_ref(avatars, "3"), None);
        assert!(list_image_refs(avatars).is_empty());
        let response = put_image_ref(avatars, "3", "file://a.jpg");
        assert!(!response.ok);
        assert!(response.message.contains("storage unavailable"));

        let feed = build_home_feed(avatars, "Family");
        assert_eq!(feed.connections.len(), 2);
        assert!(feed.connections.iter().all(|card| card.image_uri.is_none()));
    }

    #[test]
    fn home_feed_marks_selected_chip_and_filters_sections() {
        let avatars = memory_avatars();
        let response = build_home_feed(Some(&avatars), "Work");

        let selected = response
            .categories
            .iter()
            .filter(|chip| chip.selected)
            .map(|chip| chip.label.as_str())
            .collect::<Vec<_>>();
        assert_eq!(selected, vec!["Work"]);
        assert_eq!(response.connections.len(), 1);
        assert_eq!(response.connections[0].initial, "B");
        assert_eq!(response.connections[0].image_uri, None);
        assert_eq!(response.activities.len(), 1);
        assert_eq!(response.events[0].title, "Team Building");
    }

    #[test]
    fn home_feed_shows_stored_avatar() {
        let avatars = memory_avatars();
        let family = build_home_feed(Some(&avatars), "Family");
        let dad_id = family.connections[0].id.clone();
        put_image_ref(Some(&avatars), &dad_id, "file://dad.jpg");

        let response = build_home_feed(Some(&avatars), "Family");
        assert_eq!(
            response.connections[0].image_uri.as_deref(),
            Some("file://dad.jpg")
        );
        assert_eq!(response.connections[1].image_uri, None);
    }

    #[test]
    fn home_feed_unknown_category_is_empty() {
        let avatars = memory_avatars();
        let response = build_home_feed(Some(&avatars), "Neighbours");
        assert!(response.connections.is_empty());
        assert!(response.activities.is_empty());
        assert!(response.events.is_empty());
        assert_eq!(response.message, "Nothing here yet.");
        assert!(response.categories.iter().all(|chip| !chip.selected));
    }

    #[test]
    fn home_feed_does_not_trim_labels() {
        let avatars = memory_avatars();
        for label in [" Work", "Work ", "work"] {
            let response = build_home_feed(Some(&avatars), label);
            assert!(response.connections.is_empty(), "label {label:?}");
            assert!(response.activities.is_empty(), "label {label:?}");
            assert!(response.events.is_empty(), "label {label:?}");
            assert!(response.categories.iter().all(|chip| !chip.selected));
        }
    }
}
