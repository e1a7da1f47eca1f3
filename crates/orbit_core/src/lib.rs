//! Core domain logic for Orbit.
//! This crate owns feed filtering, contact rules and image reference storage.

pub mod db;
pub mod filter;
pub mod logging;
pub mod model;
pub mod repo;
pub mod sample;
pub mod service;

pub use filter::engine::{filter_by_category, filter_feed, FeedCounts, FeedView, FilterEngine};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::contact::{contacts_for_tab, Contact, ContactDraft, ContactTab, RelationshipType};
pub use model::feed::{
    validate_categories, Activity, Categorized, Category, Connection, ConnectionStatus,
    EventItem, ModelValidationError, ALL_CATEGORY_LABEL,
};
pub use model::image_ref::ImageRef;
pub use model::todo::{TodoItem, TodoList};
pub use repo::image_ref_repo::{
    ImageRefError, ImageRefResult, ImageRefStore, StorageFailure, IMAGE_STORAGE_KEY,
};
pub use repo::kv_repo::{KeyValueStore, KvError, KvResult, SqliteKeyValueStore};
pub use sample::{sample_feed, SampleFeed};
pub use service::avatar_service::{
    avatar_initial, AvatarError, AvatarImage, AvatarService, ConnectionAvatar, ImagePicker,
    PickOutcome,
};
pub use service::feed_service::{HomeFeed, HomeFeedService};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
