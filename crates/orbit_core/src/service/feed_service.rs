//! Home feed use-case service.
//!
//! # Responsibility
//! - Hold the category selector and the feed collections for one screen.
//! - Combine category filtering with avatar resolution for rendering.
//!
//! # Invariants
//! - Category labels are validated unique at construction.
//! - Selecting a label outside the selector is allowed and yields empty views.

use crate::filter::engine::{FeedView, FilterEngine};
use crate::model::feed::{validate_categories, Activity, Category, EventItem, ModelValidationError};
use crate::repo::kv_repo::KeyValueStore;
use crate::service::avatar_service::{AvatarService, ConnectionAvatar};
use log::debug;

/// Render-ready home feed for one active category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeFeed {
    pub active_category: String,
    pub connections: Vec<ConnectionAvatar>,
    pub activities: Vec<Activity>,
    pub events: Vec<EventItem>,
}

/// Home feed service facade.
pub struct HomeFeedService {
    categories: Vec<Category>,
    engine: FilterEngine,
}

impl HomeFeedService {
    /// Creates the service after validating the selector labels.
    pub fn try_new(
        categories: Vec<Category>,
        engine: FilterEngine,
    ) -> Result<Self, ModelValidationError> {
        validate_categories(&categories)?;
        Ok(Self { categories, engine })
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Returns whether `label` is one of the selector entries.
    pub fn is_known_category(&self, label: &str) -> bool {
        self.categories.iter().any(|category| category.label == label)
    }

    /// Returns filtered views without avatar resolution.
    pub fn view(&self, active_label: &str) -> FeedView<'_> {
        let view = self.engine.filter(active_label);
        let counts = view.counts();
        debug!(
            "event=feed_filter module=feed status=ok known_category={} connections={} activities={} events={}",
            self.is_known_category(active_label),
            counts.connections,
            counts.activities,
            counts.events
        );
        view
    }

    /// Filters the feed and resolves connection avatars from `avatars`.
    pub fn render<S: KeyValueStore>(
        &self,
        active_label: &str,
        avatars: &AvatarService<S>,
    ) -> HomeFeed {
        let view = self.view(active_label);
        HomeFeed {
            active_category: active_label.to_string(),
            connections: avatars.resolve_all(&view.connections),
            activities: view.activities.into_owned(),
            events: view.events.into_owned(),
        }
    }
}
