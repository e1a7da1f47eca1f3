//! Category filter over the three home feed collections.
//!
//! # Responsibility
//! - Produce the connection/activity/event views for an active category.
//!
//! # Invariants
//! - `"All"` returns borrowed views of the inputs, unchanged and uncopied.
//! - Any other label yields order-preserving subsequences whose `category`
//!   equals the label exactly (case-sensitive).
//! - Inputs are never mutated; unknown labels yield empty views, not errors.

use crate::model::feed::{Activity, Categorized, Connection, EventItem, ALL_CATEGORY_LABEL};
use std::borrow::Cow;

/// Filters one collection by category label.
///
/// Returns `Cow::Borrowed(items)` for the `"All"` sentinel, otherwise an owned
/// subsequence of matching items in input order.
pub fn filter_by_category<'a, T>(active_label: &str, items: &'a [T]) -> Cow<'a, [T]>
where
    T: Categorized + Clone,
{
    if active_label == ALL_CATEGORY_LABEL {
        return Cow::Borrowed(items);
    }

    Cow::Owned(
        items
            .iter()
            .filter(|item| item.category() == active_label)
            .cloned()
            .collect(),
    )
}

/// Filtered projection of the home feed for one active category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedView<'a> {
    pub connections: Cow<'a, [Connection]>,
    pub activities: Cow<'a, [Activity]>,
    pub events: Cow<'a, [EventItem]>,
}

/// Per-section item counts of a [`FeedView`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FeedCounts {
    pub connections: usize,
    pub activities: usize,
    pub events: usize,
}

impl FeedCounts {
    pub fn total(&self) -> usize {
        self.connections + self.activities + self.events
    }
}

impl FeedView<'_> {
    pub fn counts(&self) -> FeedCounts {
        FeedCounts {
            connections: self.connections.len(),
            activities: self.activities.len(),
            events: self.events.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.counts().total() == 0
    }
}

/// Filters all three feed collections by the same active label.
pub fn filter_feed<'a>(
    active_label: &str,
    connections: &'a [Connection],
    activities: &'a [Activity],
    events: &'a [EventItem],
) -> FeedView<'a> {
    FeedView {
        connections: filter_by_category(active_label, connections),
        activities: filter_by_category(active_label, activities),
        events: filter_by_category(active_label, events),
    }
}

/// Filter engine over constructor-supplied feed collections.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterEngine {
    connections: Vec<Connection>,
    activities: Vec<Activity>,
    events: Vec<EventItem>,
}

impl FilterEngine {
    pub fn new(
        connections: Vec<Connection>,
        activities: Vec<Activity>,
        events: Vec<EventItem>,
    ) -> Self {
        Self {
            connections,
            activities,
            events,
        }
    }

    /// Returns the views for `active_label`.
    pub fn filter(&self, active_label: &str) -> FeedView<'_> {
        filter_feed(
            active_label,
            &self.connections,
            &self.activities,
            &self.events,
        )
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn activities(&self) -> &[Activity] {
        &self.activities
    }

    pub fn events(&self) -> &[EventItem] {
        &self.events
    }
}

#[cfg(test)]
mod tests {
    use super::filter_by_category;
    use crate::model::feed::Connection;
    use std::borrow::Cow;

    #[test]
    fn all_label_borrows_input() {
        let items = vec![Connection::new("1", "Dad", "Family")];
        let view = filter_by_category("All", &items);
        assert!(matches!(view, Cow::Borrowed(_)));
    }

    #[test]
    fn lowercase_all_is_an_ordinary_label() {
        let items = vec![Connection::new("1", "Dad", "Family")];
        let view = filter_by_category("all", &items);
        assert!(view.is_empty());
    }
}
