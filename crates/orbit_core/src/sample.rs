//! Built-in demo content for the home screen.

use crate::filter::engine::FilterEngine;
use crate::model::feed::{Activity, Category, Connection, ConnectionStatus, EventItem};

/// Demo selector entries and feed collections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleFeed {
    pub categories: Vec<Category>,
    pub connections: Vec<Connection>,
    pub activities: Vec<Activity>,
    pub events: Vec<EventItem>,
}

impl SampleFeed {
    /// Moves the collections into a filter engine, returning the selector too.
    pub fn into_parts(self) -> (Vec<Category>, FilterEngine) {
        (
            self.categories,
            FilterEngine::new(self.connections, self.activities, self.events),
        )
    }
}

/// Returns a fresh copy of the demo feed.
pub fn sample_feed() -> SampleFeed {
    SampleFeed {
        categories: vec![
            Category::new("1", "All"),
            Category::new("2", "Family"),
            Category::new("3", "Work"),
            Category::new("4", "Friends"),
        ],
        connections: vec![
            Connection::new("1", "Dad", "Family").with_status(ConnectionStatus::Online),
            Connection::new("2", "Mom", "Family").with_status(ConnectionStatus::Online),
            Connection::new("3", "Boss", "Work"),
        ],
        activities: vec![
            Activity {
                id: "1".to_string(),
                title: "Sarah from Marketing".to_string(),
                description: "Shared a project update".to_string(),
                timestamp: "2h ago".to_string(),
                category: "Work".to_string(),
            },
            Activity {
                id: "2".to_string(),
                title: "Family Dinner".to_string(),
                description: "Event reminder for tomorrow".to_string(),
                timestamp: "5h ago".to_string(),
                category: "Family".to_string(),
            },
        ],
        events: vec![
            EventItem {
                id: "1".to_string(),
                title: "Team Building".to_string(),
                kind: "Office Party".to_string(),
                date: "3:00 PM".to_string(),
                day: "15".to_string(),
                month: "MAR".to_string(),
                category: "Work".to_string(),
            },
            EventItem {
                id: "2".to_string(),
                title: "Sister's Birthday".to_string(),
                kind: "Family Event".to_string(),
                date: "6:00 PM".to_string(),
                day: "18".to_string(),
                month: "MAR".to_string(),
                category: "Family".to_string(),
            },
        ],
    }
}
