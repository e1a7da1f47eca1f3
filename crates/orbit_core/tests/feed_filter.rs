use orbit_core::{
    filter_by_category, filter_feed, sample_feed, Activity, Categorized, Connection, EventItem,
    FeedCounts, FilterEngine, HomeFeedService,
};
use std::borrow::Cow;

fn activity(id: &str, category: &str) -> Activity {
    Activity {
        id: id.to_string(),
        title: format!("activity {id}"),
        description: String::new(),
        timestamp: "1h ago".to_string(),
        category: category.to_string(),
    }
}

fn event(id: &str, category: &str) -> EventItem {
    EventItem {
        id: id.to_string(),
        title: format!("event {id}"),
        kind: "Meetup".to_string(),
        date: "6:00 PM".to_string(),
        day: "01".to_string(),
        month: "JAN".to_string(),
        category: category.to_string(),
    }
}

fn mixed_connections() -> Vec<Connection> {
    vec![
        Connection::new("1", "Dad", "Family"),
        Connection::new("2", "Ana", "Work"),
        Connection::new("3", "Boss", "Work"),
        Connection::new("4", "Kai", "Friends"),
        Connection::new("5", "Lee", "work"),
        Connection::new("6", "Mo", "Work"),
    ]
}

#[test]
fn work_filter_returns_only_matching_connection() {
    let connections = vec![
        Connection::new("3", "Boss", "Work"),
        Connection::new("4", "Kai", "Friends"),
    ];

    let view = filter_feed("Work", &connections, &[], &[]);
    assert_eq!(&*view.connections, &[Connection::new("3", "Boss", "Work")]);
}

#[test]
fn all_label_is_identity_for_every_section() {
    let connections = mixed_connections();
    let activities = vec![activity("1", "Work"), activity("2", "Family")];
    let events = vec![event("1", "Family"), event("2", "Friends")];

    let view = filter_feed("All", &connections, &activities, &events);

    assert!(matches!(view.connections, Cow::Borrowed(_)));
    assert_eq!(&*view.connections, connections.as_slice());
    assert_eq!(&*view.activities, activities.as_slice());
    assert_eq!(&*view.events, events.as_slice());
}

#[test]
fn filtered_items_match_label_and_keep_input_order() {
    let connections = mixed_connections();

    let view = filter_by_category("Work", &connections);
    let ids = view.iter().map(|item| item.id.as_str()).collect::<Vec<_>>();

    assert_eq!(ids, vec!["2", "3", "6"]);
    assert!(view.iter().all(|item| item.category() == "Work"));
}

#[test]
fn category_match_is_case_sensitive() {
    let connections = mixed_connections();

    let view = filter_by_category("work", &connections);
    assert_eq!(view.len(), 1);
    assert_eq!(view[0].id, "5");
}

#[test]
fn filtering_is_idempotent() {
    let connections = mixed_connections();
    let activities = vec![activity("1", "Work"), activity("2", "Family"), activity("3", "Work")];

    for label in ["All", "Work", "Family", "Unknown"] {
        let once = filter_by_category(label, &connections);
        let twice = filter_by_category(label, &*once);
        assert_eq!(&*once, &*twice, "label {label}");

        let once = filter_by_category(label, &activities);
        let twice = filter_by_category(label, &*once);
        assert_eq!(&*once, &*twice, "label {label}");
    }
}

#[test]
fn unknown_label_yields_three_empty_sections() {
    let connections = mixed_connections();
    let activities = vec![activity("1", "Work")];
    let events = vec![event("1", "Family")];

    let view = filter_feed("Neighbours", &connections, &activities, &events);

    assert!(view.is_empty());
    assert_eq!(view.counts(), FeedCounts::default());
}

#[test]
fn filtering_does_not_mutate_sources() {
    let connections = mixed_connections();
    let snapshot = connections.clone();

    let _ = filter_by_category("Family", &connections);
    let _ = filter_by_category("All", &connections);

    assert_eq!(connections, snapshot);
}

#[test]
fn filter_engine_over_sample_feed_splits_family_and_work() {
    let (_, engine) = sample_feed().into_parts();

    let family = engine.filter("Family");
    assert_eq!(
        family.counts(),
        FeedCounts {
            connections: 2,
            activities: 1,
            events: 1,
        }
    );
    assert_eq!(family.events[0].title, "Sister's Birthday");

    let work = engine.filter("Work");
    assert_eq!(work.connections[0].name, "Boss");
    assert_eq!(work.activities[0].title, "Sarah from Marketing");
    assert_eq!(work.events[0].title, "Team Building");

    // The sample selector has a Friends entry but no content tagged with it.
    assert!(engine.filter("Friends").is_empty());
    assert_eq!(engine.filter("All").counts().total(), 7);
}

#[test]
fn home_feed_service_rejects_duplicate_selector_labels() {
    let mut sample = sample_feed();
    sample.categories.push(orbit_core::Category::new("5", "Work"));
    let (categories, engine) = sample.into_parts();

    assert!(HomeFeedService::try_new(categories, engine).is_err());
}

#[test]
fn home_feed_service_reports_known_categories() {
    let (categories, engine) = sample_feed().into_parts();
    let service = HomeFeedService::try_new(categories, engine).unwrap();

    assert!(service.is_known_category("Friends"));
    assert!(!service.is_known_category("friends"));
    assert_eq!(service.view("Family").connections.len(), 2);
}

#[test]
fn empty_engine_filters_to_empty_views() {
    let engine = FilterEngine::default();
    assert!(engine.filter("All").is_empty());
    assert!(engine.filter("Work").is_empty());
}
