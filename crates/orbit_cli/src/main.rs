//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `orbit_core` linkage without the Flutter/FFI runtime.
//! - Print the demo home feed for one category: `orbit_cli [category]`.

use orbit_core::{sample_feed, ALL_CATEGORY_LABEL};

fn main() {
    println!("orbit_core ping={}", orbit_core::ping());
    println!("orbit_core version={}", orbit_core::core_version());

    let label = std::env::args()
        .nth(1)
        .unwrap_or_else(|| ALL_CATEGORY_LABEL.to_string());
    let (categories, engine) = sample_feed().into_parts();
    let labels = categories
        .iter()
        .map(|category| category.label.as_str())
        .collect::<Vec<_>>();
    println!("categories={}", labels.join(","));

    let view = engine.filter(&label);
    let counts = view.counts();
    println!(
        "category={label} connections={} activities={} events={}",
        counts.connections, counts.activities, counts.events
    );
    for connection in view.connections.iter() {
        println!("connection id={} name={}", connection.id, connection.name);
    }
    for activity in view.activities.iter() {
        println!("activity id={} title={}", activity.id, activity.title);
    }
    for event in view.events.iter() {
        println!(
            "event id={} title={} when={} {} {}",
            event.id, event.title, event.day, event.month, event.date
        );
    }
}
