use crate::models::NewEntity;

use super::Store;

const DEMO_MEMBERS: &[&str] = &["Joao", "Maria", "Miguel", "Ruben"];
const DEMO_EVENTS: &[(&str, &str, &str)] = &[
    ("Race", "2024-12-15", "Competition"),
    ("Study", "2024-12-05", "School"),
    ("Class", "2024-12-12", "School"),
    ("Concert", "2024-12-01", "Fun"),
];
const DEMO_EVENT_TYPES: &[&str] = &["Competition", "School", "Fun"];

impl Store {
    /// A store pre-filled with a handful of members, events and event types so
    /// a fresh session has something to browse.
    pub fn with_demo_data() -> Self {
        let mut store = Store::new();
        for name in DEMO_MEMBERS {
            store.add(NewEntity::Member {
                name: (*name).to_string(),
            });
        }
        for (name, date, event_type) in DEMO_EVENTS {
            store.add(NewEntity::Event {
                name: (*name).to_string(),
                date: (*date).to_string(),
                event_type: (*event_type).to_string(),
            });
        }
        for description in DEMO_EVENT_TYPES {
            store.add(NewEntity::EventType {
                description: (*description).to_string(),
            });
        }
        store
    }
}
