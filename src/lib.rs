//! Core library surface for the Events Manager TUI: three in-memory record
//! collections (members, events, event types) browsed as tables and filled
//! through forms.
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod store;
pub mod ui;

pub use config::AppConfig;
pub use error::{FormError, StoreError};
pub use models::{EntityId, EntityKind, Event, EventType, Member, NewEntity, Tabular};
pub use store::Store;

/// The interactive application entry point and state container.
pub use ui::{run_app, App};
