//! Domain records managed by the application. Each record is a small data
//! holder; the [`Tabular`] trait is the only behavior they share, and it is
//! what the table view uses to turn a collection into header and row cells.
//! Ids are handed out by the store, never by the records themselves.

use std::fmt;

/// Identifier shared by every record kind. Values come from a single counter
/// owned by the store, so an id is unique across all three collections. The
/// default `EntityId(0)` is never handed out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntityId(pub u64);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The closed set of record kinds. Every per-kind decision (columns, titles,
/// which collection to touch) is an exhaustive match over this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Member,
    Event,
    EventType,
}

impl EntityKind {
    /// All kinds in the order their switch keys are numbered.
    pub const ALL: [EntityKind; 3] = [
        EntityKind::Member,
        EntityKind::Event,
        EntityKind::EventType,
    ];

    /// Header labels, identifier column first.
    pub fn columns(self) -> &'static [&'static str] {
        match self {
            EntityKind::Member => &["Id", "Name"],
            EntityKind::Event => &["Id", "Description", "Date", "Event Type"],
            EntityKind::EventType => &["Id", "Description"],
        }
    }

    /// Plural heading shown above the table.
    pub fn title(self) -> &'static str {
        match self {
            EntityKind::Member => "Members",
            EntityKind::Event => "Events",
            EntityKind::EventType => "Event Types",
        }
    }

    /// Singular noun used in status messages.
    pub fn singular(self) -> &'static str {
        match self {
            EntityKind::Member => "member",
            EntityKind::Event => "event",
            EntityKind::EventType => "event type",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Capability of being rendered as one table row. Implementors must produce
/// exactly one cell per label in `KIND.columns()`, id first.
pub trait Tabular {
    const KIND: EntityKind;

    fn id(&self) -> EntityId;

    fn cells(&self) -> Vec<String>;

    fn columns() -> &'static [&'static str] {
        Self::KIND.columns()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// A person taking part in events.
pub struct Member {
    pub id: EntityId,
    pub name: String,
}

impl Member {
    pub fn new(id: EntityId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

impl Tabular for Member {
    const KIND: EntityKind = EntityKind::Member;

    fn id(&self) -> EntityId {
        self.id
    }

    fn cells(&self) -> Vec<String> {
        vec![self.id.to_string(), self.name.clone()]
    }
}

impl fmt::Display for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// A dated occurrence. `event_type` holds the description of an event type as
/// free text; removing that event type leaves the text in place.
pub struct Event {
    pub id: EntityId,
    pub name: String,
    /// ISO calendar date (`YYYY-MM-DD`).
    pub date: String,
    pub event_type: String,
}

impl Event {
    pub fn new(
        id: EntityId,
        name: impl Into<String>,
        date: impl Into<String>,
        event_type: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            date: date.into(),
            event_type: event_type.into(),
        }
    }
}

impl Tabular for Event {
    const KIND: EntityKind = EntityKind::Event;

    fn id(&self) -> EntityId {
        self.id
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.date.clone(),
            self.event_type.clone(),
        ]
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.date)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// A category of event, identified to users by its description.
pub struct EventType {
    pub id: EntityId,
    pub description: String,
}

impl EventType {
    pub fn new(id: EntityId, description: impl Into<String>) -> Self {
        Self {
            id,
            description: description.into(),
        }
    }
}

impl Tabular for EventType {
    const KIND: EntityKind = EntityKind::EventType;

    fn id(&self) -> EntityId {
        self.id
    }

    fn cells(&self) -> Vec<String> {
        vec![self.id.to_string(), self.description.clone()]
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description)
    }
}

/// Field values for a record that does not exist yet. The variant decides
/// which collection receives it; the store attaches the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NewEntity {
    Member {
        name: String,
    },
    Event {
        name: String,
        date: String,
        event_type: String,
    },
    EventType {
        description: String,
    },
}

impl NewEntity {
    pub fn kind(&self) -> EntityKind {
        match self {
            NewEntity::Member { .. } => EntityKind::Member,
            NewEntity::Event { .. } => EntityKind::Event,
            NewEntity::EventType { .. } => EntityKind::EventType,
        }
    }
}
