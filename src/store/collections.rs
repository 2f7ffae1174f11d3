use log::debug;

use crate::error::StoreError;
use crate::models::{EntityId, EntityKind, Event, EventType, Member, NewEntity};

use super::ids::IdAllocator;

/// The three ordered collections plus the id counter they share. Insertion
/// order is display order, so a row index in a rendered table is also the
/// position inside the matching collection.
#[derive(Debug, Default, Clone)]
pub struct Store {
    ids: IdAllocator,
    members: Vec<Member>,
    events: Vec<Event>,
    event_types: Vec<EventType>,
}

impl Store {
    /// Empty collections with the id counter at its start.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the record described by `entity`, give it a fresh id and append
    /// it to its collection. Field contents are taken as-is; presence checks
    /// belong to the forms.
    pub fn add(&mut self, entity: NewEntity) -> EntityId {
        let id = self.ids.next_id();
        let kind = entity.kind();
        match entity {
            NewEntity::Member { name } => self.members.push(Member::new(id, name)),
            NewEntity::Event {
                name,
                date,
                event_type,
            } => self.events.push(Event::new(id, name, date, event_type)),
            NewEntity::EventType { description } => {
                self.event_types.push(EventType::new(id, description))
            }
        }
        debug!("event=entity_added kind={kind:?} id={id}");
        id
    }

    /// Delete the record at `index` in the collection for `kind`. Indexes past
    /// the end are reported and nothing is removed.
    pub fn remove(&mut self, kind: EntityKind, index: usize) -> Result<(), StoreError> {
        let len = self.len(kind);
        if index >= len {
            return Err(StoreError::IndexOutOfRange { kind, index, len });
        }

        let id = match kind {
            EntityKind::Member => self.members.remove(index).id,
            EntityKind::Event => self.events.remove(index).id,
            EntityKind::EventType => self.event_types.remove(index).id,
        };
        debug!("event=entity_removed kind={kind:?} id={id} index={index}");
        Ok(())
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn event_types(&self) -> &[EventType] {
        &self.event_types
    }

    pub fn len(&self, kind: EntityKind) -> usize {
        match kind {
            EntityKind::Member => self.members.len(),
            EntityKind::Event => self.events.len(),
            EntityKind::EventType => self.event_types.len(),
        }
    }

    pub fn is_empty(&self, kind: EntityKind) -> bool {
        self.len(kind) == 0
    }

    /// Descriptions of the current event types, in collection order. Forms
    /// take a snapshot of this list when they are built.
    pub fn event_type_descriptions(&self) -> Vec<String> {
        self.event_types
            .iter()
            .map(|event_type| event_type.description.clone())
            .collect()
    }

    /// The most recently issued id, if any record was ever added.
    pub fn last_id(&self) -> Option<EntityId> {
        self.ids.last_issued()
    }
}
