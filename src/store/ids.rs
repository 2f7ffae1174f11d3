use crate::models::EntityId;

/// Monotonic id source shared by all collections of one store. Ids are never
/// reused, even after the record holding them is removed.
#[derive(Debug, Default, Clone)]
pub(crate) struct IdAllocator {
    last: u64,
}

impl IdAllocator {
    /// Hand out the next id, starting at 1.
    pub(crate) fn next_id(&mut self) -> EntityId {
        self.last += 1;
        EntityId(self.last)
    }

    /// The most recently issued id, if any.
    pub(crate) fn last_issued(&self) -> Option<EntityId> {
        (self.last > 0).then_some(EntityId(self.last))
    }
}
