//! Entity storage
//!
//! Entities are kept sorted by id so iteration order (and with it every
//! collision dispatch) is deterministic. The registry also owns the single
//! extra-paddle slot; removing the occupant vacates the slot in the same call.

use std::collections::BTreeMap;

use super::entity::{Body, Entity, EntityId, EntityKind};

#[derive(Debug, Clone, Default)]
pub struct EntityRegistry {
    entities: BTreeMap<EntityId, Entity>,
    next_id: EntityId,
    extra_paddle: Option<EntityId>,
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self {
            entities: BTreeMap::new(),
            next_id: 1,
            extra_paddle: None,
        }
    }

    /// Register a new entity and return its id
    pub fn add(&mut self, body: Body, kind: EntityKind) -> EntityId {
        let id = self.next_id.max(1);
        self.next_id = id + 1;
        self.entities.insert(id, Entity { id, body, kind });
        id
    }

    /// Remove an entity
    ///
    /// Returns true iff it was present. Removing an absent entity is a no-op.
    pub fn remove(&mut self, id: EntityId) -> bool {
        if self.entities.remove(&id).is_none() {
            return false;
        }
        if self.extra_paddle == Some(id) {
            self.extra_paddle = None;
        }
        true
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.entities.contains_key(&id)
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(&id)
    }

    /// Entities in id order
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.entities.values_mut()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Number of entities matching a predicate
    pub fn count(&self, pred: impl Fn(&Entity) -> bool) -> usize {
        self.entities.values().filter(|e| pred(e)).count()
    }

    /// Current occupant of the extra-paddle slot
    pub fn extra_paddle(&self) -> Option<EntityId> {
        self.extra_paddle
    }

    /// Fill or clear the extra-paddle slot
    ///
    /// Callers check the slot is empty before filling it.
    pub fn set_extra_paddle(&mut self, paddle: Option<EntityId>) {
        debug_assert!(
            paddle.is_none() || self.extra_paddle.is_none() || self.extra_paddle == paddle,
            "extra paddle slot already occupied"
        );
        debug_assert!(paddle.is_none_or(|id| self.contains(id)));
        self.extra_paddle = paddle;
    }
}
