//! # Object Store
//!
//! The caller-owned collection of live objects. Decoded updates are either
//! inserted as new objects or merged into the existing object with the same
//! id; delete notifications remove them.

use std::collections::HashMap;

use artemis_shared::ObjectType;
use tracing::{debug, warn};

use crate::error::WorldResult;
use crate::objects::{ArtemisObject, ArtemisPlayer, WorldObject};

/// What [`ObjectStore::apply_update`] did with an update.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreOutcome {
    /// The id was new; the update became the object.
    Inserted,
    /// The update was merged into the existing object.
    Merged,
}

/// Live objects keyed by id.
#[derive(Debug, Default)]
pub struct ObjectStore {
    objects: HashMap<i32, ArtemisObject>,
}

impl ObjectStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `update` or merges it into the object with the same id.
    ///
    /// # Errors
    ///
    /// Returns [`crate::WorldError::TypeMismatch`] if the id is already held
    /// by an object of another type. The store is left unchanged.
    pub fn apply_update(&mut self, update: ArtemisObject) -> WorldResult<StoreOutcome> {
        match self.objects.get(&update.id()) {
            Some(existing) => {
                if let Err(e) = existing.merge_from(&update) {
                    warn!("Rejected update for object {}: {}", update.id(), e);
                    return Err(e);
                }
                Ok(StoreOutcome::Merged)
            }
            None => {
                debug!("New {} object {}", update.object_type(), update.id());
                self.objects.insert(update.id(), update);
                Ok(StoreOutcome::Inserted)
            }
        }
    }

    /// Removes the object with `id` if it has type `object_type`.
    ///
    /// Player ships match any of the four player record types.
    pub fn remove(&mut self, object_type: ObjectType, id: i32) -> Option<ArtemisObject> {
        let stored = self.objects.get(&id)?.object_type();
        let matches = stored == object_type
            || (stored == ObjectType::PlayerShip && object_type.is_player_record());
        if !matches {
            return None;
        }
        debug!("Removed {} object {}", stored, id);
        self.objects.remove(&id)
    }

    /// Object with `id`.
    #[must_use]
    pub fn get(&self, id: i32) -> Option<&ArtemisObject> {
        self.objects.get(&id)
    }

    /// Concrete object with `id`, if it is an `O`.
    #[must_use]
    pub fn get_as<O: WorldObject>(&self, id: i32) -> Option<&O> {
        self.get(id).and_then(ArtemisObject::downcast_ref)
    }

    /// Every object of `object_type`.
    pub fn iter_type(&self, object_type: ObjectType) -> impl Iterator<Item = &ArtemisObject> {
        self.objects
            .values()
            .filter(move |o| o.object_type() == object_type)
    }

    /// Player ship with the given ship index, if known.
    #[must_use]
    pub fn player_by_index(&self, ship_index: i8) -> Option<&ArtemisPlayer> {
        self.objects
            .values()
            .filter_map(ArtemisObject::downcast_ref::<ArtemisPlayer>)
            .find(|p| p.ship_index.value() == ship_index)
    }

    /// Number of live objects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Returns true if the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Drops every object, e.g. when a game ends.
    pub fn clear(&mut self) {
        self.objects.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objects::{ArtemisBase, ArtemisMine, BaseDsl, Dsl, MineDsl};
    use crate::WorldError;

    #[test]
    fn test_insert_then_merge() {
        let mut store = ObjectStore::new();
        let mut dsl = BaseDsl::default();
        dsl.shielded.object.name = Some("DS1".to_owned());
        let first = dsl.build(100, 1);
        assert_eq!(store.apply_update(first.into()), Ok(StoreOutcome::Inserted));

        dsl.shielded.shields_front = Some(500.0);
        let second = dsl.build(100, 2);
        assert_eq!(store.apply_update(second.into()), Ok(StoreOutcome::Merged));

        let base = store.get_as::<ArtemisBase>(100).unwrap();
        assert_eq!(base.fields().name.value().as_deref(), Some("DS1"));
        assert_eq!(base.shielded.shields_front.value(), 500.0);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_type_conflict() {
        let mut store = ObjectStore::new();
        store
            .apply_update(ArtemisBase::new(5, 0).into())
            .unwrap();
        let result = store.apply_update(MineDsl::default().build(5, 1).into());
        assert!(matches!(result, Err(WorldError::TypeMismatch { .. })));
        assert!(store.get_as::<ArtemisBase>(5).is_some());
    }

    #[test]
    fn test_remove_checks_type() {
        let mut store = ObjectStore::new();
        store.apply_update(ArtemisMine::new(8, 0).into()).unwrap();
        assert!(store.remove(ObjectType::Base, 8).is_none());
        assert!(store.remove(ObjectType::Mine, 8).is_some());
        assert!(store.is_empty());
    }

    #[test]
    fn test_player_records_share_identity() {
        let mut store = ObjectStore::new();
        store.apply_update(ArtemisPlayer::new(1, 0).into()).unwrap();
        assert_eq!(store.iter_type(ObjectType::PlayerShip).count(), 1);
        assert!(store.remove(ObjectType::WeaponsConsole, 1).is_some());
    }
}
