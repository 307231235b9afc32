//! # World Objects
//!
//! Objects are created once from a builder and afterwards only change through
//! [`WorldObject::merge_from`]. Identity is `(id, object type)`.
//!
//! ## Builders
//!
//! A [`Dsl`] accumulates the fields present in one decoded record. It is
//! owned by a single parser and reused for every record of its type:
//!
//! ```text
//! parse record ──► dsl fields (Option) ──► build(id, ts) ──► object
//!                                             │
//!                                             └── dsl reset to empty
//! ```
//!
//! A builder is not re-entrant. Finish one record (including the reset that
//! `build` and `apply` perform) before decoding the next.

use std::any::Any;
use std::fmt;
use std::hash::{Hash, Hasher};

use artemis_shared::ObjectType;

use crate::error::{WorldError, WorldResult};

mod base;
mod environment;
mod fields;
mod npc;
mod player;

pub use base::{ArtemisBase, BaseDsl};
pub use environment::{
    ArtemisBlackHole, ArtemisCreature, ArtemisMine, BlackHoleDsl, CreatureDsl, MineDsl,
};
pub use fields::{ObjectDsl, ObjectFields, ShieldedDsl, ShieldedFields, ShipDsl, ShipFields};
pub use npc::{ArtemisNpc, NpcDsl};
pub use player::{ArtemisPlayer, PlayerDsl, TubeDsl, TubeFields};

// =============================================================================
// TRAITS
// =============================================================================

/// A concrete world object type.
pub trait WorldObject: fmt::Debug + Send + Sync + 'static {
    /// Type tag of this object.
    const OBJECT_TYPE: ObjectType;

    /// Creates an object with every property unspecified.
    fn new(id: i32, timestamp: u64) -> Self
    where
        Self: Sized;

    /// Object id.
    fn id(&self) -> i32;

    /// Position and orientation fields.
    fn fields(&self) -> &ObjectFields;

    /// Newest-wins merge of `other` into `self`.
    fn merge_from(&self, other: &Self)
    where
        Self: Sized;

    /// Returns true if any property has a value.
    fn is_populated(&self) -> bool;
}

/// Reusable builder for one object type.
pub trait Dsl: Default {
    /// Object type this builder produces.
    type Object: WorldObject;

    /// Moves every decoded value into `target`, leaving `self` empty.
    fn write_into(&mut self, target: &Self::Object, timestamp: u64);

    /// Materialises a new object and resets the builder.
    fn build(&mut self, id: i32, timestamp: u64) -> Self::Object {
        let object = Self::Object::new(id, timestamp);
        self.write_into(&object, timestamp);
        self.reset();
        object
    }

    /// Writes the decoded values into an empty object and resets the builder.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::AlreadyPopulated`] if `target` holds any value.
    /// The builder is reset either way.
    fn apply(&mut self, target: &Self::Object, timestamp: u64) -> WorldResult<()> {
        if target.is_populated() {
            self.reset();
            return Err(WorldError::AlreadyPopulated { id: target.id() });
        }
        self.write_into(target, timestamp);
        self.reset();
        Ok(())
    }

    /// Clears every field back to "not decoded".
    fn reset(&mut self) {
        *self = Self::default();
    }
}

// =============================================================================
// ARTEMIS OBJECT
// =============================================================================

/// Any object the world model tracks.
#[derive(Clone, Debug)]
pub enum ArtemisObject {
    /// A player ship, possibly built from only one of its records.
    Player(ArtemisPlayer),
    /// A non-player ship.
    Npc(ArtemisNpc),
    /// A space station.
    Base(ArtemisBase),
    /// A mine.
    Mine(ArtemisMine),
    /// A black hole.
    BlackHole(ArtemisBlackHole),
    /// A tracked space creature.
    Creature(ArtemisCreature),
}

macro_rules! each_object {
    ($self:expr, $obj:ident => $body:expr) => {
        match $self {
            ArtemisObject::Player($obj) => $body,
            ArtemisObject::Npc($obj) => $body,
            ArtemisObject::Base($obj) => $body,
            ArtemisObject::Mine($obj) => $body,
            ArtemisObject::BlackHole($obj) => $body,
            ArtemisObject::Creature($obj) => $body,
        }
    };
}

impl ArtemisObject {
    /// Object id.
    #[must_use]
    pub fn id(&self) -> i32 {
        each_object!(self, o => o.id())
    }

    /// Type tag. Player ships report [`ObjectType::PlayerShip`] whichever
    /// record they came from.
    #[must_use]
    pub fn object_type(&self) -> ObjectType {
        match self {
            Self::Player(_) => ArtemisPlayer::OBJECT_TYPE,
            Self::Npc(_) => ArtemisNpc::OBJECT_TYPE,
            Self::Base(_) => ArtemisBase::OBJECT_TYPE,
            Self::Mine(_) => ArtemisMine::OBJECT_TYPE,
            Self::BlackHole(_) => ArtemisBlackHole::OBJECT_TYPE,
            Self::Creature(_) => ArtemisCreature::OBJECT_TYPE,
        }
    }

    /// Position and orientation fields.
    #[must_use]
    pub fn fields(&self) -> &ObjectFields {
        each_object!(self, o => o.fields())
    }

    /// Returns true if any property has a value.
    #[must_use]
    pub fn is_populated(&self) -> bool {
        each_object!(self, o => o.is_populated())
    }

    /// The concrete object, for typed dispatch.
    #[must_use]
    pub fn as_any(&self) -> &dyn Any {
        each_object!(self, o => o as &dyn Any)
    }

    /// Returns the concrete object if it is an `O`.
    #[must_use]
    pub fn downcast_ref<O: WorldObject>(&self) -> Option<&O> {
        self.as_any().downcast_ref::<O>()
    }

    /// Newest-wins merge of `other` into `self`.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::TypeMismatch`] if the two objects differ in id
    /// or type.
    pub fn merge_from(&self, other: &Self) -> WorldResult<()> {
        match (self, other) {
            (Self::Player(a), Self::Player(b)) if a.id() == b.id() => a.merge_from(b),
            (Self::Npc(a), Self::Npc(b)) if a.id() == b.id() => a.merge_from(b),
            (Self::Base(a), Self::Base(b)) if a.id() == b.id() => a.merge_from(b),
            (Self::Mine(a), Self::Mine(b)) if a.id() == b.id() => a.merge_from(b),
            (Self::BlackHole(a), Self::BlackHole(b)) if a.id() == b.id() => a.merge_from(b),
            (Self::Creature(a), Self::Creature(b)) if a.id() == b.id() => a.merge_from(b),
            _ => {
                return Err(WorldError::TypeMismatch {
                    id: self.id(),
                    expected: self.object_type(),
                    found: other.object_type(),
                })
            }
        }
        Ok(())
    }
}

impl PartialEq for ArtemisObject {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id() && self.object_type() == other.object_type()
    }
}

impl Eq for ArtemisObject {}

impl Hash for ArtemisObject {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id().hash(state);
        self.object_type().hash(state);
    }
}

macro_rules! impl_from_object {
    ($($variant:ident($ty:ty)),+ $(,)?) => {
        $(
            impl From<$ty> for ArtemisObject {
                fn from(object: $ty) -> Self {
                    Self::$variant(object)
                }
            }
        )+
    };
}

impl_from_object!(
    Player(ArtemisPlayer),
    Npc(ArtemisNpc),
    Base(ArtemisBase),
    Mine(ArtemisMine),
    BlackHole(ArtemisBlackHole),
    Creature(ArtemisCreature),
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_is_id_and_type() {
        let a: ArtemisObject = ArtemisMine::new(5, 0).into();
        let b: ArtemisObject = {
            let mine = ArtemisMine::new(5, 0);
            mine.object.x.set(100.0, 1);
            mine.into()
        };
        let c: ArtemisObject = ArtemisBlackHole::new(5, 0).into();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_merge_rejects_mismatch() {
        let mine: ArtemisObject = ArtemisMine::new(5, 0).into();
        let hole: ArtemisObject = ArtemisBlackHole::new(5, 0).into();
        let other_mine: ArtemisObject = ArtemisMine::new(6, 0).into();
        assert!(matches!(
            mine.merge_from(&hole),
            Err(WorldError::TypeMismatch { id: 5, .. })
        ));
        assert!(mine.merge_from(&other_mine).is_err());
    }

    #[test]
    fn test_downcast() {
        let object: ArtemisObject = ArtemisBase::new(9, 0).into();
        assert!(object.downcast_ref::<ArtemisBase>().is_some());
        assert!(object.downcast_ref::<ArtemisNpc>().is_none());
        assert_eq!(object.object_type(), ObjectType::Base);
    }

    #[test]
    fn test_apply_to_populated_fails() {
        let mut dsl = MineDsl::default();
        dsl.object.x = Some(10.0);
        let mine = dsl.build(3, 1);
        assert!(mine.is_populated());

        dsl.object.z = Some(20.0);
        assert_eq!(
            dsl.apply(&mine, 2),
            Err(WorldError::AlreadyPopulated { id: 3 })
        );
        assert!(dsl.object.z.is_none());
        assert!(!mine.object.z.has_value());

        let empty = ArtemisMine::new(4, 0);
        dsl.object.z = Some(20.0);
        assert_eq!(dsl.apply(&empty, 2), Ok(()));
        assert_eq!(empty.object.z.value(), 20.0);
    }
}
