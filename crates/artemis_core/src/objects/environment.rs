//! Mines, black holes and creatures: objects without hull or shields.

use artemis_shared::{CreatureType, ObjectType};

use super::fields::{ObjectDsl, ObjectFields};
use super::{Dsl, WorldObject};
use crate::property::Property;

/// Declares an object made only of [`ObjectFields`] and its builder.
macro_rules! plain_object {
    ($(#[$meta:meta])* $name:ident, $dsl:ident, $object_type:expr) => {
        $(#[$meta])*
        #[derive(Clone, Debug)]
        pub struct $name {
            id: i32,
            /// Position and orientation.
            pub object: ObjectFields,
        }

        impl WorldObject for $name {
            const OBJECT_TYPE: ObjectType = $object_type;

            fn new(id: i32, timestamp: u64) -> Self {
                Self {
                    id,
                    object: ObjectFields::new(timestamp),
                }
            }

            fn id(&self) -> i32 {
                self.id
            }

            fn fields(&self) -> &ObjectFields {
                &self.object
            }

            fn merge_from(&self, other: &Self) {
                self.object.merge_from(&other.object);
            }

            fn is_populated(&self) -> bool {
                self.object.is_populated()
            }
        }

        #[doc = concat!("Decoded [`", stringify!($name), "`] values.")]
        #[derive(Clone, Debug, Default)]
        pub struct $dsl {
            /// Position and orientation.
            pub object: ObjectDsl,
        }

        impl Dsl for $dsl {
            type Object = $name;

            fn write_into(&mut self, target: &$name, timestamp: u64) {
                self.object.write_into(&target.object, timestamp);
            }
        }
    };
}

plain_object!(
    /// A mine.
    ArtemisMine,
    MineDsl,
    ObjectType::Mine
);

plain_object!(
    /// A black hole.
    ArtemisBlackHole,
    BlackHoleDsl,
    ObjectType::BlackHole
);

/// A space creature. Only [`CreatureType::Typhon`] is tracked.
#[derive(Clone, Debug)]
pub struct ArtemisCreature {
    id: i32,
    /// Position and orientation.
    pub object: ObjectFields,
    /// Species.
    pub creature_type: Property<Option<CreatureType>>,
    /// Remaining health.
    pub health: Property<f32>,
    /// Full health.
    pub max_health: Property<f32>,
}

impl WorldObject for ArtemisCreature {
    const OBJECT_TYPE: ObjectType = ObjectType::Creature;

    fn new(id: i32, timestamp: u64) -> Self {
        Self {
            id,
            object: ObjectFields::new(timestamp),
            creature_type: Property::new(timestamp),
            health: Property::new(timestamp),
            max_health: Property::new(timestamp),
        }
    }

    fn id(&self) -> i32 {
        self.id
    }

    fn fields(&self) -> &ObjectFields {
        &self.object
    }

    fn merge_from(&self, other: &Self) {
        self.object.merge_from(&other.object);
        self.creature_type.update_from(&other.creature_type);
        self.health.update_from(&other.health);
        self.max_health.update_from(&other.max_health);
    }

    fn is_populated(&self) -> bool {
        self.object.is_populated()
            || self.creature_type.has_value()
            || self.health.has_value()
            || self.max_health.has_value()
    }
}

/// Decoded [`ArtemisCreature`] values.
#[derive(Clone, Debug, Default)]
pub struct CreatureDsl {
    /// Position and orientation.
    pub object: ObjectDsl,
    /// Species.
    pub creature_type: Option<CreatureType>,
    /// Remaining health.
    pub health: Option<f32>,
    /// Full health.
    pub max_health: Option<f32>,
}

impl Dsl for CreatureDsl {
    type Object = ArtemisCreature;

    fn write_into(&mut self, target: &ArtemisCreature, timestamp: u64) {
        self.object.write_into(&target.object, timestamp);
        target.creature_type.put(self.creature_type.take(), timestamp);
        target.health.put(self.health.take(), timestamp);
        target.max_health.put(self.max_health.take(), timestamp);
    }
}
