//! Space stations.

use artemis_shared::ObjectType;

use super::fields::{ObjectFields, ShieldedDsl, ShieldedFields};
use super::{Dsl, WorldObject};
use crate::property::Property;

/// A space station players can dock with.
#[derive(Clone, Debug)]
pub struct ArtemisBase {
    id: i32,
    /// Hull and shield fields.
    pub shielded: ShieldedFields,
    /// Position of the base in the server's base list.
    pub index: Property<i32>,
}

impl WorldObject for ArtemisBase {
    const OBJECT_TYPE: ObjectType = ObjectType::Base;

    fn new(id: i32, timestamp: u64) -> Self {
        Self {
            id,
            shielded: ShieldedFields::new(timestamp),
            index: Property::new(timestamp),
        }
    }

    fn id(&self) -> i32 {
        self.id
    }

    fn fields(&self) -> &ObjectFields {
        &self.shielded.object
    }

    fn merge_from(&self, other: &Self) {
        self.shielded.merge_from(&other.shielded);
        self.index.update_from(&other.index);
    }

    fn is_populated(&self) -> bool {
        self.shielded.is_populated() || self.index.has_value()
    }
}

/// Decoded [`ArtemisBase`] values.
#[derive(Clone, Debug, Default)]
pub struct BaseDsl {
    /// Hull and shield values.
    pub shielded: ShieldedDsl,
    /// Base index.
    pub index: Option<i32>,
}

impl Dsl for BaseDsl {
    type Object = ArtemisBase;

    fn write_into(&mut self, target: &ArtemisBase, timestamp: u64) {
        self.shielded.write_into(&target.shielded, timestamp);
        target.index.put(self.index.take(), timestamp);
    }
}
