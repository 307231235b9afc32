//! Non-player ships.

use artemis_shared::constants::{FREQUENCY_COUNT, SYSTEM_COUNT};
use artemis_shared::{BeamFrequency, BoolState, ObjectType, ShipSystem};

use super::fields::{ObjectFields, ShipDsl, ShipFields};
use super::{Dsl, WorldObject};
use crate::property::Property;

/// A non-player ship.
#[derive(Clone, Debug)]
pub struct ArtemisNpc {
    id: i32,
    /// Movement, hull and shield fields.
    pub ship: ShipFields,
    /// Hostile to the players.
    pub is_enemy: Property<BoolState>,
    /// Has surrendered.
    pub surrendered: Property<BoolState>,
    /// Fleet the ship belongs to.
    pub fleet_number: Property<i32>,
    /// Special ability bitmask.
    pub special_abilities: Property<i32>,
    /// Active special abilities bitmask.
    pub special_state: Property<i32>,
    /// Sides that completed a first scan, as a bitmask.
    pub single_scan: Property<i32>,
    /// Sides that completed a second scan, as a bitmask.
    pub double_scan: Property<i32>,
    /// Tagged by a player probe.
    pub tagged: Property<BoolState>,
    /// Damage per system, in [`ShipSystem`] order.
    pub system_damage: [Property<f32>; SYSTEM_COUNT],
    /// Resistance per beam frequency, in [`BeamFrequency`] order.
    pub frequency_resist: [Property<f32>; FREQUENCY_COUNT],
}

impl ArtemisNpc {
    /// Damage to one system.
    #[must_use]
    pub fn damage(&self, system: ShipSystem) -> &Property<f32> {
        &self.system_damage[usize::from(system.id())]
    }

    /// Resistance to one beam frequency.
    #[must_use]
    pub fn resistance(&self, frequency: BeamFrequency) -> &Property<f32> {
        &self.frequency_resist[usize::from(frequency.id())]
    }
}

impl WorldObject for ArtemisNpc {
    const OBJECT_TYPE: ObjectType = ObjectType::NpcShip;

    fn new(id: i32, timestamp: u64) -> Self {
        Self {
            id,
            ship: ShipFields::new(timestamp),
            is_enemy: Property::new(timestamp),
            surrendered: Property::new(timestamp),
            fleet_number: Property::new(timestamp),
            special_abilities: Property::new(timestamp),
            special_state: Property::new(timestamp),
            single_scan: Property::new(timestamp),
            double_scan: Property::new(timestamp),
            tagged: Property::new(timestamp),
            system_damage: std::array::from_fn(|_| Property::new(timestamp)),
            frequency_resist: std::array::from_fn(|_| Property::new(timestamp)),
        }
    }

    fn id(&self) -> i32 {
        self.id
    }

    fn fields(&self) -> &ObjectFields {
        &self.ship.shielded.object
    }

    fn merge_from(&self, other: &Self) {
        self.ship.merge_from(&other.ship);
        self.is_enemy.update_from(&other.is_enemy);
        self.surrendered.update_from(&other.surrendered);
        self.fleet_number.update_from(&other.fleet_number);
        self.special_abilities.update_from(&other.special_abilities);
        self.special_state.update_from(&other.special_state);
        self.single_scan.update_from(&other.single_scan);
        self.double_scan.update_from(&other.double_scan);
        self.tagged.update_from(&other.tagged);
        for (dest, src) in self.system_damage.iter().zip(&other.system_damage) {
            dest.update_from(src);
        }
        for (dest, src) in self.frequency_resist.iter().zip(&other.frequency_resist) {
            dest.update_from(src);
        }
    }

    fn is_populated(&self) -> bool {
        self.ship.is_populated()
            || self.is_enemy.has_value()
            || self.surrendered.has_value()
            || self.fleet_number.has_value()
            || self.special_abilities.has_value()
            || self.special_state.has_value()
            || self.single_scan.has_value()
            || self.double_scan.has_value()
            || self.tagged.has_value()
            || self.system_damage.iter().any(Property::has_value)
            || self.frequency_resist.iter().any(Property::has_value)
    }
}

/// Decoded [`ArtemisNpc`] values.
#[derive(Clone, Debug, Default)]
pub struct NpcDsl {
    /// Movement, hull and shield values.
    pub ship: ShipDsl,
    /// Hostile.
    pub is_enemy: Option<BoolState>,
    /// Surrendered.
    pub surrendered: Option<BoolState>,
    /// Fleet number.
    pub fleet_number: Option<i32>,
    /// Special abilities.
    pub special_abilities: Option<i32>,
    /// Active special abilities.
    pub special_state: Option<i32>,
    /// First scan mask.
    pub single_scan: Option<i32>,
    /// Second scan mask.
    pub double_scan: Option<i32>,
    /// Tagged.
    pub tagged: Option<BoolState>,
    /// Damage per system.
    pub system_damage: [Option<f32>; SYSTEM_COUNT],
    /// Resistance per frequency.
    pub frequency_resist: [Option<f32>; FREQUENCY_COUNT],
}

impl Dsl for NpcDsl {
    type Object = ArtemisNpc;

    fn write_into(&mut self, target: &ArtemisNpc, timestamp: u64) {
        self.ship.write_into(&target.ship, timestamp);
        target.is_enemy.put(self.is_enemy.take(), timestamp);
        target.surrendered.put(self.surrendered.take(), timestamp);
        target.fleet_number.put(self.fleet_number.take(), timestamp);
        target
            .special_abilities
            .put(self.special_abilities.take(), timestamp);
        target.special_state.put(self.special_state.take(), timestamp);
        target.single_scan.put(self.single_scan.take(), timestamp);
        target.double_scan.put(self.double_scan.take(), timestamp);
        target.tagged.put(self.tagged.take(), timestamp);
        for (dest, src) in target.system_damage.iter().zip(&mut self.system_damage) {
            dest.put(src.take(), timestamp);
        }
        for (dest, src) in target
            .frequency_resist
            .iter()
            .zip(&mut self.frequency_resist)
        {
            dest.put(src.take(), timestamp);
        }
    }
}
