//! # Shared Field Groups
//!
//! Objects are composed from nested field groups rather than inherited:
//!
//! ```text
//! ObjectFields      name, position, orientation, velocity
//!   ShieldedFields  + hull, shields, side
//!     ShipFields    + impulse, rudder, limits, nebula, visibility
//! ```
//!
//! Each group has a builder counterpart holding `Option`s of decoded values.

use crate::property::Property;
use crate::vessel::{VesselDataLookup, VesselInfo};

// =============================================================================
// OBJECT
// =============================================================================

/// Fields every positioned object carries.
#[derive(Clone, Debug)]
pub struct ObjectFields {
    /// Display name.
    pub name: Property<Option<String>>,
    /// Map x coordinate.
    pub x: Property<f32>,
    /// Height above the map plane.
    pub y: Property<f32>,
    /// Map z coordinate.
    pub z: Property<f32>,
    /// Heading in radians.
    pub heading: Property<f32>,
    /// Pitch in radians.
    pub pitch: Property<f32>,
    /// Roll in radians.
    pub roll: Property<f32>,
    /// Speed.
    pub velocity: Property<f32>,
}

impl ObjectFields {
    /// Creates an empty group stamped with `timestamp`.
    #[must_use]
    pub fn new(timestamp: u64) -> Self {
        Self {
            name: Property::new(timestamp),
            x: Property::new(timestamp),
            y: Property::new(timestamp),
            z: Property::new(timestamp),
            heading: Property::new(timestamp),
            pitch: Property::new(timestamp),
            roll: Property::new(timestamp),
            velocity: Property::new(timestamp),
        }
    }

    /// Newest-wins merge of every field.
    pub fn merge_from(&self, other: &Self) {
        self.name.update_from(&other.name);
        self.x.update_from(&other.x);
        self.y.update_from(&other.y);
        self.z.update_from(&other.z);
        self.heading.update_from(&other.heading);
        self.pitch.update_from(&other.pitch);
        self.roll.update_from(&other.roll);
        self.velocity.update_from(&other.velocity);
    }

    /// Returns true if any field has a value.
    #[must_use]
    pub fn is_populated(&self) -> bool {
        self.name.has_value()
            || self.x.has_value()
            || self.y.has_value()
            || self.z.has_value()
            || self.heading.has_value()
            || self.pitch.has_value()
            || self.roll.has_value()
            || self.velocity.has_value()
    }

    /// Returns true if both horizontal coordinates are known.
    #[must_use]
    pub fn has_position(&self) -> bool {
        self.x.has_value() && self.z.has_value()
    }

    /// Straight-line distance to `other`. A missing height counts as zero.
    ///
    /// # Panics
    ///
    /// Panics if either object lacks an x or z coordinate.
    #[must_use]
    pub fn distance_to(&self, other: &Self) -> f32 {
        let (ax, ay, az) = self.position();
        let (bx, by, bz) = other.position();
        let (dx, dy, dz) = (bx - ax, by - ay, bz - az);
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    /// Distance to `other` on the map plane, ignoring height.
    ///
    /// # Panics
    ///
    /// Panics if either object lacks an x or z coordinate.
    #[must_use]
    pub fn horizontal_distance_to(&self, other: &Self) -> f32 {
        let (ax, _, az) = self.position();
        let (bx, _, bz) = other.position();
        (bx - ax).hypot(bz - az)
    }

    /// Bearing to `other` in degrees, in `[0, 360)`.
    ///
    /// Zero points along negative z and 90 along negative x, matching the
    /// orientation of the server's map.
    ///
    /// # Panics
    ///
    /// Panics if either object lacks an x or z coordinate.
    #[must_use]
    pub fn heading_to(&self, other: &Self) -> f32 {
        let (ax, _, az) = self.position();
        let (bx, _, bz) = other.position();
        let degrees = (ax - bx).atan2(az - bz).to_degrees();
        if degrees < 0.0 {
            degrees + 360.0
        } else {
            degrees
        }
    }

    fn position(&self) -> (f32, f32, f32) {
        let (x, z) = (self.x.value(), self.z.value());
        assert!(
            !x.is_nan() && !z.is_nan(),
            "geometry requires an object with x and z coordinates"
        );
        let y = self.y.value();
        (x, if y.is_nan() { 0.0 } else { y }, z)
    }
}

/// Decoded [`ObjectFields`] values awaiting materialisation.
#[derive(Clone, Debug, Default)]
pub struct ObjectDsl {
    /// Display name.
    pub name: Option<String>,
    /// Map x coordinate.
    pub x: Option<f32>,
    /// Height.
    pub y: Option<f32>,
    /// Map z coordinate.
    pub z: Option<f32>,
    /// Heading.
    pub heading: Option<f32>,
    /// Pitch.
    pub pitch: Option<f32>,
    /// Roll.
    pub roll: Option<f32>,
    /// Speed.
    pub velocity: Option<f32>,
}

impl ObjectDsl {
    /// Moves every decoded value into `target`, leaving `self` empty.
    pub fn write_into(&mut self, target: &ObjectFields, timestamp: u64) {
        target.name.put(self.name.take(), timestamp);
        target.x.put(self.x.take(), timestamp);
        target.y.put(self.y.take(), timestamp);
        target.z.put(self.z.take(), timestamp);
        target.heading.put(self.heading.take(), timestamp);
        target.pitch.put(self.pitch.take(), timestamp);
        target.roll.put(self.roll.take(), timestamp);
        target.velocity.put(self.velocity.take(), timestamp);
    }
}

// =============================================================================
// SHIELDED
// =============================================================================

/// Fields of objects with a hull and shields.
#[derive(Clone, Debug)]
pub struct ShieldedFields {
    /// Base object fields.
    pub object: ObjectFields,
    /// Vessel data id of the hull.
    pub hull_id: Property<i32>,
    /// Front shield strength.
    pub shields_front: Property<f32>,
    /// Front shield capacity.
    pub shields_front_max: Property<f32>,
    /// Rear shield strength.
    pub shields_rear: Property<f32>,
    /// Rear shield capacity.
    pub shields_rear_max: Property<f32>,
    /// Allegiance; objects on the same side are friendly.
    pub side: Property<i8>,
}

impl ShieldedFields {
    /// Creates an empty group stamped with `timestamp`.
    #[must_use]
    pub fn new(timestamp: u64) -> Self {
        Self {
            object: ObjectFields::new(timestamp),
            hull_id: Property::new(timestamp),
            shields_front: Property::new(timestamp),
            shields_front_max: Property::new(timestamp),
            shields_rear: Property::new(timestamp),
            shields_rear_max: Property::new(timestamp),
            side: Property::new(timestamp),
        }
    }

    /// Newest-wins merge of every field.
    pub fn merge_from(&self, other: &Self) {
        self.object.merge_from(&other.object);
        self.hull_id.update_from(&other.hull_id);
        self.shields_front.update_from(&other.shields_front);
        self.shields_front_max.update_from(&other.shields_front_max);
        self.shields_rear.update_from(&other.shields_rear);
        self.shields_rear_max.update_from(&other.shields_rear_max);
        self.side.update_from(&other.side);
    }

    /// Returns true if any field has a value.
    #[must_use]
    pub fn is_populated(&self) -> bool {
        self.object.is_populated()
            || self.hull_id.has_value()
            || self.shields_front.has_value()
            || self.shields_front_max.has_value()
            || self.shields_rear.has_value()
            || self.shields_rear_max.has_value()
            || self.side.has_value()
    }

    /// Looks up the static vessel data for this hull.
    #[must_use]
    pub fn vessel(&self, data: &dyn VesselDataLookup) -> Option<VesselInfo> {
        let hull_id = self.hull_id.value();
        if hull_id == i32::MIN {
            return None;
        }
        data.vessel(hull_id)
    }
}

/// Decoded [`ShieldedFields`] values.
#[derive(Clone, Debug, Default)]
pub struct ShieldedDsl {
    /// Base object values.
    pub object: ObjectDsl,
    /// Hull id.
    pub hull_id: Option<i32>,
    /// Front shield strength.
    pub shields_front: Option<f32>,
    /// Front shield capacity.
    pub shields_front_max: Option<f32>,
    /// Rear shield strength.
    pub shields_rear: Option<f32>,
    /// Rear shield capacity.
    pub shields_rear_max: Option<f32>,
    /// Allegiance.
    pub side: Option<i8>,
}

impl ShieldedDsl {
    /// Moves every decoded value into `target`, leaving `self` empty.
    pub fn write_into(&mut self, target: &ShieldedFields, timestamp: u64) {
        self.object.write_into(&target.object, timestamp);
        target.hull_id.put(self.hull_id.take(), timestamp);
        target.shields_front.put(self.shields_front.take(), timestamp);
        target
            .shields_front_max
            .put(self.shields_front_max.take(), timestamp);
        target.shields_rear.put(self.shields_rear.take(), timestamp);
        target
            .shields_rear_max
            .put(self.shields_rear_max.take(), timestamp);
        target.side.put(self.side.take(), timestamp);
    }
}

// =============================================================================
// SHIP
// =============================================================================

/// Fields of anything that flies under its own power.
#[derive(Clone, Debug)]
pub struct ShipFields {
    /// Hull and shield fields.
    pub shielded: ShieldedFields,
    /// Impulse throttle, 0 to 1.
    pub impulse: Property<f32>,
    /// Rudder, 0 (hard port) to 1 (hard starboard).
    pub rudder: Property<f32>,
    /// Top impulse speed.
    pub top_speed: Property<f32>,
    /// Turn rate.
    pub turn_rate: Property<f32>,
    /// Type of nebula the ship is inside, 0 if none.
    pub nebula_type: Property<i8>,
    /// Per-side visibility bitmask.
    pub visibility: Property<i32>,
}

impl ShipFields {
    /// Creates an empty group stamped with `timestamp`.
    #[must_use]
    pub fn new(timestamp: u64) -> Self {
        Self {
            shielded: ShieldedFields::new(timestamp),
            impulse: Property::new(timestamp),
            rudder: Property::new(timestamp),
            top_speed: Property::new(timestamp),
            turn_rate: Property::new(timestamp),
            nebula_type: Property::new(timestamp),
            visibility: Property::new(timestamp),
        }
    }

    /// Newest-wins merge of every field.
    ///
    /// Returns true if the source impulse was taken.
    pub fn merge_from(&self, other: &Self) -> bool {
        self.shielded.merge_from(&other.shielded);
        let impulse_taken = self.impulse.update_from(&other.impulse);
        self.rudder.update_from(&other.rudder);
        self.top_speed.update_from(&other.top_speed);
        self.turn_rate.update_from(&other.turn_rate);
        self.nebula_type.update_from(&other.nebula_type);
        self.visibility.update_from(&other.visibility);
        impulse_taken
    }

    /// Returns true if any field has a value.
    #[must_use]
    pub fn is_populated(&self) -> bool {
        self.shielded.is_populated()
            || self.impulse.has_value()
            || self.rudder.has_value()
            || self.top_speed.has_value()
            || self.turn_rate.has_value()
            || self.nebula_type.has_value()
            || self.visibility.has_value()
    }
}

/// Decoded [`ShipFields`] values.
#[derive(Clone, Debug, Default)]
pub struct ShipDsl {
    /// Hull and shield values.
    pub shielded: ShieldedDsl,
    /// Impulse throttle.
    pub impulse: Option<f32>,
    /// Rudder.
    pub rudder: Option<f32>,
    /// Top speed.
    pub top_speed: Option<f32>,
    /// Turn rate.
    pub turn_rate: Option<f32>,
    /// Nebula type.
    pub nebula_type: Option<i8>,
    /// Visibility bitmask.
    pub visibility: Option<i32>,
}

impl ShipDsl {
    /// Moves every decoded value into `target`, leaving `self` empty.
    pub fn write_into(&mut self, target: &ShipFields, timestamp: u64) {
        self.shielded.write_into(&target.shielded, timestamp);
        target.impulse.put(self.impulse.take(), timestamp);
        target.rudder.put(self.rudder.take(), timestamp);
        target.top_speed.put(self.top_speed.take(), timestamp);
        target.turn_rate.put(self.turn_rate.take(), timestamp);
        target.nebula_type.put(self.nebula_type.take(), timestamp);
        target.visibility.put(self.visibility.take(), timestamp);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(x: f32, z: f32) -> ObjectFields {
        let fields = ObjectFields::new(0);
        fields.x.set(x, 1);
        fields.z.set(z, 1);
        fields
    }

    #[test]
    fn test_distances() {
        let a = at(0.0, 0.0);
        let b = at(3.0, 4.0);
        assert!((a.horizontal_distance_to(&b) - 5.0).abs() < 1e-5);
        b.y.set(12.0, 1);
        assert!((a.distance_to(&b) - 13.0).abs() < 1e-5);
        assert!((a.horizontal_distance_to(&b) - 5.0).abs() < 1e-5);
    }

    #[test]
    fn test_heading_to() {
        let origin = at(50_000.0, 50_000.0);
        assert!(origin.heading_to(&at(50_000.0, 40_000.0)).abs() < 1e-3);
        assert!((origin.heading_to(&at(40_000.0, 50_000.0)) - 90.0).abs() < 1e-3);
        assert!((origin.heading_to(&at(50_000.0, 60_000.0)) - 180.0).abs() < 1e-3);
        assert!((origin.heading_to(&at(60_000.0, 50_000.0)) - 270.0).abs() < 1e-3);
    }

    #[test]
    #[should_panic(expected = "x and z")]
    fn test_distance_without_position_panics() {
        let a = at(0.0, 0.0);
        let b = ObjectFields::new(0);
        b.x.set(1.0, 1);
        let _ = a.distance_to(&b);
    }

    #[test]
    fn test_dsl_write_resets() {
        let fields = ObjectFields::new(0);
        let mut dsl = ObjectDsl {
            x: Some(1.0),
            name: Some("DS1".to_owned()),
            ..ObjectDsl::default()
        };
        dsl.write_into(&fields, 7);
        assert_eq!(fields.x.snapshot(), (1.0, 7));
        assert_eq!(fields.name.value().as_deref(), Some("DS1"));
        assert!(!fields.z.has_value());
        assert!(dsl.x.is_none());
        assert!(dsl.name.is_none());
    }

    #[test]
    fn test_ship_merge_reports_impulse() {
        let dest = ShipFields::new(0);
        let src = ShipFields::new(0);
        assert!(!dest.merge_from(&src));
        src.impulse.set(0.5, 3);
        assert!(dest.merge_from(&src));
        assert_eq!(dest.impulse.value(), 0.5);
    }
}
