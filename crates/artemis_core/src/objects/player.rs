//! # Player Ship
//!
//! One player ship is described by up to four records (core, weapons,
//! engineering, upgrades). Each decodes into its own partial
//! [`ArtemisPlayer`] with the same id; the caller merges them.
//!
//! ## Docking
//!
//! The server keeps reporting the docking base for a while after the ship
//! leaves. A merge therefore treats motion as authoritative:
//!
//! - a freshly merged impulse or warp above zero clears `docked` and sets
//!   `docking_base` to 0;
//! - a docking base merged into a ship that is moving is stored as 0.

use artemis_shared::{
    AlertStatus, BeamFrequency, BoolState, CreatureType, DriveType, MainScreenView, ObjectType,
    OrdnanceType, TubeState, TUBE_COUNT,
};

use super::fields::{ObjectFields, ShipDsl, ShipFields};
use super::{Dsl, WorldObject};
use crate::property::Property;

/// Number of ordnance kinds the latest version knows.
const ORDNANCE_KINDS: usize = OrdnanceType::ALL.len();

/// State of one torpedo tube.
#[derive(Clone, Debug)]
pub struct TubeFields {
    /// Load state.
    pub state: Property<Option<TubeState>>,
    /// What is loaded or being loaded.
    pub contents: Property<Option<OrdnanceType>>,
    /// Seconds until loading or unloading finishes.
    pub time_left: Property<f32>,
}

impl TubeFields {
    fn new(timestamp: u64) -> Self {
        Self {
            state: Property::new(timestamp),
            contents: Property::new(timestamp),
            time_left: Property::new(timestamp),
        }
    }

    fn merge_from(&self, other: &Self) {
        self.state.update_from(&other.state);
        self.contents.update_from(&other.contents);
        self.time_left.update_from(&other.time_left);
    }

    fn is_populated(&self) -> bool {
        self.state.has_value() || self.contents.has_value() || self.time_left.has_value()
    }
}

/// Decoded [`TubeFields`] values.
#[derive(Clone, Debug, Default)]
pub struct TubeDsl {
    /// Load state.
    pub state: Option<TubeState>,
    /// Contents.
    pub contents: Option<OrdnanceType>,
    /// Seconds left.
    pub time_left: Option<f32>,
}

/// A player ship.
#[derive(Clone, Debug)]
pub struct ArtemisPlayer {
    id: i32,

    /// Movement, hull and shield fields.
    pub ship: ShipFields,

    // Core record
    /// Object targeted by weapons.
    pub weapons_target: Property<i32>,
    /// Beams fire automatically.
    pub auto_beams: Property<BoolState>,
    /// Warp factor, 0 to 4.
    pub warp: Property<i8>,
    /// Remaining energy.
    pub energy: Property<f32>,
    /// Shields raised.
    pub shields_up: Property<BoolState>,
    /// Base the ship is docking with, 0 if none.
    pub docking_base: Property<i32>,
    /// Ship is docked.
    pub docked: Property<BoolState>,
    /// Alert level.
    pub alert_status: Property<Option<AlertStatus>>,
    /// Main screen view.
    pub main_screen: Property<Option<MainScreenView>>,
    /// Beam frequency.
    pub beam_frequency: Property<Option<BeamFrequency>>,
    /// Unallocated coolant.
    pub available_coolant: Property<i32>,
    /// Object targeted by science.
    pub science_target: Property<i32>,
    /// Object targeted on the captain's map.
    pub captain_target: Property<i32>,
    /// FTL drive type.
    pub drive_type: Property<Option<DriveType>>,
    /// Object being scanned.
    pub scan_object: Property<i32>,
    /// Scan progress, 0 to 1.
    pub scan_progress: Property<f32>,
    /// Engines in reverse.
    pub reverse: Property<BoolState>,
    /// Climb or dive input, -1 to 1.
    pub climb_dive: Property<f32>,
    /// Index among player ships, 0 to 7.
    pub ship_index: Property<i8>,
    /// Capital ship a fighter belongs to.
    pub capital_ship_id: Property<i32>,
    /// Hull accent colour hue.
    pub accent_color: Property<f32>,
    /// Creature type the next beacon attracts or repels.
    pub beacon_creature_type: Property<Option<CreatureType>>,
    /// Beacon mode: 0 attract, 1 repel.
    pub beacon_mode: Property<i8>,
    /// Seconds until the emergency jump is available.
    pub emergency_jump_cooldown: Property<f32>,

    // Weapons record
    /// Stock per ordnance kind, indexed by [`OrdnanceType`] id.
    pub ordnance_counts: [Property<i32>; ORDNANCE_KINDS],
    /// Torpedo tubes.
    pub tubes: [TubeFields; TUBE_COUNT],

    // Upgrades record
    /// Double agent running.
    pub double_agent_active: Property<BoolState>,
    /// Double agents in stock.
    pub double_agent_count: Property<i32>,
    /// Seconds of double agent left.
    pub double_agent_seconds: Property<i16>,
}

impl ArtemisPlayer {
    /// Stock of one ordnance kind.
    #[must_use]
    pub fn ordnance_count(&self, ordnance: OrdnanceType) -> &Property<i32> {
        &self.ordnance_counts[usize::from(ordnance.id())]
    }

    /// Returns true if impulse or warp is known and above zero.
    #[must_use]
    pub fn is_moving(&self) -> bool {
        let impulse = self.ship.impulse.value();
        impulse > 0.0 || self.warp.value() > 0
    }
}

impl WorldObject for ArtemisPlayer {
    const OBJECT_TYPE: ObjectType = ObjectType::PlayerShip;

    fn new(id: i32, timestamp: u64) -> Self {
        Self {
            id,
            ship: ShipFields::new(timestamp),
            weapons_target: Property::new(timestamp),
            auto_beams: Property::new(timestamp),
            warp: Property::new(timestamp),
            energy: Property::new(timestamp),
            shields_up: Property::new(timestamp),
            docking_base: Property::new(timestamp),
            docked: Property::new(timestamp),
            alert_status: Property::new(timestamp),
            main_screen: Property::new(timestamp),
            beam_frequency: Property::new(timestamp),
            available_coolant: Property::new(timestamp),
            science_target: Property::new(timestamp),
            captain_target: Property::new(timestamp),
            drive_type: Property::new(timestamp),
            scan_object: Property::new(timestamp),
            scan_progress: Property::new(timestamp),
            reverse: Property::new(timestamp),
            climb_dive: Property::new(timestamp),
            ship_index: Property::new(timestamp),
            capital_ship_id: Property::new(timestamp),
            accent_color: Property::new(timestamp),
            beacon_creature_type: Property::new(timestamp),
            beacon_mode: Property::new(timestamp),
            emergency_jump_cooldown: Property::new(timestamp),
            ordnance_counts: std::array::from_fn(|_| Property::new(timestamp)),
            tubes: std::array::from_fn(|_| TubeFields::new(timestamp)),
            double_agent_active: Property::new(timestamp),
            double_agent_count: Property::new(timestamp),
            double_agent_seconds: Property::new(timestamp),
        }
    }

    fn id(&self) -> i32 {
        self.id
    }

    fn fields(&self) -> &ObjectFields {
        &self.ship.shielded.object
    }

    fn merge_from(&self, other: &Self) {
        let impulse_taken = self.ship.merge_from(&other.ship);
        let warp_taken = self.warp.update_from(&other.warp);

        let (impulse, impulse_ts) = self.ship.impulse.snapshot();
        let (warp, warp_ts) = self.warp.snapshot();
        let fresh_impulse = impulse_taken && impulse > 0.0;
        let fresh_warp = warp_taken && warp > 0;

        if fresh_impulse || fresh_warp {
            let timestamp = match (fresh_impulse, fresh_warp) {
                (true, true) => impulse_ts.max(warp_ts),
                (true, false) => impulse_ts,
                _ => warp_ts,
            };
            self.docked.set(BoolState::False, timestamp);
            self.docking_base.set(0, timestamp);
        } else {
            self.docked.update_from(&other.docked);
            let (base, base_ts) = other.docking_base.snapshot();
            if base > 0 && self.is_moving() {
                if base_ts >= self.docking_base.timestamp() {
                    self.docking_base.set(0, base_ts);
                }
            } else {
                self.docking_base.update_from(&other.docking_base);
            }
        }

        self.weapons_target.update_from(&other.weapons_target);
        self.auto_beams.update_from(&other.auto_beams);
        self.energy.update_from(&other.energy);
        self.shields_up.update_from(&other.shields_up);
        self.alert_status.update_from(&other.alert_status);
        self.main_screen.update_from(&other.main_screen);
        self.beam_frequency.update_from(&other.beam_frequency);
        self.available_coolant.update_from(&other.available_coolant);
        self.science_target.update_from(&other.science_target);
        self.captain_target.update_from(&other.captain_target);
        self.drive_type.update_from(&other.drive_type);
        self.scan_object.update_from(&other.scan_object);
        self.scan_progress.update_from(&other.scan_progress);
        self.reverse.update_from(&other.reverse);
        self.climb_dive.update_from(&other.climb_dive);
        self.ship_index.update_from(&other.ship_index);
        self.capital_ship_id.update_from(&other.capital_ship_id);
        self.accent_color.update_from(&other.accent_color);
        self.beacon_creature_type
            .update_from(&other.beacon_creature_type);
        self.beacon_mode.update_from(&other.beacon_mode);
        self.emergency_jump_cooldown
            .update_from(&other.emergency_jump_cooldown);

        for (dest, src) in self.ordnance_counts.iter().zip(&other.ordnance_counts) {
            dest.update_from(src);
        }
        for (dest, src) in self.tubes.iter().zip(&other.tubes) {
            dest.merge_from(src);
        }

        self.double_agent_active
            .update_from(&other.double_agent_active);
        self.double_agent_count.update_from(&other.double_agent_count);
        self.double_agent_seconds
            .update_from(&other.double_agent_seconds);
    }

    fn is_populated(&self) -> bool {
        self.ship.is_populated()
            || self.weapons_target.has_value()
            || self.auto_beams.has_value()
            || self.warp.has_value()
            || self.energy.has_value()
            || self.shields_up.has_value()
            || self.docking_base.has_value()
            || self.docked.has_value()
            || self.alert_status.has_value()
            || self.main_screen.has_value()
            || self.beam_frequency.has_value()
            || self.available_coolant.has_value()
            || self.science_target.has_value()
            || self.captain_target.has_value()
            || self.drive_type.has_value()
            || self.scan_object.has_value()
            || self.scan_progress.has_value()
            || self.reverse.has_value()
            || self.climb_dive.has_value()
            || self.ship_index.has_value()
            || self.capital_ship_id.has_value()
            || self.accent_color.has_value()
            || self.beacon_creature_type.has_value()
            || self.beacon_mode.has_value()
            || self.emergency_jump_cooldown.has_value()
            || self.ordnance_counts.iter().any(Property::has_value)
            || self.tubes.iter().any(TubeFields::is_populated)
            || self.double_agent_active.has_value()
            || self.double_agent_count.has_value()
            || self.double_agent_seconds.has_value()
    }
}

/// Decoded values of any of the four player records.
#[derive(Clone, Debug, Default)]
pub struct PlayerDsl {
    /// Movement, hull and shield values.
    pub ship: ShipDsl,
    /// Weapons target.
    pub weapons_target: Option<i32>,
    /// Auto beams.
    pub auto_beams: Option<BoolState>,
    /// Warp factor.
    pub warp: Option<i8>,
    /// Energy.
    pub energy: Option<f32>,
    /// Shields raised.
    pub shields_up: Option<BoolState>,
    /// Docking base.
    pub docking_base: Option<i32>,
    /// Docked.
    pub docked: Option<BoolState>,
    /// Alert level.
    pub alert_status: Option<AlertStatus>,
    /// Main screen view.
    pub main_screen: Option<MainScreenView>,
    /// Beam frequency.
    pub beam_frequency: Option<BeamFrequency>,
    /// Unallocated coolant.
    pub available_coolant: Option<i32>,
    /// Science target.
    pub science_target: Option<i32>,
    /// Captain target.
    pub captain_target: Option<i32>,
    /// Drive type.
    pub drive_type: Option<DriveType>,
    /// Object being scanned.
    pub scan_object: Option<i32>,
    /// Scan progress.
    pub scan_progress: Option<f32>,
    /// Reverse.
    pub reverse: Option<BoolState>,
    /// Climb or dive.
    pub climb_dive: Option<f32>,
    /// Ship index.
    pub ship_index: Option<i8>,
    /// Capital ship id.
    pub capital_ship_id: Option<i32>,
    /// Accent colour.
    pub accent_color: Option<f32>,
    /// Beacon creature type.
    pub beacon_creature_type: Option<CreatureType>,
    /// Beacon mode.
    pub beacon_mode: Option<i8>,
    /// Emergency jump cooldown.
    pub emergency_jump_cooldown: Option<f32>,
    /// Ordnance stock by [`OrdnanceType`] id.
    pub ordnance_counts: [Option<i32>; ORDNANCE_KINDS],
    /// Torpedo tubes.
    pub tubes: [TubeDsl; TUBE_COUNT],
    /// Double agent running.
    pub double_agent_active: Option<BoolState>,
    /// Double agents in stock.
    pub double_agent_count: Option<i32>,
    /// Seconds of double agent left.
    pub double_agent_seconds: Option<i16>,
}

impl Dsl for PlayerDsl {
    type Object = ArtemisPlayer;

    fn write_into(&mut self, target: &ArtemisPlayer, timestamp: u64) {
        self.ship.write_into(&target.ship, timestamp);
        target.weapons_target.put(self.weapons_target.take(), timestamp);
        target.auto_beams.put(self.auto_beams.take(), timestamp);
        target.warp.put(self.warp.take(), timestamp);
        target.energy.put(self.energy.take(), timestamp);
        target.shields_up.put(self.shields_up.take(), timestamp);
        target.docking_base.put(self.docking_base.take(), timestamp);
        target.docked.put(self.docked.take(), timestamp);
        target.alert_status.put(self.alert_status.take(), timestamp);
        target.main_screen.put(self.main_screen.take(), timestamp);
        target.beam_frequency.put(self.beam_frequency.take(), timestamp);
        target
            .available_coolant
            .put(self.available_coolant.take(), timestamp);
        target.science_target.put(self.science_target.take(), timestamp);
        target.captain_target.put(self.captain_target.take(), timestamp);
        target.drive_type.put(self.drive_type.take(), timestamp);
        target.scan_object.put(self.scan_object.take(), timestamp);
        target.scan_progress.put(self.scan_progress.take(), timestamp);
        target.reverse.put(self.reverse.take(), timestamp);
        target.climb_dive.put(self.climb_dive.take(), timestamp);
        target.ship_index.put(self.ship_index.take(), timestamp);
        target
            .capital_ship_id
            .put(self.capital_ship_id.take(), timestamp);
        target.accent_color.put(self.accent_color.take(), timestamp);
        target
            .beacon_creature_type
            .put(self.beacon_creature_type.take(), timestamp);
        target.beacon_mode.put(self.beacon_mode.take(), timestamp);
        target
            .emergency_jump_cooldown
            .put(self.emergency_jump_cooldown.take(), timestamp);

        for (dest, src) in target.ordnance_counts.iter().zip(&mut self.ordnance_counts) {
            dest.put(src.take(), timestamp);
        }
        for (dest, src) in target.tubes.iter().zip(&mut self.tubes) {
            dest.state.put(src.state.take(), timestamp);
            dest.contents.put(src.contents.take(), timestamp);
            dest.time_left.put(src.time_left.take(), timestamp);
        }

        target
            .double_agent_active
            .put(self.double_agent_active.take(), timestamp);
        target
            .double_agent_count
            .put(self.double_agent_count.take(), timestamp);
        target
            .double_agent_seconds
            .put(self.double_agent_seconds.take(), timestamp);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn docked_player(timestamp: u64) -> ArtemisPlayer {
        let mut dsl = PlayerDsl {
            docking_base: Some(42),
            docked: Some(BoolState::True),
            warp: Some(0),
            ..PlayerDsl::default()
        };
        dsl.ship.impulse = Some(0.0);
        dsl.build(1, timestamp)
    }

    #[test]
    fn test_fresh_impulse_clears_docking() {
        let player = docked_player(1);
        let mut dsl = PlayerDsl::default();
        dsl.ship.impulse = Some(0.4);
        let update = dsl.build(1, 2);

        player.merge_from(&update);
        assert_eq!(player.docked.value(), BoolState::False);
        assert_eq!(player.docking_base.value(), 0);
        assert_eq!(player.ship.impulse.value(), 0.4);
    }

    #[test]
    fn test_fresh_warp_clears_docking() {
        let player = docked_player(1);
        let update = PlayerDsl {
            warp: Some(2),
            ..PlayerDsl::default()
        }
        .build(1, 2);

        player.merge_from(&update);
        assert_eq!(player.docked.value(), BoolState::False);
        assert_eq!(player.docking_base.value(), 0);
    }

    #[test]
    fn test_stale_impulse_keeps_docking() {
        let player = docked_player(5);
        let mut dsl = PlayerDsl::default();
        dsl.ship.impulse = Some(0.4);
        let stale = dsl.build(1, 3);

        player.merge_from(&stale);
        assert_eq!(player.docked.value(), BoolState::True);
        assert_eq!(player.docking_base.value(), 42);
        assert_eq!(player.ship.impulse.value(), 0.0);
    }

    #[test]
    fn test_docking_base_while_moving_is_coerced() {
        let mut dsl = PlayerDsl::default();
        dsl.ship.impulse = Some(1.0);
        let player = dsl.build(1, 1);

        let update = PlayerDsl {
            docking_base: Some(42),
            ..PlayerDsl::default()
        }
        .build(1, 2);

        player.merge_from(&update);
        assert_eq!(player.docking_base.snapshot(), (0, 2));
    }

    #[test]
    fn test_docking_base_while_stopped_is_taken() {
        let mut dsl = PlayerDsl::default();
        dsl.ship.impulse = Some(0.0);
        let player = dsl.build(1, 1);

        let update = PlayerDsl {
            docking_base: Some(42),
            ..PlayerDsl::default()
        }
        .build(1, 2);

        player.merge_from(&update);
        assert_eq!(player.docking_base.value(), 42);
    }

    #[test]
    fn test_records_merge_by_id() {
        let core = {
            let mut dsl = PlayerDsl::default();
            dsl.ship.shielded.object.name = Some("Artemis".to_owned());
            dsl.build(7, 1)
        };
        let weapons = {
            let mut dsl = PlayerDsl::default();
            dsl.ordnance_counts[usize::from(OrdnanceType::Nuke.id())] = Some(2);
            dsl.tubes[0].state = Some(TubeState::Loaded);
            dsl.tubes[0].contents = Some(OrdnanceType::Homing);
            dsl.build(7, 2)
        };

        core.merge_from(&weapons);
        assert_eq!(core.fields().name.value().as_deref(), Some("Artemis"));
        assert_eq!(core.ordnance_count(OrdnanceType::Nuke).value(), 2);
        assert!(!core.ordnance_count(OrdnanceType::Homing).has_value());
        assert_eq!(core.tubes[0].state.value(), Some(TubeState::Loaded));
        assert_eq!(core.tubes[0].contents.value(), Some(OrdnanceType::Homing));
    }

    #[test]
    fn test_build_resets_dsl() {
        let mut dsl = PlayerDsl {
            energy: Some(1000.0),
            ..PlayerDsl::default()
        };
        dsl.tubes[3].time_left = Some(4.0);
        let player = dsl.build(1, 1);
        assert!(player.is_populated());
        assert!(dsl.energy.is_none());
        assert!(dsl.tubes[3].time_left.is_none());
        assert!(!dsl.build(1, 2).is_populated());
    }
}
