//! # Protocol Enumerations
//!
//! Closed sets of values that appear on the wire as a small integer. Each
//! type converts from its wire id with `from_id`, returning `None` for ids the
//! decoder must reject.

use crate::version::Version;

/// Declares a fieldless enum with sequential wire ids starting at zero.
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $($(#[$vmeta:meta])* $variant:ident),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[repr(u8)]
        pub enum $name {
            $($(#[$vmeta])* $variant,)+
        }

        impl $name {
            /// Every variant in wire order.
            pub const ALL: &'static [Self] = &[$(Self::$variant,)+];

            /// Converts a wire id.
            #[must_use]
            pub fn from_id(id: i32) -> Option<Self> {
                usize::try_from(id).ok().and_then(|i| Self::ALL.get(i).copied())
            }

            /// Wire id of this variant.
            #[inline]
            #[must_use]
            pub const fn id(self) -> u8 {
                self as u8
            }
        }
    };
}

// =============================================================================
// SHIP STATE
// =============================================================================

wire_enum! {
    /// Ship alert level.
    AlertStatus {
        /// Normal operations.
        Normal,
        /// Red alert.
        Red,
    }
}

wire_enum! {
    /// What the main screen shows.
    MainScreenView {
        /// Forward view.
        Forward,
        /// Port view.
        Port,
        /// Starboard view.
        Starboard,
        /// Aft view.
        Aft,
        /// Tactical map.
        Tactical,
        /// Long range map.
        LongRange,
        /// Ship status.
        Status,
    }
}

wire_enum! {
    /// Faster than light drive fitted to a ship.
    DriveType {
        /// Warp drive.
        Warp,
        /// Jump drive.
        Jump,
    }
}

wire_enum! {
    /// Beam weapon frequency.
    BeamFrequency {
        /// Frequency A.
        A,
        /// Frequency B.
        B,
        /// Frequency C.
        C,
        /// Frequency D.
        D,
        /// Frequency E.
        E,
    }
}

wire_enum! {
    /// Damageable ship systems, in engineering order.
    ShipSystem {
        /// Primary beams.
        Beams,
        /// Torpedo tubes.
        Torpedoes,
        /// Sensors.
        Sensors,
        /// Maneuvering thrusters.
        Maneuvering,
        /// Impulse engines.
        Impulse,
        /// Warp or jump drive.
        WarpJumpDrive,
        /// Front shield generator.
        FrontShield,
        /// Rear shield generator.
        RearShield,
    }
}

wire_enum! {
    /// Torpedo tube state.
    TubeState {
        /// Empty.
        Unloaded,
        /// Ready to fire.
        Loaded,
        /// Loading in progress.
        Loading,
        /// Unloading in progress.
        Unloading,
    }
}

wire_enum! {
    /// Bridge stations a client can take.
    Console {
        /// Main screen.
        MainScreen,
        /// Helm.
        Helm,
        /// Weapons.
        Weapons,
        /// Engineering.
        Engineering,
        /// Science.
        Science,
        /// Communications.
        Communications,
        /// Fighter.
        Fighter,
        /// Data.
        Data,
        /// Observer.
        Observer,
        /// Captain's map.
        CaptainsMap,
        /// Game master.
        GameMaster,
    }
}

// =============================================================================
// CREATURES
// =============================================================================

wire_enum! {
    /// Space creature species.
    CreatureType {
        /// Typhon, the only species the world model tracks.
        Typhon,
        /// Space whale.
        Whale,
        /// Shark.
        Shark,
        /// Dragon.
        Dragon,
        /// Piranha.
        Piranha,
        /// Charybdis.
        Charybdis,
        /// Insect.
        Insect,
        /// Jellyfish.
        Jelly,
        /// Wreck.
        Wreck,
    }
}

// =============================================================================
// UPGRADES
// =============================================================================

wire_enum! {
    /// Ship upgrades, in the order the upgrades record lays them out.
    Upgrade {
        /// Infusion P-Coils.
        InfusionPCoils,
        /// Hydrogen ram.
        HydrogenRam,
        /// Tauron focusers.
        TauronFocusers,
        /// Carapaction coils.
        CarapactionCoils,
        /// Polyphasic capacitors.
        PolyphasicCapacitors,
        /// Cetrocite crystals.
        CetrociteCrystals,
        /// Lateral array.
        LateralArray,
        /// ECM starpulse.
        EcmStarpulse,
        /// Double agent.
        DoubleAgent,
        /// Wartime production.
        WartimeProduction,
        /// Permanent Infusion P-Coils.
        InfusionPCoilsPerm,
        /// Protonic verniers.
        ProtonicVerniers,
        /// Permanent Tauron focusers.
        TauronFocusersPerm,
        /// Regenerative Pau-Crystals.
        RegenerativePauCrystals,
        /// Veteran DamCon teams.
        VeteranDamConTeams,
        /// Cetrocite heatsinks.
        CetrociteHeatsinks,
        /// Tachyon scanners.
        TachyonScanners,
        /// Gridscan overload.
        GridscanOverload,
        /// Override authorization.
        OverrideAuthorization,
        /// Resupply imperatives.
        ResupplyImperatives,
        /// Patrol group.
        PatrolGroup,
        /// Fast supply.
        FastSupply,
        /// Vanguard refit: helm.
        VanguardRefitHelm,
        /// Vanguard refit: weapons.
        VanguardRefitWeap,
        /// Vanguard refit: science.
        VanguardRefitSci,
        /// Vanguard refit: communications.
        VanguardRefitComm,
        /// Vanguard refit: engineering.
        VanguardRefitEng,
        /// Vanguard refit: systems.
        VanguardRefitSystems,
    }
}

impl Upgrade {
    /// Number of upgrades in the record.
    pub const COUNT: usize = Self::ALL.len();
}

// =============================================================================
// ORDNANCE
// =============================================================================

wire_enum! {
    /// Torpedo and ordnance kinds.
    ///
    /// The last three only exist from 2.6.3 on; use [`OrdnanceType::values`]
    /// rather than [`OrdnanceType::ALL`] when the server version matters.
    OrdnanceType {
        /// Homing torpedo.
        Homing,
        /// Nuclear torpedo.
        Nuke,
        /// Mine.
        Mine,
        /// EMP.
        Emp,
        /// Plasma shock.
        PShock,
        /// Beacon.
        Beacon,
        /// Probe.
        Probe,
        /// Tag.
        Tag,
    }
}

impl OrdnanceType {
    /// Build time of each ordnance type at a base, in minutes.
    const BUILD_MINUTES: [u32; 8] = [3, 10, 4, 5, 10, 1, 1, 1];

    /// Ordnance types available before 2.6.3.
    const LEGACY_COUNT: usize = 5;

    /// Version this ordnance type first appears in.
    #[must_use]
    pub const fn introduced(self) -> Version {
        if (self as usize) < Self::LEGACY_COUNT {
            Version::MINIMUM
        } else {
            Version::V2_6_3
        }
    }

    /// Number of ordnance types the given server knows.
    #[must_use]
    pub fn count(version: Version) -> usize {
        if version < Version::V2_6_3 {
            Self::LEGACY_COUNT
        } else {
            Self::ALL.len()
        }
    }

    /// The ordnance types the given server knows, in wire order.
    #[must_use]
    pub fn values(version: Version) -> &'static [Self] {
        &Self::ALL[..Self::count(version)]
    }

    /// Converts a wire id, rejecting types the given server does not know.
    #[must_use]
    pub fn from_id_for(version: Version, id: i32) -> Option<Self> {
        usize::try_from(id)
            .ok()
            .and_then(|i| Self::values(version).get(i).copied())
    }

    /// Minutes a base needs to build one unit.
    #[inline]
    #[must_use]
    pub const fn build_time_minutes(self) -> u32 {
        Self::BUILD_MINUTES[self as usize]
    }
}

// =============================================================================
// TRI-STATE
// =============================================================================

/// A boolean that may not have been reported yet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum BoolState {
    /// Known true.
    True,
    /// Known false.
    False,
    /// Never reported.
    #[default]
    Unknown,
}

impl BoolState {
    /// Returns true only for [`BoolState::True`].
    #[inline]
    #[must_use]
    pub const fn is_true(self) -> bool {
        matches!(self, Self::True)
    }

    /// Returns true unless [`BoolState::Unknown`].
    #[inline]
    #[must_use]
    pub const fn is_known(self) -> bool {
        !matches!(self, Self::Unknown)
    }

    /// Converts a wire byte: zero is false, anything else true.
    #[inline]
    #[must_use]
    pub const fn from_wire(value: u8) -> Self {
        if value == 0 {
            Self::False
        } else {
            Self::True
        }
    }
}

impl From<bool> for BoolState {
    fn from(value: bool) -> Self {
        if value {
            Self::True
        } else {
            Self::False
        }
    }
}

impl From<BoolState> for Option<bool> {
    fn from(value: BoolState) -> Self {
        match value {
            BoolState::True => Some(true),
            BoolState::False => Some(false),
            BoolState::Unknown => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_id() {
        assert_eq!(AlertStatus::from_id(1), Some(AlertStatus::Red));
        assert_eq!(AlertStatus::from_id(2), None);
        assert_eq!(MainScreenView::from_id(6), Some(MainScreenView::Status));
        assert_eq!(MainScreenView::from_id(-1), None);
        assert_eq!(Console::from_id(10), Some(Console::GameMaster));
        assert_eq!(CreatureType::from_id(0), Some(CreatureType::Typhon));
        assert_eq!(CreatureType::from_id(8), Some(CreatureType::Wreck));
    }

    #[test]
    fn test_upgrade_count() {
        assert_eq!(Upgrade::COUNT, 28);
        assert_eq!(Upgrade::DoubleAgent.id(), 8);
        assert_eq!(Upgrade::from_id(27), Some(Upgrade::VanguardRefitSystems));
    }

    #[test]
    fn test_ordnance_count_by_version() {
        assert_eq!(OrdnanceType::count(Version::MINIMUM), 5);
        assert_eq!(OrdnanceType::count(Version::new(2, 6, 2)), 5);
        assert_eq!(OrdnanceType::count(Version::V2_6_3), 8);
        assert_eq!(OrdnanceType::count(Version::LATEST), 8);
        assert_eq!(
            OrdnanceType::values(Version::MINIMUM).last(),
            Some(&OrdnanceType::PShock)
        );
    }

    #[test]
    fn test_ordnance_from_id_follows_version() {
        assert_eq!(
            OrdnanceType::from_id_for(Version::MINIMUM, 4),
            Some(OrdnanceType::PShock)
        );
        assert_eq!(OrdnanceType::from_id_for(Version::MINIMUM, 6), None);
        assert_eq!(
            OrdnanceType::from_id_for(Version::V2_6_3, 6),
            Some(OrdnanceType::Probe)
        );
        assert_eq!(OrdnanceType::from_id_for(Version::LATEST, 8), None);
        assert_eq!(OrdnanceType::Probe.introduced(), Version::V2_6_3);
    }

    #[test]
    fn test_ordnance_build_times() {
        let minutes: Vec<u32> = OrdnanceType::ALL
            .iter()
            .map(|o| o.build_time_minutes())
            .collect();
        assert_eq!(minutes, vec![3, 10, 4, 5, 10, 1, 1, 1]);
    }

    #[test]
    fn test_bool_state() {
        assert_eq!(BoolState::default(), BoolState::Unknown);
        assert_eq!(BoolState::from_wire(0), BoolState::False);
        assert_eq!(BoolState::from_wire(7), BoolState::True);
        assert!(BoolState::True.is_true());
        assert!(!BoolState::Unknown.is_known());
        assert_eq!(Option::<bool>::from(BoolState::False), Some(false));
    }
}
