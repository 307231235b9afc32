//! Slot lists of the four player ship records.

use crate::constants::SYSTEM_COUNT;
use crate::enums::{ShipSystem, Upgrade};

use super::BitSlot;

bit_slots! {
    /// Core player ship record.
    PlayerBit {
        WeaponsTarget,
        Impulse,
        Rudder,
        TopSpeed,
        TurnRate,
        AutoBeams,
        Warp,
        Energy,
        ShieldsUp,
        ShipNumber,
        HullId,
        X,
        Y,
        Z,
        Pitch,
        Roll,
        Heading,
        Velocity,
        NebulaType,
        Name,
        ShieldsFront,
        ShieldsFrontMax,
        ShieldsRear,
        ShieldsRearMax,
        DockingBase,
        AlertStatus,
        Unknown,
        MainScreen,
        BeamFrequency,
        Coolant,
        ScienceTarget,
        CaptainTarget,
        DriveType,
        ScanObject,
        ScanProgress,
        Reverse,
        ClimbDive,
        Side,
        Visibility,
        ShipIndex,
        CapitalShipId,
        AccentColor,
        BeaconCreatureType @since V2_6_3,
        BeaconMode @since V2_6_3,
        EmergencyJumpCooldown @since V2_7_0,
    }
}

bit_slots! {
    /// Player weapons record: ordnance stock and tube states.
    ///
    /// The three ordnance kinds added in 2.6.3 are appended after the tubes.
    WeaponsBit {
        CountHoming,
        CountNuke,
        CountMine,
        CountEmp,
        CountPShock,
        TubeTime1,
        TubeTime2,
        TubeTime3,
        TubeTime4,
        TubeTime5,
        TubeTime6,
        TubeState1,
        TubeState2,
        TubeState3,
        TubeState4,
        TubeState5,
        TubeState6,
        TubeContents1,
        TubeContents2,
        TubeContents3,
        TubeContents4,
        TubeContents5,
        TubeContents6,
        CountBeacon @since V2_6_3,
        CountProbe @since V2_6_3,
        CountTag @since V2_6_3,
    }
}

/// Player engineering record: heat, energy and coolant per system.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EngineeringBit {
    /// System heat, `f32`.
    Heat(ShipSystem),
    /// Allocated energy, `f32`.
    Energy(ShipSystem),
    /// Allocated coolant, `u8`.
    Coolant(ShipSystem),
}

impl BitSlot for EngineeringBit {
    const COUNT: usize = SYSTEM_COUNT * 3;

    fn from_ordinal(ordinal: usize) -> Option<Self> {
        let system = *ShipSystem::ALL.get(ordinal % SYSTEM_COUNT)?;
        match ordinal / SYSTEM_COUNT {
            0 => Some(Self::Heat(system)),
            1 => Some(Self::Energy(system)),
            2 => Some(Self::Coolant(system)),
            _ => None,
        }
    }

    fn ordinal(self) -> usize {
        let (group, system) = match self {
            Self::Heat(s) => (0, s),
            Self::Energy(s) => (1, s),
            Self::Coolant(s) => (2, s),
        };
        group * SYSTEM_COUNT + usize::from(system.id())
    }
}

/// Player upgrades record: active flag, stock and remaining seconds per upgrade.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UpgradesBit {
    /// Upgrade is running, `u8`.
    Active(Upgrade),
    /// Units in stock, `u8`.
    Count(Upgrade),
    /// Seconds left while active, `i16`.
    Timer(Upgrade),
}

impl BitSlot for UpgradesBit {
    const COUNT: usize = Upgrade::COUNT * 3;

    fn from_ordinal(ordinal: usize) -> Option<Self> {
        let upgrade = *Upgrade::ALL.get(ordinal % Upgrade::COUNT)?;
        match ordinal / Upgrade::COUNT {
            0 => Some(Self::Active(upgrade)),
            1 => Some(Self::Count(upgrade)),
            2 => Some(Self::Timer(upgrade)),
            _ => None,
        }
    }

    fn ordinal(self) -> usize {
        let (group, upgrade) = match self {
            Self::Active(u) => (0, u),
            Self::Count(u) => (1, u),
            Self::Timer(u) => (2, u),
        };
        group * Upgrade::COUNT + usize::from(upgrade.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::version::Version;

    #[test]
    fn test_weapons_counts() {
        assert_eq!(WeaponsBit::bit_count(Version::MINIMUM), 23);
        assert_eq!(WeaponsBit::bit_count(Version::V2_6_3), 26);
    }

    #[test]
    fn test_engineering_ordinals() {
        assert_eq!(EngineeringBit::COUNT, 24);
        assert_eq!(EngineeringBit::Heat(ShipSystem::Beams).ordinal(), 0);
        assert_eq!(EngineeringBit::Energy(ShipSystem::Beams).ordinal(), 8);
        assert_eq!(EngineeringBit::Coolant(ShipSystem::RearShield).ordinal(), 23);
        for ordinal in 0..EngineeringBit::COUNT {
            let slot = EngineeringBit::from_ordinal(ordinal).unwrap();
            assert_eq!(slot.ordinal(), ordinal);
        }
        assert!(EngineeringBit::from_ordinal(24).is_none());
    }

    #[test]
    fn test_upgrades_ordinals() {
        assert_eq!(UpgradesBit::bit_count(Version::LATEST), 84);
        let timer = UpgradesBit::Timer(Upgrade::DoubleAgent);
        assert_eq!(timer.ordinal(), 56 + 8);
        assert_eq!(UpgradesBit::from_ordinal(64), Some(timer));
        assert_eq!(
            UpgradesBit::slot_index("Count(DoubleAgent)", Version::LATEST),
            Some(36)
        );
    }
}
