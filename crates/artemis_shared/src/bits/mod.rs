//! # Bit Slots
//!
//! Every object type declares an ordered list of optional properties. An
//! update record starts with one presence bit per slot that exists in the
//! negotiated version, in slot order.
//!
//! ## Invariant
//!
//! Slot lists only grow at the end. A slot introduced in a later version is
//! appended after every older slot, so its ordinal never moves and older
//! servers simply send a shorter bit field.
//!
//! ```text
//! PlayerBit:  [WeaponsTarget .. AccentColor][BeaconCreatureType BeaconMode][EmergencyJumpCooldown]
//!              2.6.0                          2.6.3                           2.7.0
//! ```

use std::fmt;

use crate::version::Version;

/// One optional property of an object type.
pub trait BitSlot: Copy + Eq + fmt::Debug + 'static {
    /// Number of slots declared by the latest known version.
    const COUNT: usize;

    /// Returns the slot at `ordinal`, if declared.
    fn from_ordinal(ordinal: usize) -> Option<Self>;

    /// Position of this slot in the declaration order.
    fn ordinal(self) -> usize;

    /// First version that transmits this slot.
    fn introduced(self) -> Version {
        Version::MINIMUM
    }

    /// Bit index for `version`, or `-1` if the slot does not exist there.
    #[inline]
    fn index(self, version: Version) -> i32 {
        if version >= self.introduced() {
            self.ordinal() as i32
        } else {
            -1
        }
    }

    /// Number of presence bits `version` sends for this object type.
    fn bit_count(version: Version) -> usize {
        Self::slots().filter(|slot| slot.index(version) >= 0).count()
    }

    /// Iterates all declared slots in ordinal order.
    fn slots() -> SlotIter<Self> {
        SlotIter {
            next: 0,
            _slot: std::marker::PhantomData,
        }
    }

    /// Finds a slot by its name and returns its index for `version`.
    fn slot_index(name: &str, version: Version) -> Option<usize> {
        Self::slots()
            .find(|slot| format!("{slot:?}") == name)
            .and_then(|slot| usize::try_from(slot.index(version)).ok())
    }
}

/// Iterator over the slots of one object type.
#[derive(Debug, Clone)]
pub struct SlotIter<S> {
    next: usize,
    _slot: std::marker::PhantomData<S>,
}

impl<S: BitSlot> Iterator for SlotIter<S> {
    type Item = S;

    fn next(&mut self) -> Option<S> {
        let slot = S::from_ordinal(self.next)?;
        self.next += 1;
        Some(slot)
    }
}

/// Declares a unit slot enum and its [`BitSlot`] impl.
///
/// A slot marked `@since V2_6_3` is absent for older versions; unmarked slots
/// exist in every supported version.
macro_rules! bit_slots {
    (@since) => { $crate::version::Version::MINIMUM };
    (@since $since:ident) => { $crate::version::Version::$since };
    (
        $(#[$meta:meta])*
        $name:ident {
            $($variant:ident $(@since $since:ident)?),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[allow(missing_docs)]
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant,)+
        }

        impl $name {
            /// Every slot in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant,)+];
        }

        impl $crate::bits::BitSlot for $name {
            const COUNT: usize = Self::ALL.len();

            fn from_ordinal(ordinal: usize) -> Option<Self> {
                Self::ALL.get(ordinal).copied()
            }

            fn ordinal(self) -> usize {
                self as usize
            }

            fn introduced(self) -> $crate::version::Version {
                match self {
                    $(Self::$variant => bit_slots!(@since $($since)?),)+
                }
            }
        }
    };
}

mod environment;
mod npc;
mod player;

pub use environment::{
    AnomalyBit, AsteroidBit, BaseBit, BlackHoleBit, CreatureBit, DroneBit, GenericMeshBit,
    MineBit, NebulaBit, TorpedoBit,
};
pub use npc::NpcBit;
pub use player::{EngineeringBit, PlayerBit, UpgradesBit, WeaponsBit};

// =============================================================================
// OBJECT TYPES
// =============================================================================

/// Object type discriminator, the first byte of every update record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum ObjectType {
    /// Player ship core data.
    PlayerShip = 1,
    /// Player ship weapons record.
    WeaponsConsole = 2,
    /// Player ship engineering record.
    EngineeringConsole = 3,
    /// Player ship upgrades record.
    UpgradesConsole = 4,
    /// Non-player ship.
    NpcShip = 5,
    /// Space station.
    Base = 6,
    /// Mine.
    Mine = 7,
    /// Anomaly or beacon.
    Anomaly = 8,
    /// Nebula.
    Nebula = 10,
    /// Torpedo in flight.
    Torpedo = 11,
    /// Black hole.
    BlackHole = 12,
    /// Asteroid.
    Asteroid = 13,
    /// Scenery mesh.
    GenericMesh = 14,
    /// Space creature.
    Creature = 15,
    /// Drone.
    Drone = 16,
}

impl ObjectType {
    /// Every object type in wire order.
    pub const ALL: &'static [Self] = &[
        Self::PlayerShip,
        Self::WeaponsConsole,
        Self::EngineeringConsole,
        Self::UpgradesConsole,
        Self::NpcShip,
        Self::Base,
        Self::Mine,
        Self::Anomaly,
        Self::Nebula,
        Self::Torpedo,
        Self::BlackHole,
        Self::Asteroid,
        Self::GenericMesh,
        Self::Creature,
        Self::Drone,
    ];

    /// Converts a wire byte. Zero and unassigned values return `None`.
    #[must_use]
    pub fn from_id(id: u8) -> Option<Self> {
        Self::ALL.iter().copied().find(|t| t.id() == id)
    }

    /// Wire byte of this type.
    #[inline]
    #[must_use]
    pub const fn id(self) -> u8 {
        self as u8
    }

    /// Returns true for the four records that describe a player ship.
    #[inline]
    #[must_use]
    pub const fn is_player_record(self) -> bool {
        matches!(
            self,
            Self::PlayerShip | Self::WeaponsConsole | Self::EngineeringConsole | Self::UpgradesConsole
        )
    }

    /// Presence bits sent for this type by `version`.
    #[must_use]
    pub fn bit_count(self, version: Version) -> usize {
        match self {
            Self::PlayerShip => PlayerBit::bit_count(version),
            Self::WeaponsConsole => WeaponsBit::bit_count(version),
            Self::EngineeringConsole => EngineeringBit::bit_count(version),
            Self::UpgradesConsole => UpgradesBit::bit_count(version),
            Self::NpcShip => NpcBit::bit_count(version),
            Self::Base => BaseBit::bit_count(version),
            Self::Mine => MineBit::bit_count(version),
            Self::Anomaly => AnomalyBit::bit_count(version),
            Self::Nebula => NebulaBit::bit_count(version),
            Self::Torpedo => TorpedoBit::bit_count(version),
            Self::BlackHole => BlackHoleBit::bit_count(version),
            Self::Asteroid => AsteroidBit::bit_count(version),
            Self::GenericMesh => GenericMeshBit::bit_count(version),
            Self::Creature => CreatureBit::bit_count(version),
            Self::Drone => DroneBit::bit_count(version),
        }
    }

    /// Index of the slot named `name` for `version`, or `None` if the type
    /// has no such slot or `version` does not send it.
    #[must_use]
    pub fn slot_index(self, name: &str, version: Version) -> Option<usize> {
        match self {
            Self::PlayerShip => PlayerBit::slot_index(name, version),
            Self::WeaponsConsole => WeaponsBit::slot_index(name, version),
            Self::EngineeringConsole => EngineeringBit::slot_index(name, version),
            Self::UpgradesConsole => UpgradesBit::slot_index(name, version),
            Self::NpcShip => NpcBit::slot_index(name, version),
            Self::Base => BaseBit::slot_index(name, version),
            Self::Mine => MineBit::slot_index(name, version),
            Self::Anomaly => AnomalyBit::slot_index(name, version),
            Self::Nebula => NebulaBit::slot_index(name, version),
            Self::Torpedo => TorpedoBit::slot_index(name, version),
            Self::BlackHole => BlackHoleBit::slot_index(name, version),
            Self::Asteroid => AsteroidBit::slot_index(name, version),
            Self::GenericMesh => GenericMeshBit::slot_index(name, version),
            Self::Creature => CreatureBit::slot_index(name, version),
            Self::Drone => DroneBit::slot_index(name, version),
        }
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
