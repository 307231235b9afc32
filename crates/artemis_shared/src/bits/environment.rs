//! Slot lists of bases, creatures and scenery.

bit_slots! {
    /// Space station record.
    BaseBit {
        Name,
        ShieldsFront,
        ShieldsRear,
        Index,
        HullId,
        X,
        Y,
        Z,
        Pitch,
        Roll,
        Heading,
        Velocity,
        Unknown,
        Side,
    }
}

bit_slots! {
    /// Mine record.
    MineBit { X, Y, Z, Unknown1, Unknown2, Unknown3, Unknown4, Unknown5 }
}

bit_slots! {
    /// Anomaly record. Beacons reuse it from 2.6.3.
    AnomalyBit {
        X,
        Y,
        Z,
        Type,
        Scan,
        Unknown1,
        Unknown2,
        Unknown3,
        BeaconType @since V2_6_3,
        BeaconMode @since V2_6_3,
    }
}

bit_slots! {
    /// Nebula record.
    NebulaBit {
        X,
        Y,
        Z,
        Red,
        Green,
        Blue,
        Unknown1,
        Unknown2,
        NebulaType @since V2_7_0,
    }
}

bit_slots! {
    /// Torpedo record.
    TorpedoBit { X, Y, Z, DeltaX, DeltaY, DeltaZ, Unknown1, OrdnanceType, Unknown2 }
}

bit_slots! {
    /// Black hole record.
    BlackHoleBit { X, Y, Z, Unknown1, Unknown2, Unknown3, Unknown4, Unknown5 }
}

bit_slots! {
    /// Asteroid record.
    AsteroidBit { X, Y, Z, Unknown1, Unknown2, Unknown3, Unknown4, Unknown5 }
}

bit_slots! {
    /// Scenery mesh record.
    GenericMeshBit {
        X,
        Y,
        Z,
        Unknown1,
        Unknown2,
        Unknown3,
        Heading,
        Pitch,
        Roll,
        Name,
        MeshFile,
        TextureFile,
        Unknown4,
        Red,
        Green,
        Blue,
    }
}

bit_slots! {
    /// Space creature record.
    CreatureBit {
        X,
        Y,
        Z,
        Name,
        Heading,
        Pitch,
        Roll,
        CreatureType,
        Unknown1,
        Unknown2,
        Unknown3,
        Unknown4,
        Unknown5,
        Unknown6,
        Health @since V2_6_3,
        MaxHealth @since V2_6_3,
    }
}

bit_slots! {
    /// Drone record. Coordinates are interleaved with unknown floats.
    DroneBit {
        Unknown1,
        X,
        Unknown2,
        Z,
        Unknown3,
        Y,
        Heading,
        Unknown4,
        Unknown5 @since V2_6_3,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bits::BitSlot;
    use crate::version::Version;

    #[test]
    fn test_fixed_layouts() {
        assert_eq!(BaseBit::COUNT, 14);
        assert_eq!(MineBit::COUNT, 8);
        assert_eq!(TorpedoBit::COUNT, 9);
        assert_eq!(GenericMeshBit::COUNT, 16);
    }

    #[test]
    fn test_versioned_layouts() {
        assert_eq!(AnomalyBit::bit_count(Version::MINIMUM), 8);
        assert_eq!(AnomalyBit::bit_count(Version::V2_6_3), 10);
        assert_eq!(NebulaBit::bit_count(Version::V2_6_3), 8);
        assert_eq!(NebulaBit::bit_count(Version::V2_7_0), 9);
        assert_eq!(CreatureBit::bit_count(Version::MINIMUM), 14);
        assert_eq!(CreatureBit::bit_count(Version::LATEST), 16);
        assert_eq!(DroneBit::bit_count(Version::MINIMUM), 8);
    }
}
