//! Slot list of non-player ships.

bit_slots! {
    /// NPC ship record. System damage follows [`crate::ShipSystem`] order,
    /// frequency resistance follows [`crate::BeamFrequency`] order.
    NpcBit {
        Name,
        Impulse,
        Rudder,
        MaxImpulse,
        MaxTurnRate,
        IsEnemy,
        HullId,
        X,
        Y,
        Z,
        Pitch,
        Roll,
        Heading,
        Velocity,
        Surrendered,
        NebulaType,
        ShieldsFront,
        ShieldsFrontMax,
        ShieldsRear,
        ShieldsRearMax,
        Unknown1,
        FleetNumber,
        SpecialAbilities,
        SpecialState,
        SingleScan,
        DoubleScan,
        Visibility,
        Side,
        Unknown2,
        Unknown3,
        Unknown4,
        TargetX,
        TargetY,
        TargetZ,
        Tagged,
        Unknown5,
        DamageBeams,
        DamageTorpedoes,
        DamageSensors,
        DamageManeuvering,
        DamageImpulse,
        DamageWarpJump,
        DamageFrontShield,
        DamageRearShield,
        ResistA,
        ResistB,
        ResistC,
        ResistD,
        ResistE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bits::BitSlot;
    use crate::version::Version;

    #[test]
    fn test_npc_layout() {
        assert_eq!(NpcBit::COUNT, 49);
        assert_eq!(NpcBit::bit_count(Version::MINIMUM), 49);
        assert_eq!(NpcBit::DamageBeams.ordinal(), 36);
        assert_eq!(NpcBit::ResistA.ordinal(), 44);
    }
}
