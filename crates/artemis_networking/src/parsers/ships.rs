//! Player and NPC ship records.

use artemis_core::objects::{NpcDsl, PlayerDsl};
use artemis_shared::bits::{EngineeringBit, NpcBit, PlayerBit, UpgradesBit, WeaponsBit};
use artemis_shared::{
    AlertStatus, BeamFrequency, BitSlot, CreatureType, DriveType, MainScreenView, OrdnanceType,
    TubeState, Upgrade,
};

use super::record::{Record, Width};
use crate::error::{ParseError, ParseResult};

/// Tube contents byte meaning "empty".
const NO_ORDNANCE: u8 = 0xFF;

// =============================================================================
// PLAYER
// =============================================================================

/// Core player ship record.
pub(super) fn read_player(r: &mut Record<'_, '_>, dsl: &mut PlayerDsl) -> ParseResult<()> {
    use PlayerBit as B;

    let ship = &mut dsl.ship;
    let shielded = &mut ship.shielded;

    dsl.weapons_target = r.i32(B::WeaponsTarget)?;
    ship.impulse = r.f32(B::Impulse)?;
    ship.rudder = r.f32(B::Rudder)?;
    ship.top_speed = r.f32(B::TopSpeed)?;
    ship.turn_rate = r.f32(B::TurnRate)?;
    dsl.auto_beams = r.bool_u8(B::AutoBeams)?;
    dsl.warp = r.i8(B::Warp)?;
    dsl.energy = r.f32(B::Energy)?;
    dsl.shields_up = r.bool_i16(B::ShieldsUp)?;
    r.skip(B::ShipNumber, Width::I32)?;
    shielded.hull_id = r.i32(B::HullId)?;
    shielded.object.x = r.f32(B::X)?;
    shielded.object.y = r.f32(B::Y)?;
    shielded.object.z = r.f32(B::Z)?;
    shielded.object.pitch = r.f32(B::Pitch)?;
    shielded.object.roll = r.f32(B::Roll)?;
    shielded.object.heading = r.f32(B::Heading)?;
    shielded.object.velocity = r.f32(B::Velocity)?;
    ship.nebula_type = r.i16(B::NebulaType)?.map(|v| v as i8);
    shielded.object.name = r.string(B::Name)?;
    shielded.shields_front = r.f32(B::ShieldsFront)?;
    shielded.shields_front_max = r.f32(B::ShieldsFrontMax)?;
    shielded.shields_rear = r.f32(B::ShieldsRear)?;
    shielded.shields_rear_max = r.f32(B::ShieldsRearMax)?;
    dsl.docking_base = r.i32(B::DockingBase)?;
    dsl.alert_status = r.enum_u8(B::AlertStatus, "AlertStatus", AlertStatus::from_id)?;
    r.skip(B::Unknown, Width::F32)?;
    dsl.main_screen = r.enum_u8(B::MainScreen, "MainScreenView", MainScreenView::from_id)?;
    dsl.beam_frequency = r.enum_u8(B::BeamFrequency, "BeamFrequency", BeamFrequency::from_id)?;
    dsl.available_coolant = r.u8(B::Coolant)?.map(i32::from);
    dsl.science_target = r.i32(B::ScienceTarget)?;
    dsl.captain_target = r.i32(B::CaptainTarget)?;
    dsl.drive_type = r.enum_u8(B::DriveType, "DriveType", DriveType::from_id)?;
    dsl.scan_object = r.i32(B::ScanObject)?;
    dsl.scan_progress = r.f32(B::ScanProgress)?;
    dsl.reverse = r.bool_u8(B::Reverse)?;
    dsl.climb_dive = r.f32(B::ClimbDive)?;
    shielded.side = r.i8(B::Side)?;
    ship.visibility = r.i32(B::Visibility)?;
    dsl.ship_index = r.i8(B::ShipIndex)?;
    dsl.capital_ship_id = r.i32(B::CapitalShipId)?;
    dsl.accent_color = r.f32(B::AccentColor)?;
    dsl.beacon_creature_type =
        r.enum_u8(B::BeaconCreatureType, "CreatureType", CreatureType::from_id)?;
    dsl.beacon_mode = r.i8(B::BeaconMode)?;
    dsl.emergency_jump_cooldown = r.f32(B::EmergencyJumpCooldown)?;
    Ok(())
}

const COUNT_SLOTS: [WeaponsBit; 8] = [
    WeaponsBit::CountHoming,
    WeaponsBit::CountNuke,
    WeaponsBit::CountMine,
    WeaponsBit::CountEmp,
    WeaponsBit::CountPShock,
    WeaponsBit::CountBeacon,
    WeaponsBit::CountProbe,
    WeaponsBit::CountTag,
];

const TUBE_TIME_SLOTS: [WeaponsBit; 6] = [
    WeaponsBit::TubeTime1,
    WeaponsBit::TubeTime2,
    WeaponsBit::TubeTime3,
    WeaponsBit::TubeTime4,
    WeaponsBit::TubeTime5,
    WeaponsBit::TubeTime6,
];

const TUBE_STATE_SLOTS: [WeaponsBit; 6] = [
    WeaponsBit::TubeState1,
    WeaponsBit::TubeState2,
    WeaponsBit::TubeState3,
    WeaponsBit::TubeState4,
    WeaponsBit::TubeState5,
    WeaponsBit::TubeState6,
];

const TUBE_CONTENTS_SLOTS: [WeaponsBit; 6] = [
    WeaponsBit::TubeContents1,
    WeaponsBit::TubeContents2,
    WeaponsBit::TubeContents3,
    WeaponsBit::TubeContents4,
    WeaponsBit::TubeContents5,
    WeaponsBit::TubeContents6,
];

fn position(slots: &[WeaponsBit], slot: WeaponsBit) -> Option<usize> {
    slots.iter().position(|s| *s == slot)
}

/// Weapons record: ordnance stock and tubes, in slot order.
pub(super) fn read_weapons(r: &mut Record<'_, '_>, dsl: &mut PlayerDsl) -> ParseResult<()> {
    let version = r.version();
    for slot in WeaponsBit::slots() {
        if !r.has(slot) {
            continue;
        }
        let reader = r.reader();
        if let Some(kind) = position(&COUNT_SLOTS, slot) {
            dsl.ordnance_counts[kind] = Some(i32::from(reader.read_u8()?));
        } else if let Some(tube) = position(&TUBE_TIME_SLOTS, slot) {
            dsl.tubes[tube].time_left = Some(reader.read_f32()?);
        } else if let Some(tube) = position(&TUBE_STATE_SLOTS, slot) {
            let value = reader.read_u8()?;
            dsl.tubes[tube].state =
                Some(TubeState::from_id(i32::from(value)).ok_or(ParseError::InvalidEnum {
                    name: "TubeState",
                    value: i32::from(value),
                })?);
        } else if let Some(tube) = position(&TUBE_CONTENTS_SLOTS, slot) {
            let value = reader.read_u8()?;
            if value != NO_ORDNANCE {
                let ordnance = OrdnanceType::from_id_for(version, i32::from(value)).ok_or(
                    ParseError::InvalidEnum {
                        name: "OrdnanceType",
                        value: i32::from(value),
                    },
                )?;
                dsl.tubes[tube].contents = Some(ordnance);
            }
        }
    }
    Ok(())
}

/// Engineering record. Per-system telemetry is not tracked.
pub(super) fn skip_engineering(r: &mut Record<'_, '_>) -> ParseResult<()> {
    r.discard(|slot: EngineeringBit| match slot {
        EngineeringBit::Heat(_) | EngineeringBit::Energy(_) => Width::F32,
        EngineeringBit::Coolant(_) => Width::U8,
    })
}

/// Upgrades record. Only the double agent is tracked.
pub(super) fn read_upgrades(r: &mut Record<'_, '_>, dsl: &mut PlayerDsl) -> ParseResult<()> {
    for slot in UpgradesBit::slots() {
        match slot {
            UpgradesBit::Active(Upgrade::DoubleAgent) => {
                dsl.double_agent_active = r.bool_u8(slot)?;
            }
            UpgradesBit::Count(Upgrade::DoubleAgent) => {
                dsl.double_agent_count = r.u8(slot)?.map(i32::from);
            }
            UpgradesBit::Timer(Upgrade::DoubleAgent) => {
                dsl.double_agent_seconds = r.i16(slot)?;
            }
            UpgradesBit::Active(_) | UpgradesBit::Count(_) => r.skip(slot, Width::U8)?,
            UpgradesBit::Timer(_) => r.skip(slot, Width::I16)?,
        }
    }
    Ok(())
}

// =============================================================================
// NPC
// =============================================================================

const DAMAGE_SLOTS: [NpcBit; 8] = [
    NpcBit::DamageBeams,
    NpcBit::DamageTorpedoes,
    NpcBit::DamageSensors,
    NpcBit::DamageManeuvering,
    NpcBit::DamageImpulse,
    NpcBit::DamageWarpJump,
    NpcBit::DamageFrontShield,
    NpcBit::DamageRearShield,
];

const RESIST_SLOTS: [NpcBit; 5] = [
    NpcBit::ResistA,
    NpcBit::ResistB,
    NpcBit::ResistC,
    NpcBit::ResistD,
    NpcBit::ResistE,
];

/// NPC ship record.
pub(super) fn read_npc(r: &mut Record<'_, '_>, dsl: &mut NpcDsl) -> ParseResult<()> {
    use NpcBit as B;

    let ship = &mut dsl.ship;
    let shielded = &mut ship.shielded;

    shielded.object.name = r.string(B::Name)?;
    ship.impulse = r.f32(B::Impulse)?;
    ship.rudder = r.f32(B::Rudder)?;
    ship.top_speed = r.f32(B::MaxImpulse)?;
    ship.turn_rate = r.f32(B::MaxTurnRate)?;
    dsl.is_enemy = r.bool_i32(B::IsEnemy)?;
    shielded.hull_id = r.i32(B::HullId)?;
    shielded.object.x = r.f32(B::X)?;
    shielded.object.y = r.f32(B::Y)?;
    shielded.object.z = r.f32(B::Z)?;
    shielded.object.pitch = r.f32(B::Pitch)?;
    shielded.object.roll = r.f32(B::Roll)?;
    shielded.object.heading = r.f32(B::Heading)?;
    shielded.object.velocity = r.f32(B::Velocity)?;
    dsl.surrendered = r.bool_u8(B::Surrendered)?;
    ship.nebula_type = r.i8(B::NebulaType)?;
    shielded.shields_front = r.f32(B::ShieldsFront)?;
    shielded.shields_front_max = r.f32(B::ShieldsFrontMax)?;
    shielded.shields_rear = r.f32(B::ShieldsRear)?;
    shielded.shields_rear_max = r.f32(B::ShieldsRearMax)?;
    r.skip(B::Unknown1, Width::I16)?;
    dsl.fleet_number = r.u8(B::FleetNumber)?.map(i32::from);
    dsl.special_abilities = r.i32(B::SpecialAbilities)?;
    dsl.special_state = r.i32(B::SpecialState)?;
    dsl.single_scan = r.i32(B::SingleScan)?;
    dsl.double_scan = r.i32(B::DoubleScan)?;
    ship.visibility = r.i32(B::Visibility)?;
    shielded.side = r.i8(B::Side)?;
    r.skip(B::Unknown2, Width::U8)?;
    r.skip(B::Unknown3, Width::U8)?;
    r.skip(B::Unknown4, Width::U8)?;
    r.skip(B::TargetX, Width::F32)?;
    r.skip(B::TargetY, Width::F32)?;
    r.skip(B::TargetZ, Width::F32)?;
    dsl.tagged = r.bool_u8(B::Tagged)?;
    r.skip(B::Unknown5, Width::U8)?;

    for (value, slot) in dsl.system_damage.iter_mut().zip(DAMAGE_SLOTS) {
        *value = r.f32(slot)?;
    }
    for (value, slot) in dsl.frequency_resist.iter_mut().zip(RESIST_SLOTS) {
        *value = r.f32(slot)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use artemis_shared::{BoolState, ObjectType, ShipSystem, Version};

    use super::*;
    use crate::protocol::{PacketReader, PacketWriter};

    fn bits_for(object_type: ObjectType, version: Version, set: &[usize]) -> Vec<u8> {
        let mut bits = artemis_shared::BitField::new(object_type.bit_count(version));
        for &i in set {
            bits.set(i as i32, true);
        }
        bits.as_bytes().to_vec()
    }

    #[test]
    fn test_weapons_tube_contents_empty_marker() {
        let version = Version::LATEST;
        let mut w = PacketWriter::new();
        w.write_bytes(&bits_for(
            ObjectType::WeaponsConsole,
            version,
            &[
                WeaponsBit::CountNuke.ordinal(),
                WeaponsBit::TubeContents1.ordinal(),
                WeaponsBit::TubeContents2.ordinal(),
                WeaponsBit::CountTag.ordinal(),
            ],
        ));
        w.write_u8(4).write_u8(NO_ORDNANCE).write_u8(2).write_u8(9);

        let mut reader = PacketReader::new(w.as_slice());
        let mut record = Record::open(&mut reader, ObjectType::WeaponsConsole, version).unwrap();
        let mut dsl = PlayerDsl::default();
        read_weapons(&mut record, &mut dsl).unwrap();

        assert_eq!(dsl.ordnance_counts[OrdnanceType::Nuke as usize], Some(4));
        assert_eq!(dsl.ordnance_counts[OrdnanceType::Tag as usize], Some(9));
        assert_eq!(dsl.tubes[0].contents, None);
        assert_eq!(dsl.tubes[1].contents, Some(OrdnanceType::Mine));
        assert!(reader.is_empty());
    }

    #[test]
    fn test_weapons_rejects_bad_tube_state() {
        let version = Version::LATEST;
        let mut w = PacketWriter::new();
        w.write_bytes(&bits_for(
            ObjectType::WeaponsConsole,
            version,
            &[WeaponsBit::TubeState3.ordinal()],
        ));
        w.write_u8(7);

        let mut reader = PacketReader::new(w.as_slice());
        let mut record = Record::open(&mut reader, ObjectType::WeaponsConsole, version).unwrap();
        assert_eq!(
            read_weapons(&mut record, &mut PlayerDsl::default()),
            Err(ParseError::InvalidEnum {
                name: "TubeState",
                value: 7
            })
        );
    }

    #[test]
    fn test_weapons_rejects_ordnance_newer_than_server() {
        let version = Version::MINIMUM;
        let mut bits = artemis_shared::BitField::new(ObjectType::WeaponsConsole.bit_count(version));
        bits.set(WeaponsBit::TubeContents1.index(version), true);
        let mut w = PacketWriter::new();
        w.write_bytes(bits.as_bytes())
            .write_u8(OrdnanceType::Probe.id());

        let mut reader = PacketReader::new(w.as_slice());
        let mut record = Record::open(&mut reader, ObjectType::WeaponsConsole, version).unwrap();
        let mut dsl = PlayerDsl::default();
        assert_eq!(
            read_weapons(&mut record, &mut dsl),
            Err(ParseError::InvalidEnum {
                name: "OrdnanceType",
                value: i32::from(OrdnanceType::Probe.id())
            })
        );
        assert_eq!(dsl.tubes[0].contents, None);

        let version = Version::V2_6_3;
        let mut bits = artemis_shared::BitField::new(ObjectType::WeaponsConsole.bit_count(version));
        bits.set(WeaponsBit::TubeContents1.index(version), true);
        let mut w = PacketWriter::new();
        w.write_bytes(bits.as_bytes())
            .write_u8(OrdnanceType::Probe.id());

        let mut reader = PacketReader::new(w.as_slice());
        let mut record = Record::open(&mut reader, ObjectType::WeaponsConsole, version).unwrap();
        read_weapons(&mut record, &mut dsl).unwrap();
        assert_eq!(dsl.tubes[0].contents, Some(OrdnanceType::Probe));
    }

    #[test]
    fn test_upgrades_keeps_double_agent() {
        let version = Version::LATEST;
        let mut w = PacketWriter::new();
        w.write_bytes(&bits_for(
            ObjectType::UpgradesConsole,
            version,
            &[
                UpgradesBit::Active(Upgrade::HydrogenRam).ordinal(),
                UpgradesBit::Active(Upgrade::DoubleAgent).ordinal(),
                UpgradesBit::Count(Upgrade::DoubleAgent).ordinal(),
                UpgradesBit::Timer(Upgrade::LateralArray).ordinal(),
                UpgradesBit::Timer(Upgrade::DoubleAgent).ordinal(),
            ],
        ));
        w.write_u8(1).write_u8(1).write_u8(3).write_i16(10).write_i16(45);

        let mut reader = PacketReader::new(w.as_slice());
        let mut record = Record::open(&mut reader, ObjectType::UpgradesConsole, version).unwrap();
        let mut dsl = PlayerDsl::default();
        read_upgrades(&mut record, &mut dsl).unwrap();

        assert_eq!(dsl.double_agent_active, Some(BoolState::True));
        assert_eq!(dsl.double_agent_count, Some(3));
        assert_eq!(dsl.double_agent_seconds, Some(45));
        assert!(reader.is_empty());
    }

    #[test]
    fn test_engineering_is_consumed() {
        let version = Version::LATEST;
        let mut w = PacketWriter::new();
        w.write_bytes(&bits_for(
            ObjectType::EngineeringConsole,
            version,
            &[
                EngineeringBit::Heat(ShipSystem::Sensors).ordinal(),
                EngineeringBit::Coolant(ShipSystem::Impulse).ordinal(),
            ],
        ));
        w.write_f32(0.5).write_u8(2);

        let mut reader = PacketReader::new(w.as_slice());
        let mut record =
            Record::open(&mut reader, ObjectType::EngineeringConsole, version).unwrap();
        skip_engineering(&mut record).unwrap();
        assert!(reader.is_empty());
    }
}
