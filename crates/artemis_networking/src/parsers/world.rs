//! Bases, environment objects and the record types that are read and dropped.

use artemis_core::objects::{BaseDsl, CreatureDsl, ObjectDsl};
use artemis_shared::bits::{
    AnomalyBit, AsteroidBit, BaseBit, BlackHoleBit, CreatureBit, DroneBit, GenericMeshBit,
    MineBit, NebulaBit, TorpedoBit,
};
use artemis_shared::CreatureType;

use super::record::{Record, Width};
use crate::error::ParseResult;

/// Space station record.
pub(super) fn read_base(r: &mut Record<'_, '_>, dsl: &mut BaseDsl) -> ParseResult<()> {
    use BaseBit as B;

    let shielded = &mut dsl.shielded;
    shielded.object.name = r.string(B::Name)?;
    shielded.shields_front = r.f32(B::ShieldsFront)?;
    shielded.shields_rear = r.f32(B::ShieldsRear)?;
    dsl.index = r.i32(B::Index)?;
    shielded.hull_id = r.i32(B::HullId)?;
    shielded.object.x = r.f32(B::X)?;
    shielded.object.y = r.f32(B::Y)?;
    shielded.object.z = r.f32(B::Z)?;
    shielded.object.pitch = r.f32(B::Pitch)?;
    shielded.object.roll = r.f32(B::Roll)?;
    shielded.object.heading = r.f32(B::Heading)?;
    shielded.object.velocity = r.f32(B::Velocity)?;
    r.skip(B::Unknown, Width::U8)?;
    shielded.side = r.i8(B::Side)?;
    Ok(())
}

/// Mines and black holes share a layout: a position and five unknown ints.
macro_rules! read_positioned {
    ($name:ident, $bits:ident) => {
        pub(super) fn $name(r: &mut Record<'_, '_>, dsl: &mut ObjectDsl) -> ParseResult<()> {
            dsl.x = r.f32($bits::X)?;
            dsl.y = r.f32($bits::Y)?;
            dsl.z = r.f32($bits::Z)?;
            for slot in [
                $bits::Unknown1,
                $bits::Unknown2,
                $bits::Unknown3,
                $bits::Unknown4,
                $bits::Unknown5,
            ] {
                r.skip(slot, Width::I32)?;
            }
            Ok(())
        }
    };
}

read_positioned!(read_mine, MineBit);
read_positioned!(read_black_hole, BlackHoleBit);

/// Space creature record.
pub(super) fn read_creature(r: &mut Record<'_, '_>, dsl: &mut CreatureDsl) -> ParseResult<()> {
    use CreatureBit as B;

    let object = &mut dsl.object;
    object.x = r.f32(B::X)?;
    object.y = r.f32(B::Y)?;
    object.z = r.f32(B::Z)?;
    object.name = r.string(B::Name)?;
    object.heading = r.f32(B::Heading)?;
    object.pitch = r.f32(B::Pitch)?;
    object.roll = r.f32(B::Roll)?;
    dsl.creature_type = r.enum_i32(B::CreatureType, "CreatureType", CreatureType::from_id)?;
    for slot in [
        B::Unknown1,
        B::Unknown2,
        B::Unknown3,
        B::Unknown4,
        B::Unknown5,
        B::Unknown6,
    ] {
        r.skip(slot, Width::I32)?;
    }
    dsl.health = r.f32(B::Health)?;
    dsl.max_health = r.f32(B::MaxHealth)?;
    Ok(())
}

// =============================================================================
// DISCARDED RECORDS
// =============================================================================

fn anomaly_width(slot: AnomalyBit) -> Width {
    match slot {
        AnomalyBit::X | AnomalyBit::Y | AnomalyBit::Z => Width::F32,
        AnomalyBit::BeaconType | AnomalyBit::BeaconMode => Width::U8,
        _ => Width::I32,
    }
}

fn nebula_width(slot: NebulaBit) -> Width {
    match slot {
        NebulaBit::Unknown1 | NebulaBit::Unknown2 => Width::I32,
        NebulaBit::NebulaType => Width::U8,
        _ => Width::F32,
    }
}

fn torpedo_width(slot: TorpedoBit) -> Width {
    match slot {
        TorpedoBit::Unknown1 | TorpedoBit::OrdnanceType | TorpedoBit::Unknown2 => Width::I32,
        _ => Width::F32,
    }
}

fn asteroid_width(slot: AsteroidBit) -> Width {
    match slot {
        AsteroidBit::X | AsteroidBit::Y | AsteroidBit::Z => Width::F32,
        _ => Width::I32,
    }
}

fn generic_mesh_width(slot: GenericMeshBit) -> Width {
    use GenericMeshBit as B;
    match slot {
        B::Unknown1 | B::Unknown2 | B::Unknown3 | B::Unknown4 => Width::I32,
        B::Name | B::MeshFile | B::TextureFile => Width::Str,
        _ => Width::F32,
    }
}

fn drone_width(slot: DroneBit) -> Width {
    match slot {
        DroneBit::Unknown1 | DroneBit::Unknown4 => Width::I32,
        _ => Width::F32,
    }
}

pub(super) fn skip_anomaly(r: &mut Record<'_, '_>) -> ParseResult<()> {
    r.discard(anomaly_width)
}

pub(super) fn skip_nebula(r: &mut Record<'_, '_>) -> ParseResult<()> {
    r.discard(nebula_width)
}

pub(super) fn skip_torpedo(r: &mut Record<'_, '_>) -> ParseResult<()> {
    r.discard(torpedo_width)
}

pub(super) fn skip_asteroid(r: &mut Record<'_, '_>) -> ParseResult<()> {
    r.discard(asteroid_width)
}

pub(super) fn skip_generic_mesh(r: &mut Record<'_, '_>) -> ParseResult<()> {
    r.discard(generic_mesh_width)
}

pub(super) fn skip_drone(r: &mut Record<'_, '_>) -> ParseResult<()> {
    r.discard(drone_width)
}
