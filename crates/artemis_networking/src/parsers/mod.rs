//! # Object Parsers
//!
//! Decodes the records of an object update frame into partial world objects.
//!
//! ## Record Layout
//!
//! ```text
//! ┌──────┬──────┬──────────────────────┬─────────────────────────────────┐
//! │ type │ id   │ presence bits        │ present slots, in slot order    │
//! │ u8   │ i32  │ ceil(bit_count / 8)  │ u8 / i16 / i32 / f32 / string   │
//! └──────┴──────┴──────────────────────┴─────────────────────────────────┘
//! ```
//!
//! `bit_count` depends on the object type and the negotiated version. A slot
//! whose bit is clear is absent from the record and stays unspecified.
//!
//! ## Builders
//!
//! [`ObjectParsers`] owns one builder per tracked type. It is used by one
//! decoder at a time (`&mut self`) and every builder is empty again when
//! [`ObjectParsers::parse`] returns, whether it succeeded or not.

use artemis_core::objects::{BaseDsl, BlackHoleDsl, CreatureDsl, MineDsl, NpcDsl, PlayerDsl};
use artemis_core::{ArtemisObject, Dsl};
use artemis_shared::{CreatureType, ObjectType, Version};

use crate::error::{ParseError, ParseResult};
use crate::protocol::PacketReader;

mod record;
mod ships;
mod world;

use record::Record;

/// The creature type the world model keeps. Other creatures are consumed
/// and dropped.
pub const TRACKED_CREATURE: CreatureType = CreatureType::Typhon;

/// Reusable builders for every tracked object type.
#[derive(Debug, Default)]
pub struct ObjectParsers {
    player: PlayerDsl,
    npc: NpcDsl,
    base: BaseDsl,
    mine: MineDsl,
    black_hole: BlackHoleDsl,
    creature: CreatureDsl,
}

impl ObjectParsers {
    /// Creates empty builders.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Decodes one record starting at its type byte.
    ///
    /// Returns `None` for records that are read but not tracked: engineering
    /// telemetry, scenery, torpedoes, drones and creatures other than
    /// [`TRACKED_CREATURE`].
    ///
    /// # Errors
    ///
    /// Fails on an unknown type byte, a short record, or an invalid
    /// enumeration value.
    pub fn parse(
        &mut self,
        reader: &mut PacketReader<'_>,
        version: Version,
        timestamp: u64,
    ) -> ParseResult<Option<ArtemisObject>> {
        let raw = reader.read_u8()?;
        let object_type = ObjectType::from_id(raw).ok_or(ParseError::UnknownObjectType(raw))?;
        let id = reader.read_i32()?;

        let result = self.parse_record(object_type, id, reader, version, timestamp);
        if result.is_err() {
            self.reset();
        }
        result
    }

    fn parse_record(
        &mut self,
        object_type: ObjectType,
        id: i32,
        reader: &mut PacketReader<'_>,
        version: Version,
        timestamp: u64,
    ) -> ParseResult<Option<ArtemisObject>> {
        let mut r = Record::open(reader, object_type, version)?;

        let object: ArtemisObject = match object_type {
            ObjectType::PlayerShip => {
                ships::read_player(&mut r, &mut self.player)?;
                self.player.build(id, timestamp).into()
            }
            ObjectType::WeaponsConsole => {
                ships::read_weapons(&mut r, &mut self.player)?;
                self.player.build(id, timestamp).into()
            }
            ObjectType::UpgradesConsole => {
                ships::read_upgrades(&mut r, &mut self.player)?;
                self.player.build(id, timestamp).into()
            }
            ObjectType::NpcShip => {
                ships::read_npc(&mut r, &mut self.npc)?;
                self.npc.build(id, timestamp).into()
            }
            ObjectType::Base => {
                world::read_base(&mut r, &mut self.base)?;
                self.base.build(id, timestamp).into()
            }
            ObjectType::Mine => {
                world::read_mine(&mut r, &mut self.mine.object)?;
                self.mine.build(id, timestamp).into()
            }
            ObjectType::BlackHole => {
                world::read_black_hole(&mut r, &mut self.black_hole.object)?;
                self.black_hole.build(id, timestamp).into()
            }
            ObjectType::Creature => {
                world::read_creature(&mut r, &mut self.creature)?;
                if self
                    .creature
                    .creature_type
                    .is_some_and(|kind| kind != TRACKED_CREATURE)
                {
                    self.creature.reset();
                    return Ok(None);
                }
                self.creature.build(id, timestamp).into()
            }
            ObjectType::EngineeringConsole => return ships::skip_engineering(&mut r).map(|()| None),
            ObjectType::Anomaly => return world::skip_anomaly(&mut r).map(|()| None),
            ObjectType::Nebula => return world::skip_nebula(&mut r).map(|()| None),
            ObjectType::Torpedo => return world::skip_torpedo(&mut r).map(|()| None),
            ObjectType::Asteroid => return world::skip_asteroid(&mut r).map(|()| None),
            ObjectType::GenericMesh => return world::skip_generic_mesh(&mut r).map(|()| None),
            ObjectType::Drone => return world::skip_drone(&mut r).map(|()| None),
        };
        Ok(Some(object))
    }

    /// Empties every builder.
    pub fn reset(&mut self) {
        self.player.reset();
        self.npc.reset();
        self.base.reset();
        self.mine.reset();
        self.black_hole.reset();
        self.creature.reset();
    }
}
