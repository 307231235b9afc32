//! Packets received from the server and their decoders.

use artemis_core::ArtemisObject;
use artemis_shared::{type_hash, ObjectType, Version};

use super::{
    server_packet, ServerPacket, COMM_TEXT, CONNECTED, HEARTBEAT, OBJECT_BIT_STREAM,
    OBJECT_DELETE, PLAIN_TEXT_GREETING, SIMPLE_EVENT, START_GAME,
};
use crate::error::{ParseError, ParseResult};
use crate::protocol::{DecodeContext, PacketReader, PacketRegistry};

type Decoded = ParseResult<Box<dyn ServerPacket>>;

// =============================================================================
// CONNECTION
// =============================================================================

/// Server liveness ping.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HeartbeatPacket;

/// Greeting sent as soon as the connection is accepted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WelcomePacket {
    /// Greeting text.
    pub message: String,
}

/// The server's protocol version.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VersionPacket {
    /// Version as a single float, as older servers reported it.
    pub legacy_version: f32,
    /// Version the rest of the connection is decoded with.
    pub version: Version,
}

fn decode_heartbeat(_: &mut PacketReader<'_>, _: &mut DecodeContext) -> Decoded {
    Ok(Box::new(HeartbeatPacket))
}

fn decode_welcome(reader: &mut PacketReader<'_>, _: &mut DecodeContext) -> Decoded {
    Ok(Box::new(WelcomePacket {
        message: reader.read_ascii_string()?,
    }))
}

fn decode_version(reader: &mut PacketReader<'_>, _: &mut DecodeContext) -> Decoded {
    let _unused = reader.read_i32()?;
    let legacy_version = reader.read_f32()?;
    let version = Version::new(reader.read_u32()?, reader.read_u32()?, reader.read_u32()?);
    Ok(Box::new(VersionPacket {
        legacy_version,
        version,
    }))
}

// =============================================================================
// WORLD
// =============================================================================

/// Partial objects decoded from one update frame, in record order.
///
/// Player ships may appear once per record kind; merge by id.
#[derive(Clone, Debug, Default)]
pub struct ObjectUpdatePacket {
    /// Decoded objects. Discarded record kinds produce no entry.
    pub objects: Vec<ArtemisObject>,
}

/// An object left the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DeleteObjectPacket {
    /// Type of the removed object.
    pub target_type: ObjectType,
    /// Id of the removed object.
    pub id: i32,
}

fn decode_object_update(reader: &mut PacketReader<'_>, ctx: &mut DecodeContext) -> Decoded {
    let mut objects = Vec::new();
    loop {
        if reader.peek_u8()? == 0 {
            let terminator = reader.read_i32()?;
            if terminator != 0 {
                return Err(ParseError::UnknownObjectType(0));
            }
            break;
        }
        if let Some(object) = ctx.parsers.parse(reader, ctx.version, ctx.timestamp)? {
            objects.push(object);
        }
    }
    Ok(Box::new(ObjectUpdatePacket { objects }))
}

fn decode_delete(reader: &mut PacketReader<'_>, _: &mut DecodeContext) -> Decoded {
    let raw = reader.read_u8()?;
    let target_type = ObjectType::from_id(raw).ok_or(ParseError::UnknownObjectType(raw))?;
    let id = reader.read_i32()?;
    Ok(Box::new(DeleteObjectPacket { target_type, id }))
}

// =============================================================================
// GAME
// =============================================================================

/// A message on the comms console.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommsIncomingPacket {
    /// Console filter bits.
    pub filters: i16,
    /// Sender name.
    pub sender: String,
    /// Message text. Lines are separated by `^`.
    pub message: String,
}

impl CommsIncomingPacket {
    /// Message text split into lines.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.message.split('^')
    }
}

/// A scenario started.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GameStartPacket {
    /// Difficulty level.
    pub difficulty: i32,
    /// Scenario kind.
    pub game_type: i32,
}

fn decode_comm_text(reader: &mut PacketReader<'_>, _: &mut DecodeContext) -> Decoded {
    Ok(Box::new(CommsIncomingPacket {
        filters: reader.read_i16()?,
        sender: reader.read_string()?,
        message: reader.read_string()?,
    }))
}

fn decode_game_start(reader: &mut PacketReader<'_>, _: &mut DecodeContext) -> Decoded {
    Ok(Box::new(GameStartPacket {
        difficulty: reader.read_i32()?,
        game_type: reader.read_i32()?,
    }))
}

// =============================================================================
// SIMPLE EVENTS
// =============================================================================

/// An object exploded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExplosionPacket {
    /// Type of the exploding object.
    pub object_type: ObjectType,
    /// Id of the exploding object.
    pub id: i32,
}

/// Play a sound file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SoundEffectPacket {
    /// File name relative to the server's data directory.
    pub filename: String,
}

/// Simulation paused or resumed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PausePacket {
    /// True while paused.
    pub paused: bool,
}

/// A player ship took damage; clients shake the screen.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayerShipDamagePacket {
    /// Ship index of the damaged ship.
    pub ship_index: i32,
    /// Shake duration in seconds.
    pub duration: f32,
}

/// The scenario ended.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GameOverPacket;

/// Popup message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameMessagePacket {
    /// Message text.
    pub message: String,
}

/// A jump drive started or finished a jump.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct JumpStatusPacket {
    /// Id of the jumping ship.
    pub id: i32,
    /// True at the start of the jump.
    pub begin: bool,
}

/// End-of-game summary.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameOverReasonPacket {
    /// Headline.
    pub title: String,
    /// Remaining text lines.
    pub lines: Vec<String>,
}

/// A player ship finished docking.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DockedPacket {
    /// Id of the docked player ship.
    pub object_id: i32,
}

const EXPLOSION: u8 = 0x00;
const SOUND_EFFECT: u8 = 0x03;
const PAUSE: u8 = 0x04;
const PLAYER_SHIP_DAMAGE: u8 = 0x05;
const GAME_OVER: u8 = 0x06;
const GAME_MESSAGE: u8 = 0x09;
const JUMP_BEGIN: u8 = 0x0c;
const JUMP_END: u8 = 0x0d;
const GAME_OVER_REASON: u8 = 0x13;
const DOCKED: u8 = 0x1a;

fn decode_explosion(reader: &mut PacketReader<'_>, _: &mut DecodeContext) -> Decoded {
    let raw = reader.read_i32()?;
    let object_type = u8::try_from(raw)
        .ok()
        .and_then(ObjectType::from_id)
        .ok_or(ParseError::InvalidEnum {
            name: "ObjectType",
            value: raw,
        })?;
    Ok(Box::new(ExplosionPacket {
        object_type,
        id: reader.read_i32()?,
    }))
}

fn decode_sound_effect(reader: &mut PacketReader<'_>, _: &mut DecodeContext) -> Decoded {
    Ok(Box::new(SoundEffectPacket {
        filename: reader.read_string()?,
    }))
}

fn decode_pause(reader: &mut PacketReader<'_>, _: &mut DecodeContext) -> Decoded {
    Ok(Box::new(PausePacket {
        paused: reader.read_bool_i32()?,
    }))
}

fn decode_player_ship_damage(reader: &mut PacketReader<'_>, _: &mut DecodeContext) -> Decoded {
    Ok(Box::new(PlayerShipDamagePacket {
        ship_index: reader.read_i32()?,
        duration: reader.read_f32()?,
    }))
}

fn decode_game_over(_: &mut PacketReader<'_>, _: &mut DecodeContext) -> Decoded {
    Ok(Box::new(GameOverPacket))
}

fn decode_game_message(reader: &mut PacketReader<'_>, _: &mut DecodeContext) -> Decoded {
    Ok(Box::new(GameMessagePacket {
        message: reader.read_string()?,
    }))
}

fn decode_jump_begin(reader: &mut PacketReader<'_>, _: &mut DecodeContext) -> Decoded {
    Ok(Box::new(JumpStatusPacket {
        id: reader.read_i32()?,
        begin: true,
    }))
}

fn decode_jump_end(reader: &mut PacketReader<'_>, _: &mut DecodeContext) -> Decoded {
    Ok(Box::new(JumpStatusPacket {
        id: reader.read_i32()?,
        begin: false,
    }))
}

fn decode_game_over_reason(reader: &mut PacketReader<'_>, _: &mut DecodeContext) -> Decoded {
    let title = reader.read_string()?;
    let mut lines = Vec::new();
    while !reader.is_empty() {
        lines.push(reader.read_string()?);
    }
    Ok(Box::new(GameOverReasonPacket { title, lines }))
}

fn decode_docked(reader: &mut PacketReader<'_>, _: &mut DecodeContext) -> Decoded {
    Ok(Box::new(DockedPacket {
        object_id: reader.read_i32()?,
    }))
}

server_packet!(
    WelcomePacket,
    VersionPacket,
    ObjectUpdatePacket,
    DeleteObjectPacket,
    CommsIncomingPacket,
    ExplosionPacket,
    SoundEffectPacket,
    PausePacket,
    PlayerShipDamagePacket,
    GameMessagePacket,
    JumpStatusPacket,
    GameOverReasonPacket,
    DockedPacket,
);

server_packet!(@live HeartbeatPacket, GameStartPacket, GameOverPacket);

// =============================================================================
// REGISTRATION
// =============================================================================

/// Installs every decoder in this module.
pub(crate) fn register_defaults(registry: &mut PacketRegistry) {
    registry.insert(type_hash(HEARTBEAT), None, decode_heartbeat);
    registry.insert(type_hash(PLAIN_TEXT_GREETING), None, decode_welcome);
    registry.insert(type_hash(CONNECTED), None, decode_version);
    registry.insert(type_hash(OBJECT_BIT_STREAM), None, decode_object_update);
    registry.insert(type_hash(OBJECT_DELETE), None, decode_delete);
    registry.insert(type_hash(COMM_TEXT), None, decode_comm_text);
    registry.insert(type_hash(START_GAME), None, decode_game_start);

    let simple_event = type_hash(SIMPLE_EVENT);
    let events: [(u8, crate::protocol::DecodeFn); 10] = [
        (EXPLOSION, decode_explosion),
        (SOUND_EFFECT, decode_sound_effect),
        (PAUSE, decode_pause),
        (PLAYER_SHIP_DAMAGE, decode_player_ship_damage),
        (GAME_OVER, decode_game_over),
        (GAME_MESSAGE, decode_game_message),
        (JUMP_BEGIN, decode_jump_begin),
        (JUMP_END, decode_jump_end),
        (GAME_OVER_REASON, decode_game_over_reason),
        (DOCKED, decode_docked),
    ];
    for (subtype, decode) in events {
        registry.insert(simple_event, Some(subtype), decode);
    }
}
