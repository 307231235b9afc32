//! # Packet Catalogue
//!
//! Server packets are decoded into concrete structs behind
//! [`ServerPacket`]; listeners dispatch on the concrete type. Client packets
//! implement [`ClientPacket`] and serialise themselves.
//!
//! ## Type Names
//!
//! Each packet family is named by an ASCII string whose JamCRC is the type
//! hash on the wire. Several families carry a one-byte subtype after the
//! hash and multiplex unrelated packets behind it.
//!
//! | name               | direction | subtype |
//! |--------------------|-----------|---------|
//! | `heartbeat`        | both      | no      |
//! | `plainTextGreeting`| S→C       | no      |
//! | `connected`        | S→C       | no      |
//! | `objectBitStream`  | S→C       | no      |
//! | `objectDelete`     | S→C       | no      |
//! | `commText`         | S→C       | no      |
//! | `startGame`        | S→C       | no      |
//! | `simpleEvent`      | S→C       | yes     |
//! | `valueInt`         | C→S       | yes     |
//! | `commsMessage`     | C→S       | no      |

use std::any::Any;
use std::fmt;

use artemis_shared::Version;

use super::PacketWriter;

mod client;
mod server;

pub use client::{
    ClientHeartbeatPacket, CommsOutgoingPacket, FireTubePacket, LoadTubePacket, ReadyPacket,
    SetConsolePacket, SetMainScreenPacket, SetShipPacket, ToggleRedAlertPacket,
};
pub use server::{
    CommsIncomingPacket, DeleteObjectPacket, DockedPacket, ExplosionPacket, GameMessagePacket,
    GameOverPacket, GameOverReasonPacket, GameStartPacket, HeartbeatPacket, JumpStatusPacket,
    ObjectUpdatePacket, PausePacket, PlayerShipDamagePacket, SoundEffectPacket, VersionPacket,
    WelcomePacket,
};

pub(crate) use server::register_defaults;

// =============================================================================
// TYPE NAMES
// =============================================================================

/// Liveness ping, sent by both sides.
pub const HEARTBEAT: &str = "heartbeat";
/// Greeting sent immediately after accept.
pub const PLAIN_TEXT_GREETING: &str = "plainTextGreeting";
/// Server version announcement.
pub const CONNECTED: &str = "connected";
/// Object update records.
pub const OBJECT_BIT_STREAM: &str = "objectBitStream";
/// Object removal.
pub const OBJECT_DELETE: &str = "objectDelete";
/// Incoming comms message.
pub const COMM_TEXT: &str = "commText";
/// Game start.
pub const START_GAME: &str = "startGame";
/// Multiplexed server event family.
pub const SIMPLE_EVENT: &str = "simpleEvent";
/// Multiplexed client command family.
pub const VALUE_INT: &str = "valueInt";
/// Outgoing comms message.
pub const COMMS_MESSAGE: &str = "commsMessage";

// =============================================================================
// TRAITS
// =============================================================================

/// A decoded packet received from the server.
pub trait ServerPacket: Any + fmt::Debug + Send + Sync {
    /// The concrete packet, for typed dispatch.
    fn as_any(&self) -> &dyn Any;

    /// Returns true if receiving this packet proves the server is alive.
    fn resets_heartbeat(&self) -> bool {
        false
    }
}

impl dyn ServerPacket {
    /// Returns the concrete packet if it is a `P`.
    #[must_use]
    pub fn downcast_ref<P: ServerPacket>(&self) -> Option<&P> {
        self.as_any().downcast_ref::<P>()
    }

    /// Returns true if this packet is a `P`.
    #[must_use]
    pub fn is<P: ServerPacket>(&self) -> bool {
        self.as_any().is::<P>()
    }
}

/// A packet the client sends.
pub trait ClientPacket: fmt::Debug + Send + Sync {
    /// Type hash of the packet family.
    fn type_hash(&self) -> u32;

    /// Subtype byte, for multiplexed families.
    fn subtype(&self) -> Option<u8> {
        None
    }

    /// Writes the fields after the subtype.
    fn write_payload(&self, writer: &mut PacketWriter);

    /// Oldest server that understands this packet.
    fn minimum_version(&self) -> Version {
        Version::MINIMUM
    }
}

/// Implements [`ServerPacket`] for one or more structs. Packets listed
/// after `@live` reset the heartbeat monitor.
macro_rules! server_packet {
    (@live $($ty:ty),+ $(,)?) => {
        $(
            impl $crate::protocol::packets::ServerPacket for $ty {
                fn as_any(&self) -> &dyn ::std::any::Any {
                    self
                }

                fn resets_heartbeat(&self) -> bool {
                    true
                }
            }
        )+
    };
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::protocol::packets::ServerPacket for $ty {
                fn as_any(&self) -> &dyn ::std::any::Any {
                    self
                }
            }
        )+
    };
}

pub(crate) use server_packet;
