//! Packets sent to the server.
//!
//! Console commands share the `valueInt` family and are told apart by their
//! subtype byte.

use artemis_shared::{type_hash, Console, MainScreenView, OrdnanceType, Version};

use super::{ClientPacket, COMMS_MESSAGE, HEARTBEAT, VALUE_INT};
use crate::protocol::PacketWriter;

const SET_MAIN_SCREEN: u8 = 0x01;
const LOAD_TUBE: u8 = 0x02;
const FIRE_TUBE: u8 = 0x08;
const TOGGLE_RED_ALERT: u8 = 0x0a;
const SET_SHIP: u8 = 0x0d;
const SET_CONSOLE: u8 = 0x0e;
const READY: u8 = 0x0f;

/// Declares a `valueInt` packet: its subtype and how it writes its fields.
macro_rules! value_int_packet {
    ($ty:ty, $subtype:expr, |$self_:ident, $writer:ident| $body:block) => {
        impl ClientPacket for $ty {
            fn type_hash(&self) -> u32 {
                type_hash(VALUE_INT)
            }

            fn subtype(&self) -> Option<u8> {
                Some($subtype)
            }

            fn write_payload(&$self_, $writer: &mut PacketWriter) $body
        }
    };
}

/// Client liveness ping.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ClientHeartbeatPacket;

impl ClientPacket for ClientHeartbeatPacket {
    fn type_hash(&self) -> u32 {
        type_hash(HEARTBEAT)
    }

    fn write_payload(&self, _: &mut PacketWriter) {}
}

/// Switch the main screen view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SetMainScreenPacket {
    /// View to show.
    pub view: MainScreenView,
}

value_int_packet!(SetMainScreenPacket, SET_MAIN_SCREEN, |self, w| {
    w.write_i32(i32::from(self.view.id()));
});

/// Load ordnance into a tube.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadTubePacket {
    /// Tube index, zero based.
    pub tube: i32,
    /// Ordnance to load.
    pub ordnance: OrdnanceType,
}

impl ClientPacket for LoadTubePacket {
    fn type_hash(&self) -> u32 {
        type_hash(VALUE_INT)
    }

    fn subtype(&self) -> Option<u8> {
        Some(LOAD_TUBE)
    }

    fn write_payload(&self, w: &mut PacketWriter) {
        w.write_i32(self.tube).write_i32(i32::from(self.ordnance.id()));
    }

    fn minimum_version(&self) -> Version {
        self.ordnance.introduced()
    }
}

/// Fire a loaded tube.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FireTubePacket {
    /// Tube index, zero based.
    pub tube: i32,
}

value_int_packet!(FireTubePacket, FIRE_TUBE, |self, w| {
    w.write_i32(self.tube);
});

/// Toggle red alert on the selected ship.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ToggleRedAlertPacket;

value_int_packet!(ToggleRedAlertPacket, TOGGLE_RED_ALERT, |self, w| {
    w.write_i32(0);
});

/// Choose which player ship this client crews.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SetShipPacket {
    /// Ship index, zero based.
    pub ship_index: i32,
}

value_int_packet!(SetShipPacket, SET_SHIP, |self, w| {
    w.write_i32(self.ship_index);
});

/// Claim or release a console.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SetConsolePacket {
    /// Console to change.
    pub console: Console,
    /// True to claim, false to release.
    pub selected: bool,
}

value_int_packet!(SetConsolePacket, SET_CONSOLE, |self, w| {
    w.write_i32(i32::from(self.console.id()))
        .write_i32(i32::from(self.selected));
});

/// Tell the server this client is ready to start.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReadyPacket;

value_int_packet!(ReadyPacket, READY, |self, w| {
    w.write_i32(0);
});

/// A canned comms message from the communications console.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CommsOutgoingPacket {
    /// Kind of recipient: player, enemy, base or other.
    pub recipient_type: i32,
    /// Id of the recipient.
    pub recipient_id: i32,
    /// Message code for the recipient type.
    pub message: i32,
    /// Object the message refers to, or 0x0073_0078 when none.
    pub target_id: i32,
}

impl CommsOutgoingPacket {
    /// `target_id` for messages that refer to no object.
    pub const NO_TARGET: i32 = 0x0073_0078;
}

impl ClientPacket for CommsOutgoingPacket {
    fn type_hash(&self) -> u32 {
        type_hash(COMMS_MESSAGE)
    }

    fn write_payload(&self, writer: &mut PacketWriter) {
        writer
            .write_i32(self.recipient_type)
            .write_i32(self.recipient_id)
            .write_i32(self.message)
            .write_i32(self.target_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{encode_packet, HEADER_LEN};

    #[test]
    fn test_heartbeat_is_header_only() {
        let frame = encode_packet(&ClientHeartbeatPacket);
        assert_eq!(frame.len(), HEADER_LEN);
        assert_eq!(&frame[8..12], &[2, 0, 0, 0]);
        assert_eq!(&frame[20..24], &type_hash(HEARTBEAT).to_le_bytes());
    }

    #[test]
    fn test_set_console_layout() {
        let frame = encode_packet(&SetConsolePacket {
            console: Console::Helm,
            selected: true,
        });
        let body = &frame[HEADER_LEN..];
        assert_eq!(body[0], SET_CONSOLE);
        assert_eq!(&body[1..5], &i32::from(Console::Helm.id()).to_le_bytes());
        assert_eq!(&body[5..9], &[1, 0, 0, 0]);
        assert_eq!(body.len(), 9);
    }

    #[test]
    fn test_load_tube_layout() {
        let frame = encode_packet(&LoadTubePacket {
            tube: 2,
            ordnance: OrdnanceType::Nuke,
        });
        assert_eq!(&frame[HEADER_LEN..], &[LOAD_TUBE, 2, 0, 0, 0, 1, 0, 0, 0]);
    }

    #[test]
    fn test_load_tube_minimum_version() {
        let nuke = LoadTubePacket {
            tube: 0,
            ordnance: OrdnanceType::Nuke,
        };
        let tag = LoadTubePacket {
            tube: 0,
            ordnance: OrdnanceType::Tag,
        };
        assert_eq!(nuke.minimum_version(), Version::MINIMUM);
        assert_eq!(tag.minimum_version(), Version::V2_6_3);
        assert_eq!(ReadyPacket.minimum_version(), Version::MINIMUM);
    }

    #[test]
    fn test_comms_outgoing_has_no_subtype() {
        let packet = CommsOutgoingPacket {
            recipient_type: 0,
            recipient_id: 1001,
            message: 3,
            target_id: CommsOutgoingPacket::NO_TARGET,
        };
        assert_eq!(packet.subtype(), None);
        assert_eq!(encode_packet(&packet).len(), HEADER_LEN + 16);
    }
}
