//! # Wire Protocol
//!
//! Frames, primitive encodings, the decoder registry and the packet catalogue.
//!
//! ## Frame Layout
//!
//! ```text
//! ┌──────────┬───────────┬────────┬──────────┬───────────┬───────────┬──────────────────┐
//! │ magic    │ frame len │ origin │ reserved │ remaining │ type hash │ body             │
//! │ DEADBEEF │ u32       │ u32    │ u32 (0)  │ len - 20  │ u32       │ [subtype] fields │
//! └──────────┴───────────┴────────┴──────────┴───────────┴───────────┴──────────────────┘
//!   all integers little-endian; the header is the first 24 bytes
//! ```
//!
//! ## Decoding
//!
//! A frame is decoded by the function registered for its type hash, or for
//! `(type hash, subtype)` in multiplexed families. An unregistered type is an
//! error, and so is any byte of the body the decoder did not consume.

mod frame;
pub mod packets;
mod reader;
mod registry;
mod writer;

pub use frame::{
    decode_header, encode_frame, encode_packet, read_frame, write_packet, FrameHeader, RawFrame,
};
pub use reader::PacketReader;
pub use registry::{DecodeContext, DecodeFn, PacketRegistry};
pub use writer::PacketWriter;

/// First word of every frame.
pub const MAGIC: u32 = 0xDEAD_BEEF;

/// Bytes before the body: six `u32` words.
pub const HEADER_LEN: usize = 24;

/// Bytes before the `remaining` count starts: the first five words.
pub const REMAINING_OFFSET: u32 = 20;

/// Which side sent a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Origin {
    /// Server to client.
    Server,
    /// Client to server.
    Client,
}

impl Origin {
    /// Converts the header word.
    #[must_use]
    pub const fn from_wire(value: u32) -> Option<Self> {
        match value {
            1 => Some(Self::Server),
            2 => Some(Self::Client),
            _ => None,
        }
    }

    /// Header word for this origin.
    #[must_use]
    pub const fn to_wire(self) -> u32 {
        match self {
            Self::Server => 1,
            Self::Client => 2,
        }
    }
}
