//! # Networking Error Types
//!
//! [`ParseError`] covers everything that can be wrong with bytes received
//! from the server. Every variant is fatal to the connection. [`ClientError`]
//! covers local setup: configuration files and decoder registration.

use std::io;

use thiserror::Error;

use crate::protocol::Origin;

/// Malformed or unrecognised wire data.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Frame did not start with the magic word.
    #[error("invalid frame magic: {0:#010x}")]
    InvalidMagic(u32),

    /// Origin field is neither server nor client.
    #[error("invalid frame origin: {0}")]
    InvalidOrigin(u32),

    /// Frame came from the wrong side.
    #[error("unexpected frame origin: expected {expected:?}, found {found:?}")]
    UnexpectedOrigin {
        /// Origin this endpoint accepts.
        expected: Origin,
        /// Origin the frame carried.
        found: Origin,
    },

    /// Payload length disagrees with the frame length.
    #[error("payload length {declared} does not match frame length (expected {expected})")]
    LengthMismatch {
        /// Payload length in the header.
        declared: u32,
        /// Payload length implied by the frame length.
        expected: u32,
    },

    /// Frame length is smaller than the header.
    #[error("frame length {0} is shorter than the header")]
    FrameTooShort(u32),

    /// Frame length exceeds the configured limit.
    #[error("frame length {len} exceeds limit {max}")]
    FrameTooLarge {
        /// Declared frame length.
        len: u32,
        /// Configured maximum.
        max: u32,
    },

    /// No decoder is registered for the type hash.
    #[error("unknown packet type {0:#010x}")]
    UnknownPacketType(u32),

    /// Multiplexed family has no decoder for the subtype.
    #[error("unknown subtype {subtype:#04x} for packet type {type_hash:#010x}")]
    UnknownSubtype {
        /// Family type hash.
        type_hash: u32,
        /// Subtype byte.
        subtype: u8,
    },

    /// Multiplexed family frame has no subtype byte.
    #[error("packet type {0:#010x} is missing its subtype")]
    MissingSubtype(u32),

    /// Read past the end of the payload.
    #[error("unexpected end of payload: needed {needed} bytes, {remaining} left")]
    UnexpectedEof {
        /// Bytes the read needed.
        needed: usize,
        /// Bytes that were left.
        remaining: usize,
    },

    /// Decoder left part of the payload unread.
    #[error("{remaining} trailing bytes after packet type {type_hash:#010x}")]
    TrailingBytes {
        /// Packet type hash.
        type_hash: u32,
        /// Unread bytes.
        remaining: usize,
    },

    /// Value outside the set an enumeration allows.
    #[error("invalid {name} value {value}")]
    InvalidEnum {
        /// Enumeration name.
        name: &'static str,
        /// Offending value.
        value: i32,
    },

    /// Object record with an unassigned type byte.
    #[error("unknown object type {0}")]
    UnknownObjectType(u8),

    /// String with a bad length, missing terminator or invalid encoding.
    #[error("invalid string: {0}")]
    InvalidString(&'static str),
}

/// Result type for decoding.
pub type ParseResult<T> = Result<T, ParseError>;

/// Failure to read one frame from a stream.
#[derive(Error, Debug)]
pub enum FrameError {
    /// Peer closed the stream.
    #[error("connection closed by peer")]
    Closed,

    /// Socket error.
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),

    /// Bytes arrived but do not form a valid frame.
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Local setup errors.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Configuration file could not be read.
    #[error("failed to read configuration: {0}")]
    Io(#[from] io::Error),

    /// Configuration file is not valid TOML for [`crate::ClientConfig`].
    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    /// A decoder is already registered for the type hash.
    #[error("packet type {0:#010x} is already registered")]
    DuplicatePacketType(u32),

    /// A decoder is already registered for the subtype.
    #[error("subtype {subtype:#04x} of packet type {type_hash:#010x} is already registered")]
    DuplicateSubtype {
        /// Family type hash.
        type_hash: u32,
        /// Subtype byte.
        subtype: u8,
    },
}

/// Result type for client setup.
pub type ClientResult<T> = Result<T, ClientError>;
