//! # Packet Registry
//!
//! Maps a type hash, or a `(type hash, subtype)` pair, to a decode function.
//! The registry is filled once before connecting and is read-only afterwards.

use std::collections::HashMap;

use artemis_shared::Version;

use super::packets::{self, ServerPacket};
use super::{PacketReader, RawFrame};
use crate::error::{ClientError, ClientResult, ParseError, ParseResult};
use crate::parsers::ObjectParsers;

/// Decodes one packet body. The subtype byte, if any, is already consumed.
pub type DecodeFn =
    fn(&mut PacketReader<'_>, &mut DecodeContext) -> ParseResult<Box<dyn ServerPacket>>;

/// Per-connection state the decoders need.
#[derive(Debug, Default)]
pub struct DecodeContext {
    /// Negotiated protocol version.
    pub version: Version,
    /// Timestamp stamped on every decoded object property.
    pub timestamp: u64,
    /// Reusable object builders.
    pub parsers: ObjectParsers,
}

impl DecodeContext {
    /// Creates a context for `version`.
    #[must_use]
    pub fn new(version: Version, timestamp: u64) -> Self {
        Self {
            version,
            timestamp,
            parsers: ObjectParsers::default(),
        }
    }
}

#[derive(Debug)]
enum Entry {
    Single(DecodeFn),
    Multiplexed(HashMap<u8, DecodeFn>),
}

/// Decoder lookup table.
#[derive(Debug, Default)]
pub struct PacketRegistry {
    entries: HashMap<u32, Entry>,
}

impl PacketRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding every server packet this crate decodes.
    #[must_use]
    pub fn server() -> Self {
        let mut registry = Self::new();
        packets::register_defaults(&mut registry);
        registry
    }

    /// Number of registered type hashes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registers a decoder for a family without subtypes.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::DuplicatePacketType`] if the hash is taken.
    pub fn register(&mut self, type_hash: u32, decode: DecodeFn) -> ClientResult<()> {
        if self.entries.contains_key(&type_hash) {
            return Err(ClientError::DuplicatePacketType(type_hash));
        }
        self.insert(type_hash, None, decode);
        Ok(())
    }

    /// Registers a decoder for one subtype of a multiplexed family.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::DuplicatePacketType`] if the hash is registered
    /// without subtypes, or [`ClientError::DuplicateSubtype`] if the subtype
    /// is taken.
    pub fn register_subtype(
        &mut self,
        type_hash: u32,
        subtype: u8,
        decode: DecodeFn,
    ) -> ClientResult<()> {
        match self.entries.get(&type_hash) {
            Some(Entry::Single(_)) => return Err(ClientError::DuplicatePacketType(type_hash)),
            Some(Entry::Multiplexed(map)) if map.contains_key(&subtype) => {
                return Err(ClientError::DuplicateSubtype { type_hash, subtype })
            }
            _ => {}
        }
        self.insert(type_hash, Some(subtype), decode);
        Ok(())
    }

    /// Unchecked insert; a later call replaces an earlier one.
    pub(crate) fn insert(&mut self, type_hash: u32, subtype: Option<u8>, decode: DecodeFn) {
        match subtype {
            None => {
                self.entries.insert(type_hash, Entry::Single(decode));
            }
            Some(subtype) => {
                let entry = self
                    .entries
                    .entry(type_hash)
                    .or_insert_with(|| Entry::Multiplexed(HashMap::new()));
                if let Entry::Single(_) = entry {
                    *entry = Entry::Multiplexed(HashMap::new());
                }
                if let Entry::Multiplexed(map) = entry {
                    map.insert(subtype, decode);
                }
            }
        }
    }

    /// Returns true if frames with this hash can be decoded.
    #[must_use]
    pub fn contains(&self, type_hash: u32) -> bool {
        self.entries.contains_key(&type_hash)
    }

    /// Decodes a frame body.
    ///
    /// # Errors
    ///
    /// Fails if the type or subtype is unregistered, the decoder fails, or
    /// the decoder leaves bytes unread.
    pub fn decode(
        &self,
        frame: &RawFrame,
        ctx: &mut DecodeContext,
    ) -> ParseResult<Box<dyn ServerPacket>> {
        let type_hash = frame.header.type_hash;
        let mut reader = PacketReader::new(&frame.body);

        let decode = match self.entries.get(&type_hash) {
            None => return Err(ParseError::UnknownPacketType(type_hash)),
            Some(Entry::Single(decode)) => *decode,
            Some(Entry::Multiplexed(map)) => {
                let subtype = reader
                    .read_u8()
                    .map_err(|_| ParseError::MissingSubtype(type_hash))?;
                *map.get(&subtype)
                    .ok_or(ParseError::UnknownSubtype { type_hash, subtype })?
            }
        };

        let packet = decode(&mut reader, ctx)?;
        reader.finish(type_hash)?;
        Ok(packet)
    }
}
