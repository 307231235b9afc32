//! One object record: the presence bits and a reader positioned after them.

use artemis_shared::{BitField, BitSlot, BoolState, ObjectType, Version};

use crate::error::{ParseError, ParseResult};
use crate::protocol::PacketReader;

/// Wire size of a slot, for records that are read and thrown away.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum Width {
    U8,
    I16,
    I32,
    F32,
    Str,
}

/// Reads the slots of one record, each only if its presence bit is set.
pub(super) struct Record<'r, 'a> {
    reader: &'r mut PacketReader<'a>,
    bits: BitField,
    version: Version,
}

impl<'r, 'a> Record<'r, 'a> {
    /// Reads the presence bits for `object_type`.
    pub(super) fn open(
        reader: &'r mut PacketReader<'a>,
        object_type: ObjectType,
        version: Version,
    ) -> ParseResult<Self> {
        let bits = reader.read_bitfield(object_type.bit_count(version))?;
        Ok(Self {
            reader,
            bits,
            version,
        })
    }

    /// Returns true if the record carries `slot`.
    pub(super) fn has<S: BitSlot>(&self, slot: S) -> bool {
        self.bits.get(slot.index(self.version))
    }

    /// Version the record is laid out for.
    pub(super) const fn version(&self) -> Version {
        self.version
    }

    /// Direct access for slots whose decoding depends on their position.
    pub(super) fn reader(&mut self) -> &mut PacketReader<'a> {
        &mut *self.reader
    }

    fn read_if<S, T, F>(&mut self, slot: S, read: F) -> ParseResult<Option<T>>
    where
        S: BitSlot,
        F: FnOnce(&mut PacketReader<'a>) -> ParseResult<T>,
    {
        if self.has(slot) {
            read(&mut *self.reader).map(Some)
        } else {
            Ok(None)
        }
    }

    pub(super) fn u8<S: BitSlot>(&mut self, slot: S) -> ParseResult<Option<u8>> {
        self.read_if(slot, PacketReader::read_u8)
    }

    pub(super) fn i8<S: BitSlot>(&mut self, slot: S) -> ParseResult<Option<i8>> {
        self.read_if(slot, |r| r.read_u8().map(|b| b as i8))
    }

    pub(super) fn i16<S: BitSlot>(&mut self, slot: S) -> ParseResult<Option<i16>> {
        self.read_if(slot, PacketReader::read_i16)
    }

    pub(super) fn i32<S: BitSlot>(&mut self, slot: S) -> ParseResult<Option<i32>> {
        self.read_if(slot, PacketReader::read_i32)
    }

    pub(super) fn f32<S: BitSlot>(&mut self, slot: S) -> ParseResult<Option<f32>> {
        self.read_if(slot, PacketReader::read_f32)
    }

    pub(super) fn string<S: BitSlot>(&mut self, slot: S) -> ParseResult<Option<String>> {
        self.read_if(slot, PacketReader::read_string)
    }

    /// Boolean sent as one byte.
    pub(super) fn bool_u8<S: BitSlot>(&mut self, slot: S) -> ParseResult<Option<BoolState>> {
        self.read_if(slot, |r| r.read_u8().map(BoolState::from_wire))
    }

    /// Boolean sent as a short.
    pub(super) fn bool_i16<S: BitSlot>(&mut self, slot: S) -> ParseResult<Option<BoolState>> {
        self.read_if(slot, |r| r.read_i16().map(|v| BoolState::from(v != 0)))
    }

    /// Boolean sent as an int.
    pub(super) fn bool_i32<S: BitSlot>(&mut self, slot: S) -> ParseResult<Option<BoolState>> {
        self.read_if(slot, |r| r.read_bool_i32().map(BoolState::from))
    }

    /// Enumeration sent as one byte. Unknown ids fail the record.
    pub(super) fn enum_u8<S: BitSlot, E>(
        &mut self,
        slot: S,
        name: &'static str,
        from_id: fn(i32) -> Option<E>,
    ) -> ParseResult<Option<E>> {
        self.read_if(slot, |r| {
            let value = i32::from(r.read_u8()?);
            from_id(value).ok_or(ParseError::InvalidEnum { name, value })
        })
    }

    /// Enumeration sent as an int. Unknown ids fail the record.
    pub(super) fn enum_i32<S: BitSlot, E>(
        &mut self,
        slot: S,
        name: &'static str,
        from_id: fn(i32) -> Option<E>,
    ) -> ParseResult<Option<E>> {
        self.read_if(slot, |r| {
            let value = r.read_i32()?;
            from_id(value).ok_or(ParseError::InvalidEnum { name, value })
        })
    }

    /// Consumes `slot` if present without keeping its value.
    pub(super) fn skip<S: BitSlot>(&mut self, slot: S, width: Width) -> ParseResult<()> {
        if !self.has(slot) {
            return Ok(());
        }
        match width {
            Width::U8 => self.reader.skip(1),
            Width::I16 => self.reader.skip(2),
            Width::I32 | Width::F32 => self.reader.skip(4),
            Width::Str => self.reader.read_string().map(|_| ()),
        }
    }

    /// Consumes every present slot of a record type that is not tracked.
    pub(super) fn discard<S: BitSlot>(&mut self, width: fn(S) -> Width) -> ParseResult<()> {
        for slot in S::slots() {
            self.skip(slot, width(slot))?;
        }
        Ok(())
    }
}
