//! # Packet Reader
//!
//! Cursor over a frame body. Every read is bounds checked and reports
//! [`ParseError::UnexpectedEof`] instead of panicking.

use artemis_shared::BitField;

use crate::error::{ParseError, ParseResult};

/// Little-endian cursor over a frame body.
#[derive(Debug, Clone)]
pub struct PacketReader<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> PacketReader<'a> {
    /// Creates a reader at the start of `data`.
    #[must_use]
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data, position: 0 }
    }

    /// Bytes not yet read.
    #[inline]
    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.data.len() - self.position
    }

    /// Returns true if every byte has been read.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Current offset from the start of the body.
    #[inline]
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Reads `len` raw bytes.
    pub fn read_bytes(&mut self, len: usize) -> ParseResult<&'a [u8]> {
        if len > self.remaining() {
            return Err(ParseError::UnexpectedEof {
                needed: len,
                remaining: self.remaining(),
            });
        }
        let bytes = &self.data[self.position..self.position + len];
        self.position += len;
        Ok(bytes)
    }

    fn read_array<const N: usize>(&mut self) -> ParseResult<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_bytes(N)?);
        Ok(out)
    }

    /// Skips `len` bytes.
    pub fn skip(&mut self, len: usize) -> ParseResult<()> {
        self.read_bytes(len).map(|_| ())
    }

    /// Returns the next byte without consuming it.
    pub fn peek_u8(&self) -> ParseResult<u8> {
        self.data
            .get(self.position)
            .copied()
            .ok_or(ParseError::UnexpectedEof {
                needed: 1,
                remaining: 0,
            })
    }

    /// Reads a byte.
    pub fn read_u8(&mut self) -> ParseResult<u8> {
        Ok(self.read_array::<1>()?[0])
    }

    /// Reads a little-endian `i16`.
    pub fn read_i16(&mut self) -> ParseResult<i16> {
        self.read_array().map(i16::from_le_bytes)
    }

    /// Reads a little-endian `i32`.
    pub fn read_i32(&mut self) -> ParseResult<i32> {
        self.read_array().map(i32::from_le_bytes)
    }

    /// Reads a little-endian `u32`.
    pub fn read_u32(&mut self) -> ParseResult<u32> {
        self.read_array().map(u32::from_le_bytes)
    }

    /// Reads a little-endian `f32`.
    pub fn read_f32(&mut self) -> ParseResult<f32> {
        self.read_array().map(f32::from_le_bytes)
    }

    /// Reads an `i32` boolean: zero is false.
    pub fn read_bool_i32(&mut self) -> ParseResult<bool> {
        Ok(self.read_i32()? != 0)
    }

    /// Reads a presence field of `bit_count` bits.
    pub fn read_bitfield(&mut self, bit_count: usize) -> ParseResult<BitField> {
        let bytes = self.read_bytes(BitField::byte_count_for(bit_count))?;
        BitField::from_bytes(bit_count, bytes).ok_or(ParseError::UnexpectedEof {
            needed: BitField::byte_count_for(bit_count),
            remaining: bytes.len(),
        })
    }

    /// Reads a UTF-16LE string.
    ///
    /// The prefix is an `i32` character count that includes a terminating
    /// NUL. Characters after the first NUL are ignored.
    pub fn read_string(&mut self) -> ParseResult<String> {
        let count = self.read_i32()?;
        let count = usize::try_from(count)
            .ok()
            .filter(|&c| c > 0)
            .ok_or(ParseError::InvalidString("non-positive length"))?;
        let byte_len = count
            .checked_mul(2)
            .ok_or(ParseError::InvalidString("length overflow"))?;
        let bytes = self.read_bytes(byte_len)?;

        let units: Vec<u16> = bytes
            .chunks_exact(2)
            .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
            .collect();
        let end = units
            .iter()
            .position(|&u| u == 0)
            .ok_or(ParseError::InvalidString("missing terminator"))?;
        String::from_utf16(&units[..end]).map_err(|_| ParseError::InvalidString("invalid UTF-16"))
    }

    /// Reads an ASCII string with an `i32` byte count and no terminator.
    pub fn read_ascii_string(&mut self) -> ParseResult<String> {
        let len = usize::try_from(self.read_i32()?)
            .map_err(|_| ParseError::InvalidString("negative length"))?;
        let bytes = self.read_bytes(len)?;
        if !bytes.is_ascii() {
            return Err(ParseError::InvalidString("non-ASCII byte"));
        }
        Ok(bytes.iter().map(|&b| char::from(b)).collect())
    }

    /// Fails unless every byte has been consumed.
    pub fn finish(&self, type_hash: u32) -> ParseResult<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(ParseError::TrailingBytes {
                type_hash,
                remaining: self.remaining(),
            })
        }
    }
}
