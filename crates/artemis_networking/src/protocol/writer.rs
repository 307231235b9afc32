//! # Packet Writer
//!
//! Growable little-endian buffer for packet bodies.

/// Serialises packet bodies.
#[derive(Debug, Default, Clone)]
pub struct PacketWriter {
    buffer: Vec<u8>,
}

impl PacketWriter {
    /// Creates an empty writer.
    #[must_use]
    pub const fn new() -> Self {
        Self { buffer: Vec::new() }
    }

    /// Bytes written so far.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Returns true if nothing has been written.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Written bytes.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.buffer
    }

    /// Consumes the writer, returning its bytes.
    #[must_use]
    pub fn into_inner(self) -> Vec<u8> {
        self.buffer
    }

    /// Writes a byte.
    pub fn write_u8(&mut self, value: u8) -> &mut Self {
        self.buffer.push(value);
        self
    }

    /// Writes a little-endian `i16`.
    pub fn write_i16(&mut self, value: i16) -> &mut Self {
        self.buffer.extend_from_slice(&value.to_le_bytes());
        self
    }

    /// Writes a little-endian `i32`.
    pub fn write_i32(&mut self, value: i32) -> &mut Self {
        self.buffer.extend_from_slice(&value.to_le_bytes());
        self
    }

    /// Writes a little-endian `u32`.
    pub fn write_u32(&mut self, value: u32) -> &mut Self {
        self.buffer.extend_from_slice(&value.to_le_bytes());
        self
    }

    /// Writes a little-endian `f32`.
    pub fn write_f32(&mut self, value: f32) -> &mut Self {
        self.buffer.extend_from_slice(&value.to_le_bytes());
        self
    }

    /// Writes raw bytes.
    pub fn write_bytes(&mut self, bytes: &[u8]) -> &mut Self {
        self.buffer.extend_from_slice(bytes);
        self
    }

    /// Writes a UTF-16LE string with its character count and terminator.
    pub fn write_string(&mut self, value: &str) -> &mut Self {
        let units: Vec<u16> = value.encode_utf16().collect();
        self.write_i32((units.len() + 1) as i32);
        for unit in units {
            self.buffer.extend_from_slice(&unit.to_le_bytes());
        }
        self.buffer.extend_from_slice(&[0, 0]);
        self
    }

    /// Writes an ASCII string with its byte count and no terminator.
    pub fn write_ascii_string(&mut self, value: &str) -> &mut Self {
        self.write_i32(value.len() as i32);
        self.buffer.extend_from_slice(value.as_bytes());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_layout() {
        let mut writer = PacketWriter::new();
        writer.write_string("Hi");
        assert_eq!(writer.as_slice(), &[3, 0, 0, 0, b'H', 0, b'i', 0, 0, 0]);
    }

    #[test]
    fn test_chained_writes() {
        let mut writer = PacketWriter::new();
        writer.write_u8(1).write_i16(-1).write_f32(0.0);
        assert_eq!(writer.len(), 7);
        assert_eq!(&writer.as_slice()[1..3], &[0xFF, 0xFF]);
    }
}
