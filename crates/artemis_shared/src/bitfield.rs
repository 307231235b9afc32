//! # Presence Bit Field
//!
//! Every object record starts with a packed array of flags, one per bit slot
//! that exists for the negotiated version, telling which properties follow.
//!
//! ## Layout
//!
//! ```text
//! byte 0: [b7 b6 b5 b4 b3 b2 b1 b0]   bit i lives in byte i / 8, mask 1 << (i % 8)
//! byte 1: [b15 .............. b8]
//! ```
//!
//! Indices are `i32` so that the `-1` returned for slots absent in a version
//! can be passed straight through; such reads are false and writes are no-ops.

/// A fixed-size packed boolean array.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct BitField {
    bytes: Vec<u8>,
    bit_count: usize,
}

impl BitField {
    /// Creates a field of `bit_count` cleared bits.
    #[must_use]
    pub fn new(bit_count: usize) -> Self {
        Self {
            bytes: vec![0; Self::byte_count_for(bit_count)],
            bit_count,
        }
    }

    /// Wraps bytes read from the wire.
    ///
    /// Returns `None` if `bytes` is not exactly `byte_count_for(bit_count)`
    /// long. Padding bits beyond `bit_count` are kept but never reported.
    #[must_use]
    pub fn from_bytes(bit_count: usize, bytes: &[u8]) -> Option<Self> {
        (bytes.len() == Self::byte_count_for(bit_count)).then(|| Self {
            bytes: bytes.to_vec(),
            bit_count,
        })
    }

    /// Number of bytes needed for `bit_count` bits: `ceil(bit_count / 8)`.
    #[inline]
    #[must_use]
    pub const fn byte_count_for(bit_count: usize) -> usize {
        bit_count.div_ceil(8)
    }

    /// Number of addressable bits.
    #[inline]
    #[must_use]
    pub const fn bit_count(&self) -> usize {
        self.bit_count
    }

    /// Number of bytes on the wire.
    #[inline]
    #[must_use]
    pub fn byte_count(&self) -> usize {
        self.bytes.len()
    }

    /// Raw bytes, ready to be written.
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Reads bit `index`; out of range reads as false.
    #[inline]
    #[must_use]
    pub fn get(&self, index: i32) -> bool {
        match self.locate(index) {
            Some((byte, mask)) => self.bytes[byte] & mask != 0,
            None => false,
        }
    }

    /// Writes bit `index`; out of range writes are ignored.
    #[inline]
    pub fn set(&mut self, index: i32, value: bool) {
        if let Some((byte, mask)) = self.locate(index) {
            if value {
                self.bytes[byte] |= mask;
            } else {
                self.bytes[byte] &= !mask;
            }
        }
    }

    /// Returns true if no addressable bit is set.
    #[must_use]
    pub fn is_clear(&self) -> bool {
        (0..self.bit_count).all(|i| !self.get(i as i32))
    }

    fn locate(&self, index: i32) -> Option<(usize, u8)> {
        let index = usize::try_from(index).ok()?;
        (index < self.bit_count).then(|| (index / 8, 1u8 << (index % 8)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_count_is_ceiling() {
        assert_eq!(BitField::new(0).byte_count(), 0);
        assert_eq!(BitField::new(1).byte_count(), 1);
        assert_eq!(BitField::new(8).byte_count(), 1);
        assert_eq!(BitField::new(9).byte_count(), 2);
        assert_eq!(BitField::new(14).byte_count(), 2);
        assert_eq!(BitField::new(45).byte_count(), 6);
    }

    #[test]
    fn test_initially_clear() {
        let field = BitField::new(20);
        assert!(field.is_clear());
        assert!((0..20).all(|i| !field.get(i)));
    }

    #[test]
    fn test_set_and_get() {
        let mut field = BitField::new(12);
        field.set(0, true);
        field.set(9, true);
        assert!(field.get(0));
        assert!(field.get(9));
        assert!(!field.get(8));
        assert_eq!(field.as_bytes(), &[0b0000_0001, 0b0000_0010]);

        field.set(0, false);
        assert!(!field.get(0));
    }

    #[test]
    fn test_out_of_range_is_ignored() {
        let mut field = BitField::new(10);
        field.set(-1, true);
        field.set(10, true);
        field.set(200, true);
        assert!(field.is_clear());
        assert!(!field.get(-1));
        assert!(!field.get(10));
        // Padding bits of the last byte are not addressable either.
        assert!(!field.get(15));
    }

    #[test]
    fn test_from_bytes_checks_length() {
        assert!(BitField::from_bytes(9, &[0xFF]).is_none());
        let field = BitField::from_bytes(9, &[0xFF, 0xFF]).unwrap();
        assert!(field.get(8));
        assert!(!field.get(9));
    }
}
