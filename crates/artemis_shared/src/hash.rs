//! # Packet Type Hashes
//!
//! Packet types are identified on the wire by the JamCRC of a canonical ASCII
//! name rather than by a sequential id, so decoders can be registered without
//! a central enumeration. JamCRC is CRC-32 without the final inversion.

/// Computes the 32-bit wire identifier for a packet type name.
#[inline]
#[must_use]
pub fn type_hash(name: &str) -> u32 {
    !crc32fast::hash(name.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_hashes() {
        assert_eq!(type_hash("heartbeat"), 0xf582_1226);
        assert_eq!(type_hash("objectBitStream"), 0x8080_3df9);
        assert_eq!(type_hash("simpleEvent"), 0xf754_c8fe);
        assert_eq!(type_hash("connected"), 0xe548_e74a);
        assert_eq!(type_hash("valueInt"), 0x4c82_1d3c);
    }

    #[test]
    fn test_hash_is_case_sensitive() {
        assert_ne!(type_hash("heartbeat"), type_hash("Heartbeat"));
    }
}
