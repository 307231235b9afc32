//! # Framing
//!
//! Reads and writes whole frames. The header is read first and validated
//! before the body is allocated, so a bogus length never causes a large
//! allocation.

use bytemuck::{Pod, Zeroable};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use super::packets::ClientPacket;
use super::writer::PacketWriter;
use super::{Origin, HEADER_LEN, MAGIC, REMAINING_OFFSET};
use crate::error::{FrameError, ParseError, ParseResult};

/// Raw header words as they sit on the wire.
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
#[repr(C)]
struct WireHeader {
    magic: u32,
    frame_len: u32,
    origin: u32,
    reserved: u32,
    remaining: u32,
    type_hash: u32,
}

impl WireHeader {
    fn from_le_bytes(bytes: &[u8; HEADER_LEN]) -> Self {
        let raw: Self = bytemuck::pod_read_unaligned(bytes);
        Self {
            magic: u32::from_le(raw.magic),
            frame_len: u32::from_le(raw.frame_len),
            origin: u32::from_le(raw.origin),
            reserved: u32::from_le(raw.reserved),
            remaining: u32::from_le(raw.remaining),
            type_hash: u32::from_le(raw.type_hash),
        }
    }

    fn to_le(self) -> Self {
        Self {
            magic: self.magic.to_le(),
            frame_len: self.frame_len.to_le(),
            origin: self.origin.to_le(),
            reserved: self.reserved.to_le(),
            remaining: self.remaining.to_le(),
            type_hash: self.type_hash.to_le(),
        }
    }
}

/// Validated frame header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameHeader {
    /// Sender side.
    pub origin: Origin,
    /// Total frame length including the header.
    pub frame_len: u32,
    /// Packet type hash.
    pub type_hash: u32,
}

impl FrameHeader {
    /// Length of the body that follows the header. Zero for a header shorter
    /// than [`HEADER_LEN`].
    #[inline]
    #[must_use]
    pub const fn body_len(&self) -> usize {
        (self.frame_len as usize).saturating_sub(HEADER_LEN)
    }
}

/// A frame whose body has not been decoded yet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawFrame {
    /// Validated header.
    pub header: FrameHeader,
    /// Body bytes, starting with the subtype for multiplexed families.
    pub body: Vec<u8>,
}

/// Validates the 24 header bytes.
///
/// # Errors
///
/// Returns a [`ParseError`] for a bad magic word, an unknown origin, a frame
/// length shorter than the header or above `max_frame_len`, or a `remaining`
/// word that disagrees with the frame length.
pub fn decode_header(bytes: &[u8; HEADER_LEN], max_frame_len: u32) -> ParseResult<FrameHeader> {
    let raw = WireHeader::from_le_bytes(bytes);

    if raw.magic != MAGIC {
        return Err(ParseError::InvalidMagic(raw.magic));
    }
    if (raw.frame_len as usize) < HEADER_LEN {
        return Err(ParseError::FrameTooShort(raw.frame_len));
    }
    if raw.frame_len > max_frame_len {
        return Err(ParseError::FrameTooLarge {
            len: raw.frame_len,
            max: max_frame_len,
        });
    }
    let origin = Origin::from_wire(raw.origin).ok_or(ParseError::InvalidOrigin(raw.origin))?;
    let expected = raw.frame_len - REMAINING_OFFSET;
    if raw.remaining != expected {
        return Err(ParseError::LengthMismatch {
            declared: raw.remaining,
            expected,
        });
    }

    Ok(FrameHeader {
        origin,
        frame_len: raw.frame_len,
        type_hash: raw.type_hash,
    })
}

/// Reads exactly one frame.
///
/// Frames from any origin other than `expected` are rejected. A stream that
/// ends, whether between frames or inside one, reports
/// [`FrameError::Closed`].
pub async fn read_frame<R>(
    reader: &mut R,
    expected: Origin,
    max_frame_len: u32,
) -> Result<RawFrame, FrameError>
where
    R: AsyncRead + Unpin,
{
    let mut header_bytes = [0u8; HEADER_LEN];
    read_exact(reader, &mut header_bytes).await?;
    let header = decode_header(&header_bytes, max_frame_len)?;
    if header.origin != expected {
        return Err(ParseError::UnexpectedOrigin {
            expected,
            found: header.origin,
        }
        .into());
    }

    let mut body = vec![0u8; header.body_len()];
    read_exact(reader, &mut body).await?;
    tracing::trace!(
        "Frame {:#010x}: {} body bytes",
        header.type_hash,
        body.len()
    );
    Ok(RawFrame { header, body })
}

async fn read_exact<R>(reader: &mut R, buf: &mut [u8]) -> Result<(), FrameError>
where
    R: AsyncRead + Unpin,
{
    match reader.read_exact(buf).await {
        Ok(_) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => Err(FrameError::Closed),
        Err(e) => Err(FrameError::Io(e)),
    }
}

/// Builds a complete frame around `body`.
#[must_use]
pub fn encode_frame(origin: Origin, type_hash: u32, body: &[u8]) -> Vec<u8> {
    let frame_len = (HEADER_LEN + body.len()) as u32;
    let header = WireHeader {
        magic: MAGIC,
        frame_len,
        origin: origin.to_wire(),
        reserved: 0,
        remaining: frame_len - REMAINING_OFFSET,
        type_hash,
    }
    .to_le();

    let mut frame = Vec::with_capacity(frame_len as usize);
    frame.extend_from_slice(bytemuck::bytes_of(&header));
    frame.extend_from_slice(body);
    frame
}

/// Serialises a client packet into a frame.
///
/// The body is written first so that its length is known for the header.
#[must_use]
pub fn encode_packet(packet: &dyn ClientPacket) -> Vec<u8> {
    let mut writer = PacketWriter::new();
    if let Some(subtype) = packet.subtype() {
        writer.write_u8(subtype);
    }
    packet.write_payload(&mut writer);
    encode_frame(Origin::Client, packet.type_hash(), writer.as_slice())
}

/// Serialises and writes a client packet.
pub async fn write_packet<W>(writer: &mut W, packet: &dyn ClientPacket) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let frame = encode_packet(packet);
    writer.write_all(&frame).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header_bytes(frame: &[u8]) -> [u8; HEADER_LEN] {
        frame[..HEADER_LEN].try_into().unwrap()
    }

    #[test]
    fn test_body_len_of_short_header() {
        let header = FrameHeader {
            origin: Origin::Server,
            frame_len: 4,
            type_hash: 0,
        };
        assert_eq!(header.body_len(), 0);

        let header = FrameHeader {
            frame_len: HEADER_LEN as u32 + 9,
            ..header
        };
        assert_eq!(header.body_len(), 9);
    }

    #[test]
    fn test_header_round_trip() {
        let frame = encode_frame(Origin::Server, 0xF582_1226, &[1, 2, 3]);
        assert_eq!(frame.len(), HEADER_LEN + 3);
        assert_eq!(&frame[..4], &[0xEF, 0xBE, 0xAD, 0xDE]);

        let header = decode_header(&header_bytes(&frame), 1024).unwrap();
        assert_eq!(header.origin, Origin::Server);
        assert_eq!(header.frame_len, 27);
        assert_eq!(header.type_hash, 0xF582_1226);
        assert_eq!(header.body_len(), 3);
    }

    #[test]
    fn test_rejects_bad_magic() {
        let mut frame = encode_frame(Origin::Server, 1, &[]);
        frame[0] = 0;
        assert!(matches!(
            decode_header(&header_bytes(&frame), 1024),
            Err(ParseError::InvalidMagic(_))
        ));
    }

    #[test]
    fn test_rejects_bad_origin() {
        let mut frame = encode_frame(Origin::Server, 1, &[]);
        frame[8] = 3;
        assert_eq!(
            decode_header(&header_bytes(&frame), 1024),
            Err(ParseError::InvalidOrigin(3))
        );
    }

    #[test]
    fn test_rejects_length_mismatch() {
        let mut frame = encode_frame(Origin::Server, 1, &[0; 8]);
        frame[16] = frame[16].wrapping_add(1);
        assert_eq!(
            decode_header(&header_bytes(&frame), 1024),
            Err(ParseError::LengthMismatch {
                declared: 13,
                expected: 12
            })
        );
    }

    #[test]
    fn test_rejects_oversized_and_undersized() {
        let frame = encode_frame(Origin::Server, 1, &[0; 100]);
        assert_eq!(
            decode_header(&header_bytes(&frame), 64),
            Err(ParseError::FrameTooLarge { len: 124, max: 64 })
        );

        let mut short = encode_frame(Origin::Server, 1, &[]);
        short[4] = 10;
        assert_eq!(
            decode_header(&header_bytes(&short), 1024),
            Err(ParseError::FrameTooShort(10))
        );
    }

    #[tokio::test]
    async fn test_read_frame_from_stream() {
        let mut bytes = encode_frame(Origin::Server, 7, &[9, 8, 7]);
        bytes.extend(encode_frame(Origin::Server, 8, &[]));
        let mut stream = bytes.as_slice();

        let first = read_frame(&mut stream, Origin::Server, 1024).await.unwrap();
        assert_eq!(first.header.type_hash, 7);
        assert_eq!(first.body, vec![9, 8, 7]);

        let second = read_frame(&mut stream, Origin::Server, 1024).await.unwrap();
        assert_eq!(second.header.type_hash, 8);
        assert!(second.body.is_empty());

        assert!(matches!(
            read_frame(&mut stream, Origin::Server, 1024).await,
            Err(FrameError::Closed)
        ));
    }

    #[tokio::test]
    async fn test_read_frame_rejects_client_origin() {
        let bytes = encode_frame(Origin::Client, 7, &[]);
        let mut stream = bytes.as_slice();
        assert!(matches!(
            read_frame(&mut stream, Origin::Server, 1024).await,
            Err(FrameError::Parse(ParseError::UnexpectedOrigin { .. }))
        ));
    }

    #[tokio::test]
    async fn test_truncated_body_is_closed() {
        let bytes = encode_frame(Origin::Server, 7, &[1, 2, 3, 4]);
        let mut stream = &bytes[..bytes.len() - 2];
        assert!(matches!(
            read_frame(&mut stream, Origin::Server, 1024).await,
            Err(FrameError::Closed)
        ));
    }
}
