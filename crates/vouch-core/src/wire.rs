//! Wire framing for packets.
//!
//! A framed packet is a CompactSize length prefix followed by the canonical
//! text bytes. CompactSize encodes `n` as:
//! - `n < 0xfd`: one byte
//! - `n <= 0xffff`: `0xfd` then u16 little-endian
//! - `n <= 0xffff_ffff`: `0xfe` then u32 little-endian
//! - otherwise: `0xff` then u64 little-endian
//!
//! Only the shortest form is accepted.

use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::crypto::CryptoSuite;
use crate::error::{PacketError, Result};
use crate::packet::Packet;
use crate::types::Verification;

/// Maximum accepted length of a packet's canonical text.
pub const MAX_PACKET_LEN: usize = 1 << 20;

/// Write a CompactSize integer.
pub fn put_compact_size(buf: &mut impl BufMut, n: u64) {
    if n < 0xfd {
        buf.put_u8(n as u8);
    } else if n <= 0xffff {
        buf.put_u8(0xfd);
        buf.put_u16_le(n as u16);
    } else if n <= 0xffff_ffff {
        buf.put_u8(0xfe);
        buf.put_u32_le(n as u32);
    } else {
        buf.put_u8(0xff);
        buf.put_u64_le(n);
    }
}

/// Read a CompactSize integer, rejecting truncated or non-minimal encodings.
pub fn get_compact_size(buf: &mut impl Buf) -> Result<u64> {
    let truncated = || PacketError::malformed("truncated length prefix");

    if !buf.has_remaining() {
        return Err(truncated());
    }
    let (n, min) = match buf.get_u8() {
        0xfd => {
            if buf.remaining() < 2 {
                return Err(truncated());
            }
            (buf.get_u16_le() as u64, 0xfd)
        }
        0xfe => {
            if buf.remaining() < 4 {
                return Err(truncated());
            }
            (buf.get_u32_le() as u64, 0x1_0000)
        }
        0xff => {
            if buf.remaining() < 8 {
                return Err(truncated());
            }
            (buf.get_u64_le(), 0x1_0000_0000)
        }
        b => return Ok(b as u64),
    };

    if n < min {
        return Err(PacketError::malformed("non-minimal length prefix"));
    }
    Ok(n)
}

fn check_len(len: u64) -> Result<()> {
    if len > MAX_PACKET_LEN as u64 {
        return Err(PacketError::malformed(format!(
            "packet length {} exceeds maximum {}",
            len, MAX_PACKET_LEN
        )));
    }
    Ok(())
}

impl Packet {
    /// Frame the canonical text for transmission or storage.
    ///
    /// Fails if the text is longer than [`MAX_PACKET_LEN`], since
    /// [`Packet::from_wire`] would refuse the frame.
    pub fn to_wire(&self) -> Result<Bytes> {
        let data = self.data().as_bytes();
        check_len(data.len() as u64)?;
        let mut buf = BytesMut::with_capacity(data.len() + 9);
        put_compact_size(&mut buf, data.len() as u64);
        buf.put_slice(data);
        Ok(buf.freeze())
    }

    /// Decode one framed packet from the front of `bytes`.
    ///
    /// Runs the full construction path and marks the packet published.
    /// Returns the packet and the number of bytes consumed.
    pub fn from_wire<S: CryptoSuite>(
        bytes: &[u8],
        verification: Verification,
        suite: &S,
    ) -> Result<(Packet, usize)> {
        let mut cursor = bytes;
        let len = get_compact_size(&mut cursor)?;
        check_len(len)?;
        let len = len as usize;
        if cursor.remaining() < len {
            return Err(PacketError::malformed("truncated packet"));
        }

        let prefix_len = bytes.len() - cursor.remaining();
        let text = std::str::from_utf8(&cursor[..len])
            .map_err(|e| PacketError::malformed(format!("packet text is not UTF-8: {}", e)))?;

        let packet = Packet::from_published(text, verification, suite)?;
        Ok((packet, prefix_len + len))
    }
}
