//! Packet framing.
//!
//! Every packet is written as one header octet `0xC0 | tag` followed by a single
//! length octet and the body. No other length encoding is produced or accepted,
//! so bodies are limited to 255 bytes.
//!
//! Note that RFC 9580 reads a first length octet in `192..=255` as the start of a
//! multi octet length. Bodies of that size only arise for unusually long user ids,
//! and such packets are not readable by other implementations.

use std::io::{self, Read};

use bytes::{Buf, Bytes};
use log::{debug, warn};

use crate::errors::{bail, format_err, EncodingSnafu, Error, Result};
use crate::parsing::BufParsing;
use crate::ser::Serialize;
use crate::types::Tag;

/// Largest body that fits the single octet length.
pub const MAX_BODY_LEN: usize = u8::MAX as usize;

/// Bodies from this size on are read as multi octet lengths by RFC 9580 parsers.
const FIRST_MULTI_OCTET_LEN: usize = 192;

/// A two octet packet header.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PacketHeader {
    tag: Tag,
    len: u8,
}

impl PacketHeader {
    /// Creates the header for a body of `len` bytes.
    pub fn from_parts(tag: Tag, len: usize) -> Result<Self> {
        let Ok(short) = u8::try_from(len) else {
            return EncodingSnafu {
                len,
                limit: MAX_BODY_LEN,
            }
            .fail();
        };
        if len >= FIRST_MULTI_OCTET_LEN {
            warn!(
                "{:?} packet body of {} bytes will not parse in other OpenPGP implementations",
                tag, len
            );
        }

        Ok(PacketHeader { tag, len: short })
    }

    /// Parses a header from the given buffer.
    pub fn from_buf<B: Buf>(mut i: B) -> Result<Self> {
        let header = i.read_u8("packet header")?;
        let len = i.read_u8("packet length")?;
        Self::from_octets(header, len)
    }

    /// Reads exactly the two header octets from `r`.
    pub fn from_reader<R: Read>(r: &mut R) -> Result<Self> {
        let mut octets = [0u8; 2];
        r.read_exact(&mut octets).map_err(truncated)?;
        Self::from_octets(octets[0], octets[1])
    }

    fn from_octets(header: u8, len: u8) -> Result<Self> {
        if header & 0b1100_0000 != 0b1100_0000 {
            bail!("unsupported packet header {:#04x}", header);
        }

        Ok(PacketHeader {
            tag: Tag::from_bits(header),
            len,
        })
    }

    pub fn tag(&self) -> Tag {
        self.tag
    }

    /// Length of the body following the header.
    pub fn body_len(&self) -> usize {
        self.len.into()
    }
}

impl Serialize for PacketHeader {
    fn to_writer<W: io::Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_all(&[self.tag.encode(), self.len])?;
        Ok(())
    }

    fn write_len(&self) -> usize {
        2
    }
}

/// Frames `body` as a packet of the given type.
pub fn encode(tag: Tag, body: &[u8]) -> Result<Vec<u8>> {
    let header = PacketHeader::from_parts(tag, body.len())?;
    let mut out = Vec::with_capacity(header.write_len() + body.len());
    header.to_writer(&mut out)?;
    out.extend_from_slice(body);

    Ok(out)
}

/// Splits the next packet off the front of `i`.
pub fn decode<B: Buf>(mut i: B) -> Result<(Tag, Bytes)> {
    let header = PacketHeader::from_buf(&mut i)?;
    let body = i.read_take(header.body_len(), "packet body")?;
    debug!("decoded {:?} packet of {} bytes", header.tag(), body.len());

    Ok((header.tag(), body))
}

/// Reads the next packet from `r`, consuming nothing past its end.
pub fn read_packet<R: Read>(r: &mut R) -> Result<(Tag, Bytes)> {
    let header = PacketHeader::from_reader(r)?;
    let mut body = vec![0u8; header.body_len()];
    r.read_exact(&mut body).map_err(truncated)?;
    debug!("read {:?} packet of {} bytes", header.tag(), body.len());

    Ok((header.tag(), body.into()))
}

/// Reads the next packet and checks its type.
pub fn read_tagged<R: Read>(r: &mut R, expected: Tag) -> Result<Bytes> {
    let (tag, body) = read_packet(r)?;
    if tag != expected {
        bail!("expected a {:?} packet, found {:?}", expected, tag);
    }

    Ok(body)
}

fn truncated(err: io::Error) -> Error {
    if err.kind() == io::ErrorKind::UnexpectedEof {
        format_err!("packet truncated")
    } else {
        err.into()
    }
}
