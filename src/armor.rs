//! # Armor module
//!
//! ASCII armor: base64 in 64 column lines between `BEGIN` and `END` lines, followed
//! by a CRC-24 of the binary data.
//!
//! Ref: <https://www.rfc-editor.org/rfc/rfc9580.html#name-forming-ascii-armor>

mod reader;
mod writer;

use std::fmt;

use crate::errors::{bail, Result};
use crate::types::Tag;

pub use self::reader::{parse, Headers};
pub use self::writer::{to_armored_string, write};

/// Armor block types.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum BlockType {
    /// PGP public key
    PublicKey,
    /// PGP private key
    PrivateKey,
    Message,
    Signature,
}

impl BlockType {
    /// Picks the block type for a packet stream from its first packet.
    pub fn from_packet_stream(data: &[u8]) -> Result<Self> {
        let Some(first) = data.first() else {
            bail!("can not armor an empty packet stream");
        };

        let typ = match Tag::from_bits(*first) {
            Tag::Signature => BlockType::Signature,
            Tag::SecretKey => BlockType::PrivateKey,
            Tag::PublicKey => BlockType::PublicKey,
            _ => BlockType::Message,
        };

        Ok(typ)
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockType::PublicKey => f.write_str("PGP PUBLIC KEY BLOCK"),
            BlockType::PrivateKey => f.write_str("PGP PRIVATE KEY BLOCK"),
            BlockType::Message => f.write_str("PGP MESSAGE"),
            BlockType::Signature => f.write_str("PGP SIGNATURE"),
        }
    }
}
