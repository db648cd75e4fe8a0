use std::io;

use num_enum::{FromPrimitive, IntoPrimitive};

use crate::errors::Result;
use crate::ser::Serialize;
use crate::types::{KeyId, Timestamp};

use super::{Features, KeyFlags};

/// Available signature subpacket types
///
/// Ref: <https://www.rfc-editor.org/rfc/rfc9580.html#name-signature-subpacket-specifi>
#[derive(Debug, PartialEq, Eq, Copy, Clone, FromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum SubpacketType {
    SignatureCreationTime = 2,
    Issuer = 16,
    KeyFlags = 27,
    Features = 30,

    #[num_enum(catch_all)]
    Other(u8),
}

/// A signature subpacket.
///
/// All bodies are short enough for a single octet length.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Subpacket {
    /// The time the signature was made.
    SignatureCreationTime(Timestamp),
    /// The OpenPGP Key ID of the key issuing the signature.
    Issuer(KeyId),
    /// List of flags that hold information about a key.
    KeyFlags(KeyFlags),
    /// List of flags that indicate which advanced features the key holder supports.
    Features(Features),
}

impl Subpacket {
    pub fn typ(&self) -> SubpacketType {
        match self {
            Subpacket::SignatureCreationTime(_) => SubpacketType::SignatureCreationTime,
            Subpacket::Issuer(_) => SubpacketType::Issuer,
            Subpacket::KeyFlags(_) => SubpacketType::KeyFlags,
            Subpacket::Features(_) => SubpacketType::Features,
        }
    }

    fn body_len(&self) -> usize {
        match self {
            Subpacket::SignatureCreationTime(d) => d.write_len(),
            Subpacket::Issuer(id) => id.as_ref().len(),
            Subpacket::KeyFlags(_) | Subpacket::Features(_) => 1,
        }
    }

    fn body_to_writer<W: io::Write>(&self, writer: &mut W) -> Result<()> {
        match self {
            Subpacket::SignatureCreationTime(t) => t.to_writer(writer)?,
            Subpacket::Issuer(id) => writer.write_all(id.as_ref())?,
            Subpacket::KeyFlags(flags) => writer.write_all(&[flags.bits()])?,
            Subpacket::Features(features) => writer.write_all(&[features.bits()])?,
        }

        Ok(())
    }
}

impl Serialize for Subpacket {
    fn to_writer<W: io::Write>(&self, writer: &mut W) -> Result<()> {
        // the length covers the type octet
        let len = 1 + self.body_len() as u8;
        writer.write_all(&[len, self.typ().into()])?;
        self.body_to_writer(writer)?;

        Ok(())
    }

    fn write_len(&self) -> usize {
        2 + self.body_len()
    }
}
