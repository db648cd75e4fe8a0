//! Signature packets: detached signatures and key certifications.

mod config;
mod subpacket;
mod types;

use std::io;

use crate::errors::Result;
use crate::packet::header;
use crate::ser::Serialize;
use crate::types::{KeyId, Mpi, Tag, Timestamp};

pub use self::config::{SignatureConfig, SIGNATURE_VERSION};
pub use self::subpacket::{Subpacket, SubpacketType};
pub use self::types::{Features, KeyFlags, SignatureType};

use self::config::write_subpacket_area;

/// Signature Packet
///
/// Ref: <https://www.rfc-editor.org/rfc/rfc9580.html#name-signature-packet-type-id-2>
#[derive(Clone, PartialEq, Eq, derive_more::Debug)]
pub struct Signature {
    pub config: SignatureConfig,
    #[debug("{}", hex::encode(signed_hash_value))]
    pub signed_hash_value: [u8; 2],
    /// The `r` and `s` values of the EdDSA signature.
    pub signature: [Mpi; 2],
}

impl Signature {
    pub fn from_config(
        config: SignatureConfig,
        signed_hash_value: [u8; 2],
        signature: [Mpi; 2],
    ) -> Self {
        Signature {
            config,
            signed_hash_value,
            signature,
        }
    }

    pub fn created(&self) -> Option<Timestamp> {
        self.config.created()
    }

    /// Returns the issuer key id, from the unhashed area.
    pub fn issuer(&self) -> Option<KeyId> {
        self.config
            .unhashed_subpackets
            .iter()
            .find_map(|p| match p {
                Subpacket::Issuer(id) => Some(*id),
                _ => None,
            })
    }

    /// The framed signature packet.
    pub fn to_packet(&self) -> Result<Vec<u8>> {
        header::encode(Tag::Signature, &self.to_bytes()?)
    }
}

impl Serialize for Signature {
    fn to_writer<W: io::Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_all(&[
            SIGNATURE_VERSION,
            self.config.typ.into(),
            self.config.pub_alg.into(),
            self.config.hash_alg.into(),
        ])?;
        write_subpacket_area(&self.config.hashed_subpackets, writer)?;
        write_subpacket_area(&self.config.unhashed_subpackets, writer)?;
        writer.write_all(&self.signed_hash_value)?;
        self.signature[..].to_writer(writer)?;

        Ok(())
    }

    fn write_len(&self) -> usize {
        4 + 2
            + self.config.hashed_subpackets.write_len()
            + 2
            + self.config.unhashed_subpackets.write_len()
            + 2
            + self.signature[..].write_len()
    }
}
