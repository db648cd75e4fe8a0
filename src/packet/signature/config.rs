use std::io::{self, Read};

use byteorder::{BigEndian, ByteOrder, WriteBytesExt};
use digest::DynDigest;
use log::debug;

use crate::crypto::ed25519;
use crate::crypto::hash::{HashAlgorithm, WriteHasher};
use crate::crypto::public_key::PublicKeyAlgorithm;
use crate::errors::Result;
use crate::packet::{Signature, SignatureType, Subpacket};
use crate::ser::Serialize;
use crate::types::{Bindable, Timestamp};

/// The only signature version this crate produces.
pub const SIGNATURE_VERSION: u8 = 4;

/// Everything about a signature except the signature itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureConfig {
    pub typ: SignatureType,
    pub pub_alg: PublicKeyAlgorithm,
    pub hash_alg: HashAlgorithm,

    pub hashed_subpackets: Vec<Subpacket>,
    pub unhashed_subpackets: Vec<Subpacket>,
}

impl SignatureConfig {
    /// An EdDSA over SHA-256 configuration.
    pub fn new_v4(
        typ: SignatureType,
        hashed_subpackets: Vec<Subpacket>,
        unhashed_subpackets: Vec<Subpacket>,
    ) -> Self {
        SignatureConfig {
            typ,
            pub_alg: PublicKeyAlgorithm::EdDSALegacy,
            hash_alg: HashAlgorithm::Sha256,
            hashed_subpackets,
            unhashed_subpackets,
        }
    }

    /// Sign the given data.
    pub fn sign<R: Read>(self, key: &ed25519::SecretKey, mut data: R) -> Result<Signature> {
        let mut hasher = self.hash_alg.new_hasher()?;
        io::copy(&mut data, &mut WriteHasher(&mut hasher))?;

        self.finish(key, hasher)
    }

    /// Creates a certification of `target` by the key with the given fingerprint preimage.
    pub fn sign_binding(
        self,
        key: &ed25519::SecretKey,
        signer_preimage: &[u8],
        target: &impl Bindable,
    ) -> Result<Signature> {
        debug!("signing binding {:?}", self.typ);
        let mut hasher = self.hash_alg.new_hasher()?;
        hasher.update(signer_preimage);
        hasher.update(&target.sign_data()?);

        self.finish(key, hasher)
    }

    fn finish(self, key: &ed25519::SecretKey, mut hasher: Box<dyn DynDigest>) -> Result<Signature> {
        let len = self.hash_signature_data(&mut hasher)?;
        hasher.update(&self.trailer(len));

        let hash = hasher.finalize();
        let signed_hash_value = [hash[0], hash[1]];
        let (r, s) = key.sign(self.hash_alg, &hash)?;

        Ok(Signature::from_config(self, signed_hash_value, [r, s]))
    }

    /// Feeds the hashed part of the signature into `hasher`: version, type,
    /// algorithms and the hashed subpacket area.
    ///
    /// Returns the number of bytes hashed, as needed by the trailer.
    pub fn hash_signature_data(&self, hasher: &mut Box<dyn DynDigest>) -> Result<usize> {
        let mut res = vec![
            SIGNATURE_VERSION,
            self.typ.into(),
            self.pub_alg.into(),
            self.hash_alg.into(),
        ];
        write_subpacket_area(&self.hashed_subpackets, &mut res)?;
        hasher.update(&res);

        Ok(res.len())
    }

    pub fn trailer(&self, len: usize) -> [u8; 6] {
        let mut trailer = [SIGNATURE_VERSION, 0xFF, 0, 0, 0, 0];
        BigEndian::write_u32(&mut trailer[2..], len as u32);
        trailer
    }

    /// The creation time, from the hashed area.
    pub fn created(&self) -> Option<Timestamp> {
        self.hashed_subpackets.iter().find_map(|p| match p {
            Subpacket::SignatureCreationTime(t) => Some(*t),
            _ => None,
        })
    }
}

/// Writes a subpacket area, prefixed by its two octet length.
pub(crate) fn write_subpacket_area<W: io::Write>(
    subpackets: &[Subpacket],
    writer: &mut W,
) -> Result<()> {
    writer.write_u16::<BigEndian>(subpackets.write_len() as u16)?;
    subpackets.to_writer(writer)
}
