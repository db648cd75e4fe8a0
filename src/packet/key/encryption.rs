use std::io::Read;

use log::debug;

use crate::crypto::{ecc_curve::ECCCurve, x25519};
use crate::errors::{ensure, Result};
use crate::packet::header::{self, read_tagged};
use crate::packet::{KeyFlags, SignatureType, Subpacket};
use crate::ser::Serialize;
use crate::types::{Bindable, Fingerprint, KeyId, Tag, Timestamp};

use super::{public::PubKeyInner, secret};

/// The encryption subkey: X25519, published as ECDH (algorithm 18).
///
/// It never signs anything itself, the primary key binds it with
/// [`SigningKey::bind`](crate::packet::SigningKey::bind).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptionSubkey {
    secret: x25519::SecretKey,
    public: PubKeyInner,
    fingerprint: Fingerprint,
}

impl EncryptionSubkey {
    /// Derives the subkey from a 32 byte seed, clamped into an X25519 scalar.
    pub fn from_seed(seed: &[u8; 32], created: Timestamp) -> Result<Self> {
        Self::from_secret(x25519::SecretKey::from_seed(seed), created)
    }

    fn from_secret(secret: x25519::SecretKey, created: Timestamp) -> Result<Self> {
        let public = PubKeyInner::new(created, ECCCurve::Curve25519, secret.public_key());
        let fingerprint = public.fingerprint()?;
        debug!("encryption subkey {:X}", fingerprint);

        Ok(EncryptionSubkey {
            secret,
            public,
            fingerprint,
        })
    }

    /// Changes the creation time, and with it the fingerprint.
    pub fn set_created(&mut self, created: Timestamp) -> Result<()> {
        let public = PubKeyInner::new(created, ECCCurve::Curve25519, *self.public.point());
        self.fingerprint = public.fingerprint()?;
        self.public = public;

        Ok(())
    }

    pub fn created(&self) -> Timestamp {
        self.public.created()
    }

    /// The raw X25519 public key.
    pub fn public_key(&self) -> [u8; 32] {
        *self.public.point()
    }

    pub fn fingerprint(&self) -> Fingerprint {
        self.fingerprint
    }

    pub fn key_id(&self) -> KeyId {
        self.fingerprint.key_id()
    }

    /// The public subkey packet.
    pub fn public_packet(&self) -> Result<Vec<u8>> {
        header::encode(Tag::PublicSubkey, &self.public.to_bytes()?)
    }

    /// The secret subkey packet, unprotected.
    pub fn secret_packet(&self) -> Result<Vec<u8>> {
        let mpi = self.secret.as_mpi();
        let mut body = Vec::with_capacity(secret::plain_len(&self.public, &mpi));
        secret::write_plain(&self.public, &mpi, &mut body)?;
        header::encode(Tag::SecretSubkey, &body)
    }

    /// Reads a packet written by [`EncryptionSubkey::secret_packet`].
    pub fn from_reader<R: Read>(r: &mut R) -> Result<Self> {
        let body = read_tagged(r, Tag::SecretSubkey)?;
        let (public, mpi) = secret::parse_plain(body, ECCCurve::Curve25519)?;

        let key = Self::from_secret(x25519::SecretKey::try_from_mpi(&mpi)?, public.created())?;
        ensure!(
            key.public == public,
            "stored public key does not match the secret key"
        );

        Ok(key)
    }
}

impl Bindable for EncryptionSubkey {
    fn packet(&self) -> Result<Vec<u8>> {
        self.public_packet()
    }

    fn sign_type(&self) -> SignatureType {
        SignatureType::SubkeyBinding
    }

    fn subpackets(&self) -> Vec<Subpacket> {
        vec![Subpacket::KeyFlags(KeyFlags::encryption())]
    }

    fn sign_data(&self) -> Result<Vec<u8>> {
        self.public.preimage()
    }
}
