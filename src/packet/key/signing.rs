use std::io::Read;

use log::debug;

use crate::crypto::{ecc_curve::ECCCurve, ed25519};
use crate::errors::{bail, ensure, Result};
use crate::packet::header::{self, read_tagged};
use crate::packet::{Signature, SignatureConfig, SignatureType, Subpacket};
use crate::ser::Serialize;
use crate::types::{Bindable, Fingerprint, KeyId, Tag, Timestamp};

use super::{public::PubKeyInner, secret};

/// The primary key: EdDSA over Ed25519, published as algorithm 22.
///
/// Certifies the user id and the encryption subkey, and makes detached signatures.
/// The fingerprint is computed whenever the public part changes, so it is always
/// in sync with the key material and creation time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SigningKey {
    secret: ed25519::SecretKey,
    public: PubKeyInner,
    fingerprint: Fingerprint,
}

impl SigningKey {
    /// Derives the key from a 32 byte seed, using the standard Ed25519 seed expansion.
    pub fn from_seed(seed: &[u8; 32], created: Timestamp) -> Result<Self> {
        Self::from_secret(ed25519::SecretKey::from_seed(seed), created)
    }

    fn from_secret(secret: ed25519::SecretKey, created: Timestamp) -> Result<Self> {
        let public = PubKeyInner::new(created, ECCCurve::Ed25519, secret.public_key());
        let fingerprint = public.fingerprint()?;
        debug!("signing key {:X}", fingerprint);

        Ok(SigningKey {
            secret,
            public,
            fingerprint,
        })
    }

    /// Changes the creation time, and with it the fingerprint.
    ///
    /// Must happen before any packet or signature is produced.
    pub fn set_created(&mut self, created: Timestamp) -> Result<()> {
        let public = PubKeyInner::new(created, ECCCurve::Ed25519, *self.public.point());
        self.fingerprint = public.fingerprint()?;
        self.public = public;

        Ok(())
    }

    pub fn created(&self) -> Timestamp {
        self.public.created()
    }

    /// The raw Ed25519 public key.
    pub fn public_key(&self) -> [u8; 32] {
        *self.public.point()
    }

    pub fn fingerprint(&self) -> Fingerprint {
        self.fingerprint
    }

    pub fn key_id(&self) -> KeyId {
        self.fingerprint.key_id()
    }

    /// The public key packet.
    pub fn public_packet(&self) -> Result<Vec<u8>> {
        header::encode(Tag::PublicKey, &self.public.to_bytes()?)
    }

    /// The secret key packet.
    ///
    /// The secret is stored unprotected: anyone who can read this packet holds the key.
    pub fn secret_packet(&self) -> Result<Vec<u8>> {
        let mpi = self.secret.as_mpi();
        let mut body = Vec::with_capacity(secret::plain_len(&self.public, &mpi));
        secret::write_plain(&self.public, &mpi, &mut body)?;
        header::encode(Tag::SecretKey, &body)
    }

    /// Reads a packet written by [`SigningKey::secret_packet`].
    pub fn from_reader<R: Read>(r: &mut R) -> Result<Self> {
        let body = read_tagged(r, Tag::SecretKey)?;
        let (public, mpi) = secret::parse_plain(body, ECCCurve::Ed25519)?;
        let seed = mpi.to_padded::<32>()?;

        let key = Self::from_secret(ed25519::SecretKey::from_seed(&seed), public.created())?;
        ensure!(
            key.public == public,
            "stored public key does not match the secret key"
        );

        Ok(key)
    }

    /// Makes a detached binary signature over everything `data` yields.
    ///
    /// The signature carries the key creation time, so output stays reproducible.
    pub fn sign<R: Read>(&self, data: R) -> Result<Vec<u8>> {
        let config = SignatureConfig::new_v4(
            SignatureType::Binary,
            vec![Subpacket::SignatureCreationTime(self.created())],
            vec![Subpacket::Issuer(self.key_id())],
        );
        let signature = config.sign(&self.secret, data)?;
        debug!("created detached signature {:?}", signature);

        signature.to_packet()
    }

    /// Certifies `target` as belonging to this key, returning the signature packet.
    pub fn bind(&self, target: &impl Bindable, created: Timestamp) -> Result<Vec<u8>> {
        self.binding_signature(target, created)?.to_packet()
    }

    /// Like [`SigningKey::bind`], returning the signature before framing.
    pub fn binding_signature(
        &self,
        target: &impl Bindable,
        created: Timestamp,
    ) -> Result<Signature> {
        let typ = target.sign_type();
        if !matches!(
            typ,
            SignatureType::CertGeneric | SignatureType::CertPositive | SignatureType::SubkeyBinding
        ) {
            bail!("{:?} is not a binding signature type", typ);
        }

        let mut hashed = vec![Subpacket::SignatureCreationTime(created)];
        hashed.extend(target.subpackets());
        let config =
            SignatureConfig::new_v4(typ, hashed, vec![Subpacket::Issuer(self.key_id())]);

        config.sign_binding(&self.secret, &self.public.preimage()?, target)
    }
}
