//! EdDSA for OpenPGP.
//!
//! Keys are published in the `EdDSALegacy` framing (algorithm 22 with the Ed25519 OID),
//! which may only be used with v4 keys and is what every deployed implementation
//! understands.

use ed25519_dalek::Signer as _;
use zeroize::ZeroizeOnDrop;

use crate::{
    crypto::hash::HashAlgorithm,
    errors::{ensure, ensure_eq, Result},
    types::Mpi,
};

const MIN_HASH_LEN_BITS: usize = 256;

/// Secret key for EdDSA with Curve25519.
#[derive(Clone, PartialEq, Eq, ZeroizeOnDrop, derive_more::Debug)]
pub struct SecretKey {
    /// The 32 byte seed, expanded on use.
    #[debug("..")]
    secret: ed25519_dalek::SigningKey,
}

impl SecretKey {
    /// Builds a key from a 32 byte seed using the standard Ed25519 seed expansion.
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        SecretKey {
            secret: ed25519_dalek::SigningKey::from_bytes(seed),
        }
    }

    /// The raw compressed public point.
    pub fn public_key(&self) -> [u8; 32] {
        self.secret.verifying_key().to_bytes()
    }

    /// The seed, as stored in unprotected secret key packets.
    pub(crate) fn as_mpi(&self) -> Mpi {
        Mpi::from_slice(self.secret.as_bytes())
    }

    /// Signs a digest, returning the `r` and `s` halves of the signature.
    pub fn sign(&self, hash: HashAlgorithm, digest: &[u8]) -> Result<(Mpi, Mpi)> {
        let Some(digest_size) = hash.digest_size() else {
            crate::errors::bail!("EdDSA signature: invalid hash algorithm: {:?}", hash);
        };
        ensure_eq!(
            digest.len(),
            digest_size,
            "unexpected digest length for hash algorithm {:?}",
            hash
        );
        ensure!(
            digest_size * 8 >= MIN_HASH_LEN_BITS,
            "EdDSA signature: hash algorithm {:?} is too weak for Ed25519",
            hash
        );

        let signature = self.secret.sign(digest);
        let bytes = signature.to_bytes();

        Ok((Mpi::from_slice(&bytes[..32]), Mpi::from_slice(&bytes[32..])))
    }
}
