//! X25519 key agreement keys, in the ECDH framing of RFC 6637.

use log::debug;
use x25519_dalek::{PublicKey, StaticSecret};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::{errors::Result, types::Mpi};

/// Secret key for X25519
///
/// The scalar is kept clamped, the way GnuPG stores it.
#[derive(Clone, derive_more::Debug, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct SecretKey {
    #[debug("..")]
    pub(crate) secret: [u8; 32],
}

impl SecretKey {
    /// Builds a key from 32 bytes of seed material, clamping it into a valid scalar.
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        SecretKey {
            secret: curve25519_dalek::scalar::clamp_integer(*seed),
        }
    }

    /// The raw public point (u-coordinate).
    pub fn public_key(&self) -> [u8; 32] {
        let secret = StaticSecret::from(self.secret);
        PublicKey::from(&secret).to_bytes()
    }

    /// OpenPGP stores the native little endian scalar as a big endian MPI.
    pub(crate) fn as_mpi(&self) -> Mpi {
        let mut reversed = Zeroizing::new(self.secret);
        reversed.reverse();
        Mpi::from_slice(&reversed[..])
    }

    /// Inverse of [`SecretKey::as_mpi`].
    pub(crate) fn try_from_mpi(mpi: &Mpi) -> Result<Self> {
        let mut raw = Zeroizing::new(mpi.to_padded::<32>()?);
        raw.reverse();
        debug!("X25519 secret restored from mpi");
        Ok(Self::from_seed(&raw))
    }
}
