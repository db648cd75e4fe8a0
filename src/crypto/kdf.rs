//! Passphrase to seed derivation.
//!
//! The seed is the output of Argon2id over the passphrase, salted with the user id, so
//! the same passphrase yields unrelated keys for different identities.

use argon2::{Algorithm, Argon2, Params, Version};
use log::debug;
use zeroize::{Zeroize, Zeroizing};

use crate::errors::{CryptoSnafu, Result};

/// Length of the derived seed in bytes.
pub const SEED_LEN: usize = 64;

/// Base cost of one unit of difficulty.
///
/// Both costs are multiplied by the difficulty, so the total work grows with its square.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KdfParams {
    /// Number of passes.
    pub time_cost: u32,
    /// Memory in KiB.
    pub memory_cost: u32,
}

impl KdfParams {
    /// 8 passes over 1 GiB.
    pub const STANDARD: KdfParams = KdfParams {
        time_cost: 8,
        memory_cost: 1024 * 1024,
    };
}

impl Default for KdfParams {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// 64 bytes of key material, split into the primary key and subkey halves.
///
/// The halves never overlap.
#[derive(Clone, PartialEq, Eq, derive_more::Debug)]
#[debug("Seed(..)")]
pub struct Seed {
    signing: Zeroizing<[u8; 32]>,
    encryption: Zeroizing<[u8; 32]>,
}

impl Seed {
    /// First half, used for the signing key.
    pub fn signing_half(&self) -> &[u8; 32] {
        &self.signing
    }

    /// Second half, used for the encryption subkey.
    pub fn encryption_half(&self) -> &[u8; 32] {
        &self.encryption
    }

    pub fn to_bytes(&self) -> Zeroizing<[u8; SEED_LEN]> {
        let mut out = Zeroizing::new([0u8; SEED_LEN]);
        out[..32].copy_from_slice(&self.signing[..]);
        out[32..].copy_from_slice(&self.encryption[..]);
        out
    }
}

impl From<[u8; SEED_LEN]> for Seed {
    fn from(mut value: [u8; SEED_LEN]) -> Self {
        let mut signing = Zeroizing::new([0u8; 32]);
        let mut encryption = Zeroizing::new([0u8; 32]);
        signing.copy_from_slice(&value[..32]);
        encryption.copy_from_slice(&value[32..]);
        value.zeroize();
        Seed {
            signing,
            encryption,
        }
    }
}

/// Derives the seed with the [standard](KdfParams::STANDARD) cost.
pub fn derive(passphrase: &[u8], identity: &[u8], difficulty: u32) -> Result<Seed> {
    derive_with(KdfParams::STANDARD, passphrase, identity, difficulty)
}

/// Derives the seed with custom base costs, scaled by `difficulty`.
pub fn derive_with(
    params: KdfParams,
    passphrase: &[u8],
    identity: &[u8],
    difficulty: u32,
) -> Result<Seed> {
    if difficulty == 0 {
        return CryptoSnafu {
            message: "difficulty must be at least 1",
        }
        .fail();
    }
    let (Some(t_cost), Some(m_cost)) = (
        params.time_cost.checked_mul(difficulty),
        params.memory_cost.checked_mul(difficulty),
    ) else {
        return CryptoSnafu {
            message: format!("difficulty {difficulty} overflows the argon2 cost"),
        }
        .fail();
    };
    debug!("argon2id: t_cost={t_cost} m_cost={m_cost}KiB p_cost=1");

    let params = Params::new(m_cost, t_cost, 1, Some(SEED_LEN))?;
    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

    let mut out = Zeroizing::new([0u8; SEED_LEN]);
    argon2.hash_password_into(passphrase, identity, &mut out[..])?;

    Ok(Seed::from(*out))
}
