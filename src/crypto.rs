//! # Cryptography module

pub mod checksum;
pub mod ecc_curve;
pub mod ed25519;
pub mod hash;
pub mod kdf;
pub mod public_key;
pub mod x25519;
