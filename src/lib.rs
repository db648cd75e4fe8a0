//! # passphrase2pgp
//!
//! Deterministic OpenPGP keys derived from a passphrase.
//!
//! A passphrase and a user id are stretched with Argon2id into 64 bytes of seed.
//! The first half becomes an Ed25519 primary key, the second half an optional X25519
//! encryption subkey. The same inputs always give the same key, fingerprint and
//! signatures, so the key never has to be stored.
//!
//! ```no_run
//! use passphrase2pgp::composed::KeyParamsBuilder;
//!
//! # fn main() -> passphrase2pgp::errors::Result<()> {
//! let cert = KeyParamsBuilder::default()
//!     .user_id("Example User <user@example.org>")
//!     .passphrase(b"correct horse battery staple".to_vec())
//!     .subkey(true)
//!     .build()
//!     .expect("valid parameters")
//!     .generate()?;
//!
//! let armored = passphrase2pgp::armor::to_armored_string(&cert.public_bytes()?)?;
//! println!("{armored}");
//! # Ok(())
//! # }
//! ```
//!
//! Packets only use the single octet length form, see [`packet::encode`].

#![forbid(unsafe_code)]

pub mod armor;
pub mod composed;
pub mod crypto;
pub mod errors;
pub mod packet;
pub mod parsing;
pub mod ser;
pub mod types;

pub use self::composed::{Certificate, KeyParams, KeyParamsBuilder};
pub use self::errors::{Error, ErrorKind, Result};
