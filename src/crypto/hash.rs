use digest::DynDigest;
use num_enum::{FromPrimitive, IntoPrimitive};

use crate::errors::{CryptoSnafu, Result};

/// Available hash algorithms.
/// Ref: <https://www.rfc-editor.org/rfc/rfc9580.html#name-hash-algorithms>
#[derive(
    Debug, PartialEq, Eq, Copy, Clone, FromPrimitive, IntoPrimitive, Hash, derive_more::Display,
)]
#[repr(u8)]
pub enum HashAlgorithm {
    #[display("SHA1")]
    Sha1 = 2,
    #[display("SHA256")]
    Sha256 = 8,

    #[num_enum(catch_all)]
    #[display("Other({_0})")]
    Other(u8),
}

impl Default for HashAlgorithm {
    fn default() -> Self {
        Self::Sha256
    }
}

impl HashAlgorithm {
    /// Create a new hasher.
    ///
    /// SHA-1 is only used for fingerprints and never for signatures.
    pub fn new_hasher(self) -> Result<Box<dyn DynDigest>> {
        match self {
            HashAlgorithm::Sha256 => Ok(Box::<sha2::Sha256>::default()),
            _ => CryptoSnafu {
                message: format!("hasher {self} is not supported for signatures"),
            }
            .fail(),
        }
    }

    /// Returns the expected digest size for the given algorithm.
    pub fn digest_size(self) -> Option<usize> {
        match self {
            HashAlgorithm::Sha1 => Some(20),
            HashAlgorithm::Sha256 => Some(32),
            HashAlgorithm::Other(_) => None,
        }
    }
}

/// Wrapper around `Box<dyn DynDigest>` to implement `io::Write`, so input can
/// be fed with `io::copy`.
pub(crate) struct WriteHasher<'a>(pub(crate) &'a mut Box<dyn DynDigest>);

impl std::io::Write for WriteHasher<'_> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let digest = &mut **self.0;
        DynDigest::update(digest, buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use hex_literal::hex;

    use super::*;

    #[test]
    fn sha256_through_writer() {
        let mut hasher = HashAlgorithm::Sha256.new_hasher().unwrap();
        WriteHasher(&mut hasher).write_all(b"abc").unwrap();
        assert_eq!(
            hasher.finalize().as_ref(),
            hex!("ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad")
        );
    }

    #[test]
    fn display_and_sizes() {
        assert_eq!(HashAlgorithm::Sha256.to_string(), "SHA256");
        assert_eq!(HashAlgorithm::from(8u8), HashAlgorithm::Sha256);
        assert_eq!(HashAlgorithm::Sha1.digest_size(), Some(20));
        assert!(HashAlgorithm::Sha1.new_hasher().is_err());
    }
}
