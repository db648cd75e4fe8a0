use std::fmt;

use sha1_checked::{CollisionResult, Sha1};

use crate::errors::{Error, Result};
use crate::types::KeyId;

/// Represents a v4 Fingerprint.
///
/// Ref: <https://www.rfc-editor.org/rfc/rfc9580.html#name-version-4-key-ids-and-finge>
#[derive(Clone, Copy, Eq, PartialEq, Hash, derive_more::Debug)]
#[debug("Fingerprint({})", hex::encode(_0))]
pub struct Fingerprint([u8; 20]);

impl Fingerprint {
    /// Hashes the fingerprint preimage: `0x99`, the two octet body length and the
    /// public key packet body.
    pub fn from_preimage(preimage: &[u8]) -> Result<Self> {
        match Sha1::try_digest(preimage) {
            CollisionResult::Ok(output) => Ok(Fingerprint(output.into())),
            CollisionResult::Collision(_) | CollisionResult::Mitigated(_) => {
                Err(Error::Sha1HashCollision)
            }
        }
    }

    /// The key id is the low-order 64 bits of the fingerprint.
    pub fn key_id(&self) -> KeyId {
        let mut id = [0u8; 8];
        id.copy_from_slice(&self.0[12..]);
        KeyId::from(id)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0[..]
    }
}

impl fmt::UpperHex for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode_upper(self.0))
    }
}

#[cfg(test)]
mod tests {
    use hex_literal::hex;

    use super::*;

    #[test]
    fn key_id_is_suffix() {
        let fp = Fingerprint(hex!("54e7a9c90f979de6a16e302ec41ebad9a3793d10"));
        assert_eq!(fp.key_id().to_bytes(), hex!("c41ebad9a3793d10"));
        assert_eq!(
            format!("{fp:X}"),
            "54E7A9C90F979DE6A16E302EC41EBAD9A3793D10"
        );
    }
}
