use std::io::Read;

use log::debug;

use crate::errors::Result;
use crate::packet::{EncryptionSubkey, SigningKey, UserId};
use crate::types::{Bindable, Timestamp};

/// A primary key with its user id and optional encryption subkey.
///
/// Serializes to the full packet streams: the key, the user id and its
/// certification, then the subkey and its binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Certificate {
    key: SigningKey,
    user_id: UserId,
    subkey: Option<EncryptionSubkey>,
}

impl Certificate {
    pub fn new(key: SigningKey, user_id: UserId, subkey: Option<EncryptionSubkey>) -> Self {
        Certificate {
            key,
            user_id,
            subkey,
        }
    }

    /// Reads a key file: the secret key packet followed by the user id packet.
    ///
    /// Key files carry no subkey.
    pub fn from_key_file<R: Read>(r: &mut R) -> Result<Self> {
        let key = SigningKey::from_reader(r)?;
        let user_id = UserId::from_reader(r)?;
        debug!("loaded key {:X} for {}", key.fingerprint(), user_id);

        Ok(Certificate::new(key, user_id, None))
    }

    /// The key file contents, readable by [`Certificate::from_key_file`].
    pub fn to_key_file(&self) -> Result<Vec<u8>> {
        let mut out = self.key.secret_packet()?;
        out.extend(self.user_id.packet()?);
        Ok(out)
    }

    pub fn key(&self) -> &SigningKey {
        &self.key
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn subkey(&self) -> Option<&EncryptionSubkey> {
        self.subkey.as_ref()
    }

    /// Creation time of the keys, also used for all bindings.
    pub fn created(&self) -> Timestamp {
        self.key.created()
    }

    /// The transferable public key.
    pub fn public_bytes(&self) -> Result<Vec<u8>> {
        let mut out = self.key.public_packet()?;
        self.append_bindings(&mut out, |subkey| subkey.public_packet())?;
        Ok(out)
    }

    /// The transferable secret key, with all secrets unprotected.
    pub fn secret_bytes(&self) -> Result<Vec<u8>> {
        let mut out = self.key.secret_packet()?;
        self.append_bindings(&mut out, |subkey| subkey.secret_packet())?;
        Ok(out)
    }

    fn append_bindings<F>(&self, out: &mut Vec<u8>, subkey_packet: F) -> Result<()>
    where
        F: Fn(&EncryptionSubkey) -> Result<Vec<u8>>,
    {
        let created = self.created();
        out.extend(self.user_id.packet()?);
        out.extend(self.key.bind(&self.user_id, created)?);

        if let Some(ref subkey) = self.subkey {
            out.extend(subkey_packet(subkey)?);
            out.extend(self.key.bind(subkey, created)?);
        }

        Ok(())
    }

    /// A detached signature over `data`.
    pub fn sign<R: Read>(&self, data: R) -> Result<Vec<u8>> {
        self.key.sign(data)
    }
}
