use derive_builder::Builder;
use log::debug;
use zeroize::Zeroizing;

use crate::composed::Certificate;
use crate::crypto::kdf::{self, KdfParams};
use crate::errors::Result;
use crate::packet::{EncryptionSubkey, SigningKey, UserId, MAX_BODY_LEN};
use crate::types::Timestamp;

/// Shortest user id accepted, since it doubles as the KDF salt.
pub const MIN_USER_ID_LEN: usize = 8;

/// Everything that goes into a derived key.
///
/// The same parameters always produce the same key.
#[derive(Clone, PartialEq, Eq, Builder, derive_more::Debug)]
#[builder(build_fn(validate = "Self::validate"))]
pub struct KeyParams {
    /// The identity, also used as the KDF salt.
    #[builder(setter(into))]
    user_id: String,
    #[builder(setter(into))]
    #[debug("..")]
    passphrase: Zeroizing<Vec<u8>>,

    /// Scales both KDF costs.
    #[builder(default = "1")]
    difficulty: u32,
    /// Creation time of the keys and their bindings.
    #[builder(default)]
    created: Timestamp,
    /// Derive and bind an encryption subkey.
    #[builder(default)]
    subkey: bool,
    /// Advertise modification detection support on the user id.
    #[builder(default)]
    enable_mdc: bool,
    #[builder(default)]
    kdf: KdfParams,
}

impl KeyParamsBuilder {
    fn validate(&self) -> std::result::Result<(), String> {
        if let Some(0) = self.difficulty {
            return Err("difficulty must be at least 1".into());
        }
        if let Some(ref user_id) = self.user_id {
            // Argon2 rejects salts shorter than 8 bytes.
            if user_id.len() < MIN_USER_ID_LEN {
                return Err(format!(
                    "user id {user_id:?} is shorter than the {MIN_USER_ID_LEN} byte minimum"
                ));
            }
            if user_id.len() > MAX_BODY_LEN {
                return Err(format!(
                    "user id of {} bytes exceeds the {MAX_BODY_LEN} byte packet limit",
                    user_id.len()
                ));
            }
        }

        Ok(())
    }
}

impl KeyParams {
    /// Derives the seed and builds the keys from it.
    pub fn generate(&self) -> Result<Certificate> {
        debug!(
            "deriving key for {:?} at difficulty {}",
            self.user_id, self.difficulty
        );
        let seed = kdf::derive_with(
            self.kdf,
            &self.passphrase,
            self.user_id.as_bytes(),
            self.difficulty,
        )?;

        let key = SigningKey::from_seed(seed.signing_half(), self.created)?;
        let subkey = if self.subkey {
            Some(EncryptionSubkey::from_seed(
                seed.encryption_half(),
                self.created,
            )?)
        } else {
            None
        };
        let user_id = UserId::new(self.user_id.clone().into_bytes()).with_mdc(self.enable_mdc);

        Ok(Certificate::new(key, user_id, subkey))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FAST: KdfParams = KdfParams {
        time_cost: 1,
        memory_cost: 256,
    };

    fn builder() -> KeyParamsBuilder {
        let mut builder = KeyParamsBuilder::default();
        builder
            .user_id("Example User <user@example.org>")
            .passphrase(b"correct horse battery staple".to_vec())
            .kdf(FAST);
        builder
    }

    #[test]
    fn defaults() {
        let params = builder().build().unwrap();
        assert_eq!(params.difficulty, 1);
        assert_eq!(params.created, Timestamp::from_secs(0));
        assert!(!params.subkey);
        assert!(!params.enable_mdc);
        assert!(!format!("{params:?}").contains("horse"));
    }

    #[test]
    fn validation() {
        assert!(builder().difficulty(0).build().is_err());
        assert!(builder().user_id("").build().is_err());
        assert!(KeyParamsBuilder::default().user_id("a").build().is_err());
    }

    #[test]
    fn generate_is_deterministic() {
        let params = builder().subkey(true).build().unwrap();
        let a = params.generate().unwrap();
        let b = params.generate().unwrap();
        assert_eq!(a, b);
        assert!(a.subkey().is_some());

        let other = builder().difficulty(2).build().unwrap().generate().unwrap();
        assert_ne!(a.key().public_key(), other.key().public_key());
    }

    #[test]
    fn short_user_id_is_rejected_at_build() {
        let err = builder().user_id("me").build().unwrap_err();
        assert!(err.to_string().contains("8 byte minimum"), "{err}");

        assert!(builder().user_id("a".repeat(7)).build().is_err());
        assert!(builder().user_id("a".repeat(8)).build().is_ok());
    }

    #[test]
    fn oversized_user_id_is_rejected_at_build() {
        let err = builder().user_id("a".repeat(256)).build().unwrap_err();
        assert!(err.to_string().contains("255 byte packet limit"), "{err}");

        let params = builder().user_id("a".repeat(255)).build().unwrap();
        let cert = params.generate().unwrap();
        assert_eq!(cert.user_id().id().len(), 255);
    }

    #[test]
    fn mdc_flag_reaches_the_user_id() {
        let cert = builder().enable_mdc(true).build().unwrap().generate().unwrap();
        assert!(cert.user_id().enable_mdc());

        let plain = builder().build().unwrap().generate().unwrap();
        assert!(!plain.user_id().enable_mdc());
    }
}
