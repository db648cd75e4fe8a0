use bitfield::bitfield;
use num_enum::{FromPrimitive, IntoPrimitive};

/// Signature types this crate issues.
///
/// Ref: <https://www.rfc-editor.org/rfc/rfc9580.html#name-signature-types>
#[derive(Debug, PartialEq, Eq, Copy, Clone, FromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum SignatureType {
    /// Signature of a binary document.
    Binary = 0x00,
    /// Generic certification of a User ID and Public-Key packet.
    CertGeneric = 0x10,
    /// Positive certification of a User ID and Public-Key packet.
    ///
    /// Used for self-certifications, like GnuPG does. Few implementations
    /// differentiate between 0x10 and 0x13.
    CertPositive = 0x13,
    /// Subkey Binding Signature
    SubkeyBinding = 0x18,

    #[num_enum(catch_all)]
    Other(u8),
}

bitfield! {
    /// Key usage flags, as carried in the key flags subpacket.
    #[derive(Default, PartialEq, Eq, Copy, Clone)]
    pub struct KeyFlags(u8);
    impl Debug;

    pub certify, set_certify: 0;
    pub sign, set_sign: 1;
    pub encrypt_comms, set_encrypt_comms: 2;
    pub encrypt_storage, set_encrypt_storage: 3;
}

impl KeyFlags {
    /// Flags of a primary key: certify and sign.
    pub fn signing() -> Self {
        let mut flags = KeyFlags::default();
        flags.set_certify(true);
        flags.set_sign(true);
        flags
    }

    /// Flags of an encryption subkey: communications and storage.
    pub fn encryption() -> Self {
        let mut flags = KeyFlags::default();
        flags.set_encrypt_comms(true);
        flags.set_encrypt_storage(true);
        flags
    }

    pub fn bits(&self) -> u8 {
        self.0
    }
}

/// The features subpacket.
#[derive(Debug, Default, PartialEq, Eq, Copy, Clone)]
pub struct Features(u8);

impl Features {
    /// Supports Symmetrically Encrypted Integrity Protected Data v1, aka MDC.
    pub const SEIPD_V1: Features = Features(0x01);

    pub fn bits(&self) -> u8 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyflags() {
        let flags: KeyFlags = Default::default();
        assert_eq!(flags.bits(), 0x00);

        let mut flags = KeyFlags::default();
        flags.set_certify(true);
        assert!(flags.certify());
        assert_eq!(flags.bits(), 0x01);

        assert_eq!(KeyFlags::signing().bits(), 0x03);
        assert!(KeyFlags::signing().sign());
        assert_eq!(KeyFlags::encryption().bits(), 0x0c);
        assert!(!KeyFlags::encryption().certify());
    }

    #[test]
    fn signature_type_codes() {
        assert_eq!(u8::from(SignatureType::CertPositive), 0x13);
        assert_eq!(SignatureType::from(0x18), SignatureType::SubkeyBinding);
        assert_eq!(SignatureType::from(0x20), SignatureType::Other(0x20));
    }
}
