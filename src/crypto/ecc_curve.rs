use crate::crypto::public_key::PublicKeyAlgorithm;

/// DER encoded OID body (without tag and length) of Curve25519.
const CURVE25519_OID: [u8; 10] = [0x2b, 0x06, 0x01, 0x04, 0x01, 0x97, 0x55, 0x01, 0x05, 0x01];
/// DER encoded OID body (without tag and length) of Ed25519.
const ED25519_OID: [u8; 9] = [0x2b, 0x06, 0x01, 0x04, 0x01, 0xda, 0x47, 0x0f, 0x01];

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ECCCurve {
    Curve25519,
    Ed25519,
}

impl ECCCurve {
    /// Standard name
    pub fn name(&self) -> &'static str {
        match self {
            ECCCurve::Curve25519 => "Curve25519",
            ECCCurve::Ed25519 => "Ed25519",
        }
    }

    /// The OID as written into public key packets, after its length octet.
    pub fn oid(&self) -> &'static [u8] {
        match self {
            ECCCurve::Curve25519 => &CURVE25519_OID[..],
            ECCCurve::Ed25519 => &ED25519_OID[..],
        }
    }

    /// The public key algorithm keys on this curve are published under.
    pub fn public_key_algorithm(&self) -> PublicKeyAlgorithm {
        match self {
            ECCCurve::Curve25519 => PublicKeyAlgorithm::ECDH,
            ECCCurve::Ed25519 => PublicKeyAlgorithm::EdDSALegacy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn oid_lengths() {
        assert_eq!(ECCCurve::Ed25519.oid().len(), 9);
        assert_eq!(ECCCurve::Curve25519.oid().len(), 10);
        assert_eq!(
            ECCCurve::Ed25519.public_key_algorithm(),
            PublicKeyAlgorithm::EdDSALegacy
        );
    }
}
