use num_enum::{FromPrimitive, IntoPrimitive};

/// Public key algorithm ids, limited to the two this crate emits.
///
/// Ref: <https://www.rfc-editor.org/rfc/rfc9580.html#name-public-key-algorithms>
#[derive(Debug, PartialEq, Eq, Clone, Copy, FromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum PublicKeyAlgorithm {
    /// Elliptic Curve: RFC-6637
    ECDH = 18,
    /// EdDSA legacy format [deprecated in RFC 9580, superseded by Ed25519 (27)]
    EdDSALegacy = 22,

    #[num_enum(catch_all)]
    Unknown(u8),
}
