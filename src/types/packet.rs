use num_enum::{FromPrimitive, IntoPrimitive};

/// Packet Type ID, see <https://www.rfc-editor.org/rfc/rfc9580.html#name-packet-types>
///
/// Only the packets this crate produces are named.
#[derive(Debug, PartialEq, Eq, Clone, Copy, FromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum Tag {
    /// Signature Packet
    Signature = 2,
    /// Secret-Key Packet
    SecretKey = 5,
    /// Public-Key Packet
    PublicKey = 6,
    /// Secret-Subkey Packet
    SecretSubkey = 7,
    /// User ID Packet
    UserId = 13,
    /// Public-Subkey Packet
    PublicSubkey = 14,

    #[num_enum(catch_all)]
    Other(u8),
}

impl Tag {
    /// Packet Type ID encoded in OpenPGP format
    /// (bits 7 and 6 set, bits 5-0 carry the packet type ID)
    pub fn encode(self) -> u8 {
        let t: u8 = self.into();
        0b1100_0000 | (t & 0b0011_1111)
    }

    /// Extracts the tag from a header octet, ignoring the two format bits.
    pub fn from_bits(bits: u8) -> Self {
        Self::from(bits & 0b0011_1111)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_tags() {
        assert_eq!(Tag::Signature.encode(), 0xc2);
        assert_eq!(Tag::SecretKey.encode(), 0xc5);
        assert_eq!(Tag::PublicKey.encode(), 0xc6);
        assert_eq!(Tag::UserId.encode(), 0xcd);
        assert_eq!(Tag::from_bits(0xce), Tag::PublicSubkey);
        assert_eq!(Tag::from_bits(0xd1), Tag::Other(17));
    }
}
