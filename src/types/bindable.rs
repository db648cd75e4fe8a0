use crate::errors::Result;
use crate::packet::{SignatureType, Subpacket};

/// Something a primary key can certify with a binding signature.
///
/// [`SigningKey::bind`](crate::packet::SigningKey::bind) treats every target
/// the same way and is parameterized only through this trait.
pub trait Bindable {
    /// The packet encoding of the target, as it appears in the output stream.
    fn packet(&self) -> Result<Vec<u8>>;

    /// The signature type of the certification.
    fn sign_type(&self) -> SignatureType;

    /// Hashed subpackets contributed by the target, placed after the creation time.
    fn subpackets(&self) -> Vec<Subpacket>;

    /// The bytes the target contributes to the signature preimage, including its
    /// type specific prefix octet and big endian length.
    fn sign_data(&self) -> Result<Vec<u8>>;
}

impl<T: Bindable> Bindable for &T {
    fn packet(&self) -> Result<Vec<u8>> {
        (*self).packet()
    }

    fn sign_type(&self) -> SignatureType {
        (*self).sign_type()
    }

    fn subpackets(&self) -> Vec<Subpacket> {
        (*self).subpackets()
    }

    fn sign_data(&self) -> Result<Vec<u8>> {
        (*self).sign_data()
    }
}
