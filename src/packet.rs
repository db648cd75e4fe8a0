//! # Packet module
//!
//! The packets of a derived key: keys, user id and signatures, and their framing.

mod header;
mod key;
mod signature;
mod user_id;

pub use self::{
    header::{decode, encode, read_packet, read_tagged, PacketHeader, MAX_BODY_LEN},
    key::{EncryptionSubkey, SigningKey},
    signature::{
        Features, KeyFlags, Signature, SignatureConfig, SignatureType, Subpacket, SubpacketType,
        SIGNATURE_VERSION,
    },
    user_id::UserId,
};
