use std::io::{self, Read};

use byteorder::{BigEndian, WriteBytesExt};
use bytes::Bytes;

use crate::errors::{Error, Result};
use crate::packet::header::{self, read_tagged};
use crate::packet::{Features, KeyFlags, SignatureType, Subpacket};
use crate::ser::Serialize;
use crate::types::{Bindable, Tag};

/// Prefix octet of a user id in a certification preimage.
const USER_ID_PREIMAGE_TAG: u8 = 0xB4;

/// User ID Packet
///
/// Ref: <https://www.rfc-editor.org/rfc/rfc9580.html#name-user-id-packet-type-id-13>
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct UserId {
    id: Bytes,
    /// Advertise modification detection support in the self-signature.
    ///
    /// Only affects the certification, it is not part of the packet.
    enable_mdc: bool,
}

impl UserId {
    pub fn new(id: impl Into<Bytes>) -> Self {
        UserId {
            id: id.into(),
            enable_mdc: false,
        }
    }

    pub fn with_mdc(mut self, enable: bool) -> Self {
        self.enable_mdc = enable;
        self
    }

    /// Reads a user id packet, failing on any other packet type.
    pub fn from_reader<R: Read>(r: &mut R) -> Result<Self> {
        let id = read_tagged(r, Tag::UserId)?;
        Ok(UserId::new(id))
    }

    pub fn id(&self) -> &[u8] {
        &self.id
    }

    pub fn enable_mdc(&self) -> bool {
        self.enable_mdc
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(&self.id))
    }
}

impl Serialize for UserId {
    fn to_writer<W: io::Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_all(&self.id)?;
        Ok(())
    }

    fn write_len(&self) -> usize {
        self.id.len()
    }
}

impl Bindable for UserId {
    fn packet(&self) -> Result<Vec<u8>> {
        header::encode(Tag::UserId, &self.id)
    }

    fn sign_type(&self) -> SignatureType {
        SignatureType::CertPositive
    }

    fn subpackets(&self) -> Vec<Subpacket> {
        let mut subpackets = vec![Subpacket::KeyFlags(KeyFlags::signing())];
        if self.enable_mdc {
            subpackets.push(Subpacket::Features(Features::SEIPD_V1));
        }
        subpackets
    }

    fn sign_data(&self) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(5 + self.write_len());
        out.write_u8(USER_ID_PREIMAGE_TAG)?;
        let len = u32::try_from(self.id.len()).map_err(|_| Error::Encoding {
            len: self.id.len(),
            limit: u32::MAX as usize,
        })?;
        out.write_u32::<BigEndian>(len)?;
        self.to_writer(&mut out)?;

        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::errors::ErrorKind;

    #[test]
    fn packet_and_load() {
        let uid = UserId::new("Example User <user@example.org>");
        let packet = uid.packet().unwrap();
        assert_eq!(&packet[..2], &[0xcd, 0x1f]);

        let loaded = UserId::from_reader(&mut &packet[..]).unwrap();
        assert_eq!(loaded, uid);
        assert_eq!(loaded.to_string(), "Example User <user@example.org>");
    }

    #[test]
    fn load_rejects_other_packets() {
        let packet = header::encode(Tag::Signature, b"x").unwrap();
        let err = UserId::from_reader(&mut &packet[..]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Format);
    }

    #[test]
    fn sign_data_is_length_prefixed() {
        let uid = UserId::new("ab");
        assert_eq!(
            uid.sign_data().unwrap(),
            vec![0xb4, 0x00, 0x00, 0x00, 0x02, b'a', b'b']
        );
    }

    #[test]
    fn subpackets_follow_mdc() {
        let plain = UserId::new("a");
        assert_eq!(
            plain.subpackets(),
            vec![Subpacket::KeyFlags(KeyFlags::signing())]
        );

        let mdc = plain.with_mdc(true);
        assert_eq!(
            mdc.subpackets(),
            vec![
                Subpacket::KeyFlags(KeyFlags::signing()),
                Subpacket::Features(Features::SEIPD_V1)
            ]
        );
        assert_eq!(mdc.sign_type(), SignatureType::CertPositive);
    }

    #[test]
    fn long_ids_fail_to_encode() {
        assert!(UserId::new(vec![b'a'; 255]).packet().is_ok());

        let err = UserId::new(vec![b'a'; 256]).packet().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Encoding);
    }
}
