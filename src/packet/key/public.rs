use std::io;

use byteorder::{BigEndian, WriteBytesExt};
use bytes::Buf;

use crate::crypto::ecc_curve::ECCCurve;
use crate::crypto::public_key::PublicKeyAlgorithm;
use crate::errors::{ensure, ensure_eq, Result};
use crate::parsing::BufParsing;
use crate::ser::Serialize;
use crate::types::{Fingerprint, Mpi, Timestamp};

/// Only v4 keys are produced.
const KEY_VERSION: u8 = 4;

/// Native point encoding prefix for Curve25519 and Ed25519 points.
const NATIVE_POINT_PREFIX: u8 = 0x40;

/// ECDH KDF parameters of X25519 keys: reserved length and version octets,
/// then SHA-256 and AES-128.
const ECDH_KDF_PARAMS: [u8; 4] = [0x03, 0x01, 0x08, 0x07];

/// Prefix octet of a public key in fingerprint and binding preimages.
const PUBLIC_KEY_PREIMAGE_TAG: u8 = 0x99;

/// The v4 public key packet body of a 25519 key.
///
/// Shared by primary keys and subkeys, the packet tag is the only difference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PubKeyInner {
    created: Timestamp,
    curve: ECCCurve,
    point: [u8; 32],
}

impl PubKeyInner {
    pub(crate) fn new(created: Timestamp, curve: ECCCurve, point: [u8; 32]) -> Self {
        PubKeyInner {
            created,
            curve,
            point,
        }
    }

    /// Parses the public part of a key packet body, leaving the rest of `i` untouched.
    pub(crate) fn from_buf<B: Buf>(mut i: B, curve: ECCCurve) -> Result<Self> {
        let version = i.read_u8("key version")?;
        ensure_eq!(version, KEY_VERSION, "unsupported key version");

        let created = Timestamp::from_secs(i.read_be_u32("key creation time")?);

        let algorithm = PublicKeyAlgorithm::from(i.read_u8("public key algorithm")?);
        ensure_eq!(
            algorithm,
            curve.public_key_algorithm(),
            "unexpected public key algorithm"
        );

        let oid_len = i.read_u8("curve oid length")?;
        ensure_eq!(usize::from(oid_len), curve.oid().len(), "unexpected curve oid length");
        i.read_tag(curve.oid(), "curve oid")?;

        let mpi = Mpi::from_buf(&mut i)?;
        let raw = mpi.as_ref();
        ensure!(
            raw.len() == 33 && raw[0] == NATIVE_POINT_PREFIX,
            "invalid {} point encoding",
            curve.name()
        );
        let mut point = [0u8; 32];
        point.copy_from_slice(&raw[1..]);

        if curve == ECCCurve::Curve25519 {
            i.read_tag(&ECDH_KDF_PARAMS, "ecdh kdf parameters")?;
        }

        Ok(PubKeyInner {
            created,
            curve,
            point,
        })
    }

    pub(crate) fn created(&self) -> Timestamp {
        self.created
    }

    pub(crate) fn point(&self) -> &[u8; 32] {
        &self.point
    }

    fn point_mpi(&self) -> Mpi {
        let mut prefixed = [0u8; 33];
        prefixed[0] = NATIVE_POINT_PREFIX;
        prefixed[1..].copy_from_slice(&self.point);
        Mpi::from_slice(&prefixed)
    }

    /// Writes the body prefixed with `0x99` and its two octet length, as hashed
    /// for fingerprints and key bindings.
    pub(crate) fn to_writer_old<W: io::Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_u8(PUBLIC_KEY_PREIMAGE_TAG)?;
        writer.write_u16::<BigEndian>(self.write_len() as u16)?;
        self.to_writer(writer)
    }

    pub(crate) fn preimage(&self) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(3 + self.write_len());
        self.to_writer_old(&mut out)?;
        Ok(out)
    }

    pub(crate) fn fingerprint(&self) -> Result<Fingerprint> {
        Fingerprint::from_preimage(&self.preimage()?)
    }
}

impl Serialize for PubKeyInner {
    fn to_writer<W: io::Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_u8(KEY_VERSION)?;
        self.created.to_writer(writer)?;
        writer.write_u8(self.curve.public_key_algorithm().into())?;

        let oid = self.curve.oid();
        writer.write_u8(oid.len() as u8)?;
        writer.write_all(oid)?;
        self.point_mpi().to_writer(writer)?;

        if self.curve == ECCCurve::Curve25519 {
            writer.write_all(&ECDH_KDF_PARAMS)?;
        }

        Ok(())
    }

    fn write_len(&self) -> usize {
        let mut sum = 1 + self.created.write_len() + 1;
        sum += 1 + self.curve.oid().len();
        sum += self.point_mpi().write_len();
        if self.curve == ECCCurve::Curve25519 {
            sum += ECDH_KDF_PARAMS.len();
        }
        sum
    }
}

#[cfg(test)]
mod tests {
    use hex_literal::hex;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::errors::ErrorKind;

    const POINT: [u8; 32] =
        hex!("dd99def429b6b2241052747b6faffc5b79142bdcba99d31054cf3bb6b89fd2bd");

    #[test]
    fn ed25519_body() {
        let key = PubKeyInner::new(Timestamp::from_secs(0), ECCCurve::Ed25519, POINT);
        let body = key.to_bytes().unwrap();
        assert_eq!(body.len(), 51);
        assert_eq!(key.write_len(), 51);
        assert_eq!(
            &body[..18],
            &hex!("040000000016092b06010401da470f010107")[..]
        );

        let preimage = key.preimage().unwrap();
        assert_eq!(&preimage[..3], &[0x99, 0x00, 0x33]);

        let parsed = PubKeyInner::from_buf(&body[..], ECCCurve::Ed25519).unwrap();
        assert_eq!(parsed, key);
    }

    #[test]
    fn curve25519_body() {
        let key = PubKeyInner::new(Timestamp::from_secs(0), ECCCurve::Curve25519, POINT);
        let body = key.to_bytes().unwrap();
        assert_eq!(body.len(), 56);
        assert_eq!(&body[52..], &ECDH_KDF_PARAMS);

        let mut buf = &body[..];
        let parsed = PubKeyInner::from_buf(&mut buf, ECCCurve::Curve25519).unwrap();
        assert_eq!(parsed, key);
        assert!(buf.is_empty());
    }

    #[test]
    fn wrong_curve() {
        let key = PubKeyInner::new(Timestamp::from_secs(0), ECCCurve::Ed25519, POINT);
        let body = key.to_bytes().unwrap();
        let err = PubKeyInner::from_buf(&body[..], ECCCurve::Curve25519).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Format);
    }
}
