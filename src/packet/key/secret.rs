use std::io;

use byteorder::{BigEndian, WriteBytesExt};
use bytes::Buf;
use log::warn;
use zeroize::Zeroizing;

use crate::crypto::{checksum, ecc_curve::ECCCurve};
use crate::errors::{ensure, ensure_eq, Result};
use crate::parsing::BufParsing;
use crate::ser::Serialize;
use crate::types::Mpi;

use super::public::PubKeyInner;

/// S2K usage octet of a secret key stored in the clear.
const S2K_USAGE_UNPROTECTED: u8 = 0;

/// Writes an unprotected secret key packet body: the public body, the S2K usage
/// octet, the secret MPI and the two octet checksum over the MPI.
pub(crate) fn write_plain<W: io::Write>(
    public: &PubKeyInner,
    secret: &Mpi,
    writer: &mut W,
) -> Result<()> {
    warn!("emitting an unprotected secret key");

    public.to_writer(writer)?;
    writer.write_u8(S2K_USAGE_UNPROTECTED)?;

    let raw = Zeroizing::new(secret.to_bytes()?);
    writer.write_all(&raw)?;
    writer.write_u16::<BigEndian>(checksum::calculate_simple(&raw))?;

    Ok(())
}

pub(crate) fn plain_len(public: &PubKeyInner, secret: &Mpi) -> usize {
    public.write_len() + 1 + secret.write_len() + 2
}

/// Parses a body written by [`write_plain`], verifying the checksum.
pub(crate) fn parse_plain<B: Buf>(mut i: B, curve: ECCCurve) -> Result<(PubKeyInner, Mpi)> {
    let public = PubKeyInner::from_buf(&mut i, curve)?;

    let usage = i.read_u8("s2k usage")?;
    ensure_eq!(
        usage,
        S2K_USAGE_UNPROTECTED,
        "protected secret keys are not supported"
    );

    let secret = Mpi::from_buf(&mut i)?;
    let sum = i.read_array::<2>("secret key checksum")?;
    checksum::simple(sum, &Zeroizing::new(secret.to_bytes()?))?;
    ensure!(!i.has_remaining(), "trailing data after secret key");

    Ok((public, secret))
}
