use std::io;

use byteorder::{BigEndian, WriteBytesExt};
use bytes::{Buf, Bytes};

use crate::errors::{ensure, Result};
use crate::parsing::BufParsing;
use crate::ser::Serialize;

/// The largest value this crate ever reads: a 263 bit prefixed curve point.
const MAX_MPI_BITS: u16 = 512;

/// Represents an owned MPI value.
/// The inner value is ready to be serialized, without the need to strip leading zeros.
///
/// Ref: <https://www.rfc-editor.org/rfc/rfc9580.html#name-multiprecision-integers>
#[derive(Default, Clone, PartialEq, Eq, derive_more::Debug)]
pub struct Mpi(#[debug("{}", hex::encode(_0))] Bytes);

impl Mpi {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Parses the given buffer as an MPI.
    ///
    /// The buffer is expected to be length-prefixed.
    pub fn from_buf<B: Buf>(mut i: B) -> Result<Self> {
        let len_bits = i.read_be_u16("mpi bit length")?;
        ensure!(
            len_bits <= MAX_MPI_BITS,
            "mpi of {} bits is too large",
            len_bits
        );

        let len_bytes = (len_bits + 7) >> 3;
        let n = i.read_take(usize::from(len_bytes), "mpi value")?;
        let n_stripped = strip_leading_zeros(&n);
        let n_stripped = n.slice_ref(n_stripped);

        Ok(Mpi(n_stripped))
    }

    /// Represent the data in `raw` as an Mpi.
    /// Note that `raw` is not expected to be length-prefixed!
    ///
    /// Strips leading zeros.
    pub fn from_slice(raw: &[u8]) -> Self {
        Self(Bytes::copy_from_slice(strip_leading_zeros(raw)))
    }

    /// Restores the leading zeros stripped from a fixed size value.
    pub fn to_padded<const N: usize>(&self) -> Result<[u8; N]> {
        ensure!(
            self.0.len() <= N,
            "mpi of {} bytes does not fit into {} bytes",
            self.0.len(),
            N
        );
        let mut out = [0u8; N];
        out[N - self.0.len()..].copy_from_slice(&self.0);
        Ok(out)
    }
}

/// Returns the bit length of a given slice.
#[inline]
fn bit_size(val: &[u8]) -> usize {
    if val.is_empty() {
        0
    } else {
        (val.len() * 8) - val[0].leading_zeros() as usize
    }
}

#[inline]
fn strip_leading_zeros(bytes: &[u8]) -> &[u8] {
    bytes
        .iter()
        .position(|b| b != &0)
        .map_or(&[], |offset| &bytes[offset..])
}

impl AsRef<[u8]> for Mpi {
    fn as_ref(&self) -> &[u8] {
        self.0.as_ref()
    }
}

impl Serialize for Mpi {
    fn to_writer<W: io::Write>(&self, w: &mut W) -> Result<()> {
        let bytes = &self.0;
        let size = bit_size(bytes);
        w.write_u16::<BigEndian>(size as u16)?;
        w.write_all(bytes)?;

        Ok(())
    }

    fn write_len(&self) -> usize {
        2 + self.0.len()
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_mpi() {
        // Decode the number `511` (`0x1FF` in hex).
        assert_eq!(
            Mpi::from_buf(&mut &[0x00, 0x09, 0x01, 0xFF][..]).unwrap(),
            Mpi::from_slice(&[0x01, 0xFF][..])
        );

        // Prefixed curve points are always 263 bits long.
        let mut point = vec![0x40];
        point.extend_from_slice(&[0xAA; 32]);
        let encoded = Mpi::from_slice(&point).to_bytes().unwrap();
        assert_eq!(&encoded[..3], &[0x01, 0x07, 0x40]);
        assert_eq!(encoded.len(), 35);
    }

    #[test]
    fn test_strip_leading_zeros_with_all_zeros() {
        let buf = [0u8, 0u8, 0u8];
        let stripped: &[u8] = strip_leading_zeros(&buf[..]);
        assert!(stripped.is_empty());
        assert_eq!(Mpi::from_slice(&buf).to_bytes().unwrap(), vec![0, 0]);
    }

    #[test]
    fn test_padded() {
        let m = Mpi::from_slice(&[0, 0, 0x16, 0xd0]);
        assert_eq!(m.to_padded::<4>().unwrap(), [0, 0, 0x16, 0xd0]);
        assert!(m.to_padded::<1>().is_err());
    }

    #[test]
    fn test_truncated() {
        assert!(Mpi::from_buf(&mut &[0x00, 0x10, 0x01][..]).is_err());
        assert!(Mpi::from_buf(&mut &[0x10, 0x00][..]).is_err());
    }

    proptest! {
        #[test]
        fn mpi_write_len(v in proptest::collection::vec(any::<u8>(), 0..64)) {
            let m = Mpi::from_slice(&v);
            let buf = m.to_bytes()?;
            prop_assert_eq!(m.write_len(), buf.len());

            let back = Mpi::from_buf(&mut &buf[..])?;
            prop_assert_eq!(m, back);
        }
    }
}
