use byteorder::{BigEndian, ByteOrder};

use crate::errors::{ensure_eq, Result};

/// Two octet checksum: sum of all octets mod 65536.
#[inline]
pub fn calculate_simple(data: &[u8]) -> u16 {
    data.iter().map(|v| u32::from(*v)).sum::<u32>() as u16
}

/// Verifies a big endian two octet checksum against `data`.
#[inline]
pub fn simple(actual: [u8; 2], data: &[u8]) -> Result<()> {
    ensure_eq!(
        BigEndian::read_u16(&actual),
        calculate_simple(data),
        "invalid simple checksum"
    );

    Ok(())
}
