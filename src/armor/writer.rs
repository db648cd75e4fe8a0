use std::hash::Hasher;
use std::io::Write;

use base64::engine::{general_purpose, Engine as _};
use crc24::Crc24Hasher;

use crate::armor::BlockType;
use crate::errors::Result;

/// Base64 characters per armored line.
const LINE_LEN: usize = 64;

/// Writes `data` armored as `typ`.
///
/// No armor headers are written, lines end in `\n`.
pub fn write(data: &[u8], typ: BlockType, writer: &mut impl Write) -> Result<()> {
    // write armor header
    writeln!(writer, "-----BEGIN {typ}-----")?;
    writer.write_all(&b"\n"[..])?;

    // write body
    let encoded = general_purpose::STANDARD.encode(data);
    for line in encoded.as_bytes().chunks(LINE_LEN) {
        writer.write_all(line)?;
        writer.write_all(&b"\n"[..])?;
    }

    // write crc
    writer.write_all(b"=")?;
    let crc = checksum(data);
    let crc_buf = [(crc >> 16) as u8, (crc >> 8) as u8, crc as u8];
    writer.write_all(general_purpose::STANDARD.encode(crc_buf).as_bytes())?;
    writer.write_all(&b"\n"[..])?;

    // write footer
    writeln!(writer, "-----END {typ}-----")?;

    Ok(())
}

/// Armors a packet stream, picking the block type from its first packet.
pub fn to_armored_string(data: &[u8]) -> Result<String> {
    let typ = BlockType::from_packet_stream(data)?;
    let mut out = Vec::new();
    write(data, typ, &mut out)?;

    Ok(String::from_utf8(out).map_err(|e| e.utf8_error())?)
}

/// CRC-24 with the OpenPGP polynomial and initial value.
pub(crate) fn checksum(data: &[u8]) -> u32 {
    let mut hasher = Crc24Hasher::new();
    hasher.write(data);
    hasher.finish() as u32
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn crc24_check_value() {
        assert_eq!(checksum(b"123456789"), 0x21cf02);
        assert_eq!(checksum(b""), 0xb704ce);
    }

    #[test]
    fn wraps_lines() {
        let data = [0xc2u8; 100];
        let armored = to_armored_string(&data).unwrap();
        let lines: Vec<&str> = armored.lines().collect();

        assert_eq!(lines[0], "-----BEGIN PGP SIGNATURE-----");
        assert_eq!(lines[1], "");
        assert_eq!(lines[2].len(), 64);
        assert_eq!(lines[3].len(), 64);
        assert_eq!(lines[4].len(), 136 - 2 * 64);
        assert!(lines[5].starts_with('='));
        assert_eq!(lines[5].len(), 5);
        assert_eq!(lines[6], "-----END PGP SIGNATURE-----");
        assert_eq!(lines.len(), 7);
        assert!(armored.ends_with("-----\n"));
    }
}
