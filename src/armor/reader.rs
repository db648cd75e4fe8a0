use std::collections::BTreeMap;
use std::str;

use base64::engine::{general_purpose::STANDARD, Engine as _};
use log::debug;
use nom::{
    branch::alt,
    bytes::complete::{tag, take_until, take_until1, take_while1},
    character::complete::{line_ending, not_line_ending, space0},
    combinator::{complete, eof, map, map_res, opt, value, verify},
    multi::many0,
    sequence::{delimited, pair, terminated},
    IResult, Parser,
};

use crate::armor::{writer::checksum, BlockType};
use crate::errors::{Error, Result};

/// Armor Headers.
pub type Headers = BTreeMap<String, Vec<String>>;

/// Parses a single ascii armor header separator.
fn armor_header_sep(i: &[u8]) -> IResult<&[u8], &[u8]> {
    tag(&b"-----"[..]).parse(i)
}

/// Parses the type inside of an ascii armor header.
fn armor_header_type(i: &[u8]) -> IResult<&[u8], BlockType> {
    alt((
        value(BlockType::PublicKey, tag("PGP PUBLIC KEY BLOCK")),
        value(BlockType::PrivateKey, tag("PGP PRIVATE KEY BLOCK")),
        value(BlockType::Message, tag("PGP MESSAGE")),
        value(BlockType::Signature, tag("PGP SIGNATURE")),
    ))
    .parse(i)
}

/// Parses a single armor header line.
fn armor_header_line(i: &[u8]) -> IResult<&[u8], BlockType> {
    delimited(
        pair(armor_header_sep, tag(&b"BEGIN "[..])),
        armor_header_type,
        pair(armor_header_sep, line_ending),
    )
    .parse(i)
}

/// Parses a single key value pair, for the header.
fn key_value_pair(i: &[u8]) -> IResult<&[u8], (&str, &str)> {
    let (i, key) = map_res(
        alt((
            complete(take_until1(":\r\n")),
            complete(take_until1(":\n")),
            complete(take_until1(": ")),
        )),
        str::from_utf8,
    )
    .parse(i)?;
    // a key never spans lines
    if key.contains('\n') {
        return Err(nom::Err::Error(nom::error::Error::new(
            i,
            nom::error::ErrorKind::Verify,
        )));
    }

    // consume the ":"
    let (i, _) = tag(":").parse(i)?;
    let (i, t) = alt((tag(" "), line_ending)).parse(i)?;

    let (i, value) = if t == b" " {
        let (i, value) = map_res(not_line_ending, str::from_utf8).parse(i)?;
        let (i, _) = line_ending.parse(i)?;
        (i, value)
    } else {
        // empty value
        (i, "")
    };

    Ok((i, (key, value)))
}

/// Parses the full armor header.
fn armor_headers(i: &[u8]) -> IResult<&[u8], Headers> {
    map(many0(complete(key_value_pair)), |pairs| {
        // merge multiple values with the same name
        let mut out = Headers::new();
        for (k, v) in pairs {
            out.entry(k.to_string()).or_default().push(v.to_string());
        }
        out
    })
    .parse(i)
}

fn is_base64(c: u8) -> bool {
    c.is_ascii_alphanumeric() || c == b'+' || c == b'/' || c == b'='
}

/// A line of the base64 body. The checksum line is the first one starting with `=`.
fn body_line(i: &[u8]) -> IResult<&[u8], &[u8]> {
    terminated(
        verify(take_while1(is_base64), |line: &[u8]| line[0] != b'='),
        pair(space0, line_ending),
    )
    .parse(i)
}

fn checksum_line(i: &[u8]) -> IResult<&[u8], &[u8]> {
    delimited(
        tag(&b"="[..]),
        take_while1(is_base64),
        pair(space0, line_ending),
    )
    .parse(i)
}

/// Parses a single armor footer line
fn armor_footer_line(i: &[u8]) -> IResult<&[u8], BlockType> {
    delimited(
        pair(armor_header_sep, tag(&b"END "[..])),
        armor_header_type,
        pair(armor_header_sep, alt((line_ending, eof))),
    )
    .parse(i)
}

struct Parsed<'a> {
    typ: BlockType,
    headers: Headers,
    lines: Vec<&'a [u8]>,
    checksum: Option<&'a [u8]>,
    footer: BlockType,
}

fn armor(i: &[u8]) -> IResult<&[u8], Parsed<'_>> {
    // skip anything before the header line
    let (i, _) = take_until("-----").parse(i)?;
    let (i, typ) = armor_header_line(i)?;
    let (i, headers) = armor_headers(i)?;

    // "A blank (zero length or containing only whitespace) line"
    let (i, _) = pair(space0, line_ending).parse(i)?;

    let (i, lines) = many0(body_line).parse(i)?;
    let (i, checksum) = opt(checksum_line).parse(i)?;
    let (i, footer) = armor_footer_line(i)?;

    Ok((
        i,
        Parsed {
            typ,
            headers,
            lines,
            checksum,
            footer,
        },
    ))
}

/// Read the checksum from an base64 encoded buffer.
fn read_checksum(input: &[u8]) -> Result<u32> {
    let raw = STANDARD.decode(input)?;
    let [a, b, c] = raw[..] else {
        return Err(Error::InvalidChecksum);
    };

    Ok(u32::from_be_bytes([0, a, b, c]))
}

/// Parses one armored block, returning its type, headers and the decoded data.
///
/// Headers are accepted and returned but carry no meaning. A checksum line is
/// optional, when present it has to match.
pub fn parse(input: &[u8]) -> Result<(BlockType, Headers, Vec<u8>)> {
    let (_, parsed) = armor
        .parse(input)
        .map_err(|_| Error::InvalidArmorWrappers)?;
    if parsed.typ != parsed.footer {
        return Err(Error::InvalidArmorWrappers);
    }

    let encoded: Vec<u8> = parsed.lines.concat();
    let data = STANDARD.decode(encoded)?;
    debug!("dearmored {} bytes of {}", data.len(), parsed.typ);

    if let Some(expected) = parsed.checksum {
        if read_checksum(expected)? != checksum(&data) {
            return Err(Error::InvalidChecksum);
        }
    }

    Ok((parsed.typ, parsed.headers, data))
}
