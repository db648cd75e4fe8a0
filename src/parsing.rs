//! Parsing functions to parse data using [Buf].

use bytes::{Buf, Bytes};
use snafu::{Backtrace, Snafu};

/// Parsing errors
#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("{}: reading {:?}", context, typ))]
    TooShort {
        typ: Typ,
        context: &'static str,
        #[snafu(backtrace)]
        source: RemainingError,
    },
    #[snafu(display("{}: expected {}, found {}", context, hex::encode(expected), hex::encode(found)))]
    TagMismatch {
        expected: Vec<u8>,
        found: Bytes,
        context: &'static str,
        backtrace: Option<Backtrace>,
    },
}

#[derive(Debug, Snafu)]
#[snafu(display("needed {}, remaining {}", needed, remaining))]
pub struct RemainingError {
    pub needed: usize,
    pub remaining: usize,
    backtrace: Option<Backtrace>,
}

#[derive(Debug)]
pub enum Typ {
    U8,
    U16Be,
    U32Be,
    Array(usize),
    Take(usize),
    Tag(Vec<u8>),
}

/// Length checked reads on top of [`Buf`], which panics on short input.
pub trait BufParsing: Buf + Sized {
    fn read_u8(&mut self, context: &'static str) -> Result<u8, Error> {
        self.ensure(Typ::U8, 1, context)?;
        Ok(self.get_u8())
    }

    fn read_be_u16(&mut self, context: &'static str) -> Result<u16, Error> {
        self.ensure(Typ::U16Be, 2, context)?;
        Ok(self.get_u16())
    }

    fn read_be_u32(&mut self, context: &'static str) -> Result<u32, Error> {
        self.ensure(Typ::U32Be, 4, context)?;
        Ok(self.get_u32())
    }

    fn read_array<const C: usize>(&mut self, context: &'static str) -> Result<[u8; C], Error> {
        self.ensure(Typ::Array(C), C, context)?;
        let mut arr = [0u8; C];
        self.copy_to_slice(&mut arr);
        Ok(arr)
    }

    fn read_take(&mut self, size: usize, context: &'static str) -> Result<Bytes, Error> {
        self.ensure(Typ::Take(size), size, context)?;
        Ok(self.copy_to_bytes(size))
    }

    /// Consumes `tag` or fails without consuming anything useful.
    fn read_tag(&mut self, tag: &[u8], context: &'static str) -> Result<(), Error> {
        let found = self
            .read_take(tag.len(), context)
            .map_err(|err| match err {
                Error::TooShort { source, .. } => Error::TooShort {
                    typ: Typ::Tag(tag.to_vec()),
                    context,
                    source,
                },
                other => other,
            })?;
        if found != tag {
            return Err(Error::TagMismatch {
                expected: tag.to_vec(),
                found,
                context,
                backtrace: snafu::GenerateImplicitData::generate(),
            });
        }
        Ok(())
    }

    fn rest(&mut self) -> Bytes {
        let len = self.remaining();
        self.copy_to_bytes(len)
    }

    fn ensure(&self, typ: Typ, size: usize, context: &'static str) -> Result<(), Error> {
        self.ensure_remaining(size)
            .map_err(|source| Error::TooShort {
                typ,
                context,
                source,
            })
    }

    fn ensure_remaining(&self, size: usize) -> Result<(), RemainingError> {
        if self.remaining() < size {
            return Err(RemainingError {
                needed: size,
                remaining: self.remaining(),
                backtrace: snafu::GenerateImplicitData::generate(),
            });
        }

        Ok(())
    }
}

impl<B: Buf> BufParsing for B {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_reads_fail() {
        let mut buf = &[1u8, 2, 3][..];
        assert_eq!(buf.read_be_u16("first").unwrap(), 0x0102);
        let err = buf.read_be_u32("second").unwrap_err();
        assert!(matches!(err, Error::TooShort { typ: Typ::U32Be, .. }));
        assert_eq!(buf.read_u8("third").unwrap(), 3);
    }

    #[test]
    fn tags() {
        let mut buf = &[0x2b, 0x06, 0x01][..];
        buf.read_tag(&[0x2b, 0x06], "oid").unwrap();
        assert_eq!(buf.rest().as_ref(), &[0x01]);

        let mut buf = &[0x2b, 0x07][..];
        let err = buf.read_tag(&[0x2b, 0x06], "oid").unwrap_err();
        assert!(matches!(err, Error::TagMismatch { .. }));
    }
}
