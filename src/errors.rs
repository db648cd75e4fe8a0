use snafu::{Backtrace, Snafu};

pub use crate::parsing::{Error as ParsingError, RemainingError};

pub type Result<T, E = Error> = ::std::result::Result<T, E>;

/// Error types
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
#[non_exhaustive]
pub enum Error {
    /// Reading the passphrase or another input failed, or the input was rejected.
    #[snafu(display("{message}"))]
    Input { message: String },
    /// A decoded packet has the wrong tag, is truncated or is otherwise malformed.
    #[snafu(display("{message}"))]
    Format { message: String },
    /// The body does not fit into a single octet length.
    #[snafu(display("packet body of {len} bytes exceeds the {limit} byte length limit"))]
    Encoding { len: usize, limit: usize },
    /// A cryptographic primitive was misconfigured.
    #[snafu(display("{message}"))]
    Crypto { message: String },
    #[snafu(display("invalid armor wrappers"))]
    InvalidArmorWrappers,
    #[snafu(display("invalid crc24 checksum"))]
    InvalidChecksum,
    #[snafu(display("SHA1 hash collision detected"))]
    Sha1HashCollision,
    #[snafu(transparent)]
    Base64Decode { source: base64::DecodeError },
    #[snafu(transparent)]
    IO {
        source: std::io::Error,
        backtrace: Backtrace,
    },
    #[snafu(transparent)]
    Utf8Error { source: std::str::Utf8Error },
    #[snafu(transparent)]
    PacketParsing { source: ParsingError },
    #[snafu(transparent)]
    Argon2 { source: argon2::Error },
}

/// The four failure classes every [`Error`] falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum ErrorKind {
    #[display("input error")]
    Input,
    #[display("format error")]
    Format,
    #[display("encoding error")]
    Encoding,
    #[display("crypto error")]
    Crypto,
}

impl Error {
    /// Classifies this error.
    ///
    /// An I/O error that ran out of data counts as a truncated packet, all
    /// other I/O errors are input errors.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Input { .. } => ErrorKind::Input,
            Self::Format { .. }
            | Self::InvalidArmorWrappers
            | Self::InvalidChecksum
            | Self::Base64Decode { .. }
            | Self::Utf8Error { .. }
            | Self::PacketParsing { .. } => ErrorKind::Format,
            Self::Encoding { .. } => ErrorKind::Encoding,
            Self::Crypto { .. } | Self::Sha1HashCollision | Self::Argon2 { .. } => {
                ErrorKind::Crypto
            }
            Self::IO { source, .. } => {
                if source.kind() == std::io::ErrorKind::UnexpectedEof {
                    ErrorKind::Format
                } else {
                    ErrorKind::Input
                }
            }
        }
    }
}

macro_rules! bail {
    ($e:expr) => {
        return Err($crate::errors::Error::Format { message: $e.to_string() })
    };
    ($fmt:expr, $($arg:tt)+) => {
        return Err($crate::errors::Error::Format { message: format!($fmt, $($arg)+) })
    };
}
pub(crate) use bail;

macro_rules! format_err {
    ($e:expr) => {
        $crate::errors::Error::Format { message: $e.to_string() }
    };
    ($fmt:expr, $($arg:tt)+) => {
        $crate::errors::Error::Format { message: format!($fmt, $($arg)+) }
    };
}
pub(crate) use format_err;

macro_rules! ensure {
    ($cond:expr, $e:expr) => {
        if !($cond) {
            $crate::errors::bail!($e);
        }
    };
    ($cond:expr, $fmt:expr, $($arg:tt)+) => {
        if !($cond) {
            $crate::errors::bail!($fmt, $($arg)+);
        }
    };
}
pub(crate) use ensure;

macro_rules! ensure_eq {
    ($left:expr, $right:expr, $($arg:tt)+) => {
        match (&($left), &($right)) {
            (left_val, right_val) => {
                if !(*left_val == *right_val) {
                    $crate::errors::bail!(
                        "{}: expected {:?}, found {:?}",
                        format_args!($($arg)+),
                        right_val,
                        left_val
                    );
                }
            }
        }
    };
}
pub(crate) use ensure_eq;

#[cfg(test)]
mod tests {
    use super::*;

    fn check(len: usize) -> Result<()> {
        ensure!(len < 4, "too long: {}", len);
        Ok(())
    }

    #[test]
    fn macros_produce_format_errors() {
        assert!(check(1).is_ok());
        let err = check(5).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Format);
        assert_eq!(err.to_string(), "too long: 5");
    }

    #[test]
    fn io_kinds() {
        let eof: Error = std::io::Error::from(std::io::ErrorKind::UnexpectedEof).into();
        assert_eq!(eof.kind(), ErrorKind::Format);

        let denied: Error = std::io::Error::from(std::io::ErrorKind::PermissionDenied).into();
        assert_eq!(denied.kind(), ErrorKind::Input);
    }

    #[test]
    fn encoding_display() {
        let err = Error::Encoding { len: 256, limit: 255 };
        assert_eq!(err.kind(), ErrorKind::Encoding);
        assert_eq!(
            err.to_string(),
            "packet body of 256 bytes exceeds the 255 byte length limit"
        );
    }
}
