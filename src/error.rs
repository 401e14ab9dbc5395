//! Contains the Error and Result type used throughout the crate.
use std::fmt::Display;

/// Various errors that can occur while decoding, encoding, parsing or
/// stringifying NBT.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    msg: String,
    kind: ErrorKind,
}

/// The category of an [`Error`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// A binary read would go past the end of the buffer.
    OutOfBounds,

    /// A binary type code outside of 0 to 12 was found, or an End tag was found
    /// where a value was required.
    UnsupportedTagType(u8),

    /// A list contained elements of more than one tag type.
    HeterogeneousList,

    /// The SNBT input ran out part way through a token or container.
    UnexpectedEof,

    /// The SNBT input contained a character that is not valid at the given
    /// byte position.
    UnexpectedCharacter(usize),

    /// A string or name in binary NBT was not valid UTF-8.
    InvalidString,

    /// A string was longer than the 65535 bytes NBT can represent.
    StringTooLong(usize),

    /// An array or list was longer than NBT can represent.
    LengthTooLarge(usize),

    /// An element of an SNBT typed array did not fit the array's type.
    InvalidNumber,

    /// Any other errors, such as custom serde messages. Users should not match
    /// on this variant and should instead use a wildcard `_`.
    Other,
}

/// Convenience type for Result.
pub type Result<T> = std::result::Result<T, Error>;

impl std::error::Error for Error {}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.msg)
    }
}

impl serde::de::Error for Error {
    fn custom<T: Display>(msg: T) -> Self {
        Error::bespoke(msg.to_string())
    }
}

impl serde::ser::Error for Error {
    fn custom<T>(msg: T) -> Self
    where
        T: Display,
    {
        Error::bespoke(msg.to_string())
    }
}

impl Error {
    /// Get the kind of error.
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub(crate) fn out_of_bounds(offset: usize, wanted: usize, len: usize) -> Error {
        Error {
            msg: format!(
                "out of bounds: read of {} bytes at offset {} exceeds buffer of {} bytes",
                wanted, offset, len
            ),
            kind: ErrorKind::OutOfBounds,
        }
    }

    pub(crate) fn unsupported_tag(tag: u8) -> Error {
        Error {
            msg: format!("unsupported tag type: {}", tag),
            kind: ErrorKind::UnsupportedTagType(tag),
        }
    }

    pub(crate) fn heterogeneous_list(expected: crate::Tag, found: crate::Tag) -> Error {
        Error {
            msg: format!(
                "heterogeneous list: expected {:?} elements, found {:?}",
                expected, found
            ),
            kind: ErrorKind::HeterogeneousList,
        }
    }

    pub(crate) fn unexpected_eof() -> Error {
        Error {
            msg: "eof: unexpectedly ran out of input".to_owned(),
            kind: ErrorKind::UnexpectedEof,
        }
    }

    pub(crate) fn unexpected_char(pos: usize, found: char) -> Error {
        Error {
            msg: format!("unexpected character {:?} at {}", found, pos),
            kind: ErrorKind::UnexpectedCharacter(pos),
        }
    }

    pub(crate) fn nonunicode_string(data: &[u8]) -> Error {
        Error {
            msg: format!(
                "invalid nbt string: nonunicode: {}",
                String::from_utf8_lossy(data)
            ),
            kind: ErrorKind::InvalidString,
        }
    }

    pub(crate) fn string_too_long(len: usize) -> Error {
        Error {
            msg: format!("string of {} bytes is too long for nbt", len),
            kind: ErrorKind::StringTooLong(len),
        }
    }

    pub(crate) fn len_too_large(len: usize) -> Error {
        Error {
            msg: format!("length {} is too large for nbt", len),
            kind: ErrorKind::LengthTooLarge(len),
        }
    }

    pub(crate) fn invalid_number(pos: usize, text: &str) -> Error {
        Error {
            msg: format!("invalid array element {:?} at {}", text, pos),
            kind: ErrorKind::InvalidNumber,
        }
    }

    pub(crate) fn bespoke(msg: String) -> Error {
        Error {
            msg,
            kind: ErrorKind::Other,
        }
    }
}
