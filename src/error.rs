//! Error types for the ARI codecs.
//!
//! Each codec family has its own focused error enum; the text encoder wraps
//! the ones it can surface in [`EncodeError`]. The variants group into four
//! abstract kinds:
//!
//! - MALFORMED: the per-codec syntactic variants (bad digit, odd length,
//!   missing designator, dangling escape).
//! - SURPLUS: the `TrailingInput` variants.
//! - OVERFLOW: `SubsecondsTooLong`, `Overflow`, `OutOfRange`.
//! - UNSUPPORTED: [`FloatFormError`] and [`TypeNameError`].

use std::fmt;

/// Errors from percent decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PercentError {
    /// A `%` escape with fewer than two bytes remaining.
    TruncatedEscape {
        /// Byte offset of the `%`.
        position: usize,
    },
    /// A `%` escape with a non-hex digit.
    InvalidHexDigit {
        /// The offending byte.
        byte: u8,
        /// Byte offset of the offending byte.
        position: usize,
    },
}

impl fmt::Display for PercentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TruncatedEscape { position } => {
                write!(f, "truncated percent escape at offset {position}")
            }
            Self::InvalidHexDigit { byte, position } => {
                write!(
                    f,
                    "invalid hex digit 0x{byte:02X} in percent escape at offset {position}"
                )
            }
        }
    }
}

impl std::error::Error for PercentError {}

/// Errors from slash unescaping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EscapeError {
    /// A backslash with no trailing character.
    DanglingBackslash {
        /// Byte offset of the backslash.
        position: usize,
    },
    /// A `\u` escape with fewer than four hex digits, or a non-hex digit.
    InvalidUnicodeEscape {
        /// Byte offset of the `u`.
        position: usize,
    },
    /// A high surrogate not followed by `\u` and a valid low surrogate.
    UnpairedSurrogate {
        /// Byte offset of the first `\u` escape.
        position: usize,
    },
}

impl fmt::Display for EscapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DanglingBackslash { position } => {
                write!(f, "dangling backslash at offset {position}")
            }
            Self::InvalidUnicodeEscape { position } => {
                write!(f, "invalid \\u escape at offset {position}")
            }
            Self::UnpairedSurrogate { position } => {
                write!(f, "unpaired UTF-16 surrogate at offset {position}")
            }
        }
    }
}

impl std::error::Error for EscapeError {}

/// Errors from base16 decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Base16Error {
    /// Input length is not a multiple of two.
    OddLength {
        /// Actual input length.
        len: usize,
    },
    /// A byte outside `[0-9A-Fa-f]`.
    InvalidByte {
        /// The offending byte.
        byte: u8,
        /// Byte offset of the offending byte.
        position: usize,
    },
}

impl fmt::Display for Base16Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OddLength { len } => {
                write!(f, "base16 input length {len} is not a multiple of two")
            }
            Self::InvalidByte { byte, position } => {
                write!(f, "invalid base16 byte 0x{byte:02X} at offset {position}")
            }
        }
    }
}

impl std::error::Error for Base16Error {}

/// Errors from base64 decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Base64Error {
    /// A byte outside both RFC 4648 alphabets.
    InvalidByte {
        /// The offending byte.
        byte: u8,
        /// Byte offset of the offending byte.
        position: usize,
    },
    /// Bytes remain after a padding run or an undecodable tail.
    TrailingInput {
        /// Number of surplus bytes.
        remaining: usize,
    },
}

impl fmt::Display for Base64Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidByte { byte, position } => {
                write!(f, "invalid base64 byte 0x{byte:02X} at offset {position}")
            }
            Self::TrailingInput { remaining } => {
                write!(f, "{remaining} surplus bytes after base64 data")
            }
        }
    }
}

impl std::error::Error for Base64Error {}

/// Errors from unsigned-integer decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NumericError {
    /// The input is empty.
    Empty,
    /// A digit invalid for the detected radix.
    InvalidDigit {
        /// The offending byte.
        byte: u8,
        /// Byte offset of the offending byte.
        position: usize,
    },
    /// The value does not fit in 64 bits.
    Overflow,
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "empty integer text"),
            Self::InvalidDigit { byte, position } => {
                write!(f, "invalid digit 0x{byte:02X} at offset {position}")
            }
            Self::Overflow => write!(f, "integer value does not fit in 64 bits"),
        }
    }
}

impl std::error::Error for NumericError {}

/// An unsupported float form letter.
///
/// The supported letters are `f`, `g`, `e`, and `a`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FloatFormError {
    /// The unrecognized letter.
    pub form: char,
}

impl fmt::Display for FloatFormError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unsupported float form letter '{}'", self.form)
    }
}

impl std::error::Error for FloatFormError {}

/// Errors from the time codecs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimeError {
    /// A numeric segment with no digits.
    MissingDigits {
        /// Byte offset where digits were expected.
        position: usize,
    },
    /// More than nine subsecond digits.
    SubsecondsTooLong {
        /// Actual digit count.
        digits: usize,
    },
    /// A required designator character is absent.
    MissingDesignator {
        /// The expected character (`P`, `T`, or `Z`).
        expected: char,
    },
    /// The date or time fields do not form a valid calendar instant.
    InvalidCalendar,
    /// Bytes remain after a complete value.
    TrailingInput {
        /// Number of surplus bytes.
        remaining: usize,
    },
    /// The value is outside the representable range.
    OutOfRange,
}

impl fmt::Display for TimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingDigits { position } => {
                write!(f, "expected digits at offset {position}")
            }
            Self::SubsecondsTooLong { digits } => {
                write!(f, "{digits} subsecond digits exceed nanosecond precision")
            }
            Self::MissingDesignator { expected } => {
                write!(f, "missing '{expected}' designator")
            }
            Self::InvalidCalendar => write!(f, "invalid calendar date or time"),
            Self::TrailingInput { remaining } => {
                write!(f, "{remaining} surplus bytes after time value")
            }
            Self::OutOfRange => write!(f, "time value out of representable range"),
        }
    }
}

impl std::error::Error for TimeError {}

/// An ARI type name not present in the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeNameError {
    /// The unrecognized name.
    pub name: String,
}

impl fmt::Display for TypeNameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown ARI type name '{}'", self.name)
    }
}

impl std::error::Error for TypeNameError {}

/// Errors from the text encoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    /// A time sub-codec failed.
    Time(TimeError),
    /// A literal whose type tag does not match its carried value, such as a
    /// TP tag without a timespec or an AC tag without an array.
    InvalidLiteral {
        /// The literal's type tag, if any.
        ari_type: Option<crate::ari_type::AriType>,
    },
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Time(e) => write!(f, "time encoding failed: {e}"),
            Self::InvalidLiteral { ari_type } => match ari_type {
                Some(t) => write!(f, "literal value does not match its {t} type tag"),
                None => write!(f, "literal value requires a container type tag"),
            },
        }
    }
}

impl std::error::Error for EncodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Time(e) => Some(e),
            Self::InvalidLiteral { .. } => None,
        }
    }
}

impl From<TimeError> for EncodeError {
    fn from(e: TimeError) -> Self {
        Self::Time(e)
    }
}
