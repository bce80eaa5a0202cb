//! Error types for the value codecs.

use std::fmt;

/// Which value a [`CodecError::InvalidFormat`] was raised for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValueKind {
    /// A Universal World Profile (`A788899-C`).
    Uwp,
    /// A population/belts/gas-giant triplet (`703`).
    Pbg,
    /// A sector-local hex label (`0101`).
    Hex,
    /// A travel zone code (`A`, `R`, ...).
    TravelCode,
    /// A starport class letter.
    Starport,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Uwp => "UWP",
            Self::Pbg => "PBG",
            Self::Hex => "hex",
            Self::TravelCode => "travel code",
            Self::Starport => "starport",
        };
        f.write_str(name)
    }
}

/// Errors raised while decoding or encoding profile values.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CodecError {
    /// A character is not part of the extended-hex alphabet.
    InvalidDigit {
        /// The rejected character.
        digit: char,
    },
    /// A numeric value has no extended-hex representation.
    ValueOutOfRange {
        /// The rejected value.
        value: u32,
    },
    /// The input does not have the structural shape required for `kind`.
    InvalidFormat {
        /// The kind of value being parsed.
        kind: ValueKind,
        /// The raw input, as given.
        input: String,
    },
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDigit { digit } => {
                write!(f, "invalid extended-hex digit {digit:?}")
            }
            Self::ValueOutOfRange { value } => {
                write!(f, "value {value} has no extended-hex digit (max 33)")
            }
            Self::InvalidFormat { kind, input } => {
                write!(f, "invalid {kind}: {input:?}")
            }
        }
    }
}

impl std::error::Error for CodecError {}

impl CodecError {
    pub(crate) fn format(kind: ValueKind, input: &str) -> Self {
        Self::InvalidFormat {
            kind,
            input: input.to_string(),
        }
    }

    /// Whether this error is one of the two digit failures.
    pub fn is_digit_error(&self) -> bool {
        matches!(self, Self::InvalidDigit { .. } | Self::ValueOutOfRange { .. })
    }
}
