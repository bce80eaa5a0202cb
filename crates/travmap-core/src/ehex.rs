//! Extended-hex digits.
//!
//! Profile values are written as single characters from a 34-symbol
//! alphabet: `0`-`9`, then the capital letters with `I` and `O` removed.
//! Value 33 is `Z`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CodecError;

/// The extended-hex alphabet, indexed by value.
pub const ALPHABET: &[u8; 34] = b"0123456789ABCDEFGHJKLMNPQRSTUVWXYZ";

/// Largest value representable by a single extended-hex digit.
pub const MAX_VALUE: u8 = 33;

/// How to treat a character outside the alphabet while decoding.
///
/// Published data contains the occasional typo (a stray `I`, a lowercase
/// letter, a `?` for "unknown"). `Strict` rejects those; `LenientZero`
/// reads them as 0 and carries on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DigitPolicy {
    /// Unknown characters fail with [`CodecError::InvalidDigit`].
    #[default]
    Strict,
    /// Unknown characters decode to 0.
    LenientZero,
}

/// Decode one extended-hex character.
///
/// # Examples
///
/// ```
/// use travmap_core::ehex;
///
/// assert_eq!(ehex::decode('7'), Ok(7));
/// assert_eq!(ehex::decode('J'), Ok(18));
/// assert!(ehex::decode('I').is_err());
/// ```
pub fn decode(c: char) -> Result<u8, CodecError> {
    match c {
        '0'..='9' => Ok(c as u8 - b'0'),
        'A'..='Z' if c != 'I' && c != 'O' => {
            let mut v = c as u8 - b'A' + 10;
            if c > 'I' {
                v -= 1;
            }
            if c > 'O' {
                v -= 1;
            }
            Ok(v)
        }
        _ => Err(CodecError::InvalidDigit { digit: c }),
    }
}

/// Decode one character under `policy`.
pub fn decode_with(c: char, policy: DigitPolicy) -> Result<u8, CodecError> {
    match (decode(c), policy) {
        (Ok(v), _) => Ok(v),
        (Err(_), DigitPolicy::LenientZero) => Ok(0),
        (Err(e), DigitPolicy::Strict) => Err(e),
    }
}

/// Encode a value in `0..=33` as its extended-hex character.
///
/// # Examples
///
/// ```
/// use travmap_core::ehex;
///
/// assert_eq!(ehex::encode(12), Ok('C'));
/// assert_eq!(ehex::encode(33), Ok('Z'));
/// assert!(ehex::encode(34).is_err());
/// ```
pub fn encode(value: u8) -> Result<char, CodecError> {
    ALPHABET
        .get(value as usize)
        .map(|&b| b as char)
        .ok_or(CodecError::ValueOutOfRange {
            value: u32::from(value),
        })
}

/// A single validated extended-hex digit.
///
/// Serializes as its one-character string form.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[derive(Serialize, Deserialize)]
#[serde(try_from = "char", into = "char")]
pub struct EHex(u8);

impl EHex {
    /// The zero digit.
    pub const ZERO: EHex = EHex(0);

    /// Wrap `value`, failing if it exceeds [`MAX_VALUE`].
    pub fn new(value: u8) -> Result<Self, CodecError> {
        if value > MAX_VALUE {
            return Err(CodecError::ValueOutOfRange {
                value: u32::from(value),
            });
        }
        Ok(Self(value))
    }

    /// Parse a character strictly.
    pub fn from_char(c: char) -> Result<Self, CodecError> {
        decode(c).map(Self)
    }

    /// Parse a character under `policy`.
    pub fn from_char_with(c: char, policy: DigitPolicy) -> Result<Self, CodecError> {
        decode_with(c, policy).map(Self)
    }

    /// Numeric value.
    pub fn value(self) -> u8 {
        self.0
    }

    /// Textual form.
    pub fn to_char(self) -> char {
        ALPHABET[self.0 as usize] as char
    }
}

impl fmt::Display for EHex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

impl TryFrom<char> for EHex {
    type Error = CodecError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        Self::from_char(c)
    }
}

impl TryFrom<u8> for EHex {
    type Error = CodecError;

    fn try_from(v: u8) -> Result<Self, Self::Error> {
        Self::new(v)
    }
}

impl From<EHex> for char {
    fn from(d: EHex) -> char {
        d.to_char()
    }
}

impl From<EHex> for u8 {
    fn from(d: EHex) -> u8 {
        d.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn alphabet_skips_i_and_o() {
        assert!(!ALPHABET.contains(&b'I'));
        assert!(!ALPHABET.contains(&b'O'));
        assert_eq!(ALPHABET.len(), MAX_VALUE as usize + 1);
    }

    #[test]
    fn letters_after_gaps() {
        assert_eq!(decode('H'), Ok(17));
        assert_eq!(decode('J'), Ok(18));
        assert_eq!(decode('N'), Ok(22));
        assert_eq!(decode('P'), Ok(23));
        assert_eq!(decode('Z'), Ok(33));
    }

    #[test]
    fn strict_rejects_lowercase_and_symbols() {
        for c in ['a', 'I', 'O', '?', '-', ' '] {
            assert_eq!(decode(c), Err(CodecError::InvalidDigit { digit: c }));
        }
    }

    #[test]
    fn lenient_reads_garbage_as_zero() {
        assert_eq!(decode_with('?', DigitPolicy::LenientZero), Ok(0));
        assert_eq!(decode_with('C', DigitPolicy::LenientZero), Ok(12));
        assert!(decode_with('?', DigitPolicy::Strict).is_err());
    }

    #[test]
    fn encode_out_of_range_fails() {
        assert_eq!(encode(34), Err(CodecError::ValueOutOfRange { value: 34 }));
        assert!(EHex::new(200).is_err());
    }

    #[test]
    fn serde_uses_char_form() {
        let d = EHex::new(15).unwrap();
        assert_eq!(serde_json::to_string(&d).unwrap(), "\"F\"");
        let back: EHex = serde_json::from_str("\"F\"").unwrap();
        assert_eq!(back, d);
        assert!(serde_json::from_str::<EHex>("\"O\"").is_err());
    }

    proptest! {
        #[test]
        fn value_round_trip(v in 0u8..=MAX_VALUE) {
            prop_assert_eq!(decode(encode(v).unwrap()).unwrap(), v);
        }

        #[test]
        fn char_round_trip(i in 0usize..ALPHABET.len()) {
            let c = ALPHABET[i] as char;
            prop_assert_eq!(encode(decode(c).unwrap()).unwrap(), c);
        }
    }
}
