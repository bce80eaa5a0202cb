//! Universal World Profiles.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ehex::{DigitPolicy, EHex};
use crate::error::{CodecError, ValueKind};

/// Starport classification, the first character of a UWP.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[derive(Serialize, Deserialize)]
pub enum Starport {
    /// Excellent.
    A,
    /// Good.
    B,
    /// Routine.
    C,
    /// Poor.
    D,
    /// Frontier installation.
    E,
    /// No starport.
    #[default]
    X,
}

impl Starport {
    /// Parse the starport letter.
    pub fn from_char(c: char) -> Result<Self, CodecError> {
        match c {
            'A' => Ok(Self::A),
            'B' => Ok(Self::B),
            'C' => Ok(Self::C),
            'D' => Ok(Self::D),
            'E' => Ok(Self::E),
            'X' => Ok(Self::X),
            other => Err(CodecError::format(ValueKind::Starport, &other.to_string())),
        }
    }

    /// The starport letter.
    pub fn to_char(self) -> char {
        match self {
            Self::A => 'A',
            Self::B => 'B',
            Self::C => 'C',
            Self::D => 'D',
            Self::E => 'E',
            Self::X => 'X',
        }
    }
}

/// A decoded Universal World Profile, `SAHPGLT-T` style.
///
/// Text form is exactly nine characters: the starport letter, six
/// extended-hex digits (size, atmosphere, hydrographics, population,
/// government, law), a dash, and the tech level digit.
///
/// # Examples
///
/// ```
/// use travmap_core::{Starport, Uwp};
///
/// let uwp: Uwp = "A788899-C".parse().unwrap();
/// assert_eq!(uwp.starport, Starport::A);
/// assert_eq!(uwp.population.value(), 8);
/// assert_eq!(uwp.tech.value(), 12);
/// assert_eq!(uwp.to_string(), "A788899-C");
///
/// assert!("A788899C".parse::<Uwp>().is_err());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Uwp {
    /// Starport class.
    pub starport: Starport,
    /// World size.
    pub size: EHex,
    /// Atmosphere type.
    pub atmosphere: EHex,
    /// Hydrographic percentage band.
    pub hydrographics: EHex,
    /// Population exponent.
    pub population: EHex,
    /// Government type.
    pub government: EHex,
    /// Law level.
    pub law: EHex,
    /// Tech level.
    pub tech: EHex,
}

impl Uwp {
    /// Length of the text form.
    pub const LEN: usize = 9;

    /// Parse `raw`, decoding digits under `policy`.
    ///
    /// The structural shape (length, dash position) is always checked, so a
    /// lenient policy only affects characters that occupy a digit slot.
    pub fn parse_with(raw: &str, policy: DigitPolicy) -> Result<Self, CodecError> {
        let chars: Vec<char> = raw.chars().collect();
        if chars.len() != Self::LEN || chars[7] != '-' {
            return Err(CodecError::format(ValueKind::Uwp, raw));
        }
        let starport = Starport::from_char(chars[0])
            .map_err(|_| CodecError::format(ValueKind::Uwp, raw))?;
        let digit = |i: usize| EHex::from_char_with(chars[i], policy);
        Ok(Self {
            starport,
            size: digit(1)?,
            atmosphere: digit(2)?,
            hydrographics: digit(3)?,
            population: digit(4)?,
            government: digit(5)?,
            law: digit(6)?,
            tech: digit(8)?,
        })
    }

    /// Whether `raw` has the structural shape of a UWP: a starport letter,
    /// six alphanumerics, a dash, and one more alphanumeric.
    pub fn looks_like(raw: &str) -> bool {
        let b = raw.as_bytes();
        b.len() == Self::LEN
            && matches!(b[0], b'A'..=b'E' | b'X' | b'?')
            && b[1..7].iter().all(|c| c.is_ascii_alphanumeric() || *c == b'?')
            && b[7] == b'-'
            && (b[8].is_ascii_alphanumeric() || b[8] == b'?')
    }
}

impl FromStr for Uwp {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_with(s, DigitPolicy::Strict)
    }
}

impl fmt::Display for Uwp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}{}{}{}{}-{}",
            self.starport.to_char(),
            self.size,
            self.atmosphere,
            self.hydrographics,
            self.population,
            self.government,
            self.law,
            self.tech
        )
    }
}

impl TryFrom<String> for Uwp {
    type Error = CodecError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Uwp> for String {
    fn from(u: Uwp) -> String {
        u.to_string()
    }
}
