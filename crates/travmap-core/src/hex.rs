//! Sector-local hex labels (`XXYY`).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CodecError, ValueKind};

/// A 1-based hex label within a sector, written `XXYY`.
///
/// Files name hexes this way: `0101` is the top-left hex of a sector and
/// `3240` the bottom-right. `0000` is used as "no hex" and values outside
/// the sector can appear in route and border data that reaches into a
/// neighbouring sector, so the type itself does not enforce bounds.
///
/// # Examples
///
/// ```
/// use travmap_core::Hex;
///
/// let h: Hex = "1910".parse().unwrap();
/// assert_eq!((h.x, h.y), (19, 10));
/// assert_eq!(h.to_string(), "1910");
/// assert!(h.is_valid());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[derive(Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Hex {
    /// Column, 1..=32 inside a sector.
    pub x: u8,
    /// Row, 1..=40 inside a sector.
    pub y: u8,
}

impl Hex {
    /// The "no hex" label, `0000`.
    pub const EMPTY: Hex = Hex { x: 0, y: 0 };

    /// Create a label.
    pub const fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }

    /// Whether this label names a hex inside a sector.
    pub fn is_valid(self) -> bool {
        (1..=32).contains(&self.x) && (1..=40).contains(&self.y)
    }

    /// Whether this is `0000`.
    pub fn is_empty(self) -> bool {
        self == Self::EMPTY
    }

    /// Integer form, `x * 100 + y`.
    pub fn to_int(self) -> u16 {
        u16::from(self.x) * 100 + u16::from(self.y)
    }

    /// Label relative to the hex's own subsector (`0101`..`0810`).
    pub fn to_subsector_string(self) -> String {
        let x = (i32::from(self.x) - 1).rem_euclid(8) + 1;
        let y = (i32::from(self.y) - 1).rem_euclid(10) + 1;
        format!("{x:02}{y:02}")
    }
}

impl FromStr for Hex {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        if bytes.len() != 4 || !bytes.iter().all(u8::is_ascii_digit) {
            return Err(CodecError::format(ValueKind::Hex, s));
        }
        let x = (bytes[0] - b'0') * 10 + (bytes[1] - b'0');
        let y = (bytes[2] - b'0') * 10 + (bytes[3] - b'0');
        Ok(Hex::new(x, y))
    }
}

impl fmt::Display for Hex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}{:02}", self.x, self.y)
    }
}

impl TryFrom<String> for Hex {
    type Error = CodecError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Hex> for String {
    fn from(h: Hex) -> String {
        h.to_string()
    }
}
