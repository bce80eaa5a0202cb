//! Worlds and their per-system attributes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ehex::{DigitPolicy, EHex};
use crate::error::{CodecError, ValueKind};
use crate::hex::Hex;
use crate::position::Position;
use crate::uwp::Uwp;

/// Travel advisory zone.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TravelCode {
    /// No advisory.
    #[default]
    Green,
    /// Amber zone, `A`.
    Amber,
    /// Red zone, `R`.
    Red,
    /// Balkanized or restricted, `B`.
    Blue,
    /// Forbidden, `F`.
    Forbidden,
    /// Unabsorbed, `U`.
    Unabsorbed,
}

impl TravelCode {
    /// One-letter code used in world files. Green is written as empty.
    pub fn code(self) -> &'static str {
        match self {
            Self::Green => "",
            Self::Amber => "A",
            Self::Red => "R",
            Self::Blue => "B",
            Self::Forbidden => "F",
            Self::Unabsorbed => "U",
        }
    }
}

impl FromStr for TravelCode {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" | "-" | "G" => Ok(Self::Green),
            "A" => Ok(Self::Amber),
            "R" => Ok(Self::Red),
            "B" => Ok(Self::Blue),
            "F" => Ok(Self::Forbidden),
            "U" => Ok(Self::Unabsorbed),
            _ => Err(CodecError::format(ValueKind::TravelCode, s)),
        }
    }
}

impl fmt::Display for TravelCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Population multiplier, planetoid belts, and gas giants.
///
/// ```
/// use travmap_core::Pbg;
///
/// let pbg: Pbg = "503".parse().unwrap();
/// assert_eq!(pbg.gas_giants.value(), 3);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Pbg {
    /// Population multiplier.
    pub population_multiplier: EHex,
    /// Number of planetoid belts.
    pub belts: EHex,
    /// Number of gas giants.
    pub gas_giants: EHex,
}

impl Pbg {
    /// Parse three digits under `policy`.
    pub fn parse_with(raw: &str, policy: DigitPolicy) -> Result<Self, CodecError> {
        let chars: Vec<char> = raw.chars().collect();
        if chars.len() != 3 {
            return Err(CodecError::format(ValueKind::Pbg, raw));
        }
        Ok(Self {
            population_multiplier: EHex::from_char_with(chars[0], policy)?,
            belts: EHex::from_char_with(chars[1], policy)?,
            gas_giants: EHex::from_char_with(chars[2], policy)?,
        })
    }
}

impl FromStr for Pbg {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_with(s, DigitPolicy::Strict)
    }
}

impl fmt::Display for Pbg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.population_multiplier, self.belts, self.gas_giants)
    }
}

impl TryFrom<String> for Pbg {
    type Error = CodecError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Pbg> for String {
    fn from(p: Pbg) -> String {
        p.to_string()
    }
}

/// A single star system's main world.
///
/// Text fields hold exactly what the source file carried (trimmed); the
/// optional extension fields are `None` when the source format has no such
/// column or the cell was empty.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct World {
    /// Display name. May be empty for unnamed systems.
    pub name: String,
    /// Universal World Profile.
    pub uwp: Uwp,
    /// Absolute position.
    pub position: Position,
    /// Travel zone.
    #[serde(default)]
    pub travel_code: TravelCode,
    /// Population/belts/gas giants.
    #[serde(default)]
    pub pbg: Pbg,
    /// Allegiance code, e.g. `ImDd`.
    #[serde(default)]
    pub allegiance: String,
    /// Base codes, e.g. `NS`.
    #[serde(default)]
    pub bases: String,
    /// Space-separated trade and remark codes.
    #[serde(default)]
    pub remarks: String,
    /// Stellar data, e.g. `G2 V M1 V`.
    #[serde(default)]
    pub stellar: String,
    /// Importance extension `{ +2 }`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub importance: Option<String>,
    /// Economic extension `(A46+2)`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub economic: Option<String>,
    /// Cultural extension `[1716]`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cultural: Option<String>,
    /// Nobility codes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nobility: Option<String>,
    /// Number of worlds in the system.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_worlds: Option<u32>,
    /// Resource units.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_units: Option<i64>,
}

impl World {
    /// A world with the given name, profile, and position; everything else default.
    pub fn new(name: impl Into<String>, uwp: Uwp, position: Position) -> Self {
        Self {
            name: name.into(),
            uwp,
            position,
            ..Self::default()
        }
    }

    /// Number of gas giants, from the PBG.
    pub fn gas_giants(&self) -> u8 {
        self.pbg.gas_giants.value()
    }

    /// Sector-local hex label.
    pub fn hex(&self) -> Hex {
        self.position.to_hex()
    }

    /// Letter of the subsector this world lies in.
    pub fn subsector_letter(&self) -> char {
        self.position.subsector_letter()
    }

    /// Whether the remarks carry `code` as a whole token.
    pub fn has_remark(&self, code: &str) -> bool {
        self.remarks.split_whitespace().any(|r| r == code)
    }
}
