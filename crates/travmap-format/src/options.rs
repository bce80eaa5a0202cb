//! Reader and writer configuration.

use travmap_core::{DigitPolicy, Position};

/// Options for every reader in this crate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseOptions {
    /// How to decode characters outside the extended-hex alphabet.
    pub digit_policy: DigitPolicy,
    /// Fail on unknown table columns and MSEC commands instead of logging
    /// and skipping them. Stray data between fixed-width columns is a row
    /// error when set and a warning otherwise.
    pub strict: bool,
    /// Sector-grid location `(sx, sy)` of the sector being read. Hex labels
    /// in the file are resolved relative to this sector's origin.
    pub sector_location: (i32, i32),
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            digit_policy: DigitPolicy::Strict,
            strict: true,
            sector_location: (0, 0),
        }
    }
}

impl ParseOptions {
    /// Lenient options: unknown digits read as 0, unknown columns and
    /// commands are skipped.
    pub fn lenient() -> Self {
        Self {
            digit_policy: DigitPolicy::LenientZero,
            strict: false,
            ..Self::default()
        }
    }

    /// Same options for the sector at `(sx, sy)`.
    pub fn at(mut self, sx: i32, sy: i32) -> Self {
        self.sector_location = (sx, sy);
        self
    }

    /// Absolute origin of [`ParseOptions::sector_location`].
    pub fn sector_origin(&self) -> Position {
        let (sx, sy) = self.sector_location;
        Position::sector_origin(sx, sy)
    }
}

/// Line terminator used by writers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LineEnding {
    /// `\n`
    #[default]
    Lf,
    /// `\r\n`
    CrLf,
}

impl LineEnding {
    /// The terminator text.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::CrLf => "\r\n",
        }
    }
}

/// Options for the world-table writers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SerializeOptions {
    /// Emit the header (and dash rule, or SEC column guide).
    pub include_header: bool,
    /// Emit a `#` comment block with the sector's names, credits,
    /// subsector names, and allegiances before the table.
    pub include_metadata: bool,
    /// Widen the free-text columns to their customary minimum widths.
    pub expand_fields: bool,
    /// Write hexes relative to their subsector (`0101`-`0810`).
    pub subsector_hexes: bool,
    /// Line terminator.
    pub line_ending: LineEnding,
}

impl Default for SerializeOptions {
    fn default() -> Self {
        Self {
            include_header: true,
            include_metadata: false,
            expand_fields: true,
            subsector_hexes: false,
            line_ending: LineEnding::Lf,
        }
    }
}
