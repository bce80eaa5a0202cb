//! Sector metadata: names, allegiances, and map overlays.
//!
//! These are the entities carried by sector metadata files: the names of
//! the sector and its quadrants and subsectors, the allegiance table, and
//! the borders, regions, routes, and labels drawn over the hex grid. All
//! hex references are sector-local [`Hex`] labels.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::hex::Hex;
use crate::position::SECTOR_SIZE;

/// Colour given to a border when none is specified.
pub const DEFAULT_BORDER_COLOR: &str = "red";
/// Colour given to a route when none is specified.
pub const DEFAULT_ROUTE_COLOR: &str = "green";

/// Hex path of a border or region. Most paths are short.
pub type HexPath = SmallVec<[Hex; 8]>;

/// Credits and provenance for a holder (sector, quadrant, subsector).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Metadata {
    /// Display title.
    pub title: Option<String>,
    /// Free-form description.
    pub description: Option<String>,
    /// Author of the data.
    pub author: Option<String>,
    /// Where the data came from.
    pub source: Option<String>,
    /// Publisher of the source.
    pub publisher: Option<String>,
    /// Copyright notice.
    pub copyright: Option<String>,
    /// Bibliographic reference.
    pub reference: Option<String>,
}

impl Metadata {
    /// Metadata carrying only a title.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }
}

/// A political allegiance.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Allegiance {
    /// Four-character (or legacy two-character) code, e.g. `ImDd`.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Fundamental allegiance this one belongs to, e.g. `Im`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base: Option<String>,
    /// Two-character code used by legacy data files.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legacy_code: Option<String>,
}

impl Allegiance {
    /// An allegiance with just a code and name.
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            base: None,
            legacy_code: None,
        }
    }

    /// Code used by legacy files; falls back to [`Allegiance::code`].
    pub fn legacy_code(&self) -> &str {
        self.legacy_code.as_deref().unwrap_or(&self.code)
    }
}

/// A political border drawn along a path of hexes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Border {
    /// Hexes the border encloses, in drawing order.
    pub path: HexPath,
    /// Colour name or `#rrggbb`.
    pub color: String,
    /// Allegiance this border belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allegiance: Option<String>,
    /// Hex at which to draw the border's label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_position: Option<Hex>,
}

impl Border {
    /// A border with the default colour.
    pub fn new(path: impl IntoIterator<Item = Hex>) -> Self {
        Self {
            path: path.into_iter().collect(),
            color: DEFAULT_BORDER_COLOR.to_string(),
            allegiance: None,
            label_position: None,
        }
    }

    /// Replace the colour.
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    /// Space-separated hex labels.
    pub fn path_string(&self) -> String {
        join_path(&self.path)
    }
}

/// A shaded region, drawn like a border but filled.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    /// Hexes the region encloses.
    pub path: HexPath,
    /// Fill colour, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Region {
    /// A region without an explicit colour.
    pub fn new(path: impl IntoIterator<Item = Hex>) -> Self {
        Self {
            path: path.into_iter().collect(),
            color: None,
        }
    }

    /// Space-separated hex labels.
    pub fn path_string(&self) -> String {
        join_path(&self.path)
    }
}

fn join_path(path: &[Hex]) -> String {
    let parts: Vec<String> = path.iter().map(Hex::to_string).collect();
    parts.join(" ")
}

/// Sector-grid delta from the owning sector to a route endpoint's sector.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SectorOffset {
    /// Sectors to trailing (positive) or spinward (negative).
    pub dx: i8,
    /// Sectors to rimward (positive) or coreward (negative).
    pub dy: i8,
}

impl SectorOffset {
    /// Create an offset.
    pub const fn new(dx: i8, dy: i8) -> Self {
        Self { dx, dy }
    }

    /// Whether both deltas are zero.
    pub fn is_zero(self) -> bool {
        self.dx == 0 && self.dy == 0
    }
}

/// One endpoint of a route: a hex plus the sector it lives in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RouteEnd {
    /// Hex label, always inside `1..=32 × 1..=40` once normalised.
    pub hex: Hex,
    /// Sector delta.
    #[serde(default)]
    pub offset: SectorOffset,
}

impl RouteEnd {
    /// Build an endpoint, folding a hex that falls outside the sector
    /// (`0000`, `3341`, `9999`, ...) into the sector it lands in and
    /// carrying the difference into the offset.
    pub fn normalized(hex: Hex, offset: SectorOffset) -> Self {
        let (w, h) = SECTOR_SIZE;
        let (x, dx) = fold(i32::from(hex.x), w, offset.dx);
        let (y, dy) = fold(i32::from(hex.y), h, offset.dy);
        Self {
            hex: Hex::new(x, y),
            offset: SectorOffset::new(dx, dy),
        }
    }
}

/// Fold a 1-based coordinate into `1..=size`, returning it and the
/// adjusted sector delta.
fn fold(coord: i32, size: i32, delta: i8) -> (u8, i8) {
    let carry = (coord - 1).div_euclid(size);
    let local = (coord - 1).rem_euclid(size) + 1;
    let carry = i8::try_from(carry).unwrap_or(if carry < 0 { i8::MIN } else { i8::MAX });
    // `local` is in 1..=size, and sector sizes fit in a u8.
    (u8::try_from(local).unwrap_or(u8::MAX), delta.saturating_add(carry))
}

/// A trade or communication route between two hexes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    /// Starting endpoint.
    pub start: RouteEnd,
    /// Ending endpoint.
    pub end: RouteEnd,
    /// Colour name or `#rrggbb`.
    pub color: String,
    /// Allegiance this route belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allegiance: Option<String>,
}

impl Route {
    /// A route inside one sector with the default colour.
    pub fn new(start: Hex, end: Hex) -> Self {
        Self::with_offsets(start, SectorOffset::default(), end, SectorOffset::default())
    }

    /// A route with explicit sector offsets on either end.
    pub fn with_offsets(
        start: Hex,
        start_offset: SectorOffset,
        end: Hex,
        end_offset: SectorOffset,
    ) -> Self {
        Self {
            start: RouteEnd::normalized(start, start_offset),
            end: RouteEnd::normalized(end, end_offset),
            color: DEFAULT_ROUTE_COLOR.to_string(),
            allegiance: None,
        }
    }

    /// Replace the colour.
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }
}

/// How a label is drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LabelRender {
    /// Styled like a subsector name.
    Subsector,
    /// Styled like a quadrant name.
    Quadrant,
    /// Styled like a sector name.
    Sector,
    /// Custom styling.
    Custom,
}

/// Free text drawn at a hex.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Label {
    /// Anchor hex.
    pub hex: Hex,
    /// Text to draw.
    pub text: String,
    /// Colour override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// `large` or `small`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    /// Vertical offset in hex heights.
    #[serde(default)]
    pub offset_y: f32,
    /// Render style.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub render: Option<LabelRender>,
}

impl Label {
    /// A plain label.
    pub fn new(hex: Hex, text: impl Into<String>) -> Self {
        Self {
            hex,
            text: text.into(),
            ..Self::default()
        }
    }
}

/// Everything a metadata file says about a sector besides its worlds.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectorMetadata {
    /// Sector names; the first is the primary name.
    pub names: Vec<String>,
    /// Short sector abbreviation.
    pub abbreviation: Option<String>,
    /// Domain the sector belongs to.
    pub domain: Option<String>,
    /// Alpha, Beta, Gamma, Delta quadrant names.
    pub quadrant_names: [Option<String>; 4],
    /// Subsector names keyed by letter `A`-`P`.
    pub subsector_names: IndexMap<char, String>,
    /// Allegiance table.
    pub allegiances: Vec<Allegiance>,
    /// Borders, in file order.
    pub borders: Vec<Border>,
    /// Regions, in file order.
    pub regions: Vec<Region>,
    /// Routes, in file order.
    pub routes: Vec<Route>,
    /// Labels, in file order.
    pub labels: Vec<Label>,
    /// Credits for the sector's data.
    pub credits: Metadata,
}

impl SectorMetadata {
    /// The primary sector name, if any.
    pub fn primary_name(&self) -> Option<&str> {
        self.names.first().map(String::as_str)
    }

    /// Look up an allegiance by its code.
    pub fn allegiance(&self, code: &str) -> Option<&Allegiance> {
        self.allegiances
            .iter()
            .find(|a| a.code == code || a.legacy_code.as_deref() == Some(code))
    }

    /// Name of subsector `letter`, if one was given.
    pub fn subsector_name(&self, letter: char) -> Option<&str> {
        self.subsector_names.get(&letter).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hex(s: &str) -> Hex {
        s.parse().unwrap()
    }

    #[test]
    fn defaults_are_explicit() {
        let b = Border::new([hex("0001"), hex("0002")]);
        assert_eq!(b.color, "red");
        assert_eq!(b.path_string(), "0001 0002");
        let r = Route::new(hex("0101"), hex("0202"));
        assert_eq!(r.color, "green");
        assert!(r.start.offset.is_zero());
    }

    #[test]
    fn route_ends_outside_sector_fold_into_offsets() {
        let r = Route::new(hex("0000"), hex("3341"));
        assert_eq!(r.start.hex, hex("3240"));
        assert_eq!(r.start.offset, SectorOffset::new(-1, -1));
        assert_eq!(r.end.hex, hex("0101"));
        assert_eq!(r.end.offset, SectorOffset::new(1, 1));
    }

    #[test]
    fn route_ends_far_outside_sector_fold_completely() {
        let r = Route::new(hex("9999"), hex("0101"));
        assert_eq!(r.start.hex, hex("0319"));
        assert_eq!(r.start.offset, SectorOffset::new(3, 2));
        assert!(r.start.hex.is_valid());

        let again = RouteEnd::normalized(r.start.hex, r.start.offset);
        assert_eq!(again, r.start);
    }

    #[test]
    fn route_ends_inside_sector_keep_offsets() {
        let r = Route::with_offsets(
            hex("3240"),
            SectorOffset::new(-1, -1),
            hex("0101"),
            SectorOffset::new(1, 1),
        );
        assert_eq!(r.start.hex, hex("3240"));
        assert_eq!(r.start.offset, SectorOffset::new(-1, -1));
        assert_eq!(r.end.offset, SectorOffset::new(1, 1));
    }

    #[test]
    fn allegiance_lookup_by_legacy_code() {
        let mut meta = SectorMetadata::default();
        let mut a = Allegiance::new("ImDd", "Third Imperium, Domain of Deneb");
        a.legacy_code = Some("Im".into());
        meta.allegiances.push(a);
        assert!(meta.allegiance("ImDd").is_some());
        assert!(meta.allegiance("Im").is_some());
        assert!(meta.allegiance("Zh").is_none());
        assert_eq!(meta.allegiances[0].legacy_code(), "Im");
    }
}
