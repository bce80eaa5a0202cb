//! The world-holder tree: galaxy, sector, quadrant, subsector.
//!
//! Worlds are owned by exactly one [`SubSector`]. A [`Quadrant`] owns four
//! subsectors and a [`Sector`] owns four quadrants; their world lists are
//! computed by walking the children, so there is only ever one copy of a
//! world in the tree.

use std::fmt;

use serde::{Deserialize, Serialize};
use travmap_core::{Frame, Metadata, Position, SectorMetadata, World, QUADRANT_SIZE, SUBSECTOR_SIZE};

/// Anything that holds worlds inside a region of the grid.
pub trait WorldHolder {
    /// Credits and title.
    fn metadata(&self) -> &Metadata;

    /// Absolute origin (top-left hex) of the region.
    fn origin(&self) -> Position;

    /// Whether `p` lies inside this holder's bounds.
    fn contains(&self, p: Position) -> bool;

    /// Every world held, in a deterministic order.
    fn worlds(&self) -> Box<dyn Iterator<Item = &World> + '_>;

    /// The world at `p`, if any.
    fn world_at(&self, p: Position) -> Option<&World> {
        if !self.contains(p) {
            return None;
        }
        self.worlds().find(|w| w.position == p)
    }

    /// Number of worlds held.
    fn world_count(&self) -> usize {
        self.worlds().count()
    }
}

// ── Subsector ───────────────────────────────────────────────────

/// An 8×10 block of hexes; the only holder that stores worlds directly.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SubSector {
    letter: char,
    metadata: Metadata,
    origin: Position,
    worlds: Vec<World>,
}

impl SubSector {
    /// An empty subsector lettered `letter` at `origin`.
    pub fn new(letter: char, origin: Position, metadata: Metadata) -> Self {
        Self {
            letter,
            metadata,
            origin,
            worlds: Vec::new(),
        }
    }

    /// Letter `A`-`P` within the parent sector.
    pub fn letter(&self) -> char {
        self.letter
    }

    /// Display name, if the metadata gave one.
    pub fn name(&self) -> Option<&str> {
        self.metadata.title.as_deref()
    }

    /// Worlds as a slice, ordered by position.
    pub fn world_slice(&self) -> &[World] {
        &self.worlds
    }

    /// Insert `world`, replacing any world already at the same position.
    ///
    /// Returns the replaced world. The caller must have checked containment.
    pub(crate) fn place(&mut self, world: World) -> Option<World> {
        match self.worlds.iter_mut().find(|w| w.position == world.position) {
            Some(slot) => Some(std::mem::replace(slot, world)),
            None => {
                self.worlds.push(world);
                None
            }
        }
    }

    pub(crate) fn sort_worlds(&mut self) {
        self.worlds.sort_by_key(|w| w.position);
    }
}

impl WorldHolder for SubSector {
    fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    fn origin(&self) -> Position {
        self.origin
    }

    fn contains(&self, p: Position) -> bool {
        p.is_in_subsector(self.origin)
    }

    fn worlds(&self) -> Box<dyn Iterator<Item = &World> + '_> {
        Box::new(self.worlds.iter())
    }
}

// ── Quadrant ────────────────────────────────────────────────────

/// Which quarter of a sector a quadrant covers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuadrantId {
    /// Top left.
    Alpha,
    /// Top right.
    Beta,
    /// Bottom left.
    Gamma,
    /// Bottom right.
    Delta,
}

impl QuadrantId {
    /// All four, in row-major order.
    pub const ALL: [QuadrantId; 4] = [Self::Alpha, Self::Beta, Self::Gamma, Self::Delta];

    /// Row-major index, 0-3.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Offset of this quadrant's origin from the sector origin.
    pub fn offset(self) -> Position {
        let i = self.index() as i32;
        let (w, h) = QUADRANT_SIZE;
        Position::new((i % 2) * w, (i / 2) * h)
    }

    /// Lowercase name as used in metadata files.
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Alpha => "alpha",
            Self::Beta => "beta",
            Self::Gamma => "gamma",
            Self::Delta => "delta",
        }
    }
}

impl fmt::Display for QuadrantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Alpha => "Alpha",
            Self::Beta => "Beta",
            Self::Gamma => "Gamma",
            Self::Delta => "Delta",
        };
        f.write_str(name)
    }
}

/// A 16×20 quarter of a sector, owning four subsectors.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Quadrant {
    id: QuadrantId,
    metadata: Metadata,
    origin: Position,
    subsectors: [SubSector; 4],
}

impl Quadrant {
    /// Build an empty quadrant. Subsector titles come from `names`, keyed by letter.
    fn new(id: QuadrantId, sector_origin: Position, info: &SectorMetadata) -> Self {
        let origin = sector_origin + id.offset();
        let (w, h) = SUBSECTOR_SIZE;
        let qi = id.index() as i32;
        let subsectors = [0, 1, 2, 3].map(|j: i32| {
            let col = (qi % 2) * 2 + j % 2;
            let row = (qi / 2) * 2 + j / 2;
            let letter = (b'A' + (row * 4 + col) as u8) as char;
            let metadata = info
                .subsector_name(letter)
                .map(Metadata::titled)
                .unwrap_or_default();
            SubSector::new(letter, origin + Position::new((j % 2) * w, (j / 2) * h), metadata)
        });
        let metadata = info.quadrant_names[id.index()]
            .as_deref()
            .map(Metadata::titled)
            .unwrap_or_default();
        Self {
            id,
            metadata,
            origin,
            subsectors,
        }
    }

    /// Which quadrant this is.
    pub fn id(&self) -> QuadrantId {
        self.id
    }

    /// The four subsectors, row-major.
    pub fn subsectors(&self) -> &[SubSector; 4] {
        &self.subsectors
    }

    pub(crate) fn subsector_containing_mut(&mut self, p: Position) -> Option<&mut SubSector> {
        self.subsectors.iter_mut().find(|s| s.contains(p))
    }

    pub(crate) fn subsectors_mut(&mut self) -> impl Iterator<Item = &mut SubSector> {
        self.subsectors.iter_mut()
    }
}

impl WorldHolder for Quadrant {
    fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    fn origin(&self) -> Position {
        self.origin
    }

    fn contains(&self, p: Position) -> bool {
        p.is_in_quadrant(self.origin)
    }

    fn worlds(&self) -> Box<dyn Iterator<Item = &World> + '_> {
        Box::new(self.subsectors.iter().flat_map(|s| s.worlds.iter()))
    }
}

// ── Sector ──────────────────────────────────────────────────────

/// A 32×40 sector, owning four quadrants and its metadata.
///
/// # Examples
///
/// ```
/// use travmap_core::{Position, SectorMetadata};
/// use travmap_space::{Sector, WorldHolder};
///
/// let sector = Sector::at(0, 1, SectorMetadata::default());
/// assert_eq!(sector.origin(), Position::new(0, 40));
/// assert_eq!(sector.subsectors().count(), 16);
/// assert_eq!(sector.subsector('F').unwrap().origin(), Position::new(8, 50));
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sector {
    info: SectorMetadata,
    origin: Position,
    quadrants: [Quadrant; 4],
}

impl Sector {
    /// An empty sector whose top-left hex is at `origin`.
    ///
    /// `origin` is snapped to the containing sector frame.
    pub fn new(origin: Position, mut info: SectorMetadata) -> Self {
        let origin = origin.frame_origin(Frame::Sector);
        if info.credits.title.is_none() {
            info.credits.title = info.names.first().cloned();
        }
        let quadrants = QuadrantId::ALL.map(|id| Quadrant::new(id, origin, &info));
        Self {
            info,
            origin,
            quadrants,
        }
    }

    /// An empty sector at sector-grid location `(sx, sy)`.
    pub fn at(sx: i32, sy: i32, info: SectorMetadata) -> Self {
        Self::new(Position::sector_origin(sx, sy), info)
    }

    /// Sector-grid location `(sx, sy)`.
    pub fn location(&self) -> (i32, i32) {
        let (w, h) = travmap_core::SECTOR_SIZE;
        (self.origin.x.div_euclid(w), self.origin.y.div_euclid(h))
    }

    /// Primary name.
    pub fn name(&self) -> Option<&str> {
        self.info.primary_name()
    }

    /// Names, allegiances, and overlays.
    pub fn sector_metadata(&self) -> &SectorMetadata {
        &self.info
    }

    /// Mutable access to the sector metadata.
    ///
    /// Holder titles were taken from the metadata at construction and are
    /// not refreshed by edits made here.
    pub fn sector_metadata_mut(&mut self) -> &mut SectorMetadata {
        &mut self.info
    }

    /// The four quadrants, row-major.
    pub fn quadrants(&self) -> &[Quadrant; 4] {
        &self.quadrants
    }

    /// One quadrant.
    pub fn quadrant(&self, id: QuadrantId) -> &Quadrant {
        &self.quadrants[id.index()]
    }

    /// All sixteen subsectors, in letter order `A`-`P`.
    pub fn subsectors(&self) -> impl Iterator<Item = &SubSector> + '_ {
        (0..16u8).filter_map(move |i| self.subsector((b'A' + i) as char))
    }

    /// Subsector by letter; `None` outside `A`-`P`.
    pub fn subsector(&self, letter: char) -> Option<&SubSector> {
        self.quadrants
            .iter()
            .flat_map(|q| q.subsectors.iter())
            .find(|s| s.letter == letter)
    }

    /// Quadrant holding `p`, if `p` is inside this sector.
    pub fn quadrant_containing(&self, p: Position) -> Option<&Quadrant> {
        self.quadrants.iter().find(|q| q.contains(p))
    }

    pub(crate) fn quadrants_mut(&mut self) -> impl Iterator<Item = &mut Quadrant> {
        self.quadrants.iter_mut()
    }
}

impl WorldHolder for Sector {
    fn metadata(&self) -> &Metadata {
        &self.info.credits
    }

    fn origin(&self) -> Position {
        self.origin
    }

    fn contains(&self, p: Position) -> bool {
        p.is_in_sector(self.origin)
    }

    fn worlds(&self) -> Box<dyn Iterator<Item = &World> + '_> {
        Box::new(self.subsectors().flat_map(|s| s.worlds.iter()))
    }

    fn world_at(&self, p: Position) -> Option<&World> {
        self.quadrant_containing(p)?.world_at(p)
    }
}

// ── Galaxy ──────────────────────────────────────────────────────

/// A collection of sectors keyed by location.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Galaxy {
    metadata: Metadata,
    sectors: Vec<Sector>,
}

impl Galaxy {
    /// An empty galaxy.
    pub fn new(metadata: Metadata) -> Self {
        Self {
            metadata,
            sectors: Vec::new(),
        }
    }

    /// Add `sector`, returning any sector it displaced at the same location.
    pub fn insert(&mut self, sector: Sector) -> Option<Sector> {
        match self.sectors.iter_mut().find(|s| s.origin == sector.origin) {
            Some(slot) => Some(std::mem::replace(slot, sector)),
            None => {
                self.sectors.push(sector);
                None
            }
        }
    }

    /// Sectors in insertion order.
    pub fn sectors(&self) -> &[Sector] {
        &self.sectors
    }

    /// The sector holding `p`.
    pub fn sector_containing(&self, p: Position) -> Option<&Sector> {
        self.sectors.iter().find(|s| s.contains(p))
    }

    /// Look a sector up by any of its names, case-insensitively.
    pub fn sector_named(&self, name: &str) -> Option<&Sector> {
        self.sectors.iter().find(|s| {
            s.info
                .names
                .iter()
                .any(|n| n.eq_ignore_ascii_case(name))
        })
    }
}

impl WorldHolder for Galaxy {
    fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    fn origin(&self) -> Position {
        Position::ORIGIN
    }

    fn contains(&self, p: Position) -> bool {
        self.sector_containing(p).is_some()
    }

    fn worlds(&self) -> Box<dyn Iterator<Item = &World> + '_> {
        Box::new(self.sectors.iter().flat_map(|s| s.worlds()))
    }

    fn world_at(&self, p: Position) -> Option<&World> {
        self.sector_containing(p)?.world_at(p)
    }
}
