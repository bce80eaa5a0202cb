//! Absolute hex positions and the fixed grid frames.
//!
//! The galaxy is one unbounded grid of hexes addressed by signed `(x, y)`
//! pairs, X running spinward to trailing and Y coreward to rimward. Bounds
//! only appear when a position is reduced into one of the fixed-size
//! [`Frame`]s: subsector (8×10), quadrant (16×20), or sector (32×40).

use std::fmt;
use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

use crate::hex::Hex;

/// Width and height of a subsector, in hexes.
pub const SUBSECTOR_SIZE: (i32, i32) = (8, 10);
/// Width and height of a quadrant, in hexes.
pub const QUADRANT_SIZE: (i32, i32) = (16, 20);
/// Width and height of a sector, in hexes.
pub const SECTOR_SIZE: (i32, i32) = (32, 40);

/// One of the fixed grid containers a position can be reduced into.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Frame {
    /// 8×10 hexes.
    SubSector,
    /// 16×20 hexes, four subsectors.
    Quadrant,
    /// 32×40 hexes, four quadrants.
    Sector,
}

impl Frame {
    /// `(width, height)` of this frame.
    pub const fn dimensions(self) -> (i32, i32) {
        match self {
            Self::SubSector => SUBSECTOR_SIZE,
            Self::Quadrant => QUADRANT_SIZE,
            Self::Sector => SECTOR_SIZE,
        }
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SubSector => f.write_str("subsector"),
            Self::Quadrant => f.write_str("quadrant"),
            Self::Sector => f.write_str("sector"),
        }
    }
}

/// An absolute hex coordinate.
///
/// # Examples
///
/// ```
/// use travmap_core::{Frame, Position};
///
/// let p = Position::new(-3, 41);
/// assert_eq!(p.to_sector(), Position::new(29, 1));
/// assert_eq!(p.frame_origin(Frame::Sector), Position::new(-32, 40));
/// assert!(p.is_in_sector(Position::new(-32, 40)));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[derive(Serialize, Deserialize)]
pub struct Position {
    /// Spinward (negative) to trailing (positive).
    pub x: i32,
    /// Coreward (negative) to rimward (positive).
    pub y: i32,
}

impl Position {
    /// The galactic origin.
    pub const ORIGIN: Position = Position { x: 0, y: 0 };

    /// Create a position.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Coordinates local to the containing `frame`, each in `[0, size)`.
    pub fn reduce(self, frame: Frame) -> Position {
        let (w, h) = frame.dimensions();
        Position::new(self.x.rem_euclid(w), self.y.rem_euclid(h))
    }

    /// Absolute origin of the `frame` that contains this position.
    pub fn frame_origin(self, frame: Frame) -> Position {
        self - self.reduce(frame)
    }

    /// Whether this position lies in the `frame` whose origin is `origin`.
    pub fn is_in(self, frame: Frame, origin: Position) -> bool {
        origin + self.reduce(frame) == self
    }

    /// Sector-local coordinates.
    pub fn to_sector(self) -> Position {
        self.reduce(Frame::Sector)
    }

    /// Quadrant-local coordinates.
    pub fn to_quadrant(self) -> Position {
        self.reduce(Frame::Quadrant)
    }

    /// Subsector-local coordinates.
    pub fn to_subsector(self) -> Position {
        self.reduce(Frame::SubSector)
    }

    /// See [`Position::is_in`].
    pub fn is_in_sector(self, origin: Position) -> bool {
        self.is_in(Frame::Sector, origin)
    }

    /// See [`Position::is_in`].
    pub fn is_in_quadrant(self, origin: Position) -> bool {
        self.is_in(Frame::Quadrant, origin)
    }

    /// See [`Position::is_in`].
    pub fn is_in_subsector(self, origin: Position) -> bool {
        self.is_in(Frame::SubSector, origin)
    }

    /// Origin of the sector at sector-grid location `(sx, sy)`.
    pub fn sector_origin(sx: i32, sy: i32) -> Position {
        let (w, h) = SECTOR_SIZE;
        Position::new(sx * w, sy * h)
    }

    /// Absolute position of `hex` inside the sector whose origin is `sector_origin`.
    pub fn from_hex(sector_origin: Position, hex: Hex) -> Position {
        sector_origin + Position::new(i32::from(hex.x) - 1, i32::from(hex.y) - 1)
    }

    /// The 1-based sector-local label of this position.
    pub fn to_hex(self) -> Hex {
        let local = self.to_sector();
        // Sector-local coordinates are always below 40, so they fit in u8.
        Hex::new(local.x as u8 + 1, local.y as u8 + 1)
    }

    /// Letter (`A`-`P`) of the subsector holding this position within its sector.
    pub fn subsector_letter(self) -> char {
        let local = self.to_sector();
        let (w, h) = SUBSECTOR_SIZE;
        let index = (local.y / h) * 4 + local.x / w;
        (b'A' + index as u8) as char
    }
}

impl Add for Position {
    type Output = Position;

    fn add(self, rhs: Position) -> Position {
        Position::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Position {
    type Output = Position;

    fn sub(self, rhs: Position) -> Position {
        Position::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}
