//! Hex-grid geometry.
//!
//! The grid uses an odd-q vertical layout in absolute coordinates: columns
//! with an odd X are shoved half a hex rimward. Sector origins always fall
//! on an even column, so the published `XXYY` labels see the opposite
//! parity (label `01` columns sit high, label `02` columns sit low).

use smallvec::SmallVec;
use travmap_core::{Position, World};

const Y_SHOVE: f64 = 0.5;

/// Adjacent-column row deltas for an even column: the row above and the same row.
const EVEN_COLUMN_DY: [i32; 2] = [-1, 0];
/// Adjacent-column row deltas for an odd column: the same row and the row below.
const ODD_COLUMN_DY: [i32; 2] = [0, 1];

fn is_odd(v: i32) -> bool {
    v.rem_euclid(2) == 1
}

/// Absolute per-axis distance between two positions.
///
/// ```
/// use travmap_core::Position;
/// use travmap_space::astrometrics::offset;
///
/// assert_eq!(offset(Position::new(0, 0), Position::new(1, 1)), (1, 1));
/// assert_eq!(offset(Position::new(4, -2), Position::new(1, 1)), (3, 3));
/// ```
pub fn offset(a: Position, b: Position) -> (i32, i32) {
    ((a.x - b.x).abs(), (a.y - b.y).abs())
}

/// Straight-line distance in hex widths, accounting for the column shove.
///
/// When the columns differ by an even amount both hexes sit at the same
/// vertical phase. Otherwise the row delta is adjusted by half a hex,
/// toward or away from `b` depending on the parity of `a`'s column.
pub fn distance(a: Position, b: Position) -> f64 {
    let (dx, dy) = offset(a, b);
    let (x, mut y) = (f64::from(dx), f64::from(dy));
    if dx % 2 != 0 {
        if is_odd(a.x) {
            y += Y_SHOVE;
        } else {
            y -= Y_SHOVE;
        }
    }
    (x * x + y * y).sqrt()
}

/// Number of hex steps between two positions, as used for jump ranges.
///
/// ```
/// use travmap_core::Position;
/// use travmap_space::astrometrics::hex_distance;
///
/// assert_eq!(hex_distance(Position::new(1, 1), Position::new(1, 9)), 8);
/// assert_eq!(hex_distance(Position::new(10, 10), Position::new(8, 1)), 10);
/// ```
pub fn hex_distance(a: Position, b: Position) -> i32 {
    let (dx, dy) = offset(a, b);
    if dx == 0 {
        return dy;
    }
    if dy < dx / 2 {
        return dx;
    }
    dx / 2 + dy + dx % 2
}

/// Cube coordinates `(q, r, s)` of an absolute position.
fn to_cube(p: Position) -> (i32, i32, i32) {
    let q = p.x;
    let r = p.y - (p.x - p.x.rem_euclid(2)) / 2;
    (q, r, -q - r)
}

/// Exact shortest-path length on the grid, respecting column parity.
///
/// Unlike [`hex_distance`], this is the graph geodesic: two positions are
/// one step apart exactly when [`is_neighbour`] holds.
pub fn grid_distance(a: Position, b: Position) -> i32 {
    let (aq, ar, as_) = to_cube(a);
    let (bq, br, bs) = to_cube(b);
    (aq - bq).abs().max((ar - br).abs()).max((as_ - bs).abs())
}

fn column_dy(x: i32) -> [i32; 2] {
    if is_odd(x) {
        ODD_COLUMN_DY
    } else {
        EVEN_COLUMN_DY
    }
}

/// Whether two distinct hexes share an edge.
///
/// ```
/// use travmap_core::Position;
/// use travmap_space::astrometrics::is_neighbour;
///
/// let a = Position::new(4, 3);
/// assert!(is_neighbour(a, Position::new(5, 2)));
/// assert!(is_neighbour(a, Position::new(4, 4)));
/// assert!(!is_neighbour(a, Position::new(5, 4)));
/// assert!(!is_neighbour(a, a));
/// ```
pub fn is_neighbour(a: Position, b: Position) -> bool {
    let dx = (b.x - a.x).abs();
    let dy = b.y - a.y;
    match dx {
        0 => dy.abs() == 1,
        1 => column_dy(a.x).contains(&dy),
        _ => false,
    }
}

/// The six hexes adjacent to `p`: above, below, then the two columns either side.
pub fn neighbours(p: Position) -> SmallVec<[Position; 6]> {
    let mut result = SmallVec::new();
    result.push(Position::new(p.x, p.y - 1));
    result.push(Position::new(p.x, p.y + 1));
    for dx in [-1, 1] {
        for dy in column_dy(p.x) {
            result.push(Position::new(p.x + dx, p.y + dy));
        }
    }
    result
}

/// Worlds within `jump` hexes of `center`, excluding any world at `center`.
///
/// Results keep the iteration order of `worlds`.
pub fn within_jump<'a, I>(center: Position, jump: u32, worlds: I) -> Vec<&'a World>
where
    I: IntoIterator<Item = &'a World>,
{
    let jump = i64::from(jump);
    worlds
        .into_iter()
        .filter(|w| w.position != center && i64::from(grid_distance(center, w.position)) <= jump)
        .collect()
}
