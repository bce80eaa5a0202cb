//! Holder-tree invariant checks.
//!
//! Reused by the holder and assembly test modules to verify that a sector
//! is laid out correctly and that every world is held exactly once.

use travmap_core::{Frame, Position};

use crate::holder::{Sector, WorldHolder};

/// Assert the 4×4 subsector layout: letters `A`-`P` row-major, origins
/// aligned to the subsector frame, every origin inside its quadrant.
pub fn assert_layout(sector: &Sector) {
    let letters: String = sector.subsectors().map(|s| s.letter()).collect();
    assert_eq!(letters, "ABCDEFGHIJKLMNOP");
    for (i, ss) in sector.subsectors().enumerate() {
        let expected = sector.origin() + Position::new((i as i32 % 4) * 8, (i as i32 / 4) * 10);
        assert_eq!(ss.origin(), expected, "subsector {} origin", ss.letter());
        assert_eq!(ss.origin().frame_origin(Frame::SubSector), ss.origin());
    }
    for q in sector.quadrants() {
        assert_eq!(q.origin(), sector.origin() + q.id().offset());
        for ss in q.subsectors() {
            assert!(
                q.contains(ss.origin()),
                "subsector {} not inside quadrant {}",
                ss.letter(),
                q.id()
            );
        }
    }
}

/// Assert each world sits in exactly one subsector whose bounds contain it.
pub fn assert_worlds_held_once(sector: &Sector) {
    for world in sector.worlds() {
        let holders: Vec<char> = sector
            .subsectors()
            .filter(|s| s.world_slice().iter().any(|w| w.position == world.position))
            .map(|s| s.letter())
            .collect();
        assert_eq!(holders.len(), 1, "{:?} held by {holders:?}", world.name);
        let ss = sector.subsector(holders[0]).map(|s| s.contains(world.position));
        assert_eq!(ss, Some(true), "{:?} held outside its bounds", world.name);
    }
}

/// Assert quadrant and sector world views agree with the subsectors.
pub fn assert_views_consistent(sector: &Sector) {
    let from_subsectors: usize = sector.subsectors().map(|s| s.world_count()).sum();
    let from_quadrants: usize = sector.quadrants().iter().map(|q| q.world_count()).sum();
    assert_eq!(sector.world_count(), from_subsectors);
    assert_eq!(from_quadrants, from_subsectors);
    for world in sector.worlds() {
        assert_eq!(sector.world_at(world.position), Some(world));
    }
}

/// Assert worlds inside each subsector are ordered by position.
pub fn assert_sorted(sector: &Sector) {
    for ss in sector.subsectors() {
        let positions: Vec<Position> = ss.world_slice().iter().map(|w| w.position).collect();
        let mut sorted = positions.clone();
        sorted.sort();
        assert_eq!(positions, sorted, "subsector {} unsorted", ss.letter());
    }
}

/// Run every check above.
pub fn run_full_compliance(sector: &Sector) {
    assert_layout(sector);
    assert_worlds_held_once(sector);
    assert_views_consistent(sector);
    assert_sorted(sector);
}
