//! Several assembled sectors queried as one galaxy.

use proptest::prelude::*;
use travmap_core::{Metadata, Position, SectorMetadata, SECTOR_SIZE};
use travmap_space::astrometrics::{grid_distance, neighbours, within_jump};
use travmap_space::{assemble, Galaxy, Sector, WorldHolder};
use travmap_test_utils::synthetic_worlds;

// ── Helpers ─────────────────────────────────────────────────────

fn named(name: &str) -> SectorMetadata {
    SectorMetadata {
        names: vec![name.into()],
        ..SectorMetadata::default()
    }
}

fn sector_at(sx: i32, sy: i32, count: usize, seed: u64) -> Sector {
    let origin = Position::sector_origin(sx, sy);
    let assembly = assemble(origin, synthetic_worlds(origin, count, seed), named(&format!("S{sx},{sy}")));
    assert!(assembly.orphans.is_empty());
    assembly.sector
}

/// A 2×2 block of fully populated sectors around the grid origin.
fn dense_block() -> Galaxy {
    let mut galaxy = Galaxy::new(Metadata::default());
    for (sx, sy) in [(-1, -1), (0, -1), (-1, 0), (0, 0)] {
        assert!(galaxy.insert(sector_at(sx, sy, 1280, 9)).is_none());
    }
    galaxy
}

// ── Tests ───────────────────────────────────────────────────────

#[test]
fn galaxy_routes_lookups_to_the_right_sector() {
    let galaxy = dense_block();
    assert_eq!(galaxy.world_count(), 4 * 1280);

    let (w, h) = SECTOR_SIZE;
    for (p, name) in [
        (Position::new(0, 0), "S0,0"),
        (Position::new(-1, 0), "S-1,0"),
        (Position::new(w - 1, -1), "S0,-1"),
        (Position::new(-w, -h), "S-1,-1"),
    ] {
        let sector = galaxy.sector_containing(p).unwrap();
        assert_eq!(sector.name(), Some(name));
        assert_eq!(galaxy.world_at(p).map(|w| w.position), Some(p));
    }
    assert!(galaxy.sector_containing(Position::new(w, 0)).is_none());
    assert_eq!(galaxy.sector_named("s0,-1").map(|s| s.location()), Some((0, -1)));
}

#[test]
fn reinserting_a_location_replaces_the_sector() {
    let mut galaxy = dense_block();
    let old = galaxy.insert(sector_at(0, 0, 10, 1)).unwrap();
    assert_eq!(old.world_count(), 1280);
    assert_eq!(galaxy.sectors().len(), 4);
    assert_eq!(galaxy.world_count(), 3 * 1280 + 10);
}

#[test]
fn jump_ranges_cross_sector_borders() {
    let galaxy = dense_block();
    let corner = Position::new(0, 0);
    let jump1 = within_jump(corner, 1, galaxy.worlds());
    let mut got: Vec<Position> = jump1.iter().map(|w| w.position).collect();
    let mut want: Vec<Position> = neighbours(corner).into_iter().collect();
    got.sort();
    want.sort();
    assert_eq!(got, want);

    let sectors: std::collections::HashSet<(i32, i32)> = jump1
        .iter()
        .filter_map(|w| galaxy.sector_containing(w.position))
        .map(|s| s.location())
        .collect();
    assert!(sectors.len() > 1);
}

proptest! {
    #[test]
    fn jump_range_matches_grid_distance(x in -28i32..28, y in -35i32..35, jump in 0u32..4) {
        let galaxy = dense_block();
        let center = Position::new(x, y);
        let found = within_jump(center, jump, galaxy.worlds());

        let expected = galaxy
            .worlds()
            .filter(|w| w.position != center && grid_distance(center, w.position) <= jump as i32)
            .count();
        prop_assert_eq!(found.len(), expected);
        // Every hex within three jumps of a point this far inside the block is populated.
        let area = 3 * jump * (jump + 1);
        prop_assert_eq!(found.len(), area as usize);
    }
}
