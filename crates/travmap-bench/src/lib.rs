//! Benchmark profiles for the travmap sector toolkit.
//!
//! - [`reference_sector`]: 400 synthetic worlds, a typical settled sector
//! - [`dense_sector`]: a world in every one of the 1280 hexes
//! - [`sector_text`]: either profile serialized as a world table

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use travmap_core::{Allegiance, Position, SectorMetadata};
use travmap_format::{write_worlds, SerializeOptions, TableKind};
use travmap_space::{assemble, Sector};
use travmap_test_utils::synthetic_worlds;

/// Sector-grid location every profile is placed at.
pub const PROFILE_LOCATION: (i32, i32) = (-4, -1);

fn profile_metadata() -> SectorMetadata {
    let mut info = SectorMetadata::default();
    info.names.push("Benchmark Reach".into());
    info.abbreviation = Some("Bench".into());
    info.allegiances.push(Allegiance::new("ImDd", "Third Imperium, Domain of Deneb"));
    info.allegiances.push(Allegiance::new("ZhCo", "Zhodani Consulate"));
    info
}

fn profile(count: usize, seed: u64) -> Sector {
    let (sx, sy) = PROFILE_LOCATION;
    let origin = Position::sector_origin(sx, sy);
    assemble(origin, synthetic_worlds(origin, count, seed), profile_metadata()).sector
}

/// A sector holding 400 worlds.
pub fn reference_sector(seed: u64) -> Sector {
    profile(400, seed)
}

/// A sector with a world in every hex.
pub fn dense_sector(seed: u64) -> Sector {
    profile(1280, seed)
}

/// `sector` written as a `kind` world table with default options.
pub fn sector_text(sector: &Sector, kind: TableKind) -> String {
    write_worlds(sector, kind, &SerializeOptions::default())
}
