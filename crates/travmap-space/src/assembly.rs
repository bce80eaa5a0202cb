//! Bucketing a flat world list into the holder tree.

use log::{debug, warn};
use travmap_core::{Position, SectorMetadata, World};

use crate::holder::{Sector, WorldHolder};

/// Result of [`assemble`].
#[derive(Clone, Debug, PartialEq)]
pub struct Assembly {
    /// The populated sector.
    pub sector: Sector,
    /// Worlds that fell outside the sector, in input order.
    pub orphans: Vec<World>,
}

/// Build the sector at `origin` and place each world in the subsector
/// whose bounds contain it.
///
/// Worlds outside the sector are returned as orphans and logged. When two
/// worlds share a position the later one wins, with a warning. Every
/// subsector's worlds end up ordered by position, so the shape of the
/// result does not depend on input order beyond that tie-break.
///
/// # Examples
///
/// ```
/// use travmap_core::{Position, SectorMetadata, World};
/// use travmap_space::{assemble, WorldHolder};
///
/// let uwp = "B565776-9".parse().unwrap();
/// let worlds = vec![
///     World::new("Inside", uwp, Position::new(9, 1)),
///     World::new("Outside", uwp, Position::new(40, 1)),
/// ];
/// let out = assemble(Position::ORIGIN, worlds, SectorMetadata::default());
/// assert_eq!(out.sector.world_count(), 1);
/// assert_eq!(out.sector.subsector('B').unwrap().world_count(), 1);
/// assert_eq!(out.orphans.len(), 1);
/// ```
pub fn assemble<I>(origin: Position, worlds: I, metadata: SectorMetadata) -> Assembly
where
    I: IntoIterator<Item = World>,
{
    let mut sector = Sector::new(origin, metadata);
    let sector_origin = sector.origin();
    let mut orphans = Vec::new();
    let mut placed = 0usize;

    for world in worlds {
        let p = world.position;
        let slot = sector
            .quadrants_mut()
            .find(|q| q.contains(p))
            .and_then(|q| q.subsector_containing_mut(p));
        match slot {
            Some(subsector) => {
                if let Some(old) = subsector.place(world) {
                    warn!(
                        "duplicate world at {}: {:?} replaced by a later entry",
                        p.to_hex(),
                        old.name
                    );
                } else {
                    placed += 1;
                }
            }
            None => {
                warn!(
                    "world {:?} at {} lies outside sector at {}",
                    world.name,
                    p,
                    sector_origin
                );
                orphans.push(world);
            }
        }
    }

    for quadrant in sector.quadrants_mut() {
        for subsector in quadrant.subsectors_mut() {
            subsector.sort_worlds();
        }
    }

    debug!(
        "assembled sector {:?}: {} worlds, {} orphans",
        sector.name().unwrap_or(""),
        placed,
        orphans.len()
    );
    Assembly { sector, orphans }
}
