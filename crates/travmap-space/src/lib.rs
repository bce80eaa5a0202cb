//! Hex-grid geometry and the world-holder tree.
//!
//! - [`astrometrics`]: offsets, distances, adjacency, and jump ranges on
//!   the odd-q Traveller grid
//! - [`WorldHolder`] with [`SubSector`], [`Quadrant`], [`Sector`], and
//!   [`Galaxy`]: nested fixed-size containers where only subsectors store
//!   worlds
//! - [`assemble`]: turn a flat world list plus metadata into a [`Sector`]

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod assembly;
pub mod astrometrics;
pub mod holder;

#[cfg(test)]
pub(crate) mod compliance;

pub use assembly::{assemble, Assembly};
pub use holder::{Galaxy, Quadrant, QuadrantId, Sector, SubSector, WorldHolder};
