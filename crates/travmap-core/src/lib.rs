//! Core value types for Traveller sector data.
//!
//! This crate holds the vocabulary every other travmap crate speaks:
//!
//! - [`ehex`]: the extended-hex digit alphabet used by world profiles
//! - [`Position`] and [`Frame`]: absolute hex coordinates and the fixed
//!   subsector/quadrant/sector frames they reduce into
//! - [`Hex`]: the 1-based `XXYY` labels used inside a sector
//! - [`Uwp`], [`Pbg`], [`TravelCode`], [`World`]: a system's main world
//! - [`metadata`]: allegiances, borders, regions, routes, and labels
//!
//! Everything here is a plain value type; spatial containers live in
//! `travmap-space` and file formats in `travmap-format`.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod ehex;
pub mod error;
pub mod hex;
pub mod metadata;
pub mod position;
pub mod uwp;
pub mod world;

pub use ehex::{DigitPolicy, EHex};
pub use error::{CodecError, ValueKind};
pub use hex::Hex;
pub use metadata::{
    Allegiance, Border, HexPath, Label, LabelRender, Metadata, Region, Route, RouteEnd,
    SectorMetadata, SectorOffset,
};
pub use position::{Frame, Position, QUADRANT_SIZE, SECTOR_SIZE, SUBSECTOR_SIZE};
pub use uwp::{Starport, Uwp};
pub use world::{Pbg, TravelCode, World};
