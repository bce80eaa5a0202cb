//! travmap: Traveller sector data, from file to hex grid and back.
//!
//! This is the facade crate that re-exports the public API of the travmap
//! sub-crates. Most users only need this one dependency.
//!
//! # Quick start
//!
//! ```rust
//! use travmap::prelude::*;
//! use travmap::space::astrometrics::within_jump;
//!
//! let text = "\
//! Hex  Name   UWP       Remarks PBG A
//! ---- ------ --------- ------- --- ----
//! 1910 Regina A788899-C Ri Pa   703 ImDd
//! 1810 Efate  A646930-D Hi In   704 ImDd
//! 2520 Remote X420000-0 Ba      004 Na
//! ";
//!
//! let parsed = try_parse_sector("txt", text, None, &ParseOptions::default().at(-4, -1)).unwrap();
//! assert!(parsed.row_errors.is_empty());
//!
//! let sector = &parsed.sector;
//! assert_eq!(sector.world_count(), 3);
//! assert_eq!(sector.subsector('C').unwrap().world_count(), 2);
//!
//! let regina = sector.worlds().find(|w| w.name == "Regina").unwrap();
//! assert_eq!(regina.uwp.starport, Starport::A);
//! let near: Vec<&str> = within_jump(regina.position, 2, sector.worlds())
//!     .iter()
//!     .map(|w| w.name.as_str())
//!     .collect();
//! assert_eq!(near, ["Efate"]);
//!
//! let sec = serialize_sector(sector, "sec", &SerializeOptions::default()).unwrap();
//! assert!(sec.contains("Regina        1910 A788899-C"));
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `travmap-core` | eHex digits, UWP/PBG, worlds, positions, metadata |
//! | [`space`] | `travmap-space` | Grid astrometrics and the world-holder tree |
//! | [`format`] | `travmap-format` | World tables, SEC, MSEC, and JSON |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Value types (`travmap-core`).
///
/// [`types::World`] and its profile codecs, [`types::Position`] and
/// [`types::Hex`] coordinates, and [`types::SectorMetadata`].
pub use travmap_core as types;

/// Grid geometry and world holders (`travmap-space`).
///
/// Distances and jump ranges live in [`space::astrometrics`]; the holder
/// tree is rooted at [`space::Galaxy`] and [`space::Sector`].
pub use travmap_space as space;

/// Sector file readers and writers (`travmap-format`).
///
/// [`format::try_parse_sector`] and [`format::serialize_sector`] choose a
/// codec by file extension.
pub use travmap_format as format;

/// Common imports for typical travmap usage.
///
/// ```rust
/// use travmap::prelude::*;
/// ```
pub mod prelude {
    // Values
    pub use travmap_core::{
        DigitPolicy, EHex, Hex, Pbg, Position, SectorMetadata, Starport, TravelCode, Uwp, World,
    };

    // Errors
    pub use travmap_core::CodecError;
    pub use travmap_format::{FormatError, RowError};

    // Holders
    pub use travmap_space::{assemble, Galaxy, Sector, SubSector, WorldHolder};

    // Formats
    pub use travmap_format::{
        parse_msec, serialize_sector, try_parse_sector, write_msec, ParseOptions,
        SerializeOptions, TableKind,
    };
}
