//! Readers and writers for Traveller sector files.
//!
//! World data comes in three table layouts, all detected from content:
//!
//! - tab-delimited, one header row of column names
//! - Second Survey column-delimited, a header row over a rule of dashes
//!   that fixes each column's span
//! - legacy SEC, fixed-width rows matched field by field
//!
//! Sector metadata (names, allegiances, borders, routes, labels) is read
//! from and written to the MSEC line format by [`msec`], and a whole
//! sector round-trips through JSON via [`json`].
//!
//! [`try_parse_sector`] and [`serialize_sector`] pick the right reader or
//! writer from a file extension. Malformed rows never abort a parse: they
//! are collected as [`RowError`]s next to the worlds that did read.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod fields;
pub mod json;
pub mod msec;
pub mod options;
pub mod registry;
pub mod sec;
pub mod table;
pub mod worlds;

pub use error::{FormatError, RowError};
pub use fields::{Field, FieldMap};
pub use json::{parse_json, to_json, SectorDocument};
pub use msec::{parse_msec, sniff_metadata, write_msec, MetadataKind, MsecHeader};
pub use options::{LineEnding, ParseOptions, SerializeOptions};
pub use registry::{
    can_parse, parse_metadata, serialize_sector, try_parse_sector, ParsedSector, SectorFormat,
};
pub use table::{sniff_table, ColumnSerializer, Row, Table, TableKind};
pub use worlds::{parse_worlds, parse_worlds_as, write_worlds, WorldTable};
