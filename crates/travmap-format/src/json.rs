//! JSON sector documents: metadata plus a world list.

use serde::{Deserialize, Serialize};
use travmap_core::{Position, SectorMetadata, World};
use travmap_space::{assemble, Assembly, Sector, WorldHolder};

use crate::error::FormatError;
use crate::options::ParseOptions;

/// Serialized form of a sector.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SectorDocument {
    /// Sector-grid location `[sx, sy]`. When absent the reader's
    /// [`ParseOptions::sector_location`] is used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<(i32, i32)>,
    /// Names, allegiances, and overlays.
    #[serde(default)]
    pub metadata: SectorMetadata,
    /// Worlds, with absolute positions.
    #[serde(default)]
    pub worlds: Vec<World>,
}

impl SectorDocument {
    /// Snapshot of `sector`.
    pub fn from_sector(sector: &Sector) -> Self {
        Self {
            location: Some(sector.location()),
            metadata: sector.sector_metadata().clone(),
            worlds: sector.worlds().cloned().collect(),
        }
    }

    /// Place the worlds into a sector.
    pub fn assemble(self, options: &ParseOptions) -> Assembly {
        let (sx, sy) = self.location.unwrap_or(options.sector_location);
        let origin = Position::sector_origin(sx, sy);
        assemble(origin, self.worlds, self.metadata)
    }
}

/// Read a JSON sector document.
pub fn parse_json(text: &str) -> Result<SectorDocument, FormatError> {
    Ok(serde_json::from_str(text)?)
}

/// Write `sector` as pretty-printed JSON.
pub fn to_json(sector: &Sector) -> Result<String, FormatError> {
    Ok(serde_json::to_string_pretty(&SectorDocument::from_sector(sector))?)
}
