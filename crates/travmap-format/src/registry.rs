//! Reader and writer selection by file extension.

use log::info;
use travmap_core::{SectorMetadata, World};
use travmap_space::{assemble, Sector, WorldHolder};

use crate::error::{FormatError, RowError};
use crate::json::{parse_json, to_json};
use crate::msec::{parse_msec, sniff_metadata, MetadataKind};
use crate::options::{ParseOptions, SerializeOptions};
use crate::table::TableKind;
use crate::worlds::{parse_worlds, write_worlds};

/// Family of sector file a reader handles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SectorFormat {
    /// [`crate::json::SectorDocument`].
    Json,
    /// Any world table; the layout is sniffed from the content.
    Tabular,
}

impl SectorFormat {
    /// Every format, in lookup order.
    pub const ALL: [SectorFormat; 2] = [Self::Json, Self::Tabular];

    /// File extensions handled, lowercase and without the dot.
    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            Self::Json => &["json"],
            Self::Tabular => &["tab", "tsv", "txt", "sec", "t5", "t5col", "t5tab"],
        }
    }

    /// Format for `extension` (case-insensitive, leading dot optional).
    pub fn from_extension(extension: &str) -> Option<Self> {
        let ext = extension.trim().trim_start_matches('.').to_ascii_lowercase();
        Self::ALL.into_iter().find(|f| f.extensions().contains(&ext.as_str()))
    }
}

/// Whether a reader exists for `extension`.
pub fn can_parse(extension: &str) -> bool {
    SectorFormat::from_extension(extension).is_some()
}

/// Result of [`try_parse_sector`].
#[derive(Debug)]
pub struct ParsedSector {
    /// The assembled sector.
    pub sector: Sector,
    /// Format family the file was read as.
    pub format: SectorFormat,
    /// Table layout, for tabular files.
    pub table_kind: Option<TableKind>,
    /// Rows that could not be read.
    pub row_errors: Vec<RowError>,
    /// Worlds that fell outside the sector.
    pub orphans: Vec<World>,
}

/// Read a metadata document, detecting its kind.
pub fn parse_metadata(text: &str, options: &ParseOptions) -> Result<SectorMetadata, FormatError> {
    match sniff_metadata(text) {
        MetadataKind::Msec => parse_msec(text, options),
        MetadataKind::Xml => Err(FormatError::Unsupported {
            format: "XML metadata".into(),
        }),
    }
}

/// Read a sector from a world file plus optional metadata.
///
/// The reader is chosen by `extension`. Metadata text, when given,
/// overrides any metadata embedded in the world file.
pub fn try_parse_sector(
    extension: &str,
    text: &str,
    metadata: Option<&str>,
    options: &ParseOptions,
) -> Result<ParsedSector, FormatError> {
    let format = SectorFormat::from_extension(extension).ok_or_else(|| FormatError::Unsupported {
        format: extension.to_string(),
    })?;
    let metadata = metadata.map(|m| parse_metadata(m, options)).transpose()?;

    let parsed = match format {
        SectorFormat::Json => {
            let mut doc = parse_json(text)?;
            if let Some(metadata) = metadata {
                doc.metadata = metadata;
            }
            let assembly = doc.assemble(options);
            ParsedSector {
                sector: assembly.sector,
                format,
                table_kind: None,
                row_errors: Vec::new(),
                orphans: assembly.orphans,
            }
        }
        SectorFormat::Tabular => {
            let table = parse_worlds(text, options, metadata.as_ref())?;
            let mut info = metadata.unwrap_or_default();
            if info.abbreviation.is_none() {
                info.abbreviation = table.sector_abbreviation;
            }
            let assembly = assemble(options.sector_origin(), table.worlds, info);
            ParsedSector {
                sector: assembly.sector,
                format,
                table_kind: Some(table.kind),
                row_errors: table.errors,
                orphans: assembly.orphans,
            }
        }
    };
    info!(
        "parsed sector {:?} from .{extension}: {} worlds, {} row errors, {} orphans",
        parsed.sector.name().unwrap_or("(unnamed)"),
        parsed.sector.world_count(),
        parsed.row_errors.len(),
        parsed.orphans.len()
    );
    Ok(parsed)
}

/// Table layout written for a world-file extension.
fn table_kind_for(extension: &str) -> Option<TableKind> {
    match extension.to_ascii_lowercase().as_str() {
        "tab" | "tsv" | "t5tab" => Some(TableKind::Tab),
        "txt" | "t5" | "t5col" => Some(TableKind::Column),
        "sec" => Some(TableKind::Sec),
        _ => None,
    }
}

/// Write `sector` in the format implied by `extension`.
pub fn serialize_sector(
    sector: &Sector,
    extension: &str,
    options: &SerializeOptions,
) -> Result<String, FormatError> {
    let ext = extension.trim().trim_start_matches('.');
    if SectorFormat::from_extension(ext) == Some(SectorFormat::Json) {
        return to_json(sector);
    }
    let kind = table_kind_for(ext).ok_or_else(|| FormatError::Unsupported {
        format: extension.to_string(),
    })?;
    Ok(write_worlds(sector, kind, options))
}

#[cfg(test)]
mod tests {
    use super::*;
    use travmap_test_utils::{fixtures, regina_worlds};

    fn options() -> ParseOptions {
        let (sx, sy) = fixtures::SPINWARD_MARCHES;
        ParseOptions::default().at(sx, sy)
    }

    #[test]
    fn extensions() {
        assert_eq!(SectorFormat::from_extension(".JSON"), Some(SectorFormat::Json));
        assert_eq!(SectorFormat::from_extension("sec"), Some(SectorFormat::Tabular));
        assert!(can_parse("tab"));
        assert!(!can_parse("xml"));
        assert!(!can_parse(""));
    }

    #[test]
    fn unknown_extension_is_unsupported() {
        let err = try_parse_sector("xls", "", None, &options()).unwrap_err();
        assert!(matches!(err, FormatError::Unsupported { format } if format == "xls"));
    }

    #[test]
    fn xml_metadata_is_unsupported() {
        let err = try_parse_sector("txt", fixtures::SECOND_SURVEY, Some("<Sector/>"), &options())
            .unwrap_err();
        assert!(matches!(err, FormatError::Unsupported { .. }));
    }

    #[test]
    fn tabular_with_metadata() {
        let parsed = try_parse_sector(
            "tab",
            fixtures::TAB_DELIMITED,
            Some(fixtures::SPINWARD_MSEC),
            &options(),
        )
        .unwrap();
        assert_eq!(parsed.format, SectorFormat::Tabular);
        assert_eq!(parsed.table_kind, Some(TableKind::Tab));
        assert_eq!(parsed.sector.name(), Some("Spinward Marches"));
        assert_eq!(parsed.sector.sector_metadata().abbreviation.as_deref(), Some("Spin"));
        assert_eq!(parsed.sector.subsector('C').and_then(|s| s.name()), Some("Regina"));
        assert_eq!(parsed.sector.world_count(), 7);
        assert!(parsed.row_errors.is_empty());
        assert!(parsed.orphans.is_empty());
    }

    #[test]
    fn serialize_by_extension() {
        let parsed = try_parse_sector("txt", fixtures::SECOND_SURVEY, None, &options()).unwrap();
        let options = SerializeOptions::default();
        assert_eq!(serialize_sector(&parsed.sector, "sec", &options).unwrap(), fixtures::LEGACY_SEC);
        assert_eq!(serialize_sector(&parsed.sector, ".txt", &options).unwrap(), fixtures::SECOND_SURVEY);
        assert!(serialize_sector(&parsed.sector, "xml", &options).is_err());

        let json = serialize_sector(&parsed.sector, "json", &options).unwrap();
        let back = try_parse_sector("json", &json, None, &ParseOptions::default()).unwrap();
        let worlds: Vec<World> = back.sector.worlds().cloned().collect();
        let mut expected = regina_worlds();
        expected.sort_by_key(|w| (w.subsector_letter(), w.position));
        assert_eq!(worlds, expected);
    }
}
