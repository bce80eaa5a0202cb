//! World files: read any table layout into worlds, write a sector's worlds
//! back out in a chosen layout.

use log::{debug, warn};
use travmap_core::{SectorMetadata, World};
use travmap_space::{Sector, WorldHolder};

use crate::error::{FormatError, RowError};
use crate::fields::{
    second_survey_cells, tab_cells, world_from_row, Field, FieldMap, EXPANDED_WIDTHS,
    SECOND_SURVEY_COLUMNS, TAB_COLUMNS,
};
use crate::options::{LineEnding, ParseOptions, SerializeOptions};
use crate::sec::{parse_sec, sec_row, SecWorlds, SEC_HEADER};
use crate::table::{sniff_table, write_tab, ColumnSerializer, Table, TableKind};

/// Worlds read from one world file.
#[derive(Debug)]
pub struct WorldTable {
    /// Layout the file was read as.
    pub kind: TableKind,
    /// Worlds in file order.
    pub worlds: Vec<World>,
    /// Rows that could not be read, in line order.
    pub errors: Vec<RowError>,
    /// First non-empty `Sector` column value, if the layout has one.
    pub sector_abbreviation: Option<String>,
}

/// Read a world file, detecting its layout.
///
/// `metadata`, when given, supplies allegiance base codes for decoding
/// legacy SEC bases.
pub fn parse_worlds(
    text: &str,
    options: &ParseOptions,
    metadata: Option<&SectorMetadata>,
) -> Result<WorldTable, FormatError> {
    let kind = sniff_table(text)?;
    parse_worlds_as(text, kind, options, metadata)
}

/// Read a world file in a known layout.
pub fn parse_worlds_as(
    text: &str,
    kind: TableKind,
    options: &ParseOptions,
    metadata: Option<&SectorMetadata>,
) -> Result<WorldTable, FormatError> {
    let origin = options.sector_origin();
    let parsed = match kind {
        TableKind::Sec => {
            let SecWorlds { worlds, errors } = parse_sec(text, origin, options.digit_policy, metadata);
            WorldTable {
                kind,
                worlds,
                errors,
                sector_abbreviation: None,
            }
        }
        TableKind::Tab | TableKind::Column => {
            let table = if kind == TableKind::Tab {
                Table::parse_tab(text)?
            } else {
                Table::parse_columns(text, options.strict)?
            };
            let map = FieldMap::resolve(&table, options.strict)?;
            let Table { rows, mut errors, .. } = table;

            let mut worlds = Vec::with_capacity(rows.len());
            let mut sector_abbreviation = None;
            for row in &rows {
                if sector_abbreviation.is_none() {
                    sector_abbreviation = map
                        .value(row, Field::Sector)
                        .filter(|s| !s.is_empty())
                        .map(String::from);
                }
                match world_from_row(row, &map, origin, options.digit_policy) {
                    Ok(world) => worlds.push(world),
                    Err(e) => errors.push(RowError::new(row.line_number, &row.line, e)),
                }
            }
            errors.sort_by_key(|e| e.line_number);
            WorldTable {
                kind,
                worlds,
                errors,
                sector_abbreviation,
            }
        }
    };
    debug!(
        "read {} worlds as {} ({} row errors)",
        parsed.worlds.len(),
        parsed.kind,
        parsed.errors.len()
    );
    Ok(parsed)
}

// ── Writing ─────────────────────────────────────────────────────

fn push_line(out: &mut String, line: &str, line_ending: LineEnding) {
    out.push_str(line);
    out.push_str(line_ending.as_str());
}

/// `#` comment block describing the sector: names, location, credits,
/// subsector names, and the allegiances its worlds use.
fn metadata_comments(sector: &Sector, line_ending: LineEnding) -> String {
    let info = sector.sector_metadata();
    let mut lines = Vec::new();
    if let Some(name) = info.primary_name() {
        lines.push(format!("# {name}"));
    }
    let (sx, sy) = sector.location();
    lines.push(format!("# {sx},{sy}"));
    lines.push(String::new());
    for name in &info.names {
        lines.push(format!("# Name: {name}"));
    }
    if let Some(abbreviation) = &info.abbreviation {
        lines.push(format!("# Abbreviation: {abbreviation}"));
    }
    lines.push(String::new());

    let credits = &info.credits;
    let credit_lines = [
        ("Author", &credits.author),
        ("Publisher", &credits.publisher),
        ("Copyright", &credits.copyright),
        ("Source", &credits.source),
        ("Ref", &credits.reference),
    ];
    let mut any_credit = false;
    for (label, value) in credit_lines {
        if let Some(value) = value {
            lines.push(format!("# {:<11}{value}", format!("{label}:")));
            any_credit = true;
        }
    }
    if any_credit {
        lines.push(String::new());
    }

    for subsector in sector.subsectors() {
        let letter = subsector.letter();
        let name = info.subsector_name(letter).or(subsector.name()).unwrap_or_default();
        lines.push(format!("# Subsector {letter}: {name}").trim_end().to_string());
    }
    lines.push(String::new());

    let mut codes: Vec<&str> = sector.worlds().map(|w| w.allegiance.as_str()).collect();
    codes.sort_unstable();
    codes.dedup();
    let mut any_allegiance = false;
    for code in codes {
        if let Some(allegiance) = info.allegiance(code) {
            lines.push(format!("# Alleg: {code}: \"{}\"", allegiance.name));
            any_allegiance = true;
        }
    }
    if any_allegiance {
        lines.push(String::new());
    }

    let mut out = String::new();
    for line in lines {
        push_line(&mut out, &line, line_ending);
    }
    out
}

fn abbreviation(info: &SectorMetadata) -> String {
    info.abbreviation.clone().unwrap_or_else(|| {
        info.primary_name()
            .map(|n| n.chars().take(4).collect())
            .unwrap_or_default()
    })
}

/// Write every world of `sector` in the `kind` layout, ordered by
/// subsector letter and then position.
pub fn write_worlds(sector: &Sector, kind: TableKind, options: &SerializeOptions) -> String {
    let info = sector.sector_metadata();
    let eol = options.line_ending;
    let mut out = String::new();
    if options.include_metadata {
        out.push_str(&metadata_comments(sector, eol));
    }

    match kind {
        TableKind::Column => {
            let mut table = ColumnSerializer::new(SECOND_SURVEY_COLUMNS);
            if options.expand_fields {
                for (column, width) in EXPANDED_WIDTHS {
                    table.set_minimum_width(column, width);
                }
            }
            for world in sector.worlds() {
                if let Err(e) = table.add_row(second_survey_cells(world, options.subsector_hexes)) {
                    warn!("skipping {:?}: {e}", world.name);
                }
            }
            out.push_str(&table.write(options.include_header, eol));
        }
        TableKind::Tab => {
            let abbreviation = abbreviation(info);
            let rows: Vec<Vec<String>> = sector
                .worlds()
                .map(|w| tab_cells(w, &abbreviation, options.subsector_hexes))
                .collect();
            out.push_str(&write_tab(&TAB_COLUMNS, &rows, options.include_header, eol));
        }
        TableKind::Sec => {
            if options.include_header {
                for line in SEC_HEADER {
                    push_line(&mut out, line, eol);
                }
            }
            for world in sector.worlds() {
                let hex = if options.subsector_hexes {
                    world.hex().to_subsector_string()
                } else {
                    world.hex().to_string()
                };
                push_line(&mut out, &sec_row(world, &hex, Some(info)), eol);
            }
        }
    }
    debug!("wrote {} worlds as {kind}", sector.world_count());
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use travmap_core::{Allegiance, Position};
    use travmap_space::assemble;
    use travmap_test_utils::{fixtures, regina_worlds, spinward_origin};

    fn options() -> ParseOptions {
        let (sx, sy) = fixtures::SPINWARD_MARCHES;
        ParseOptions::default().at(sx, sy)
    }

    fn regina_sector() -> Sector {
        let mut info = SectorMetadata::default();
        info.names.push("Spinward Marches".into());
        info.abbreviation = Some("Spin".into());
        assemble(spinward_origin(), regina_worlds(), info).sector
    }

    #[test]
    fn each_fixture_reads_the_same_worlds() {
        for (text, kind) in [
            (fixtures::SECOND_SURVEY, TableKind::Column),
            (fixtures::TAB_DELIMITED, TableKind::Tab),
            (fixtures::LEGACY_SEC, TableKind::Sec),
        ] {
            let parsed = parse_worlds(text, &options(), None).unwrap();
            assert_eq!(parsed.kind, kind);
            assert!(parsed.errors.is_empty(), "{kind}: {:?}", parsed.errors);
            let names: Vec<&str> = parsed.worlds.iter().map(|w| w.name.as_str()).collect();
            assert_eq!(names, ["Zeycude", "Reno", "Efate", "Regina", "Roup", "Ruie", ""]);
            let regina = &parsed.worlds[3];
            assert_eq!(regina.position, spinward_origin() + Position::new(18, 9));
            assert_eq!(regina.bases, "NS");
            assert_eq!(regina.stellar, "F7 V BD M3 V");
        }
    }

    #[test]
    fn column_fixture_matches_values() {
        let parsed = parse_worlds(fixtures::SECOND_SURVEY, &options(), None).unwrap();
        assert_eq!(parsed.worlds, regina_worlds());
    }

    #[test]
    fn tab_fixture_carries_the_abbreviation() {
        let parsed = parse_worlds(fixtures::TAB_DELIMITED, &options(), None).unwrap();
        assert_eq!(parsed.sector_abbreviation.as_deref(), Some("Spin"));
        let units: Vec<i64> = parsed.worlds.iter().filter_map(|w| w.resource_units).collect();
        assert_eq!(units, travmap_test_utils::REGINA_RESOURCE_UNITS);
    }

    #[test]
    fn writers_reproduce_fixtures() {
        let sector = regina_sector();
        let options = SerializeOptions::default();
        assert_eq!(write_worlds(&sector, TableKind::Column, &options), fixtures::SECOND_SURVEY);
        assert_eq!(write_worlds(&sector, TableKind::Sec, &options), fixtures::LEGACY_SEC);
    }

    #[test]
    fn tab_round_trip() {
        let parsed = parse_worlds(fixtures::TAB_DELIMITED, &options(), None).unwrap();
        let sector = assemble(spinward_origin(), parsed.worlds, SectorMetadata {
            abbreviation: parsed.sector_abbreviation,
            ..SectorMetadata::default()
        })
        .sector;
        assert_eq!(
            write_worlds(&sector, TableKind::Tab, &SerializeOptions::default()),
            fixtures::TAB_DELIMITED
        );
    }

    #[test]
    fn row_errors_do_not_abort() {
        let text = "Hex\tName\tUWP\n0101\tGood\tA788899-C\n0102\tBad\tA78\n0103\tAlso good\tX000000-0\n";
        let parsed = parse_worlds(text, &ParseOptions::default(), None).unwrap();
        assert_eq!(parsed.worlds.len(), 2);
        assert_eq!(parsed.errors.len(), 1);
        assert_eq!(parsed.errors[0].line_number, 3);
    }

    #[test]
    fn metadata_block_is_commented() {
        let mut sector = regina_sector();
        let info = sector.sector_metadata_mut();
        info.allegiances.push(Allegiance::new("ImDd", "Third Imperium, Domain of Deneb"));
        info.credits.author = Some("Marc Miller".into());
        info.subsector_names.insert('C', "Regina".into());
        let options = SerializeOptions {
            include_metadata: true,
            ..SerializeOptions::default()
        };
        let text = write_worlds(&sector, TableKind::Column, &options);
        assert!(text.starts_with("# Spinward Marches\n# -4,-1\n\n# Name: Spinward Marches\n# Abbreviation: Spin\n"));
        assert!(text.contains("\n# Author:    Marc Miller\n"));
        assert!(text.contains("\n# Subsector C: Regina\n"));
        assert!(text.contains("\n# Subsector D:\n"));
        assert!(text.contains("\n# Alleg: ImDd: \"Third Imperium, Domain of Deneb\"\n"));

        let reparsed = parse_worlds(&text, &self::options(), None).unwrap();
        assert_eq!(reparsed.worlds, regina_worlds());
    }

    #[test]
    fn subsector_hexes_and_crlf() {
        let options = SerializeOptions {
            include_header: false,
            subsector_hexes: true,
            line_ending: LineEnding::CrLf,
            ..SerializeOptions::default()
        };
        let text = write_worlds(&regina_sector(), TableKind::Tab, &options);
        let first = text.split("\r\n").next().unwrap();
        assert!(first.starts_with("Spin\tA\t0101\tZeycude\t"));
        assert!(text.contains("\tC\t0310\tRegina\t"));
        assert!(text.ends_with("\r\n"));
    }
}
