//! Mapping between table columns and [`World`] attributes.
//!
//! Tab-delimited and column-delimited files share one vocabulary of column
//! names, each with a few historical aliases (`Remarks` / `Trade Codes`,
//! `B` / `Bases`, ...). [`FieldMap`] resolves a table's header against it.

use indexmap::IndexMap;
use log::warn;
use travmap_core::{DigitPolicy, Hex, Pbg, Position, TravelCode, Uwp, World};

use crate::error::FormatError;
use crate::table::{Row, Table};

/// A world attribute that can appear as a table column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Field {
    /// Sector abbreviation.
    Sector,
    /// Subsector letter.
    Subsector,
    /// Four-digit hex label.
    Hex,
    /// World name.
    Name,
    /// Universal World Profile.
    Uwp,
    /// Trade codes and remarks.
    Remarks,
    /// Importance extension.
    Importance,
    /// Economic extension.
    Economic,
    /// Cultural extension.
    Cultural,
    /// Nobility codes.
    Nobility,
    /// Base codes.
    Bases,
    /// Travel zone.
    Zone,
    /// Population multiplier, belts, gas giants.
    Pbg,
    /// Worlds in the system.
    Worlds,
    /// Allegiance code.
    Allegiance,
    /// Stellar data.
    Stellar,
    /// Resource units.
    ResourceUnits,
}

impl Field {
    /// Every field.
    pub const ALL: [Field; 17] = [
        Self::Sector,
        Self::Subsector,
        Self::Hex,
        Self::Name,
        Self::Uwp,
        Self::Remarks,
        Self::Importance,
        Self::Economic,
        Self::Cultural,
        Self::Nobility,
        Self::Bases,
        Self::Zone,
        Self::Pbg,
        Self::Worlds,
        Self::Allegiance,
        Self::Stellar,
        Self::ResourceUnits,
    ];

    /// Fields a world table must have.
    pub const REQUIRED: [Field; 3] = [Self::Hex, Self::Name, Self::Uwp];

    /// Header names accepted for this field. The first is canonical.
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            Self::Sector => &["Sector"],
            Self::Subsector => &["SS"],
            Self::Hex => &["Hex"],
            Self::Name => &["Name"],
            Self::Uwp => &["UWP"],
            Self::Remarks => &["Remarks", "Trade Codes", "Comments"],
            Self::Importance => &["{Ix}", "{ Ix }", "Ix"],
            Self::Economic => &["(Ex)", "( Ex )", "Ex"],
            Self::Cultural => &["[Cx]", "[ Cx ]", "Cx"],
            Self::Nobility => &["N", "Nobility"],
            Self::Bases => &["B", "Bases"],
            Self::Zone => &["Z", "Zone"],
            Self::Pbg => &["PBG"],
            Self::Worlds => &["W", "Worlds"],
            Self::Allegiance => &["A", "Al", "Allegiance"],
            Self::Stellar => &["Stellar", "Stars", "Stellar Data"],
            Self::ResourceUnits => &["RU"],
        }
    }

    /// The field a header name refers to.
    pub fn from_header(name: &str) -> Option<Field> {
        let name = name.trim();
        Self::ALL.into_iter().find(|f| f.aliases().contains(&name))
    }
}

/// A table header resolved to [`Field`]s.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldMap {
    columns: IndexMap<Field, String>,
}

impl FieldMap {
    /// Resolve `table`'s header.
    ///
    /// Unknown column names fail the whole table when `strict` and are
    /// logged and ignored otherwise. [`Field::REQUIRED`] columns must be
    /// present either way.
    pub fn resolve(table: &Table, strict: bool) -> Result<Self, FormatError> {
        let mut columns = IndexMap::new();
        for name in &table.fields {
            match Field::from_header(name) {
                Some(field) => {
                    columns.entry(field).or_insert_with(|| name.clone());
                }
                None if strict => {
                    return Err(FormatError::invalid(
                        table.header_line,
                        format!("unrecognized column {name:?}"),
                    ));
                }
                None => warn!("line {}: ignoring unrecognized column {name:?}", table.header_line),
            }
        }
        for field in Field::REQUIRED {
            if !columns.contains_key(&field) {
                return Err(FormatError::invalid(
                    table.header_line,
                    format!("missing required column {:?}", field.aliases()[0]),
                ));
            }
        }
        Ok(Self { columns })
    }

    /// Whether the table has a column for `field`.
    pub fn has(&self, field: Field) -> bool {
        self.columns.contains_key(&field)
    }

    /// `row`'s value for `field`, if the table has that column.
    pub fn value<'r>(&self, row: &'r Row, field: Field) -> Option<&'r str> {
        self.columns.get(&field).and_then(|name| row.get(name))
    }
}

// ── Reading ─────────────────────────────────────────────────────

fn empty_if_dash(s: &str) -> &str {
    let s = s.trim();
    if s == "-" {
        ""
    } else {
        s
    }
}

fn non_empty(s: Option<&str>) -> Option<String> {
    s.map(str::trim).filter(|s| !s.is_empty()).map(String::from)
}

/// Whether `bases` follows the canonical ordering `C D E K M N R S T V W X`,
/// each at most once.
pub fn bases_look_valid(bases: &str) -> bool {
    const ORDER: &str = "CDEKMNRSTVWX";
    let mut next = 0;
    for c in bases.chars() {
        match ORDER[next..].find(c) {
            Some(i) => next += i + 1,
            None => return false,
        }
    }
    true
}

/// Whether `nobility` holds only recognised nobility codes.
pub fn nobility_looks_valid(nobility: &str) -> bool {
    nobility.chars().all(|c| "BcCDeEfFGH".contains(c))
}

/// Whether `stellar` is a space-separated list of stars such as
/// `G2 V`, `M3 VI`, `D`, `BD`, or `BH`.
pub fn stellar_looks_valid(stellar: &str) -> bool {
    const CLASSES: [&str; 7] = ["Ia", "Ib", "II", "III", "IV", "V", "VI"];
    let mut tokens = stellar.split(' ');
    if stellar.is_empty() {
        return true;
    }
    while let Some(token) = tokens.next() {
        if matches!(token, "D" | "BD" | "BH") {
            continue;
        }
        let mut chars = token.chars();
        let spectral = matches!(
            (chars.next(), chars.next(), chars.next()),
            (Some('O' | 'B' | 'A' | 'F' | 'G' | 'K' | 'M'), Some('0'..='9'), None)
        );
        if !spectral || !tokens.next().is_some_and(|class| CLASSES.contains(&class)) {
            return false;
        }
    }
    true
}

/// Build a world from one table row.
///
/// Hex, UWP, PBG, and zone failures are errors; malformed bases, nobility,
/// stellar data, world counts, and resource units are logged and kept.
pub fn world_from_row(
    row: &Row,
    map: &FieldMap,
    origin: Position,
    policy: DigitPolicy,
) -> Result<World, FormatError> {
    let line = row.line_number;
    let get = |field: Field| map.value(row, field);

    let hex: Hex = get(Field::Hex).unwrap_or_default().parse()?;
    if !hex.is_valid() {
        return Err(FormatError::invalid(line, format!("hex {hex} is outside the sector")));
    }
    let uwp = Uwp::parse_with(get(Field::Uwp).unwrap_or_default(), policy)?;
    let mut world = World::new(
        get(Field::Name).unwrap_or_default(),
        uwp,
        Position::from_hex(origin, hex),
    );

    world.remarks = get(Field::Remarks).unwrap_or_default().to_string();
    world.importance = non_empty(get(Field::Importance));
    world.economic = non_empty(get(Field::Economic));
    world.cultural = non_empty(get(Field::Cultural));
    world.allegiance = get(Field::Allegiance).unwrap_or_default().to_string();

    world.nobility = non_empty(get(Field::Nobility).map(empty_if_dash));
    if let Some(nobility) = &world.nobility {
        if !nobility_looks_valid(nobility) {
            warn!("line {line}: unexpected nobility {nobility:?}");
        }
    }

    world.bases = empty_if_dash(get(Field::Bases).unwrap_or_default()).to_string();
    if !bases_look_valid(&world.bases) {
        warn!("line {line}: unexpected bases {:?}", world.bases);
    }

    world.travel_code = empty_if_dash(get(Field::Zone).unwrap_or_default()).parse::<TravelCode>()?;

    if let Some(pbg) = get(Field::Pbg).filter(|p| !p.is_empty()) {
        world.pbg = Pbg::parse_with(pbg, policy)?;
    }

    if let Some(w) = get(Field::Worlds).filter(|w| !w.is_empty()) {
        match w.parse() {
            Ok(count) => world.system_worlds = Some(count),
            Err(_) => warn!("line {line}: ignoring world count {w:?}"),
        }
    }

    if let Some(ru) = get(Field::ResourceUnits).filter(|r| !r.is_empty()) {
        match ru.replace(',', "").parse() {
            Ok(units) => world.resource_units = Some(units),
            Err(_) => warn!("line {line}: ignoring resource units {ru:?}"),
        }
    }

    world.stellar = get(Field::Stellar).unwrap_or_default().to_string();
    if !stellar_looks_valid(&world.stellar) {
        warn!("line {line}: unexpected stellar data {:?}", world.stellar);
    }

    Ok(world)
}

// ── Writing ─────────────────────────────────────────────────────

/// Column order of the Second Survey column-delimited layout.
pub const SECOND_SURVEY_COLUMNS: [&str; 14] = [
    "Hex", "Name", "UWP", "Remarks", "{Ix}", "(Ex)", "[Cx]", "N", "B", "Z", "PBG", "W", "A",
    "Stellar",
];

/// Column order of the tab-delimited layout.
pub const TAB_COLUMNS: [&str; 17] = [
    "Sector", "SS", "Hex", "Name", "UWP", "Bases", "Remarks", "Zone", "PBG", "Allegiance",
    "Stars", "{Ix}", "(Ex)", "[Cx]", "Nobility", "W", "RU",
];

/// Customary minimum widths applied when fields are expanded.
pub const EXPANDED_WIDTHS: [(&str, usize); 2] = [("Name", 20), ("Remarks", 20)];

fn dash_if_empty(s: &str) -> String {
    if s.is_empty() {
        "-".into()
    } else {
        s.into()
    }
}

fn hex_label(world: &World, subsector_hexes: bool) -> String {
    if subsector_hexes {
        world.hex().to_subsector_string()
    } else {
        world.hex().to_string()
    }
}

fn worlds_cell(world: &World) -> String {
    world
        .system_worlds
        .filter(|&w| w > 0)
        .map(|w| w.to_string())
        .unwrap_or_default()
}

/// One Second Survey row, in [`SECOND_SURVEY_COLUMNS`] order.
pub fn second_survey_cells(world: &World, subsector_hexes: bool) -> Vec<String> {
    vec![
        hex_label(world, subsector_hexes),
        world.name.clone(),
        world.uwp.to_string(),
        world.remarks.clone(),
        world.importance.clone().unwrap_or_default(),
        world.economic.clone().unwrap_or_default(),
        world.cultural.clone().unwrap_or_default(),
        dash_if_empty(world.nobility.as_deref().unwrap_or_default()),
        dash_if_empty(&world.bases),
        dash_if_empty(world.travel_code.code()),
        world.pbg.to_string(),
        worlds_cell(world),
        world.allegiance.clone(),
        world.stellar.clone(),
    ]
}

/// One tab-delimited row, in [`TAB_COLUMNS`] order.
pub fn tab_cells(world: &World, sector_abbreviation: &str, subsector_hexes: bool) -> Vec<String> {
    vec![
        sector_abbreviation.to_string(),
        world.subsector_letter().to_string(),
        hex_label(world, subsector_hexes),
        world.name.clone(),
        world.uwp.to_string(),
        world.bases.clone(),
        world.remarks.clone(),
        world.travel_code.code().to_string(),
        world.pbg.to_string(),
        world.allegiance.clone(),
        world.stellar.clone(),
        world.importance.clone().unwrap_or_default(),
        world.economic.clone().unwrap_or_default(),
        world.cultural.clone().unwrap_or_default(),
        world.nobility.clone().unwrap_or_default(),
        worlds_cell(world),
        world.resource_units.map(|ru| ru.to_string()).unwrap_or_default(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use travmap_core::CodecError;

    fn table(text: &str) -> Table {
        Table::parse_tab(text).unwrap()
    }

    #[test]
    fn aliases_resolve() {
        assert_eq!(Field::from_header("Trade Codes"), Some(Field::Remarks));
        assert_eq!(Field::from_header("{ Ix }"), Some(Field::Importance));
        assert_eq!(Field::from_header("Al"), Some(Field::Allegiance));
        assert_eq!(Field::from_header("Stellar Data"), Some(Field::Stellar));
        assert_eq!(Field::from_header("SS"), Some(Field::Subsector));
        assert_eq!(Field::from_header("Routes"), None);
        for field in Field::ALL {
            assert_eq!(Field::from_header(field.aliases()[0]), Some(field));
        }
    }

    #[test]
    fn unknown_columns_depend_on_strictness() {
        let t = table("Hex\tName\tUWP\tRoutes\n");
        let err = FieldMap::resolve(&t, true).unwrap_err();
        assert!(matches!(err, FormatError::InvalidFormat { line: Some(1), .. }));
        let map = FieldMap::resolve(&t, false).unwrap();
        assert!(map.has(Field::Uwp));
    }

    #[test]
    fn required_columns() {
        let t = table("Hex\tName\n");
        assert!(FieldMap::resolve(&t, false).is_err());
    }

    #[test]
    fn row_to_world() {
        let t = table(
            "Hex\tName\tUWP\tB\tZ\tN\tPBG\tW\tRU\tStars\tA\n\
             1910\tRegina\tA788899-C\tNS\t-\t-\t703\t8\t4,108\tF7 V BD M3 V\tImDd\n",
        );
        let map = FieldMap::resolve(&t, true).unwrap();
        let w = world_from_row(&t.rows[0], &map, Position::ORIGIN, DigitPolicy::Strict).unwrap();
        assert_eq!(w.name, "Regina");
        assert_eq!(w.position, Position::new(18, 9));
        assert_eq!(w.bases, "NS");
        assert_eq!(w.travel_code, TravelCode::Green);
        assert_eq!(w.nobility, None);
        assert_eq!(w.gas_giants(), 3);
        assert_eq!(w.system_worlds, Some(8));
        assert_eq!(w.resource_units, Some(4108));
        assert_eq!(w.importance, None);
        assert_eq!(w.allegiance, "ImDd");
    }

    #[test]
    fn bad_rows_are_errors() {
        let t = table("Hex\tName\tUWP\tZ\n0000\tA\tA788899-C\t\n0101\tB\tA78?899-C\t\n0102\tC\tA788899-C\tQ\n");
        let map = FieldMap::resolve(&t, true).unwrap();
        let results: Vec<_> = t
            .rows
            .iter()
            .map(|r| world_from_row(r, &map, Position::ORIGIN, DigitPolicy::Strict))
            .collect();
        assert!(matches!(results[0], Err(FormatError::InvalidFormat { line: Some(2), .. })));
        assert!(matches!(
            results[1],
            Err(FormatError::Codec(CodecError::InvalidDigit { digit: '?' }))
        ));
        assert!(matches!(results[2], Err(FormatError::Codec(_))));

        let lenient = world_from_row(&t.rows[1], &map, Position::ORIGIN, DigitPolicy::LenientZero).unwrap();
        assert_eq!(lenient.uwp.hydrographics.value(), 0);
    }

    #[test]
    fn soft_checks() {
        assert!(bases_look_valid(""));
        assert!(bases_look_valid("NS"));
        assert!(bases_look_valid("CDEKMNRSTVWX"));
        assert!(!bases_look_valid("SN"));
        assert!(!bases_look_valid("NN"));
        assert!(!bases_look_valid("A"));
        assert!(nobility_looks_valid("BcCeF"));
        assert!(!nobility_looks_valid("Z"));
        assert!(stellar_looks_valid(""));
        assert!(stellar_looks_valid("F7 V BD M3 V"));
        assert!(stellar_looks_valid("G2 Ia D"));
        assert!(!stellar_looks_valid("G2"));
        assert!(!stellar_looks_valid("Q2 V"));
        assert!(!stellar_looks_valid("G2 X"));
    }

    #[test]
    fn writer_cells() {
        let mut w = World::new("Roup", "C7A5764-A".parse().unwrap(), Position::new(19, 6));
        w.travel_code = TravelCode::Amber;
        w.system_worlds = Some(0);
        let ss = second_survey_cells(&w, false);
        assert_eq!(ss.len(), SECOND_SURVEY_COLUMNS.len());
        assert_eq!(ss[0], "2007");
        assert_eq!(&ss[7..10], ["-", "-", "A"]);
        assert_eq!(ss[11], "");
        assert_eq!(second_survey_cells(&w, true)[0], "0407");

        let tab = tab_cells(&w, "Spin", false);
        assert_eq!(tab.len(), TAB_COLUMNS.len());
        assert_eq!(&tab[..3], ["Spin", "C", "2007"]);
        assert_eq!(tab[16], "");
    }
}
