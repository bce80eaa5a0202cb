//! Legacy fixed-width SEC rows and base codes.
//!
//! SEC files have no header; each world row is recognised by shape:
//!
//! ```text
//! Regina        1910 A788899-C  A Ri Pa Ph An Cp     703 Im F7 V BD M3 V
//! ```
//!
//! Column positions drift between files, so [`match_line`] finds the
//! fields by backtracking over the permitted spacing rather than by fixed
//! offsets. The leftmost-longest reading wins: the hex is taken as far
//! right as possible, optional runs of one or two spaces prefer two, and
//! the remarks field is as short as the rest of the row allows.

use log::{debug, warn};
use travmap_core::{DigitPolicy, Hex, Pbg, Position, SectorMetadata, Uwp, World};

use crate::error::{FormatError, RowError};
use crate::fields::stellar_looks_valid;

/// Fields of one SEC world row, as text.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SecLine {
    /// Name, trimmed.
    pub name: String,
    /// Four-digit hex label.
    pub hex: String,
    /// Nine-character UWP.
    pub uwp: String,
    /// One-character legacy base code; blank when none.
    pub base: char,
    /// Trade codes and comments, trimmed.
    pub codes: String,
    /// One-character zone; `None` when the column is absent.
    pub zone: Option<char>,
    /// Three-character PBG.
    pub pbg: String,
    /// Two-character allegiance.
    pub allegiance: String,
    /// Whatever follows the allegiance, trimmed. Usually stellar data.
    pub rest: String,
}

// ── Matching ────────────────────────────────────────────────────

fn is_space(chars: &[char], i: usize) -> bool {
    chars.get(i).is_some_and(|c| c.is_whitespace())
}

/// Positions reachable from `i` by skipping one or two whitespace
/// characters, longest first.
fn one_or_two_spaces(chars: &[char], i: usize) -> impl Iterator<Item = usize> {
    let run = (0..2).take_while(|&k| is_space(chars, i + k)).count();
    (1..=run).rev().map(move |k| i + k)
}

fn is_uwp(chars: &[char], i: usize) -> bool {
    let Some(s) = chars.get(i..i + Uwp::LEN) else {
        return false;
    };
    let alnum = |c: char| c.is_ascii_digit() || c.is_ascii_uppercase();
    "ABCDEX".contains(s[0]) && s[1..7].iter().all(|&c| alnum(c)) && s[7] == '-' && alnum(s[8])
}

fn is_base(c: char) -> bool {
    matches!(c, 'A'..='Z' | 'r' | '1'..='9' | '*' | ' ' | '-')
}

fn is_zone(c: char) -> bool {
    "GARBFU -".contains(c)
}

fn is_pbg(chars: &[char], i: usize) -> bool {
    let Some(s) = chars.get(i..i + 3) else {
        return false;
    };
    let digit = |c: char| c.is_ascii_digit() || c == 'X';
    let hex_digit = |c: char| digit(c) || ('A'..='F').contains(&c);
    digit(s[0]) && hex_digit(s[1]) && hex_digit(s[2])
}

fn is_allegiance(chars: &[char], i: usize) -> bool {
    match chars.get(i..i + 2) {
        Some(['-', '-']) => true,
        Some(&[a, b]) => {
            a.is_ascii_alphanumeric() && (b.is_ascii_alphanumeric() || b == '?' || b == '-')
        }
        _ => false,
    }
}

/// Ways to read the optional zone column after the remarks end at `i`:
/// each `(zone, next)` pair, preferring a zone with the longest leading
/// whitespace, then no zone at all.
fn zone_readings(chars: &[char], i: usize) -> Vec<(Option<char>, usize)> {
    let run = chars[i.min(chars.len())..]
        .iter()
        .take_while(|c| c.is_whitespace())
        .count();
    let mut readings: Vec<(Option<char>, usize)> = (1..=run)
        .rev()
        .filter_map(|k| {
            let z = *chars.get(i + k)?;
            is_zone(z).then_some((Some(z), i + k + 1))
        })
        .collect();
    readings.push((None, i));
    readings
}

fn collect(chars: &[char], start: usize, end: usize) -> String {
    chars[start..end].iter().collect()
}

fn match_after_hex(chars: &[char], hex_end: usize) -> Option<SecLine> {
    const MIN_CODES: usize = 10;
    for uwp in one_or_two_spaces(chars, hex_end) {
        if !is_uwp(chars, uwp) {
            continue;
        }
        for base_at in one_or_two_spaces(chars, uwp + Uwp::LEN) {
            let Some(&base) = chars.get(base_at).filter(|&&c| is_base(c)) else {
                continue;
            };
            for codes in one_or_two_spaces(chars, base_at + 1) {
                for codes_end in codes + MIN_CODES..=chars.len() {
                    for (zone, after_zone) in zone_readings(chars, codes_end) {
                        for pbg in one_or_two_spaces(chars, after_zone) {
                            if !is_pbg(chars, pbg) {
                                continue;
                            }
                            for alleg in one_or_two_spaces(chars, pbg + 3) {
                                if !is_allegiance(chars, alleg) {
                                    continue;
                                }
                                return Some(SecLine {
                                    uwp: collect(chars, uwp, uwp + Uwp::LEN),
                                    base,
                                    codes: collect(chars, codes, codes_end).trim().to_string(),
                                    zone,
                                    pbg: collect(chars, pbg, pbg + 3),
                                    allegiance: collect(chars, alleg, alleg + 2),
                                    rest: collect(chars, alleg + 2, chars.len()).trim().to_string(),
                                    ..SecLine::default()
                                });
                            }
                        }
                    }
                }
            }
        }
    }
    None
}

/// Split one SEC world row into its fields, or `None` if it does not fit
/// the row shape.
pub fn match_line(line: &str) -> Option<SecLine> {
    let chars: Vec<char> = line.chars().collect();
    let start = chars.iter().take_while(|c| c.is_whitespace()).count();
    let last = chars.len().checked_sub(4)?;
    (start..=last).rev().find_map(|h| {
        if !chars[h..h + 4].iter().all(char::is_ascii_digit) {
            return None;
        }
        let mut fields = match_after_hex(&chars, h + 4)?;
        fields.name = collect(&chars, start, h).trim().to_string();
        fields.hex = collect(&chars, h, h + 4);
        Some(fields)
    })
}

/// Whether the line contains something shaped like a UWP (seven word
/// characters, a dash, one more).
fn has_uwp_token(line: &str) -> bool {
    let chars: Vec<char> = line.chars().collect();
    let word = |c: &char| c.is_alphanumeric() || *c == '_';
    chars
        .windows(9)
        .any(|w| w[..7].iter().all(word) && w[7] == '-' && word(&w[8]))
}

fn is_placeholder_name(name: &str) -> bool {
    let b = name.as_bytes();
    b.len() >= 3
        && b.len() <= 4
        && (b'A'..=b'P').contains(&b[0])
        && b[1] == b'-'
        && b[2..].iter().all(u8::is_ascii_digit)
}

// ── Base codes ──────────────────────────────────────────────────

const LEGACY_BASE_DECODE: &[(&str, &str)] = &[
    ("*.2", "NS"),
    ("*.A", "NS"),
    ("*.B", "NW"),
    ("*.C", "C"),
    ("*.D", "D"),
    ("*.E", "E"),
    ("So.F", "K"),
    ("*.F", "KM"),
    ("*.G", "K"),
    ("*.H", "CK"),
    ("*.J", "K"),
    ("So.K", "KM"),
    ("*.K", "K"),
    ("*.L", "K"),
    ("*.M", "M"),
    ("*.N", "N"),
    ("*.O", "O"),
    ("*.P", "K"),
    ("*.Q", "M"),
    ("*.R", "R"),
    ("*.S", "S"),
    ("*.T", "T"),
    ("*.U", "RT"),
    ("*.V", "V"),
    ("*.W", "W"),
    ("*.X", "W"),
    ("*.Y", "D"),
    ("*.Z", "KM"),
    ("Sc.H", "H"),
    ("*.I", "I"),
];

const LEGACY_BASE_ENCODE: &[(&str, &str)] = &[
    ("*.NS", "A"),
    ("*.NW", "B"),
    ("*.C", "C"),
    ("Zh.D", "Y"),
    ("*.D", "D"),
    ("*.E", "E"),
    ("*.KM", "F"),
    ("So.K", "F"),
    ("V*.K", "G"),
    ("*.CK", "H"),
    ("So.KM", "K"),
    ("Kk.K", "K"),
    ("Hv.K", "L"),
    ("Dr.K", "P"),
    ("*.K", "J"),
    ("*.M", "M"),
    ("*.N", "N"),
    ("*.O", "O"),
    ("Dr.M", "Q"),
    ("*.R", "R"),
    ("*.S", "S"),
    ("*.T", "T"),
    ("*.RT", "U"),
    ("*.V", "V"),
    ("Zh.W", "X"),
    ("*.W", "W"),
    ("Zh.KM", "Z"),
    ("Sc.H", "H"),
    ("*.I", "I"),
];

/// Glob match where `*` stands for any run of characters.
fn glob_match(pattern: &str, text: &str) -> bool {
    match pattern.split_once('*') {
        None => pattern == text,
        Some((head, tail)) => {
            let Some(rest) = text.strip_prefix(head) else {
                return false;
            };
            (0..=rest.len())
                .filter(|&i| rest.is_char_boundary(i))
                .any(|i| glob_match(tail, &rest[i..]))
        }
    }
}

fn lookup(table: &[(&str, &'static str)], key: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|(pattern, _)| glob_match(pattern, key))
        .map(|&(_, value)| value)
}

/// Two-letter base allegiance used to key the base tables: the
/// allegiance's declared base if `metadata` knows it, otherwise its first
/// two characters.
pub fn base_allegiance<'a>(allegiance: &'a str, metadata: Option<&'a SectorMetadata>) -> &'a str {
    if let Some(base) = metadata
        .and_then(|m| m.allegiance(allegiance))
        .and_then(|a| a.base.as_deref())
    {
        return base;
    }
    allegiance
        .char_indices()
        .nth(2)
        .map_or(allegiance, |(i, _)| &allegiance[..i])
}

/// Expand a one-character legacy base code to modern codes. Unknown codes
/// are returned unchanged.
pub fn decode_legacy_bases(base_allegiance: &str, code: &str) -> String {
    lookup(LEGACY_BASE_DECODE, &format!("{base_allegiance}.{code}"))
        .unwrap_or(code)
        .to_string()
}

/// Collapse modern base codes to the one-character legacy code. Unknown
/// combinations are returned unchanged.
pub fn encode_legacy_bases(base_allegiance: &str, bases: &str) -> String {
    lookup(LEGACY_BASE_ENCODE, &format!("{base_allegiance}.{bases}"))
        .unwrap_or(bases)
        .to_string()
}

// ── Reading and writing worlds ──────────────────────────────────

/// Worlds and per-row problems from one SEC document.
#[derive(Debug, Default)]
pub struct SecWorlds {
    /// Worlds in file order.
    pub worlds: Vec<World>,
    /// Rows that looked like worlds but could not be read.
    pub errors: Vec<RowError>,
}

fn empty_if_dash(s: &str) -> &str {
    if s.trim() == "-" {
        ""
    } else {
        s.trim()
    }
}

fn world_from_sec(
    fields: &SecLine,
    line: usize,
    origin: Position,
    policy: DigitPolicy,
    metadata: Option<&SectorMetadata>,
) -> Result<World, FormatError> {
    let hex: Hex = fields.hex.parse()?;
    if !hex.is_valid() {
        return Err(FormatError::invalid(line, format!("hex {hex} is outside the sector")));
    }
    let mut name = fields.name.trim_end_matches(['.', '+']).to_string();
    if name == fields.hex || is_placeholder_name(&name) {
        name.clear();
    }
    let mut world = World::new(name, Uwp::parse_with(&fields.uwp, policy)?, Position::from_hex(origin, hex));
    world.allegiance = fields.allegiance.trim().to_string();
    world.remarks = fields.codes.clone();
    world.pbg = Pbg::parse_with(&fields.pbg, policy)?;
    world.travel_code = empty_if_dash(&fields.zone.map(String::from).unwrap_or_default()).parse()?;

    let legacy = empty_if_dash(&fields.base.to_string()).to_string();
    if !legacy.is_empty() {
        world.bases = decode_legacy_bases(base_allegiance(&world.allegiance, metadata), &legacy);
    }

    if stellar_looks_valid(&fields.rest) {
        world.stellar = fields.rest.clone();
    } else {
        warn!("line {line}: invalid stellar data {:?}", fields.rest);
    }
    Ok(world)
}

/// Read every world row of a SEC document.
///
/// Lines starting with `#`, `$`, or `@` are comments. Lines with no
/// UWP-shaped token are skipped; lines that have one but do not fit the
/// row shape are row errors.
pub fn parse_sec(
    text: &str,
    origin: Position,
    policy: DigitPolicy,
    metadata: Option<&SectorMetadata>,
) -> SecWorlds {
    let mut out = SecWorlds::default();
    for (i, line) in text.lines().enumerate() {
        let number = i + 1;
        if line.trim().is_empty() || line.starts_with(['#', '$', '@']) {
            continue;
        }
        if !has_uwp_token(line) {
            debug!("line {number}: ignoring non-UWP data");
            continue;
        }
        let result = match_line(line)
            .ok_or_else(|| FormatError::invalid(number, "line does not match the SEC layout"))
            .and_then(|fields| world_from_sec(&fields, number, origin, policy, metadata));
        match result {
            Ok(world) => out.worlds.push(world),
            Err(e) => out.errors.push(RowError::new(number, line, e)),
        }
    }
    out
}

/// Column guide written above SEC rows.
pub const SEC_HEADER: [&str; 12] = [
    " 1-14: Name",
    "15-18: HexNbr",
    "20-28: UWP",
    "   31: Bases",
    "33-47: Codes & Comments",
    "   49: Zone",
    "52-54: PBG",
    "56-57: Allegiance",
    "59-74: Stellar Data",
    "",
    "....+....1....+....2....+....3....+....4....+....5....+....6....+....7....+....8",
    "",
];

fn truncate(s: &str, max: usize) -> &str {
    s.char_indices().nth(max).map_or(s, |(i, _)| &s[..i])
}

/// Format one world as a SEC row.
///
/// Long names, remarks, and stellar data are cut to fit their columns;
/// the allegiance is written as its two-character legacy code.
pub fn sec_row(world: &World, hex: &str, metadata: Option<&SectorMetadata>) -> String {
    let legacy_allegiance = metadata
        .and_then(|m| m.allegiance(&world.allegiance))
        .map_or(world.allegiance.as_str(), |a| a.legacy_code());
    let bases = encode_legacy_bases(base_allegiance(&world.allegiance, metadata), &world.bases);
    let zone = world.travel_code.code();
    format!(
        "{:<14}{:>4} {:>9}  {:>1} {:<15} {:>1}  {:>3} {:>2} {:<15}",
        truncate(&world.name, 14),
        hex,
        world.uwp.to_string(),
        truncate(&bases, 1),
        truncate(&world.remarks, 15),
        zone,
        world.pbg.to_string(),
        truncate(legacy_allegiance, 2),
        truncate(&world.stellar, 15),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use travmap_core::{Allegiance, TravelCode};

    const REGINA: &str = "Regina        1910 A788899-C  A Ri Pa Ph An Cp     703 Im F7 V BD M3 V   ";

    #[test]
    fn matches_a_writer_row() {
        let m = match_line(REGINA).unwrap();
        assert_eq!(m.name, "Regina");
        assert_eq!(m.hex, "1910");
        assert_eq!(m.uwp, "A788899-C");
        assert_eq!(m.base, 'A');
        assert_eq!(m.codes, "Ri Pa Ph An Cp");
        assert_eq!(m.zone, Some(' '));
        assert_eq!(m.pbg, "703");
        assert_eq!(m.allegiance, "Im");
        assert_eq!(m.rest, "F7 V BD M3 V");
    }

    #[test]
    fn zone_after_short_remarks() {
        let m = match_line("Roup          2007 C7A5764-A    Fl              A  803 Im K0 V").unwrap();
        assert_eq!(m.codes, "Fl");
        assert_eq!(m.zone, Some('A'));
        assert_eq!(m.base, ' ');
    }

    #[test]
    fn digits_in_names_do_not_move_the_hex() {
        let m = match_line("Station 1234  0101 X000000-0    Ba              R  000 Na").unwrap();
        assert_eq!(m.name, "Station 1234");
        assert_eq!(m.hex, "0101");
        assert_eq!(m.rest, "");
    }

    #[test]
    fn loose_spacing() {
        let m = match_line("Efate 1810 A646930-D A Hi In Xx Yy 704 Im M1 V").unwrap();
        assert_eq!(m.name, "Efate");
        assert_eq!(m.codes, "Hi In Xx Yy");
        assert_eq!(m.zone, None);
    }

    #[test]
    fn rejects_non_rows() {
        assert!(match_line("....+....1....+....2").is_none());
        assert!(match_line("Regina 1910 A788899").is_none());
        assert!(match_line("").is_none());
    }

    #[test]
    fn base_tables() {
        assert_eq!(decode_legacy_bases("Im", "A"), "NS");
        assert_eq!(decode_legacy_bases("So", "F"), "K");
        assert_eq!(decode_legacy_bases("Im", "F"), "KM");
        assert_eq!(decode_legacy_bases("Im", "?"), "?");
        assert_eq!(encode_legacy_bases("Im", "NS"), "A");
        assert_eq!(encode_legacy_bases("Zh", "KM"), "F");
        assert_eq!(encode_legacy_bases("Zh", "W"), "X");
        assert_eq!(encode_legacy_bases("Va", "K"), "G");
        assert_eq!(encode_legacy_bases("Im", "K"), "J");
        assert_eq!(encode_legacy_bases("Im", "NSW"), "NSW");
    }

    #[test]
    fn base_allegiance_prefers_metadata() {
        let mut meta = SectorMetadata::default();
        let mut a = Allegiance::new("CsIm", "Client state");
        a.base = Some("Im".into());
        meta.allegiances.push(a);
        assert_eq!(base_allegiance("CsIm", Some(&meta)), "Im");
        assert_eq!(base_allegiance("CsIm", None), "Cs");
        assert_eq!(base_allegiance("X", None), "X");
    }

    #[test]
    fn parse_sec_collects_errors() {
        let text = "# comment\n$ dollar\n 1-14: Name\n\
                    Regina        1910 A788899-C  A Ri Pa Ph An Cp     703 Im F7 V BD M3 V\n\
                    Broken        0000 A788899-C  A Ri Pa Ph An Cp     703 Im F7 V\n\
                    Garbled  ABCDEFG-H\n\
                    A-12          0101 X000000-0    Ba                 000 Na\n";
        let parsed = parse_sec(text, Position::ORIGIN, DigitPolicy::Strict, None);
        assert_eq!(parsed.worlds.len(), 2);
        assert_eq!(parsed.errors.len(), 2);
        assert_eq!(parsed.errors[0].line_number, 5);
        assert_eq!(parsed.errors[1].line_number, 6);

        let regina = &parsed.worlds[0];
        assert_eq!(regina.bases, "NS");
        assert_eq!(regina.travel_code, TravelCode::Green);
        assert_eq!(regina.position, Position::new(18, 9));
        assert_eq!(parsed.worlds[1].name, "");
    }

    #[test]
    fn writes_fixed_columns() {
        let mut w = World::new("A very long world name", "A788899-C".parse().unwrap(), Position::ORIGIN);
        w.bases = "NS".into();
        w.remarks = "Ri Pa Ph An Cp Xx Yy".into();
        w.travel_code = TravelCode::Red;
        w.allegiance = "ImDd".into();
        w.stellar = "F7 V".into();
        let row = sec_row(&w, "0101", None);
        assert_eq!(row, "A very long wo0101 A788899-C  A Ri Pa Ph An Cp  R  000 Im F7 V           ");
        assert_eq!(match_line(&row).map(|m| m.zone), Some(Some('R')));
    }
}
