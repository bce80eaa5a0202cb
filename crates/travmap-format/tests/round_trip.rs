//! End-to-end reads and writes through the extension registry.

use proptest::prelude::*;
use travmap_core::{SectorMetadata, World};
use travmap_format::{
    serialize_sector, try_parse_sector, write_msec, LineEnding, MsecHeader, ParseOptions,
    SerializeOptions, TableKind,
};
use travmap_space::{assemble, Sector, WorldHolder};
use travmap_test_utils::{fixtures, regina_worlds, spinward_origin, synthetic_worlds};

// ── Helpers ─────────────────────────────────────────────────────

fn spinward() -> ParseOptions {
    let (sx, sy) = fixtures::SPINWARD_MARCHES;
    ParseOptions::default().at(sx, sy)
}

fn worlds_of(sector: &Sector) -> Vec<World> {
    sector.worlds().cloned().collect()
}

fn synthetic_sector(count: usize, seed: u64) -> Sector {
    let mut info = SectorMetadata::default();
    info.names.push("Synthetic".into());
    info.abbreviation = Some("Synt".into());
    assemble(spinward_origin(), synthetic_worlds(spinward_origin(), count, seed), info).sector
}

// ── Fixtures ────────────────────────────────────────────────────

#[test]
fn every_table_layout_reads_the_same_systems() {
    let tab = try_parse_sector("tab", fixtures::TAB_DELIMITED, None, &spinward()).unwrap();
    let col = try_parse_sector("txt", fixtures::SECOND_SURVEY, None, &spinward()).unwrap();
    let sec = try_parse_sector("sec", fixtures::LEGACY_SEC, None, &spinward()).unwrap();

    assert_eq!(tab.table_kind, Some(TableKind::Tab));
    assert_eq!(col.table_kind, Some(TableKind::Column));
    assert_eq!(sec.table_kind, Some(TableKind::Sec));

    let positions = |s: &Sector| s.worlds().map(|w| (w.position, w.uwp)).collect::<Vec<_>>();
    assert_eq!(positions(&tab.sector), positions(&col.sector));
    assert_eq!(positions(&sec.sector), positions(&col.sector));
}

#[test]
fn metadata_file_overrides_and_names_subsectors() {
    let parsed = try_parse_sector(
        "sec",
        fixtures::LEGACY_SEC,
        Some(fixtures::SPINWARD_MSEC),
        &spinward(),
    )
    .unwrap();
    let sector = &parsed.sector;
    assert_eq!(sector.name(), Some("Spinward Marches"));
    assert_eq!(sector.subsector('A').and_then(|s| s.name()), Some("Cronor"));
    assert_eq!(sector.sector_metadata().routes.len(), 2);

    let regina = sector.worlds().find(|w| w.name == "Regina").unwrap();
    assert_eq!(regina.bases, "NS");
    assert_eq!(regina.allegiance, "Im");
}

#[test]
fn bad_rows_do_not_abort_the_read() {
    let mut text = fixtures::TAB_DELIMITED.to_string();
    text.push_str("Spin\tH\t9999\tNowhere\tA000000-0\t\t\t\t000\tNa\t\t\t\t\t\t\t\n");
    text.push_str("Spin\tH\t2521\tBroken\tnot-a-uwp\t\t\t\t000\tNa\t\t\t\t\t\t\t\n");

    let parsed = try_parse_sector("tsv", &text, None, &spinward()).unwrap();
    assert_eq!(parsed.sector.world_count(), 7);
    let lines: Vec<usize> = parsed.row_errors.iter().map(|e| e.line_number).collect();
    assert_eq!(lines, vec![9, 10]);
}

#[test]
fn fixtures_survive_a_full_cycle() {
    let parsed = try_parse_sector(
        "txt",
        fixtures::SECOND_SURVEY,
        Some(fixtures::SPINWARD_MSEC),
        &spinward(),
    )
    .unwrap();
    let options = SerializeOptions::default();
    assert_eq!(
        serialize_sector(&parsed.sector, "txt", &options).unwrap(),
        fixtures::SECOND_SURVEY
    );

    let msec = write_msec(
        parsed.sector.sector_metadata(),
        &MsecHeader::now(),
        LineEnding::Lf,
    );
    let again = try_parse_sector("txt", fixtures::SECOND_SURVEY, Some(&msec), &spinward()).unwrap();
    assert_eq!(again.sector, parsed.sector);

    let mut expected = regina_worlds();
    expected.sort_by_key(|w| (w.subsector_letter(), w.position));
    assert_eq!(worlds_of(&again.sector), expected);
}

// ── Properties ──────────────────────────────────────────────────

proptest! {
    #[test]
    fn tables_preserve_synthetic_worlds(count in 1usize..200, seed in any::<u64>()) {
        let sector = synthetic_sector(count, seed);
        let options = SerializeOptions::default();

        for ext in ["tab", "txt"] {
            let text = serialize_sector(&sector, ext, &options).unwrap();
            let back = try_parse_sector(ext, &text, None, &spinward()).unwrap();
            prop_assert!(back.row_errors.is_empty());
            prop_assert_eq!(worlds_of(&back.sector), worlds_of(&sector));
        }
    }

    #[test]
    fn sec_preserves_profiles(count in 1usize..200, seed in any::<u64>()) {
        let sector = synthetic_sector(count, seed);
        let text = serialize_sector(&sector, "sec", &SerializeOptions::default()).unwrap();
        let back = try_parse_sector("sec", &text, None, &spinward()).unwrap();
        prop_assert!(back.row_errors.is_empty());

        let profile = |w: &World| (w.position, w.uwp, w.pbg, w.travel_code);
        let got: Vec<_> = back.sector.worlds().map(profile).collect();
        let want: Vec<_> = sector.worlds().map(profile).collect();
        prop_assert_eq!(got, want);
    }
}
