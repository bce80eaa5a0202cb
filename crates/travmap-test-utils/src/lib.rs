//! Shared fixtures and synthetic data for travmap tests and benchmarks.
//!
//! [`fixtures`] holds sample files; [`regina_worlds`] is the same data as
//! plain values, and [`synthetic_worlds`] fills a sector with deterministic
//! pseudo-random systems.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use travmap_core::{EHex, Hex, Pbg, Position, Starport, TravelCode, Uwp, World};

/// Origin of the fixture sector.
pub fn spinward_origin() -> Position {
    let (sx, sy) = fixtures::SPINWARD_MARCHES;
    Position::sector_origin(sx, sy)
}

#[allow(clippy::too_many_arguments)]
fn world(
    hex: &str,
    name: &str,
    uwp: &str,
    remarks: &str,
    ix: &str,
    ex: &str,
    cx: &str,
    nobility: &str,
    bases: &str,
    zone: &str,
    pbg: &str,
    w: u32,
    allegiance: &str,
    stellar: &str,
) -> World {
    let hex: Hex = hex.parse().expect("fixture hex");
    let mut world = World::new(
        name,
        uwp.parse().expect("fixture uwp"),
        Position::from_hex(spinward_origin(), hex),
    );
    world.remarks = remarks.into();
    world.importance = Some(ix.into());
    world.economic = Some(ex.into());
    world.cultural = Some(cx.into());
    world.nobility = (!nobility.is_empty()).then(|| nobility.into());
    world.bases = bases.into();
    world.travel_code = zone.parse().expect("fixture zone");
    world.pbg = pbg.parse().expect("fixture pbg");
    world.system_worlds = Some(w);
    world.allegiance = allegiance.into();
    world.stellar = stellar.into();
    world
}

/// The seven fixture worlds as values, in subsector-then-position order.
///
/// Resource units are left unset; only the tab-delimited fixture carries them.
pub fn regina_worlds() -> Vec<World> {
    vec![
        world("0101", "Zeycude", "C430698-9", "De Na Ni Po", "{ 0 }", "(C53-1)", "[6559]", "", "", "", "613", 8, "ZhCo", "K1 V"),
        world("0102", "Reno", "C4207B9-A", "De He Na Po", "{ 1 }", "(D6A+1)", "[4B3A]", "", "", "", "102", 10, "ZhCo", "M2 V"),
        world("1810", "Efate", "A646930-D", "Hi In", "{ 4 }", "(E9D+3)", "[AD8E]", "BEF", "NS", "", "704", 9, "ImDd", "M1 V M7 V"),
        world("1910", "Regina", "A788899-C", "Ri Pa Ph An Cp", "{ 4 }", "(D7E+5)", "[9C6D]", "BcCeF", "NS", "", "703", 8, "ImDd", "F7 V BD M3 V"),
        world("2007", "Roup", "C7A5764-A", "Fl", "{ 0 }", "(A46+1)", "[5857]", "", "", "A", "803", 7, "ImDd", "K0 V"),
        world("1716", "Ruie", "B5546A9-A", "Ag", "{ 1 }", "(B56+2)", "[6858]", "B", "S", "", "310", 11, "ImDd", "G5 V"),
        world("2520", "", "X420000-0", "Ba De Po", "{ -3 }", "(300-5)", "[0000]", "", "", "R", "004", 5, "Na", "M3 V"),
    ]
}

/// Resource units of [`regina_worlds`], in the same order.
pub const REGINA_RESOURCE_UNITS: [i64; 7] = [-180, 1430, 4862, 4108, 240, 660, 0];

/// Deterministic pseudo-random digit in `0..=max`.
fn digit(seed: u64, salt: u64, max: u8) -> EHex {
    let v = seed.wrapping_mul(6364136223846793007).wrapping_add(salt.wrapping_mul(1442695040888963407));
    let v = (v >> 33) % (u64::from(max) + 1);
    EHex::new(v as u8).unwrap_or(EHex::ZERO)
}

/// `count` worlds spread over distinct hexes of the sector at `origin`.
///
/// Positions are distinct for any `count` up to 1280 (one per hex).
/// The same `(origin, count, seed)` always yields the same worlds.
pub fn synthetic_worlds(origin: Position, count: usize, seed: u64) -> Vec<World> {
    const HEXES: u64 = 32 * 40;
    const STRIDE: u64 = 7919;
    const STARPORTS: [Starport; 6] = [
        Starport::A,
        Starport::B,
        Starport::C,
        Starport::D,
        Starport::E,
        Starport::X,
    ];
    const ZONES: [TravelCode; 3] = [TravelCode::Green, TravelCode::Amber, TravelCode::Red];

    (0..count.min(HEXES as usize) as u64)
        .map(|i| {
            let cell = (i * STRIDE + seed) % HEXES;
            let local = Position::new((cell % 32) as i32, (cell / 32) as i32);
            let s = seed ^ i.wrapping_mul(0x9E37_79B9_7F4A_7C15);
            let uwp = Uwp {
                starport: STARPORTS[(s % 6) as usize],
                size: digit(s, 1, 10),
                atmosphere: digit(s, 2, 15),
                hydrographics: digit(s, 3, 10),
                population: digit(s, 4, 12),
                government: digit(s, 5, 15),
                law: digit(s, 6, 18),
                tech: digit(s, 7, 20),
            };
            let mut w = World::new(format!("World {i}"), uwp, origin + local);
            w.pbg = Pbg {
                population_multiplier: digit(s, 8, 9),
                belts: digit(s, 9, 3),
                gas_giants: digit(s, 10, 4),
            };
            w.travel_code = ZONES[((s >> 7) % 3) as usize];
            w.allegiance = if s % 5 == 0 { "ZhCo".into() } else { "ImDd".into() };
            w.stellar = "G2 V".into();
            w
        })
        .collect()
}
