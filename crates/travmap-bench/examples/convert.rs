//! Convert a sector file between layouts.
//!
//! ```text
//! RUST_LOG=info cargo run -p travmap-bench --example convert -- \
//!     spin.txt sec [spin.msec] [SX SY]
//! ```
//!
//! Reads the world file (and optional MSEC metadata), prints the sector
//! in the layout named by the target extension, and reports skipped rows
//! on stderr.

use std::process::ExitCode;

use log::{error, info, warn};
use travmap_format::{serialize_sector, try_parse_sector, ParseOptions, SerializeOptions};
use travmap_space::WorldHolder;

fn extension(path: &str) -> &str {
    path.rsplit_once('.').map(|(_, ext)| ext).unwrap_or_default()
}

fn run(args: &[String]) -> Result<(), Box<dyn std::error::Error>> {
    let [input, target, rest @ ..] = args else {
        return Err("usage: convert <world-file> <target-ext> [metadata-file] [sx sy]".into());
    };

    let (metadata_path, location) = match rest {
        [] => (None, None),
        [meta] => (Some(meta), None),
        [sx, sy] => (None, Some((sx, sy))),
        [meta, sx, sy, ..] => (Some(meta), Some((sx, sy))),
    };

    let mut options = ParseOptions::lenient();
    if let Some((sx, sy)) = location {
        options = options.at(sx.parse()?, sy.parse()?);
    }

    let text = std::fs::read_to_string(input)?;
    let metadata = metadata_path.map(std::fs::read_to_string).transpose()?;
    let parsed = try_parse_sector(extension(input), &text, metadata.as_deref(), &options)?;

    for row in &parsed.row_errors {
        warn!("{row}");
    }
    for world in &parsed.orphans {
        warn!("world {:?} at {:?} lies outside the sector", world.name, world.position);
    }
    info!(
        "{} worlds read from {input}",
        parsed.sector.world_count()
    );

    print!("{}", serialize_sector(&parsed.sector, target, &SerializeOptions::default())?);
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
