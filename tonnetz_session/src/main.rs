// Tonnetz walk — headless CLI entry point.
//
// Builds the lattice, walks a straight line across it west to east, and
// reports every chord region the walk passes through. The walk is
// captured as a MIDI file (one beat per step) and, optionally, the full
// triangle list as JSON for inspection.
//
// Usage:
//   cargo run -p tonnetz_session -- [output.mid] [--config FILE] [--steps N]
//     [--tempo BPM] [--z Z] [--json FILE]

use std::path::Path;
use std::process::ExitCode;

use tonnetz_lattice::config::LatticeConfig;
use tonnetz_lattice::lattice::Lattice;
use tonnetz_session::midi::{TimedChange, write_midi};
use tonnetz_session::region::RegionChange;
use tonnetz_session::session::{NullHighlight, Session};
use tonnetz_session::voice::RecordingSink;

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();

    let output_path = args
        .get(1)
        .filter(|s| !s.starts_with("--"))
        .map(|s| s.as_str())
        .unwrap_or("walk.mid");
    let steps: u32 = parse_flag(&args, "--steps").unwrap_or(64);
    let tempo: u16 = parse_flag(&args, "--tempo").unwrap_or(120);
    let walk_z: f64 = parse_flag(&args, "--z").unwrap_or(0.0);
    let config_path: Option<String> = parse_flag(&args, "--config");
    let json_path: Option<String> = parse_flag(&args, "--json");

    println!("=== Tonnetz Walk ===");

    // Load config
    println!("[1/3] Building lattice...");
    let config = match &config_path {
        Some(path) => match std::fs::read_to_string(path) {
            Ok(json) => match LatticeConfig::from_json(&json) {
                Ok(c) => {
                    println!("  Loaded config from {path}.");
                    c
                }
                Err(e) => {
                    eprintln!("  Bad config {path}: {e}");
                    return ExitCode::FAILURE;
                }
            },
            Err(e) => {
                eprintln!("  Cannot read {path}: {e}");
                return ExitCode::FAILURE;
            }
        },
        None => {
            println!("  Using default config.");
            LatticeConfig::default()
        }
    };

    let lattice = match Lattice::from_config(&config) {
        Ok(l) => l,
        Err(e) => {
            eprintln!("  Invalid config: {e}");
            return ExitCode::FAILURE;
        }
    };
    println!(
        "  {}x{} cells, {} triangles.",
        config.grid_width,
        config.grid_height,
        lattice.triangles.len()
    );

    if let Some(path) = &json_path {
        match serde_json::to_string_pretty(&lattice.triangles)
            .map_err(|e| e.to_string())
            .and_then(|json| std::fs::write(path, json).map_err(|e| e.to_string()))
        {
            Ok(()) => println!("  Triangle list written to {path}."),
            Err(e) => {
                eprintln!("  Error writing {path}: {e}");
                return ExitCode::FAILURE;
            }
        }
    }

    // Walk a straight line just past both edges of the lattice, so the
    // capture includes entering and leaving it.
    println!("[2/3] Walking {steps} steps at z = {walk_z}...");
    let (min_x, max_x) = x_extent(&lattice);
    let start_x = min_x - config.triangle_size;
    let end_x = max_x + config.triangle_size;

    let mut session = Session::new(RecordingSink::default(), NullHighlight);
    let mut changes: Vec<TimedChange> = Vec::new();
    for step in 0..=steps {
        let x = start_x + (end_x - start_x) * step as f64 / steps as f64;
        if let Some(change) = session.tick(&lattice, x, walk_z) {
            match &change {
                RegionChange::Entered(snapshot) => {
                    println!("  [beat {step:>3}] {}", snapshot.display_label());
                }
                RegionChange::Exited => println!("  [beat {step:>3}] (off lattice)"),
            }
            changes.push(TimedChange { beat: step, change });
        }
    }
    session.stop();
    println!("  {} region changes.", changes.len());

    println!("[3/3] Writing MIDI to {output_path}...");
    match write_midi(&changes, tempo, Path::new(output_path)) {
        Ok(()) => {
            println!("  Done. Play with: timidity {output_path} (or any MIDI player)");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("  Error writing MIDI: {e}");
            ExitCode::FAILURE
        }
    }
}

fn x_extent(lattice: &Lattice) -> (f64, f64) {
    let xs = lattice
        .triangles
        .iter()
        .flat_map(|t| t.vertices.iter())
        .map(|v| v.pos.x);
    (
        xs.clone().fold(f64::INFINITY, f64::min),
        xs.fold(f64::NEG_INFINITY, f64::max),
    )
}

fn parse_flag<T: std::str::FromStr>(args: &[String], flag: &str) -> Option<T> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|v| v.parse().ok())
}
