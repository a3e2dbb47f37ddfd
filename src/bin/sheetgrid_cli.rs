//! CLI tool for sheetgrid - replays a scripted event sequence and outputs JSON
//!
//! The script is `{ "config"?: {...}, "sheets": [...], "events": [...] }`.
//! The output holds the final grid snapshot, every command issued, and any
//! events that failed.
//!
//! Usage:
//!   sheetgrid_cli <script.json>              # Output JSON to stdout
//!   sheetgrid_cli <script.json> -o out.json  # Output JSON to file

#![allow(clippy::exit)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::indexing_slicing)]

use std::env;
use std::fs;
use std::io::{self, Write};

use serde::{Deserialize, Serialize};
use sheetgrid::{GridConfig, GridEvent, GridSnapshot, IssuedCommand, SheetData, SheetGrid};

#[derive(Deserialize)]
struct Script {
    #[serde(default)]
    config: GridConfig,
    sheets: Vec<SheetData>,
    #[serde(default)]
    events: Vec<GridEvent>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EventError {
    event_index: usize,
    message: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Replay {
    snapshot: GridSnapshot,
    commands: Vec<IssuedCommand>,
    errors: Vec<EventError>,
}

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: sheetgrid_cli <script.json> [-o output.json]");
        std::process::exit(1);
    }

    let input_path = &args[1];
    let output_path = if args.len() > 3 && args[2] == "-o" {
        Some(&args[3])
    } else {
        None
    };

    // Read script
    let text = match fs::read_to_string(input_path) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Error reading {}: {}", input_path, e);
            std::process::exit(1);
        }
    };
    let script: Script = match serde_json::from_str(&text) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error parsing script: {}", e);
            std::process::exit(1);
        }
    };

    let mut grid = match SheetGrid::new(script.config, script.sheets) {
        Ok(g) => g,
        Err(e) => {
            eprintln!("Error creating grid: {}", e);
            std::process::exit(1);
        }
    };

    // Replay; a failing event is recorded and the rest still run
    let mut issued = Vec::new();
    let mut errors = Vec::new();
    for (event_index, event) in script.events.into_iter().enumerate() {
        if let Err(e) = grid.handle(event, &mut issued) {
            eprintln!("Event {}: {}", event_index, e);
            errors.push(EventError {
                event_index,
                message: e.to_string(),
            });
        }
    }

    let replay = Replay {
        snapshot: grid.snapshot(),
        commands: issued.into_iter().map(IssuedCommand::from).collect(),
        errors,
    };

    // Serialize to JSON
    let json = match serde_json::to_string_pretty(&replay) {
        Ok(j) => j,
        Err(e) => {
            eprintln!("Error serializing JSON: {}", e);
            std::process::exit(1);
        }
    };

    // Output
    match output_path {
        Some(path) => {
            if let Err(e) = fs::write(path, &json) {
                eprintln!("Error writing {}: {}", path, e);
                std::process::exit(1);
            }
            eprintln!("Written: {}", path);
        }
        None => {
            io::stdout().write_all(json.as_bytes()).unwrap();
            println!();
        }
    }
}
